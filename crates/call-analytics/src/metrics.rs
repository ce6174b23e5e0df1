//! The nine metric calculators.
//!
//! Each calculator is a pure, total function over the filtered snapshot:
//! no calculator depends on another, every division is guarded, and
//! per-day/per-agent/per-language tallies accumulate through `BTreeMap` so
//! iteration order and tie-breaking are deterministic.

use crate::extract::{extract_agent_name, extract_date};
use call_domain::{
    AgentPerformance, ConfidenceBucket, DailyVolume, DurationBreakdown, HourlyVolume,
    LanguageInsight, PerformanceMetrics, RawRecord, WeekdayVolume, WeeklyComparison,
    UNKNOWN_LABEL, WEEKDAY_NAMES,
};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use std::collections::BTreeMap;

/// Confidence histogram bucket labels, highest range first. A confidence
/// exactly at a boundary lands in the higher range: 0.9 counts as "90-100".
pub const CONFIDENCE_RANGES: [&str; 5] = ["90-100", "80-90", "70-80", "60-70", "<60"];

/// Calls shorter than this many seconds classify as quick.
const QUICK_CALL_SECS: f64 = 120.0;
/// Calls longer than this many seconds classify as long; the duration cap
/// in the agent score formula uses the same knee.
const LONG_CALL_SECS: f64 = 300.0;

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Blend of mean confidence and normalized mean duration, scaled to 0..100.
/// Duration contribution saturates at the long-call knee so marathon calls
/// do not dominate the ranking.
#[must_use]
pub fn performance_score(avg_confidence: f64, avg_duration_secs: f64) -> f64 {
    (avg_confidence * 0.6 + avg_duration_secs.min(LONG_CALL_SECS) / LONG_CALL_SECS * 0.4) * 100.0
}

#[derive(Default)]
struct GroupAccumulator {
    calls: u64,
    duration_sum: f64,
    confidence_sum: f64,
}

impl GroupAccumulator {
    fn add(&mut self, record: &RawRecord) {
        self.calls += 1;
        self.duration_sum += record.duration_secs();
        self.confidence_sum += record.confidence();
    }

    #[allow(clippy::cast_precision_loss)]
    fn avg_duration(&self) -> f64 {
        ratio(self.duration_sum, self.calls as f64)
    }

    #[allow(clippy::cast_precision_loss)]
    fn avg_confidence(&self) -> f64 {
        ratio(self.confidence_sum, self.calls as f64)
    }
}

/// Call volume per distinct calendar day, ascending by date.
#[must_use]
pub fn volume_trend(records: &[RawRecord]) -> Vec<DailyVolume> {
    let mut days: BTreeMap<NaiveDate, GroupAccumulator> = BTreeMap::new();
    for record in records {
        days.entry(extract_date(record).date_naive())
            .or_default()
            .add(record);
    }

    days.into_iter()
        .map(|(date, acc)| DailyVolume {
            date,
            calls: acc.calls,
            avg_duration_secs: acc.avg_duration(),
        })
        .collect()
}

/// Scalar performance summary: totals, means, success rate, and
/// per-language call counts.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn performance_metrics(records: &[RawRecord]) -> PerformanceMetrics {
    let total = records.len() as f64;
    let mut duration_sum = 0.0;
    let mut confidence_sum = 0.0;
    let mut successes = 0u64;
    let mut calls_by_language: BTreeMap<String, u64> = BTreeMap::new();

    for record in records {
        duration_sum += record.duration_secs();
        confidence_sum += record.confidence();
        if record.confidence() > 0.5 {
            successes += 1;
        }
        let language = record.language().unwrap_or(UNKNOWN_LABEL).to_string();
        *calls_by_language.entry(language).or_insert(0) += 1;
    }

    PerformanceMetrics {
        total_calls: records.len() as u64,
        avg_duration_secs: ratio(duration_sum, total),
        avg_confidence: ratio(confidence_sum, total),
        success_rate_pct: round2(ratio(successes as f64, total) * 100.0),
        calls_by_language,
    }
}

/// Per-agent aggregates ranked descending by blended score; records with no
/// derivable agent group under "Unknown". Score ties keep alphabetical
/// agent order.
#[must_use]
pub fn agent_performance(records: &[RawRecord]) -> Vec<AgentPerformance> {
    let mut agents: BTreeMap<String, GroupAccumulator> = BTreeMap::new();
    for record in records {
        let agent = extract_agent_name(record).unwrap_or_else(|| UNKNOWN_LABEL.to_string());
        agents.entry(agent).or_default().add(record);
    }

    let mut ranked: Vec<AgentPerformance> = agents
        .into_iter()
        .map(|(agent, acc)| {
            let avg_confidence = acc.avg_confidence();
            let avg_duration_secs = acc.avg_duration();
            AgentPerformance {
                agent,
                calls: acc.calls,
                avg_confidence,
                avg_duration_secs,
                score: round2(performance_score(avg_confidence, avg_duration_secs)),
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Call count per hour of day: always exactly 24 buckets, hours 0 through
/// 23, zero-initialized.
#[must_use]
pub fn hourly_distribution(records: &[RawRecord]) -> Vec<HourlyVolume> {
    let mut buckets = [0u64; 24];
    for record in records {
        buckets[extract_date(record).hour() as usize] += 1;
    }

    buckets
        .iter()
        .enumerate()
        .map(|(hour, &calls)| HourlyVolume {
            #[allow(clippy::cast_possible_truncation)]
            hour: hour as u8,
            calls,
        })
        .collect()
}

/// Count and mean duration per weekday, aggregated across all weeks in
/// range: always exactly 7 buckets in Monday-to-Sunday order.
#[must_use]
pub fn weekday_trend(records: &[RawRecord]) -> Vec<WeekdayVolume> {
    let mut buckets: [GroupAccumulator; 7] = Default::default();
    for record in records {
        let index = extract_date(record).weekday().num_days_from_monday() as usize;
        buckets[index].add(record);
    }

    WEEKDAY_NAMES
        .iter()
        .zip(buckets.iter())
        .map(|(weekday, acc)| WeekdayVolume {
            weekday: (*weekday).to_string(),
            calls: acc.calls,
            avg_duration_secs: acc.avg_duration(),
        })
        .collect()
}

/// Rolling week-over-week comparison anchored at the filter range end:
/// "this week" is the 7 days up to and including the anchor, "last week"
/// the 7 days before that. Growth is 0 when last week had no calls.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn weekly_comparison(records: &[RawRecord], anchor: DateTime<Utc>) -> WeeklyComparison {
    let week = Duration::days(7);
    let this_week_start = anchor - week;
    let last_week_start = anchor - week - week;

    let mut this_week = 0u64;
    let mut last_week = 0u64;
    for record in records {
        let ts = extract_date(record);
        if ts > this_week_start && ts <= anchor {
            this_week += 1;
        } else if ts > last_week_start && ts <= this_week_start {
            last_week += 1;
        }
    }

    let growth_pct = if last_week == 0 {
        0.0
    } else {
        round2((this_week as f64 - last_week as f64) / last_week as f64 * 100.0)
    };

    WeeklyComparison {
        this_week,
        last_week,
        growth_pct,
    }
}

fn confidence_bucket_index(confidence: f64) -> usize {
    if confidence >= 0.9 {
        0
    } else if confidence >= 0.8 {
        1
    } else if confidence >= 0.7 {
        2
    } else if confidence >= 0.6 {
        3
    } else {
        4
    }
}

/// Five-range confidence histogram. Bucket counts always sum to the record
/// count; percentages are of the whole set.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn confidence_histogram(records: &[RawRecord]) -> Vec<ConfidenceBucket> {
    let mut counts = [0u64; 5];
    for record in records {
        counts[confidence_bucket_index(record.confidence())] += 1;
    }

    let total = records.len() as f64;
    CONFIDENCE_RANGES
        .iter()
        .zip(counts.iter())
        .map(|(range, &calls)| ConfidenceBucket {
            range: (*range).to_string(),
            calls,
            pct: round2(ratio(calls as f64, total) * 100.0),
        })
        .collect()
}

/// Quick/standard/long classification plus overall mean duration.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn duration_breakdown(records: &[RawRecord]) -> DurationBreakdown {
    let mut breakdown = DurationBreakdown::default();
    let mut duration_sum = 0.0;

    for record in records {
        let secs = record.duration_secs();
        duration_sum += secs;
        if secs < QUICK_CALL_SECS {
            breakdown.quick += 1;
        } else if secs <= LONG_CALL_SECS {
            breakdown.standard += 1;
        } else {
            breakdown.long += 1;
        }
    }

    breakdown.avg_duration_secs = ratio(duration_sum, records.len() as f64);
    breakdown
}

/// Per-language aggregates ranked descending by call count; records without
/// a language group under "Unknown". Count ties keep alphabetical order.
#[must_use]
pub fn language_insights(records: &[RawRecord]) -> Vec<LanguageInsight> {
    let mut languages: BTreeMap<String, GroupAccumulator> = BTreeMap::new();
    for record in records {
        let language = record.language().unwrap_or(UNKNOWN_LABEL).to_string();
        languages.entry(language).or_default().add(record);
    }

    let mut ranked: Vec<LanguageInsight> = languages
        .into_iter()
        .map(|(language, acc)| LanguageInsight {
            language,
            calls: acc.calls,
            avg_confidence: acc.avg_confidence(),
            avg_duration_secs: acc.avg_duration(),
        })
        .collect();

    ranked.sort_by(|a, b| b.calls.cmp(&a.calls));
    ranked
}
