//! Demo fallback generator.
//!
//! When the record source returns nothing usable, the engine substitutes a
//! full, shape-valid [`AnalyticsResult`] so the presentation layer never
//! sees a malformed or empty aggregate. The structure is deterministic
//! (fixed roster, fixed proportions), only the magnitudes are randomized.
//! Results carry `synthetic = true`.

use crate::forecast::forecast_volume;
use crate::metrics::{performance_score, round2, CONFIDENCE_RANGES};
use call_domain::{
    AgentPerformance, AnalyticsResult, ConfidenceBucket, DailyVolume, DurationBreakdown,
    HourlyVolume, LanguageInsight, PerformanceMetrics, TimeRange, WeekdayVolume,
    WeeklyComparison, WEEKDAY_NAMES,
};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use rand::Rng;
use std::collections::BTreeMap;

struct DemoAgent {
    name: &'static str,
    call_share: f64,
    avg_confidence: f64,
    avg_duration_secs: f64,
}

/// Fixed synthetic roster with fixed proportional call shares.
const DEMO_AGENTS: [DemoAgent; 4] = [
    DemoAgent {
        name: "Sarah Chen",
        call_share: 0.30,
        avg_confidence: 0.92,
        avg_duration_secs: 210.0,
    },
    DemoAgent {
        name: "Marcus Webb",
        call_share: 0.25,
        avg_confidence: 0.88,
        avg_duration_secs: 185.0,
    },
    DemoAgent {
        name: "Priya Nair",
        call_share: 0.25,
        avg_confidence: 0.85,
        avg_duration_secs: 240.0,
    },
    DemoAgent {
        name: "Tomas Rivera",
        call_share: 0.20,
        avg_confidence: 0.81,
        avg_duration_secs: 160.0,
    },
];

/// Per-language fixed shares and quality constants.
const DEMO_LANGUAGES: [(&str, f64, f64, f64); 3] = [
    ("en", 0.55, 0.90, 205.0),
    ("es", 0.30, 0.86, 220.0),
    ("de", 0.15, 0.83, 190.0),
];

/// Confidence-histogram shares for the four highest buckets; the lowest
/// bucket takes the remainder so counts sum exactly.
const CONFIDENCE_SHARES: [f64; 4] = [0.42, 0.31, 0.15, 0.08];

/// Daily call baselines: weekends draw from a strictly lower band.
const WEEKDAY_CALLS_MIN: u64 = 22;
const WEEKDAY_CALLS_MAX: u64 = 48;
const WEEKEND_CALLS_MIN: u64 = 6;
const WEEKEND_CALLS_MAX: u64 = 18;

/// Hour-of-day weights: a business-hours curve with a lunchtime peak.
const HOUR_WEIGHTS: [u64; 24] = [
    0, 0, 0, 0, 0, 1, 2, 4, 7, 9, 10, 11, 12, 11, 10, 9, 7, 5, 3, 2, 1, 1, 0, 0,
];

/// Quick/standard call shares for the duration classification; long calls
/// take the remainder.
const QUICK_SHARE: f64 = 0.28;
const STANDARD_SHARE: f64 = 0.55;

/// Demo ranges longer than this are truncated; the fallback exists to fill
/// a dashboard, not to fabricate years of history.
const MAX_DEMO_DAYS: usize = 366;

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn share_of(total: u64, share: f64) -> u64 {
    (total as f64 * share).round() as u64
}

/// Produce a complete synthetic analytics result for the requested range.
///
/// All shape invariants of the live path hold: 24 hourly buckets summing to
/// the synthetic call total, 7 weekday buckets Monday through Sunday, 5
/// confidence buckets summing to the total, agents ranked by score, and a
/// 7-entry forecast whenever the range spans at least 7 days.
#[must_use]
#[allow(clippy::too_many_lines, clippy::cast_precision_loss)]
pub fn fallback_result(range: &TimeRange) -> AnalyticsResult {
    let mut rng = rand::thread_rng();

    // Weekday-aware daily volume curve.
    let mut volume_trend: Vec<DailyVolume> = Vec::new();
    let mut date = range.start.date_naive();
    let end_date = range.end.date_naive().max(date);
    while date <= end_date && volume_trend.len() < MAX_DEMO_DAYS {
        let weekend = matches!(date.weekday().num_days_from_monday(), 5 | 6);
        let calls = if weekend {
            rng.gen_range(WEEKEND_CALLS_MIN..=WEEKEND_CALLS_MAX)
        } else {
            rng.gen_range(WEEKDAY_CALLS_MIN..=WEEKDAY_CALLS_MAX)
        };
        volume_trend.push(DailyVolume {
            date,
            calls,
            avg_duration_secs: rng.gen_range(140.0..260.0),
        });
        date += Duration::days(1);
    }

    let total: u64 = volume_trend.iter().map(|day| day.calls).sum();

    AnalyticsResult {
        generated_at: Utc::now(),
        performance: synthetic_performance(total),
        agent_performance: synthetic_agents(total),
        hourly_distribution: synthetic_hourly(total),
        weekday_trend: synthetic_weekdays(&volume_trend),
        weekly_comparison: synthetic_weekly(&volume_trend, end_date),
        confidence_histogram: synthetic_confidence(total),
        duration_breakdown: synthetic_durations(total),
        language_insights: synthetic_languages(total),
        forecast: forecast_volume(&volume_trend),
        volume_trend,
        synthetic: true,
    }
}

fn synthetic_performance(total: u64) -> PerformanceMetrics {
    let avg_confidence: f64 = DEMO_AGENTS
        .iter()
        .map(|agent| agent.call_share * agent.avg_confidence)
        .sum();
    let avg_duration_secs: f64 = DEMO_AGENTS
        .iter()
        .map(|agent| agent.call_share * agent.avg_duration_secs)
        .sum();

    let calls_by_language: BTreeMap<String, u64> = synthetic_languages(total)
        .into_iter()
        .map(|insight| (insight.language, insight.calls))
        .collect();

    PerformanceMetrics {
        total_calls: total,
        avg_duration_secs,
        avg_confidence,
        // Every roster confidence constant clears the 0.5 success bar.
        success_rate_pct: 100.0,
        calls_by_language,
    }
}

fn synthetic_agents(total: u64) -> Vec<AgentPerformance> {
    let mut assigned = 0u64;
    let mut agents: Vec<AgentPerformance> = DEMO_AGENTS
        .iter()
        .enumerate()
        .map(|(i, agent)| {
            let calls = if i == DEMO_AGENTS.len() - 1 {
                total.saturating_sub(assigned)
            } else {
                let share = share_of(total, agent.call_share);
                assigned += share;
                share
            };
            AgentPerformance {
                agent: agent.name.to_string(),
                calls,
                avg_confidence: agent.avg_confidence,
                avg_duration_secs: agent.avg_duration_secs,
                score: round2(performance_score(agent.avg_confidence, agent.avg_duration_secs)),
            }
        })
        .collect();

    agents.sort_by(|a, b| b.score.total_cmp(&a.score));
    agents
}

fn synthetic_hourly(total: u64) -> Vec<HourlyVolume> {
    let weight_sum: u64 = HOUR_WEIGHTS.iter().sum();
    let peak_hour = 12;

    let mut buckets: Vec<HourlyVolume> = HOUR_WEIGHTS
        .iter()
        .enumerate()
        .map(|(hour, &weight)| HourlyVolume {
            #[allow(clippy::cast_possible_truncation)]
            hour: hour as u8,
            calls: total * weight / weight_sum,
        })
        .collect();

    // Integer division leaves a remainder; park it on the peak hour so the
    // histogram still sums to the call total.
    let spread: u64 = buckets.iter().map(|bucket| bucket.calls).sum();
    buckets[peak_hour].calls += total - spread;
    buckets
}

fn synthetic_weekdays(volume_trend: &[DailyVolume]) -> Vec<WeekdayVolume> {
    let mut calls = [0u64; 7];
    let mut duration_sums = [0.0f64; 7];
    for day in volume_trend {
        let index = day.date.weekday().num_days_from_monday() as usize;
        calls[index] += day.calls;
        #[allow(clippy::cast_precision_loss)]
        {
            duration_sums[index] += day.avg_duration_secs * day.calls as f64;
        }
    }

    WEEKDAY_NAMES
        .iter()
        .enumerate()
        .map(|(index, weekday)| WeekdayVolume {
            weekday: (*weekday).to_string(),
            calls: calls[index],
            #[allow(clippy::cast_precision_loss)]
            avg_duration_secs: if calls[index] == 0 {
                0.0
            } else {
                duration_sums[index] / calls[index] as f64
            },
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn synthetic_weekly(volume_trend: &[DailyVolume], anchor: NaiveDate) -> WeeklyComparison {
    let this_week_start = anchor - Duration::days(7);
    let last_week_start = anchor - Duration::days(14);

    let mut this_week = 0u64;
    let mut last_week = 0u64;
    for day in volume_trend {
        if day.date > this_week_start && day.date <= anchor {
            this_week += day.calls;
        } else if day.date > last_week_start && day.date <= this_week_start {
            last_week += day.calls;
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

#[allow(clippy::cast_precision_loss)]
fn synthetic_confidence(total: u64) -> Vec<ConfidenceBucket> {
    let mut assigned = 0u64;
    CONFIDENCE_RANGES
        .iter()
        .enumerate()
        .map(|(i, range)| {
            let calls = if i == CONFIDENCE_RANGES.len() - 1 {
                total.saturating_sub(assigned)
            } else {
                let share = share_of(total, CONFIDENCE_SHARES[i]);
                assigned += share;
                share
            };
            ConfidenceBucket {
                range: (*range).to_string(),
                calls,
                pct: if total == 0 {
                    0.0
                } else {
                    round2(calls as f64 / total as f64 * 100.0)
                },
            }
        })
        .collect()
}

fn synthetic_durations(total: u64) -> DurationBreakdown {
    let quick = share_of(total, QUICK_SHARE);
    let standard = share_of(total, STANDARD_SHARE);
    let long = total.saturating_sub(quick + standard);

    DurationBreakdown {
        quick,
        standard,
        long,
        avg_duration_secs: DEMO_AGENTS
            .iter()
            .map(|agent| agent.call_share * agent.avg_duration_secs)
            .sum(),
    }
}

fn synthetic_languages(total: u64) -> Vec<LanguageInsight> {
    let mut assigned = 0u64;
    DEMO_LANGUAGES
        .iter()
        .enumerate()
        .map(|(i, (language, share, confidence, duration))| {
            let calls = if i == DEMO_LANGUAGES.len() - 1 {
                total.saturating_sub(assigned)
            } else {
                let portion = share_of(total, *share);
                assigned += portion;
                portion
            };
            LanguageInsight {
                language: (*language).to_string(),
                calls,
                avg_confidence: *confidence,
                avg_duration_secs: *duration,
            }
        })
        .collect()
}
