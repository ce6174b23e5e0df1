//! # Call Insight - Domain Model
//!
//! Core domain entities and value objects for call-support analytics.
//! These types are the single source of truth across all layers: record
//! sourcing, analytics computation, and presentation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

// =============================================================================
// RAW RECORDS
// =============================================================================

/// One processed support-call record as delivered by the record source.
///
/// Records are loosely typed: upstream pipelines disagree on field names and
/// value types, so all access goes through fail-soft typed accessors. A
/// record is expected to carry `duration` (seconds), `confidence` (0..1),
/// `language`, and a job identifier string that may embed an agent name and
/// a timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(pub Map<String, Value>);

impl RawRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build a record from a JSON value; returns `None` for non-objects.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, key: &str, value: Value) {
        self.0.insert(key.to_string(), value);
    }

    /// String field lookup.
    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Numeric field lookup, accepting JSON numbers or numeric strings.
    #[must_use]
    pub fn num_field(&self, key: &str) -> Option<f64> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Call duration in seconds. Missing or unparseable values read as 0
    /// rather than dropping the record.
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        self.num_field("duration").unwrap_or(0.0)
    }

    /// Transcription confidence in [0, 1]. Missing or unparseable values
    /// read as 0.
    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.num_field("confidence").unwrap_or(0.0)
    }

    /// Language code, if present.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.str_field("language")
    }

    /// The job identifier string that may encode agent and timestamp.
    #[must_use]
    pub fn job_identifier(&self) -> Option<&str> {
        self.str_field("job_name")
            .or_else(|| self.str_field("jobName"))
            .or_else(|| self.str_field("id"))
    }
}

// =============================================================================
// FILTER CRITERIA
// =============================================================================

/// Inclusive time range for queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Construct a range, rejecting end-before-start.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::InvalidTimeRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Inclusive containment check.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts <= self.end
    }
}

/// Duration bound in seconds; a missing min reads as 0, a missing max as
/// unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DurationBound {
    pub min_secs: Option<f64>,
    pub max_secs: Option<f64>,
}

impl DurationBound {
    /// Whether a duration falls within the bound.
    #[must_use]
    pub fn contains(&self, secs: f64) -> bool {
        secs >= self.min_secs.unwrap_or(0.0)
            && self.max_secs.is_none_or(|max| secs <= max)
    }
}

/// Caller-supplied filter criteria. The time range is mandatory; every
/// other criterion is optional and vacuously true when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub range: TimeRange,
    pub agents: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub min_confidence: Option<f64>,
    pub duration: Option<DurationBound>,
}

impl FilterCriteria {
    /// Criteria matching everything inside a time range.
    #[must_use]
    pub fn for_range(range: TimeRange) -> Self {
        Self {
            range,
            agents: None,
            languages: None,
            min_confidence: None,
            duration: None,
        }
    }
}

// =============================================================================
// ANALYTICS RESULT TYPES
// =============================================================================

/// Call volume for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyVolume {
    pub date: NaiveDate,
    pub calls: u64,
    pub avg_duration_secs: f64,
}

/// Scalar performance summary over the filtered set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub total_calls: u64,
    pub avg_duration_secs: f64,
    pub avg_confidence: f64,
    /// Percentage of calls with confidence above 0.5.
    pub success_rate_pct: f64,
    pub calls_by_language: BTreeMap<String, u64>,
}

/// Per-agent aggregate, ranked by blended score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentPerformance {
    pub agent: String,
    pub calls: u64,
    pub avg_confidence: f64,
    pub avg_duration_secs: f64,
    /// Weighted blend of mean confidence and normalized mean duration,
    /// scaled to 0..100.
    pub score: f64,
}

/// Call count for one hour of day (0..=23).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyVolume {
    pub hour: u8,
    pub calls: u64,
}

/// Aggregate for one weekday across all weeks in range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayVolume {
    pub weekday: String,
    pub calls: u64,
    pub avg_duration_secs: f64,
}

/// Rolling-window week-over-week comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyComparison {
    pub this_week: u64,
    pub last_week: u64,
    pub growth_pct: f64,
}

/// One bucket of the five-range confidence histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBucket {
    pub range: String,
    pub calls: u64,
    pub pct: f64,
}

/// Quick/standard/long call classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DurationBreakdown {
    /// Calls shorter than 120 seconds.
    pub quick: u64,
    /// Calls between 120 and 300 seconds inclusive.
    pub standard: u64,
    /// Calls longer than 300 seconds.
    pub long: u64,
    pub avg_duration_secs: f64,
}

/// Per-language aggregate, ranked by call count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageInsight {
    pub language: String,
    pub calls: u64,
    pub avg_confidence: f64,
    pub avg_duration_secs: f64,
}

/// One projected day of call volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted_calls: u64,
    /// Regression fit quality clamped to [0.3, 0.9].
    pub confidence: f64,
}

/// The full analytics aggregate handed to the presentation layer.
///
/// Shape invariants: `hourly_distribution` always has exactly 24 buckets in
/// hour order, `weekday_trend` exactly 7 buckets Monday through Sunday,
/// `confidence_histogram` exactly 5 buckets whose counts sum to the filtered
/// record count, and `forecast` is either empty or exactly 7 entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsResult {
    pub generated_at: DateTime<Utc>,
    pub volume_trend: Vec<DailyVolume>,
    pub performance: PerformanceMetrics,
    pub agent_performance: Vec<AgentPerformance>,
    pub hourly_distribution: Vec<HourlyVolume>,
    pub weekday_trend: Vec<WeekdayVolume>,
    pub weekly_comparison: WeeklyComparison,
    pub confidence_histogram: Vec<ConfidenceBucket>,
    pub duration_breakdown: DurationBreakdown,
    pub language_insights: Vec<LanguageInsight>,
    pub forecast: Vec<ForecastPoint>,
    /// True when this result came from the demo fallback generator rather
    /// than live records. Downstream logging and exports must not treat
    /// synthetic results as live data.
    pub synthetic: bool,
}

/// Label used wherever an agent or language cannot be derived.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Weekday bucket labels in fixed Monday-to-Sunday order.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

// =============================================================================
// ERRORS
// =============================================================================

/// Domain-level errors.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("invalid time range: end {end} precedes start {start}")]
    InvalidTimeRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("record validation failed: {0}")]
    RecordValidation(String),
}
