//! Shared field extraction for dates and agent names.
//!
//! Every calculator and the filter pipeline derive dates and agents through
//! these two helpers, so one parsing rule applies everywhere.

use call_domain::RawRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// Direct date-like fields tried before falling back to the job identifier.
const DATE_FIELDS: [&str; 5] = ["created_at", "createdAt", "completed_at", "date", "timestamp"];

/// Date-and-time token embedded in a job identifier, e.g.
/// `2024-05-01T10-30-00`. Identifier generation replaces the colons of the
/// time segment with a filesystem-safe separator; the captures let us put
/// them back.
static EMBEDDED_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4}-\d{2}-\d{2})[Tt_ ](\d{2})[-._](\d{2})[-._](\d{2})")
        .expect("embedded timestamp pattern is valid")
});

/// `AGENT_<token>` segment delimited by underscores in a job identifier.
static AGENT_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|_)AGENT_([A-Za-z0-9]+)").expect("agent token pattern is valid")
});

/// Derive the record's timestamp.
///
/// Tries the direct date fields first (RFC 3339, `%Y-%m-%d %H:%M:%S`, bare
/// date, or epoch seconds), then a timestamp token embedded in the job
/// identifier. Falls back to the current time when nothing parses, which
/// may skew time buckets for that one record but never drops it.
#[must_use]
pub fn extract_date(record: &RawRecord) -> DateTime<Utc> {
    for field in DATE_FIELDS {
        if let Some(raw) = record.str_field(field) {
            if let Some(ts) = parse_timestamp(raw) {
                return ts;
            }
        }
        if let Some(epoch) = record.num_field(field) {
            #[allow(clippy::cast_possible_truncation)]
            if let Some(ts) = DateTime::from_timestamp(epoch as i64, 0) {
                return ts;
            }
        }
    }

    if let Some(job) = record.job_identifier() {
        if let Some(caps) = EMBEDDED_TIMESTAMP.captures(job) {
            let rebuilt = format!("{}T{}:{}:{}", &caps[1], &caps[2], &caps[3], &caps[4]);
            if let Ok(naive) = NaiveDateTime::parse_from_str(&rebuilt, "%Y-%m-%dT%H:%M:%S") {
                return naive.and_utc();
            }
        }
    }

    Utc::now()
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// Derive the agent name, if any.
///
/// Searches the job identifier for an `AGENT_<token>` segment, then falls
/// back to explicit agent fields. Returns `None` when nothing is found;
/// callers map that to the shared "Unknown" label.
#[must_use]
pub fn extract_agent_name(record: &RawRecord) -> Option<String> {
    if let Some(job) = record.job_identifier() {
        if let Some(caps) = AGENT_TOKEN.captures(job) {
            return Some(caps[1].to_string());
        }
    }

    record
        .str_field("agent")
        .or_else(|| record.str_field("agent_name"))
        .map(str::to_string)
}
