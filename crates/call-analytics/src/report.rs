//! Export helpers for the presentation layer.
//!
//! Thin serialization only: a structured JSON export and a flattened CSV
//! of the time-series parts. Rendering and chart drawing stay downstream.

use crate::error::Result;
use call_domain::AnalyticsResult;
use std::fmt::Write as _;

/// Serialize the full aggregate as pretty-printed JSON.
pub fn to_json(result: &AnalyticsResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Flatten the tabular parts of the result into CSV.
///
/// One row per volume-trend day, forecast day, agent, and language, tagged
/// by section. Synthetic results are tagged so exports never pass demo data
/// off as live.
#[must_use]
pub fn to_csv(result: &AnalyticsResult) -> String {
    let origin = if result.synthetic { "demo" } else { "live" };
    let mut csv = String::from("section,origin,key,calls,value\n");

    for day in &result.volume_trend {
        let _ = writeln!(
            csv,
            "volume,{origin},{},{},{:.2}",
            day.date, day.calls, day.avg_duration_secs
        );
    }
    for point in &result.forecast {
        let _ = writeln!(
            csv,
            "forecast,{origin},{},{},{:.2}",
            point.date, point.predicted_calls, point.confidence
        );
    }
    for agent in &result.agent_performance {
        let _ = writeln!(
            csv,
            "agent,{origin},{},{},{:.2}",
            escape(&agent.agent),
            agent.calls,
            agent.score
        );
    }
    for language in &result.language_insights {
        let _ = writeln!(
            csv,
            "language,{origin},{},{},{:.2}",
            escape(&language.language),
            language.calls,
            language.avg_confidence
        );
    }

    csv
}

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_analytics;
    use crate::demo::fallback_result;
    use call_domain::{FilterCriteria, RawRecord, TimeRange};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn result() -> AnalyticsResult {
        let criteria = FilterCriteria::for_range(
            TimeRange::new(
                Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 5, 7, 23, 59, 59).unwrap(),
            )
            .unwrap(),
        );
        let records = vec![
            RawRecord::from_value(json!({
                "created_at": "2024-05-02T10:00:00Z",
                "duration": 150.0,
                "confidence": 0.9,
                "language": "en",
                "agent": "Rivera, Ana",
            }))
            .unwrap(),
        ];
        compute_analytics(&records, &criteria)
    }

    #[test]
    fn json_round_trips() {
        let original = result();
        let exported = to_json(&original).unwrap();
        let parsed: AnalyticsResult = serde_json::from_str(&exported).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn csv_tags_origin_and_escapes_fields() {
        let csv = to_csv(&result());
        assert!(csv.starts_with("section,origin,key,calls,value\n"));
        assert!(csv.contains("volume,live,2024-05-02,1,150.00"));
        assert!(csv.contains("\"Rivera, Ana\""));
    }

    #[test]
    fn csv_marks_synthetic_results_as_demo() {
        let range = TimeRange::new(
            Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 5, 10, 0, 0, 0).unwrap(),
        )
        .unwrap();
        let csv = to_csv(&fallback_result(&range));
        assert!(csv.contains("volume,demo,"));
        assert!(!csv.contains(",live,"));
    }
}
