//! The analytics entry point.
//!
//! One invocation is one synchronous pass: fetch records once, filter them,
//! then run every calculator and the forecast over the same filtered
//! snapshot. Source failures never propagate out of [`run_analytics`]; they
//! substitute the demo fallback instead.

use crate::error::Result;
use crate::filter::filter_records;
use crate::{demo, forecast, metrics};
use call_domain::{AnalyticsResult, FilterCriteria, RawRecord};
use call_source::RecordSource;
use chrono::Utc;

/// Pure analytics pass over an already-fetched batch.
///
/// Filters the batch by the supplied criteria, then runs the nine metric
/// calculators and the forecast engine over the filtered snapshot. Total:
/// an empty or fully filtered-out batch produces a zeroed result with all
/// shape invariants intact, never an error.
#[must_use]
pub fn compute_analytics(records: &[RawRecord], criteria: &FilterCriteria) -> AnalyticsResult {
    let filtered = filter_records(records, criteria);
    let volume_trend = metrics::volume_trend(&filtered);

    AnalyticsResult {
        generated_at: Utc::now(),
        performance: metrics::performance_metrics(&filtered),
        agent_performance: metrics::agent_performance(&filtered),
        hourly_distribution: metrics::hourly_distribution(&filtered),
        weekday_trend: metrics::weekday_trend(&filtered),
        weekly_comparison: metrics::weekly_comparison(&filtered, criteria.range.end),
        confidence_histogram: metrics::confidence_histogram(&filtered),
        duration_breakdown: metrics::duration_breakdown(&filtered),
        language_insights: metrics::language_insights(&filtered),
        forecast: forecast::forecast_volume(&volume_trend),
        volume_trend,
        synthetic: false,
    }
}

/// Fetch and compute, substituting the demo fallback when the source fails
/// or returns no records.
pub async fn run_analytics(
    source: &dyn RecordSource,
    criteria: &FilterCriteria,
) -> AnalyticsResult {
    match source.fetch_records().await {
        Ok(records) if !records.is_empty() => compute_analytics(&records, criteria),
        Ok(_) => {
            tracing::warn!("record source returned no records, substituting demo fallback");
            demo::fallback_result(&criteria.range)
        }
        Err(err) => {
            tracing::warn!(error = %err, "record source failed, substituting demo fallback");
            demo::fallback_result(&criteria.range)
        }
    }
}

/// Fetch and compute, propagating source failures instead of falling back.
///
/// For callers that need to surface outages rather than mask them; an empty
/// batch computes to a zeroed (non-synthetic) result.
pub async fn try_run_analytics(
    source: &dyn RecordSource,
    criteria: &FilterCriteria,
) -> Result<AnalyticsResult> {
    let records = source.fetch_records().await?;
    Ok(compute_analytics(&records, criteria))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use call_domain::{TimeRange, UNKNOWN_LABEL};
    use call_source::{SourceError, StaticRecordSource};
    use chrono::{TimeZone, Utc};
    use fake::faker::name::en::FirstName;
    use fake::Fake;
    use serde_json::json;

    /// Source that always reports a shape failure.
    struct FailingSource;

    #[async_trait]
    impl RecordSource for FailingSource {
        async fn fetch_records(&self) -> call_source::Result<Vec<RawRecord>> {
            Err(SourceError::UnexpectedShape("boom".into()))
        }
    }

    fn may_2024() -> FilterCriteria {
        FilterCriteria::for_range(
            TimeRange::new(
                Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 5, 14, 23, 59, 59).unwrap(),
            )
            .unwrap(),
        )
    }

    fn batch() -> Vec<RawRecord> {
        (0..30)
            .map(|i| {
                let agent: String = FirstName().fake();
                RawRecord::from_value(json!({
                    "created_at": format!("2024-05-{:02}T{:02}:00:00Z", (i % 14) + 1, 8 + (i % 10)),
                    "duration": 60.0 + f64::from(i) * 10.0,
                    "confidence": 0.55 + f64::from(i % 5) * 0.1,
                    "language": if i % 3 == 0 { "es" } else { "en" },
                    "agent": agent,
                }))
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn compute_runs_all_calculators_over_one_snapshot() {
        let criteria = may_2024();
        let result = compute_analytics(&batch(), &criteria);

        assert!(!result.synthetic);
        assert_eq!(result.performance.total_calls, 30);
        assert_eq!(result.hourly_distribution.len(), 24);
        assert_eq!(result.weekday_trend.len(), 7);
        assert_eq!(result.confidence_histogram.len(), 5);
        assert_eq!(
            result.confidence_histogram.iter().map(|b| b.calls).sum::<u64>(),
            30
        );
        // 14 distinct days clears the forecast precondition.
        assert_eq!(result.volume_trend.len(), 14);
        assert_eq!(result.forecast.len(), 7);
    }

    #[test]
    fn compute_on_empty_batch_keeps_shape_invariants() {
        let result = compute_analytics(&[], &may_2024());
        assert!(!result.synthetic);
        assert_eq!(result.performance.total_calls, 0);
        assert_eq!(result.hourly_distribution.len(), 24);
        assert_eq!(result.weekday_trend.len(), 7);
        assert_eq!(result.confidence_histogram.len(), 5);
        assert!(result.volume_trend.is_empty());
        assert!(result.forecast.is_empty());
        assert!(result.agent_performance.is_empty());
    }

    #[test]
    fn records_without_agents_rank_under_the_unknown_label() {
        let criteria = may_2024();
        let records = vec![
            RawRecord::from_value(json!({
                "created_at": "2024-05-02T10:00:00Z",
                "duration": 120.0,
                "confidence": 0.9,
            }))
            .unwrap(),
        ];
        let result = compute_analytics(&records, &criteria);
        assert_eq!(result.agent_performance.len(), 1);
        assert_eq!(result.agent_performance[0].agent, UNKNOWN_LABEL);
    }

    #[test]
    fn empty_source_substitutes_the_demo_fallback() {
        let criteria = may_2024();
        let source = StaticRecordSource::default();
        let result = tokio_test::block_on(run_analytics(&source, &criteria));

        assert!(result.synthetic);
        assert_eq!(result.hourly_distribution.len(), 24);
        assert_eq!(result.weekday_trend.len(), 7);
        assert_eq!(result.confidence_histogram.len(), 5);
        assert_eq!(
            result.confidence_histogram.iter().map(|b| b.calls).sum::<u64>(),
            result.performance.total_calls
        );
    }

    #[test]
    fn failing_source_substitutes_the_demo_fallback() {
        let criteria = may_2024();
        let result = tokio_test::block_on(run_analytics(&FailingSource, &criteria));
        assert!(result.synthetic);
        assert_eq!(result.forecast.len(), 7);
    }

    #[test]
    fn live_source_never_yields_a_synthetic_result() {
        let criteria = may_2024();
        let source = StaticRecordSource::new(batch());
        let result = tokio_test::block_on(run_analytics(&source, &criteria));
        assert!(!result.synthetic);
        assert_eq!(result.performance.total_calls, 30);
    }

    #[test]
    fn try_run_propagates_source_failures() {
        let criteria = may_2024();
        let outcome = tokio_test::block_on(try_run_analytics(&FailingSource, &criteria));
        assert!(outcome.is_err());
    }
}
