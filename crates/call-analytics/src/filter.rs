//! Filter pipeline over raw records.

use crate::extract::{extract_agent_name, extract_date};
use call_domain::{FilterCriteria, RawRecord, UNKNOWN_LABEL};

/// Reduce a raw batch to the records matching every supplied criterion.
///
/// Pure: the output is always a subset of the input, and a record is
/// retained only if all present criteria hold. Absent criteria are
/// vacuously true.
#[must_use]
pub fn filter_records(records: &[RawRecord], criteria: &FilterCriteria) -> Vec<RawRecord> {
    let filtered: Vec<RawRecord> = records
        .iter()
        .filter(|record| matches_criteria(record, criteria))
        .cloned()
        .collect();

    tracing::debug!(
        total = records.len(),
        retained = filtered.len(),
        "applied filter criteria"
    );
    filtered
}

/// The composed predicate behind [`filter_records`].
#[must_use]
pub fn matches_criteria(record: &RawRecord, criteria: &FilterCriteria) -> bool {
    if !criteria.range.contains(extract_date(record)) {
        return false;
    }

    if let Some(agents) = &criteria.agents {
        let agent = extract_agent_name(record).unwrap_or_else(|| UNKNOWN_LABEL.to_string());
        if !agents.iter().any(|allowed| *allowed == agent) {
            return false;
        }
    }

    if let Some(languages) = &criteria.languages {
        let language = record.language().unwrap_or(UNKNOWN_LABEL);
        if !languages.iter().any(|allowed| allowed == language) {
            return false;
        }
    }

    if let Some(min_confidence) = criteria.min_confidence {
        if record.confidence() < min_confidence {
            return false;
        }
    }

    if let Some(bound) = &criteria.duration {
        if !bound.contains(record.duration_secs()) {
            return false;
        }
    }

    true
}
