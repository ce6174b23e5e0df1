//! In-memory record source for tests and embedders.

use crate::error::Result;
use crate::RecordSource;
use async_trait::async_trait;
use call_domain::RawRecord;

/// Serves a fixed batch of records already held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticRecordSource {
    records: Vec<RawRecord>,
}

impl StaticRecordSource {
    /// Wrap an existing batch.
    #[must_use]
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl RecordSource for StaticRecordSource {
    async fn fetch_records(&self) -> Result<Vec<RawRecord>> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serves_the_wrapped_batch() {
        let batch = vec![
            RawRecord::from_value(json!({"duration": 90})).unwrap(),
            RawRecord::from_value(json!({"duration": 180})).unwrap(),
        ];
        let source = StaticRecordSource::new(batch.clone());
        let fetched = tokio_test::block_on(source.fetch_records()).unwrap();
        assert_eq!(fetched, batch);
    }

    #[test]
    fn default_source_is_empty() {
        let source = StaticRecordSource::default();
        let fetched = tokio_test::block_on(source.fetch_records()).unwrap();
        assert!(fetched.is_empty());
    }
}
