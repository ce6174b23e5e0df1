//! Live record source over HTTP.

use crate::decode::records_from_value;
use crate::error::Result;
use crate::RecordSource;
use async_trait::async_trait;
use call_domain::RawRecord;
use serde_json::Value;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches records from a JSON endpoint exposed by the call-processing
/// service.
pub struct HttpRecordSource {
    client: reqwest::Client,
    endpoint: String,
    bearer_token: Option<String>,
}

impl HttpRecordSource {
    /// Create a source for the given endpoint with a default client.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            bearer_token: None,
        })
    }

    /// Attach a bearer token sent with every fetch.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Use a preconfigured client (custom timeout, proxy, etc.).
    #[must_use]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn fetch_records(&self) -> Result<Vec<RawRecord>> {
        let mut request = self.client.get(&self.endpoint);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let payload: Value = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let records = records_from_value(payload)?;
        tracing::debug!(
            endpoint = %self.endpoint,
            count = records.len(),
            "fetched record batch"
        );
        Ok(records)
    }
}
