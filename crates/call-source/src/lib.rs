//! # Call Source
//!
//! Record source capability for the call-insight analytics engine.
//!
//! Analytics never fetches records itself; it is handed a [`RecordSource`],
//! and implementations can be swapped for different suppliers:
//!
//! - [`HttpRecordSource`] — live records from a JSON endpoint
//! - [`StaticRecordSource`] — an in-memory batch, for tests and embedders
//!
//! Retry, timeout, and credential concerns live here with the source, not
//! in the analytics core.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod decode;
pub mod error;
pub mod http;
pub mod memory;

pub use error::{Result, SourceError};
pub use http::HttpRecordSource;
pub use memory::StaticRecordSource;

use async_trait::async_trait;
use call_domain::RawRecord;

/// Supplier of raw call records for one analytics pass.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch the current batch of records.
    ///
    /// Implementations return an error for transport or shape failures;
    /// the analytics engine treats any error (and an empty batch) as
    /// grounds for substituting the demo fallback result.
    async fn fetch_records(&self) -> Result<Vec<RawRecord>>;
}
