//! Analytics error types.

use thiserror::Error;

/// Analytics errors.
///
/// The compute pass itself is total (every division is guarded and missing
/// fields read as neutral values), so errors only arise at the edges:
/// exporting a result, or an upstream source failure a caller chose to
/// surface instead of falling back.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// Result export serialization error
    #[error("export error: {0}")]
    Export(#[from] serde_json::Error),

    /// Record source failure
    #[error("record source error: {0}")]
    Source(#[from] call_source::SourceError),
}

/// Result type for analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;
