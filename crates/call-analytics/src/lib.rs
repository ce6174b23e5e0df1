//! # Call Analytics
//!
//! Aggregation and forecasting engine for call-support records.
//! Turns a raw record batch into time-series trends, agent rankings,
//! quality/duration distributions, and a 7-day volume forecast.
//!
//! ## Features
//!
//! - Filter pipeline over heterogeneous raw records
//! - Nine pure metric calculators over one filtered snapshot
//! - Linear-regression volume forecast with fit-quality confidence
//! - Demo fallback result when no usable records exist
//! - JSON and flattened CSV export helpers

#![forbid(unsafe_code)]
#![warn(clippy::all, missing_docs)]

pub mod demo;
pub mod engine;
pub mod error;
pub mod extract;
pub mod filter;
pub mod forecast;
pub mod metrics;
pub mod report;

pub use engine::{compute_analytics, run_analytics};
pub use error::AnalyticsError;
