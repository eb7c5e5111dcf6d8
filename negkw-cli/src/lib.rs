//! Bulk negative keyword submission
//!
//! Reads keyword rows from a spreadsheet, groups them per (advertiser, unit)
//! pair with duplicates removed, and submits every group to the advertising
//! API concurrently, collecting one outcome per group.

pub mod api;
pub mod config;
pub mod export;
pub mod ingest;
pub mod keywords;

pub use api::{ConcurrencyConfig, ConcurrencyLimiter, HttpKeywordClient, KeywordClient, RequestGroup};
pub use config::Config;
pub use keywords::{
    BatchSubmitter, Normalized, RawRecord, SubmissionOutcome, SubmissionReport, normalize,
    normalize_with_diagnostics,
};
