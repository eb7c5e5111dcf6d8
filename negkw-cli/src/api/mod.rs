//! Advertising API access
//!
//! Wire models for the negative keyword batch endpoint, the transport trait
//! used by the batch submitter and its reqwest implementation, plus the
//! concurrency limiter that bounds in-flight requests.

pub mod client;
pub mod models;
pub mod resilience;

pub use client::{DEFAULT_ENDPOINT, HttpKeywordClient, HttpReply, KeywordClient};
pub use models::{API_OK_CODE, ApiResponse, GroupKey, Keyword, RequestGroup, match_type};
pub use resilience::{ConcurrencyConfig, ConcurrencyLimiter, ConcurrencyStats};
