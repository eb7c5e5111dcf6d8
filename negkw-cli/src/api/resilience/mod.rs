//! Request admission control for batch submission
//!
//! Bounds how many group submissions run against the endpoint at once.
//! Requests are never retried or rate limited.

pub mod concurrency;
pub mod config;

pub use concurrency::{ConcurrencyLimiter, ConcurrencyStats};
pub use config::ConcurrencyConfig;
