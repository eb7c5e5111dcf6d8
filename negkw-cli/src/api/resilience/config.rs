//! Concurrency configuration for batch submission

use serde::{Deserialize, Serialize};

/// Concurrency limiting configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcurrencyConfig {
    /// Maximum concurrent HTTP requests to the API
    pub max_concurrent_requests: usize,
    /// Whether concurrency limiting is enabled
    pub enabled: bool,
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: 16,
            enabled: true,
        }
    }
}

impl ConcurrencyConfig {
    pub fn limited(max_concurrent_requests: usize) -> Self {
        Self {
            max_concurrent_requests,
            enabled: true,
        }
    }

    /// Every request in flight at once
    pub fn unbounded() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}
