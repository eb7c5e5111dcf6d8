//! Concurrency limiter implementation
//!
//! Provides a semaphore-based limiter that caps how many group submissions
//! are in flight against the keyword endpoint at the same time.

use super::config::ConcurrencyConfig;
use log::debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Semaphore-based concurrency limiter for controlling concurrent API requests
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
    config: ConcurrencyConfig,
    requests_acquired: Arc<AtomicU64>,
    requests_waited: Arc<AtomicU64>,
}

impl ConcurrencyLimiter {
    /// Create a new concurrency limiter with the given configuration
    ///
    /// A limit of 0 means no limit, however it was configured.
    pub fn new(mut config: ConcurrencyConfig) -> Self {
        if config.max_concurrent_requests == 0 {
            config.enabled = false;
        }

        Self {
            // A zero-permit semaphore would never let a request through
            semaphore: Arc::new(Semaphore::new(config.max_concurrent_requests.max(1))),
            config,
            requests_acquired: Arc::new(AtomicU64::new(0)),
            requests_waited: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Acquire a permit for making a request. Waits if at capacity.
    ///
    /// Returns `None` when limiting is disabled; otherwise an owned permit
    /// that releases automatically when dropped.
    pub async fn acquire(&self) -> Option<OwnedSemaphorePermit> {
        if !self.config.enabled {
            self.requests_acquired.fetch_add(1, Ordering::Relaxed);
            return None;
        }

        if self.semaphore.available_permits() == 0 {
            self.requests_waited.fetch_add(1, Ordering::Relaxed);
            debug!(
                "Concurrency limiter: waiting for permit ({} in use)",
                self.config.max_concurrent_requests
            );
        }

        // The semaphore is owned by the limiter and never closed
        let permit = self.semaphore.clone().acquire_owned().await.ok();
        self.requests_acquired.fetch_add(1, Ordering::Relaxed);

        debug!(
            "Concurrency limiter: acquired permit ({}/{} in use)",
            self.config.max_concurrent_requests - self.semaphore.available_permits(),
            self.config.max_concurrent_requests
        );

        permit
    }

    /// Get the number of available permits (requests that can start immediately)
    pub fn available_permits(&self) -> usize {
        if !self.config.enabled {
            return usize::MAX;
        }
        self.semaphore.available_permits()
    }

    /// Get the maximum number of concurrent HTTP requests
    pub fn max_concurrent_requests(&self) -> usize {
        self.config.max_concurrent_requests
    }

    /// Check if the limiter is enabled
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Get current statistics
    pub fn stats(&self) -> ConcurrencyStats {
        ConcurrencyStats {
            available_permits: self.available_permits(),
            max_concurrent_requests: self.config.max_concurrent_requests,
            requests_acquired: self.requests_acquired.load(Ordering::Relaxed),
            requests_waited: self.requests_waited.load(Ordering::Relaxed),
            enabled: self.config.enabled,
        }
    }
}

impl Default for ConcurrencyLimiter {
    fn default() -> Self {
        Self::new(ConcurrencyConfig::default())
    }
}

/// Statistics for the concurrency limiter
#[derive(Debug, Clone)]
pub struct ConcurrencyStats {
    /// Number of permits currently available
    pub available_permits: usize,
    /// Maximum concurrent requests allowed
    pub max_concurrent_requests: usize,
    /// Total permits acquired since creation
    pub requests_acquired: u64,
    /// Number of times a request had to wait for a permit
    pub requests_waited: u64,
    /// Whether limiting is enabled
    pub enabled: bool,
}

impl ConcurrencyStats {
    /// Calculate the percentage of requests that had to wait
    pub fn wait_rate(&self) -> f64 {
        if self.requests_acquired == 0 {
            0.0
        } else {
            self.requests_waited as f64 / self.requests_acquired as f64
        }
    }
}
