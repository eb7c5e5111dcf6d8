//! Runtime configuration
//!
//! Resolution order, later wins: built-in defaults, the TOML config file,
//! `NEGKW_*` environment variables (a `.env` file is loaded by the binary),
//! then command-line flags.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::client::DEFAULT_ENDPOINT;
use crate::api::resilience::ConcurrencyConfig;

/// Environment variable names
pub mod env {
    pub const CONFIG: &str = "NEGKW_CONFIG";
    pub const ENDPOINT: &str = "NEGKW_ENDPOINT";
    pub const MAX_CONCURRENT: &str = "NEGKW_MAX_CONCURRENT";
    pub const TIMEOUT_SECS: &str = "NEGKW_TIMEOUT_SECS";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Batch add endpoint for negative keywords
    pub endpoint: String,
    pub concurrency: ConcurrencyConfig,
    /// Per-request timeout; the transport default applies when unset
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            concurrency: ConcurrencyConfig::default(),
            request_timeout_secs: None,
            user_agent: concat!("negkw/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file and the process environment
    ///
    /// An explicit path (argument or `NEGKW_CONFIG`) must exist; the default
    /// location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let explicit = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(env::CONFIG).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// `<config dir>/negkw/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("negkw").join("config.toml"))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.endpoint = config.endpoint.trim().to_string();
        if config.concurrency.max_concurrent_requests == 0 {
            config.set_max_concurrent(0);
        }
        Ok(config)
    }

    /// Apply `NEGKW_*` overrides using the given variable lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(env::ENDPOINT).filter(|v| !v.trim().is_empty()) {
            self.endpoint = endpoint.trim().to_string();
        }

        if let Some(raw) = lookup(env::MAX_CONCURRENT) {
            let max: usize = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a number, got '{}'", env::MAX_CONCURRENT, raw))?;
            self.set_max_concurrent(max);
        }

        if let Some(raw) = lookup(env::TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a number, got '{}'", env::TIMEOUT_SECS, raw))?;
            self.request_timeout_secs = Some(secs).filter(|s| *s > 0);
        }

        Ok(())
    }

    /// Set the in-flight request cap; 0 removes the cap
    pub fn set_max_concurrent(&mut self, max: usize) {
        self.concurrency = if max == 0 {
            ConcurrencyConfig::unbounded()
        } else {
            ConcurrencyConfig::limited(max)
        };
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Reject values that cannot produce a working client
    pub fn validate(&self) -> Result<()> {
        let endpoint = &self.endpoint;
        if endpoint.trim() != endpoint {
            bail!("Endpoint must not have surrounding whitespace: '{}'", endpoint);
        }
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            bail!("Endpoint must be an http(s) URL, got '{}'", self.endpoint);
        }
        Ok(())
    }
}
