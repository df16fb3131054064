//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Update scheduling behavior
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// HTTP fetching behavior
    #[serde(default)]
    pub fetch: FetchConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetch.user_agent is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::validation("fetch.timeout_secs must be > 0"));
        }
        if self.scheduler.cycle_delay_secs == 0 {
            return Err(AppError::validation(
                "scheduler.cycle_delay_secs must be > 0",
            ));
        }
        Ok(())
    }
}

/// Update scheduling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Pause between full cycles over all sources, in seconds
    #[serde(default = "defaults::cycle_delay")]
    pub cycle_delay_secs: u64,

    /// Pause between consecutive sources within a cycle, in seconds
    #[serde(default = "defaults::source_delay")]
    pub source_delay_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            cycle_delay_secs: defaults::cycle_delay(),
            source_delay_secs: defaults::source_delay(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

mod defaults {
    pub fn cycle_delay() -> u64 {
        3600
    }
    pub fn source_delay() -> u64 {
        3
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; pagefeed/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
}
