use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

// Probe timeout constraints
pub const MIN_PROBE_TIMEOUT_MS: u64 = 100;
pub const MAX_PROBE_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 3_000;

// Retry interval constraints; retries are never closer than 5s
pub const MIN_INTERVAL_SECS: u64 = 5;
pub const MAX_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_INTERVAL_SECS: u64 = 5;

pub const MIN_BACKOFF_MULTIPLIER: f64 = 1.0;
pub const MAX_BACKOFF_MULTIPLIER: f64 = 10.0;
pub const DEFAULT_BACKOFF_MULTIPLIER: f64 = 1.0;

pub const MAX_MAX_INTERVAL_SECS: u64 = 600;
pub const DEFAULT_MAX_INTERVAL_SECS: u64 = 5;

/// Readiness polling before login.
///
/// The service may be cold-starting, so probing never gives up. With the
/// default multiplier of 1.0 every retry waits exactly `interval_secs`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReadinessConfig {
    /// Timeout for a single `/ping` probe in milliseconds
    pub probe_timeout_ms: u64,
    /// Delay after the first failed probe in seconds
    pub interval_secs: u64,
    /// Growth factor applied to the delay after each failed probe
    pub backoff_multiplier: f64,
    /// Upper bound for the delay in seconds
    pub max_interval_secs: u64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            interval_secs: DEFAULT_INTERVAL_SECS,
            backoff_multiplier: DEFAULT_BACKOFF_MULTIPLIER,
            max_interval_secs: DEFAULT_MAX_INTERVAL_SECS,
        }
    }
}

impl ReadinessConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.probe_timeout_ms < MIN_PROBE_TIMEOUT_MS
            || self.probe_timeout_ms > MAX_PROBE_TIMEOUT_MS
        {
            return Err(ConfigError::readiness(format!(
                "readiness.probe_timeout_ms must be {}-{}, got {}",
                MIN_PROBE_TIMEOUT_MS, MAX_PROBE_TIMEOUT_MS, self.probe_timeout_ms
            )));
        }

        if self.interval_secs < MIN_INTERVAL_SECS || self.interval_secs > MAX_INTERVAL_SECS {
            return Err(ConfigError::readiness(format!(
                "readiness.interval_secs must be {}-{}, got {}",
                MIN_INTERVAL_SECS, MAX_INTERVAL_SECS, self.interval_secs
            )));
        }

        if !(MIN_BACKOFF_MULTIPLIER..=MAX_BACKOFF_MULTIPLIER).contains(&self.backoff_multiplier) {
            return Err(ConfigError::readiness(format!(
                "readiness.backoff_multiplier must be {}-{}, got {}",
                MIN_BACKOFF_MULTIPLIER, MAX_BACKOFF_MULTIPLIER, self.backoff_multiplier
            )));
        }

        if self.max_interval_secs < self.interval_secs
            || self.max_interval_secs > MAX_MAX_INTERVAL_SECS
        {
            return Err(ConfigError::readiness(format!(
                "readiness.max_interval_secs must be {}-{}, got {}",
                self.interval_secs, MAX_MAX_INTERVAL_SECS, self.max_interval_secs
            )));
        }

        Ok(())
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn max_interval(&self) -> Duration {
        Duration::from_secs(self.max_interval_secs)
    }
}
