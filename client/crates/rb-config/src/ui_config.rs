use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

pub const MIN_ALERT_DURATION_MS: u64 = 500;
pub const MAX_ALERT_DURATION_MS: u64 = 60_000;
pub const DEFAULT_ALERT_DURATION_MS: u64 = 3_000;

pub const DEFAULT_TIMER_FINISHED_CUE_MS: u64 = 3_000;

/// Presentation timings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How long a dismissible notice stays visible
    pub alert_duration_ms: u64,
    /// How long the timer completion cue lasts
    pub timer_finished_cue_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            alert_duration_ms: DEFAULT_ALERT_DURATION_MS,
            timer_finished_cue_ms: DEFAULT_TIMER_FINISHED_CUE_MS,
        }
    }
}

impl UiConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.alert_duration_ms < MIN_ALERT_DURATION_MS
            || self.alert_duration_ms > MAX_ALERT_DURATION_MS
        {
            return Err(ConfigError::ui(format!(
                "ui.alert_duration_ms must be {}-{}, got {}",
                MIN_ALERT_DURATION_MS, MAX_ALERT_DURATION_MS, self.alert_duration_ms
            )));
        }

        Ok(())
    }

    pub fn alert_duration(&self) -> Duration {
        Duration::from_millis(self.alert_duration_ms)
    }

    pub fn timer_finished_cue(&self) -> Duration {
        Duration::from_millis(self.timer_finished_cue_ms)
    }
}
