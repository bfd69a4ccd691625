use crate::{
    ApiConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR_NAME, LoggingConfig, ReadinessConfig, SessionConfig, UiConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub readiness: ReadinessConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for RB_CONFIG_DIR env var, else use ./.rb/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply RB_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: RB_CONFIG_DIR env var > ./.rb/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR_NAME))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.api.validate()?;
        self.readiness.validate()?;
        self.session.validate()?;
        self.ui.validate()?;
        Ok(())
    }

    /// Absolute path of the local store file.
    pub fn store_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.session.store_file))
    }

    /// Log configuration summary (NEVER logs the credential).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  api: {} (timeout {}s)",
            self.api.base_url, self.api.request_timeout_secs
        );
        info!(
            "  readiness: probe={}ms, interval={}s, backoff={}x, max={}s",
            self.readiness.probe_timeout_ms,
            self.readiness.interval_secs,
            self.readiness.backoff_multiplier,
            self.readiness.max_interval_secs
        );
        info!(
            "  session: store={}, key={}",
            self.session.store_file, self.session.credential_key
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
        info!("  ui: alert={}ms", self.ui.alert_duration_ms);
    }

    fn apply_env_overrides(&mut self) {
        // Api
        Self::apply_env_string("RB_API_BASE_URL", &mut self.api.base_url);
        Self::apply_env_parse(
            "RB_API_REQUEST_TIMEOUT_SECS",
            &mut self.api.request_timeout_secs,
        );

        // Readiness
        Self::apply_env_parse(
            "RB_READINESS_PROBE_TIMEOUT_MS",
            &mut self.readiness.probe_timeout_ms,
        );
        Self::apply_env_parse(
            "RB_READINESS_INTERVAL_SECS",
            &mut self.readiness.interval_secs,
        );
        Self::apply_env_parse(
            "RB_READINESS_BACKOFF_MULTIPLIER",
            &mut self.readiness.backoff_multiplier,
        );
        Self::apply_env_parse(
            "RB_READINESS_MAX_INTERVAL_SECS",
            &mut self.readiness.max_interval_secs,
        );

        // Session
        Self::apply_env_string("RB_SESSION_STORE_FILE", &mut self.session.store_file);
        Self::apply_env_string(
            "RB_SESSION_CREDENTIAL_KEY",
            &mut self.session.credential_key,
        );

        // Logging
        Self::apply_env_parse("RB_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("RB_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("RB_LOG_FILE", &mut self.logging.file);

        // Ui
        Self::apply_env_parse("RB_UI_ALERT_DURATION_MS", &mut self.ui.alert_duration_ms);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
