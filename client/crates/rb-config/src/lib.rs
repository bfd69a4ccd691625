mod api_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod readiness_config;
mod session_config;
mod ui_config;

#[cfg(test)]
mod tests;

pub use api_config::ApiConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use readiness_config::ReadinessConfig;
pub use session_config::SessionConfig;
pub use ui_config::UiConfig;

const CONFIG_DIR_ENV: &str = "RB_CONFIG_DIR";
const DEFAULT_CONFIG_DIR_NAME: &str = ".rb";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;
const DEFAULT_STORE_FILENAME: &str = "local_store.json";
const DEFAULT_CREDENTIAL_KEY: &str = "auth_token";
