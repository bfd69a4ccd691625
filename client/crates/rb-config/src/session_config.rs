use crate::{ConfigError, ConfigErrorResult, DEFAULT_CREDENTIAL_KEY, DEFAULT_STORE_FILENAME};

use std::path::Path;

use serde::Deserialize;

/// Local durable storage for the session credential and preferences
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Store file, relative to the config directory
    pub store_file: String,
    /// Key the bearer token is stored under
    pub credential_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_file: String::from(DEFAULT_STORE_FILENAME),
            credential_key: String::from(DEFAULT_CREDENTIAL_KEY),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.store_file.trim().is_empty() {
            return Err(ConfigError::session("session.store_file cannot be empty"));
        }

        if Path::new(&self.store_file).is_absolute() || self.store_file.contains("..") {
            return Err(ConfigError::session(
                "session.store_file must be relative and cannot contain '..'",
            ));
        }

        if self.credential_key.trim().is_empty() {
            return Err(ConfigError::session("session.credential_key cannot be empty"));
        }

        Ok(())
    }
}
