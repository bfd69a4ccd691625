use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};
use serial_test::serial;

// =========================================================================
// Happy Path Tests
// =========================================================================

#[test]
#[serial]
fn given_no_config_file_when_load_then_ok_with_defaults() {
    // Given
    let (_temp, _guard) = setup_config_dir();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_eq!(config.api.base_url, crate::DEFAULT_BASE_URL);
    assert_that!(config.readiness.interval_secs, eq(5));
    assert_eq!(config.session.credential_key, crate::DEFAULT_CREDENTIAL_KEY);
}

#[test]
#[serial]
fn given_no_config_file_when_load_and_validate_then_ok() {
    // Given
    let (_temp, _guard) = setup_config_dir();

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
}

#[test]
#[serial]
fn given_missing_config_dir_when_load_then_directory_created() {
    // Given
    let temp = tempfile::TempDir::new().unwrap();
    let nested = temp.path().join("nested").join("rb");
    let _guard = EnvGuard::set("RB_CONFIG_DIR", nested.to_str().unwrap());

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    assert!(nested.is_dir());
}

#[test]
#[serial]
fn given_valid_toml_file_when_load_then_uses_toml_values() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
              [api]
              base_url = "https://recipes.example.com"

              [readiness]
              interval_secs = 10
              max_interval_secs = 60
              backoff_multiplier = 2.0

              [logging]
              level = "debug"
          "#,
    )
    .unwrap();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_eq!(config.api.base_url, "https://recipes.example.com");
    assert_that!(config.readiness.interval_secs, eq(10));
    assert_that!(config.readiness.max_interval_secs, eq(60));
    assert_eq!(*config.logging.level, log::LevelFilter::Debug);
    assert_that!(config.validate(), ok(anything()));
}

#[test]
#[serial]
fn given_env_var_and_toml_when_load_then_env_var_overrides_toml() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
              [api]
              base_url = "http://from-toml:5000"
          "#,
    )
    .unwrap();
    let _url = EnvGuard::set("RB_API_BASE_URL", "http://from-env:5000");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_eq!(config.api.base_url, "http://from-env:5000");
}

#[test]
#[serial]
fn given_unparseable_env_value_when_load_then_keeps_default() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _interval = EnvGuard::set("RB_READINESS_INTERVAL_SECS", "soon");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.readiness.interval_secs, eq(5));
}

#[test]
#[serial]
fn given_log_env_vars_when_load_then_logging_overridden() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _level = EnvGuard::set("RB_LOG_LEVEL", "warn");
    let _colored = EnvGuard::set("RB_LOG_COLORED", "0");
    let _file = EnvGuard::set("RB_LOG_FILE", "rb.log");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_eq!(*config.logging.level, log::LevelFilter::Warn);
    assert!(!config.logging.colored);
    assert_eq!(config.logging.file.as_deref(), Some("rb.log"));
}

#[test]
#[serial]
fn given_store_file_when_store_path_then_joined_to_config_dir() {
    // Given
    let (temp, _guard) = setup_config_dir();

    // When
    let config = Config::load().unwrap();
    let path = config.store_path().unwrap();

    // Then
    assert_eq!(path, temp.path().join(crate::DEFAULT_STORE_FILENAME));
}

// =========================================================================
// Error Tests
// =========================================================================

#[test]
#[serial]
fn given_malformed_toml_when_load_then_error() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(temp.path().join("config.toml"), "[api\nbase_url = ").unwrap();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_unknown_log_level_when_load_then_falls_back_to_info() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
              [logging]
              level = "chatty"
          "#,
    )
    .unwrap();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_eq!(*config.logging.level, log::LevelFilter::Info);
}
