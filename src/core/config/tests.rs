use super::data::{Config, ConfigKey};
use super::io::ConfigError;
use crate::core::constants::DEFAULT_SERVER_URL;
use crate::ui::theme::ThemeMode;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_config.toml");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");

    assert_eq!(config, Config::default());
    assert_eq!(config.resolved_server_url(), DEFAULT_SERVER_URL);
    assert_eq!(config.theme_mode(), ThemeMode::Dark);
    assert_eq!(config.request_timeout(), None);
}

#[test]
fn test_config_persistence_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("config.toml");

    // Phase 1: initial save creates parent directories
    let mut config = Config::default();
    config
        .set_value(ConfigKey::ServerUrl, "https://tutor.example.edu/")
        .expect("valid url");
    config
        .set_value(ConfigKey::Theme, "Light")
        .expect("valid theme");
    config
        .save_to_path(&config_path)
        .expect("Failed to save config");

    let loaded = Config::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(
        loaded.server_url.as_deref(),
        Some("https://tutor.example.edu")
    );
    assert_eq!(loaded.theme.as_deref(), Some("light"));
    assert_eq!(loaded.theme_mode(), ThemeMode::Light);

    // Phase 2: unset and persist again
    let mut config = loaded;
    config.unset_value(ConfigKey::ServerUrl);
    config
        .save_to_path(&config_path)
        .expect("Failed to save config");
    let reloaded = Config::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(reloaded.server_url, None);
    assert_eq!(reloaded.resolved_server_url(), DEFAULT_SERVER_URL);
    assert_eq!(reloaded.theme.as_deref(), Some("light"));
}

#[test]
fn invalid_toml_reports_parse_error_with_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "server_url = [").expect("write");

    let err = Config::load_from_path(&config_path).expect_err("parse should fail");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().starts_with("Failed to parse config at"));
}

#[test]
fn set_value_rejects_bad_input_without_mutating() {
    let mut config = Config::default();

    let err = config
        .set_value(ConfigKey::ServerUrl, "localhost:8080")
        .expect_err("scheme required");
    assert!(matches!(err, ConfigError::InvalidValue { key: "server-url", .. }));

    assert!(config.set_value(ConfigKey::Theme, "solarized").is_err());
    assert!(config
        .set_value(ConfigKey::RequestTimeout, "ten")
        .is_err());
    assert_eq!(config, Config::default());
}

#[test]
fn zero_timeout_means_no_timeout() {
    let mut config = Config::default();
    config
        .set_value(ConfigKey::RequestTimeout, "0")
        .expect("numeric");
    assert_eq!(config.request_timeout(), None);

    config
        .set_value(ConfigKey::RequestTimeout, "30")
        .expect("numeric");
    assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
}

#[test]
fn config_keys_parse_case_insensitively() {
    assert_eq!(ConfigKey::parse("Server-URL"), Some(ConfigKey::ServerUrl));
    assert_eq!(ConfigKey::parse("theme"), Some(ConfigKey::Theme));
    assert_eq!(
        ConfigKey::parse(" request-timeout "),
        Some(ConfigKey::RequestTimeout)
    );
    assert_eq!(ConfigKey::parse("default-model"), None);
}

#[test]
fn unknown_theme_in_file_falls_back_to_dark() {
    let config = Config {
        theme: Some("neon".to_string()),
        ..Default::default()
    };
    assert_eq!(config.theme_mode(), ThemeMode::Dark);
}
