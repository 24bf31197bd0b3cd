use super::data::{Config, DEFAULT_BASE_URL, MAX_SIDEBAR_WIDTH, MIN_SIDEBAR_WIDTH};
use super::io::ConfigError;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_config.toml");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");

    assert_eq!(config, Config::default());
    assert_eq!(config.resolve_base_url(None), DEFAULT_BASE_URL);
    assert_eq!(config.health_interval(), Duration::from_secs(30));
    assert!(!config.reasoning());
}

#[test]
fn test_config_persistence_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let config = Config {
        base_url: Some("http://backend:8000".to_string()),
        health_interval_secs: Some(10),
        sidebar_width: Some(40),
        reasoning: Some(true),
    };
    config.save_to_path(&config_path).expect("save failed");

    let loaded = Config::load_from_path(&config_path).expect("load failed");
    assert_eq!(loaded, config);

    Config::mutate_at(&config_path, |config| config.base_url = None).expect("mutate failed");
    let reloaded = Config::load_from_path(&config_path).expect("reload failed");
    assert_eq!(reloaded.base_url, None);
    assert_eq!(reloaded.sidebar_width, Some(40));
}

#[test]
fn invalid_toml_reports_parse_error_with_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "base_url = [unterminated").expect("write");

    let err = Config::load_from_path(&config_path).expect_err("should fail to parse");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().starts_with("Failed to parse config at "));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn wrong_value_types_are_parse_errors() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "sidebar_width = \"wide\"\n").expect("write");

    assert!(matches!(
        Config::load_from_path(&config_path),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn base_url_precedence_prefers_override_then_file_then_default() {
    let file = Config {
        base_url: Some("http://from-file/api".to_string()),
        ..Default::default()
    };
    assert_eq!(
        file.resolve_base_url(Some("http://from-flag/api")),
        "http://from-flag/api"
    );
    assert_eq!(file.resolve_base_url(Some("   ")), "http://from-file/api");
    assert_eq!(file.resolve_base_url(None), "http://from-file/api");
    assert_eq!(Config::default().resolve_base_url(None), DEFAULT_BASE_URL);
}

#[test]
fn layout_values_are_clamped_and_zero_interval_falls_back() {
    let narrow = Config {
        sidebar_width: Some(5),
        health_interval_secs: Some(0),
        ..Default::default()
    };
    assert_eq!(narrow.sidebar_width(), MIN_SIDEBAR_WIDTH);
    assert_eq!(narrow.health_interval(), Duration::from_secs(30));

    let wide = Config {
        sidebar_width: Some(500),
        ..Default::default()
    };
    assert_eq!(wide.sidebar_width(), MAX_SIDEBAR_WIDTH);
}
