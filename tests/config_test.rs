//! Tests for config module

use folio_studio::config::{
    Config, ConfigOptions, DEFAULT_CORS_ORIGIN, DEFAULT_FORM_RELAY_URL, DEFAULT_GEMINI_MODEL,
    DEFAULT_HOST, DEFAULT_PORT, DEFAULT_PROVIDER_TIMEOUT_SECS,
};
use folio_studio::{AppError, ImageMode};

#[test]
fn test_config_default_values() {
    let config = Config::new(ConfigOptions::default()).unwrap();
    assert!(config.api_key.is_none());
    assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
    assert_eq!(config.form_relay_url, DEFAULT_FORM_RELAY_URL);
    assert_eq!(config.host, DEFAULT_HOST);
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.cors_origin, DEFAULT_CORS_ORIGIN);
    assert_eq!(config.provider_timeout_secs, DEFAULT_PROVIDER_TIMEOUT_SECS);
    assert_eq!(config.default_image_mode, ImageMode::Basic);
}

#[test]
fn test_config_with_custom_values() {
    let config = Config::new(ConfigOptions {
        api_key: Some(" key-123 ".to_string()),
        gemini_base_url: Some("http://127.0.0.1:9999/".to_string()),
        default_image_mode: Some(ImageMode::Pro),
        port: Some(0),
        provider_timeout_secs: Some(5),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(config.api_key.as_deref(), Some("key-123"));
    assert_eq!(config.require_api_key().unwrap(), "key-123");
    assert_eq!(config.gemini_base_url, "http://127.0.0.1:9999");
    assert_eq!(config.default_image_mode, ImageMode::Pro);
    assert_eq!(config.port, 0);
    assert_eq!(config.provider_timeout_secs, 5);
}

#[test]
fn test_config_missing_key_error() {
    let config = Config::new(ConfigOptions::default()).unwrap();
    assert!(matches!(
        config.require_api_key(),
        Err(AppError::MissingApiKey)
    ));
}

#[test]
fn test_config_empty_host_fails() {
    let result = Config::new(ConfigOptions {
        host: Some("  ".to_string()),
        ..Default::default()
    });
    assert!(result.unwrap_err().to_string().contains("host"));
}

#[test]
fn test_config_invalid_cors_origin_fails() {
    let result = Config::new(ConfigOptions {
        cors_origin: Some("bad\norigin".to_string()),
        ..Default::default()
    });
    assert!(result.is_err());
}

#[test]
fn test_merge_overrides_win() {
    let base = ConfigOptions {
        host: Some("0.0.0.0".to_string()),
        port: Some(8080),
        default_image_mode: Some(ImageMode::Basic),
        ..Default::default()
    };
    let overrides = ConfigOptions {
        port: Some(9090),
        default_image_mode: Some(ImageMode::Pro),
        ..Default::default()
    };

    let merged = base.merge(overrides);
    assert_eq!(merged.host.as_deref(), Some("0.0.0.0"));
    assert_eq!(merged.port, Some(9090));
    assert_eq!(merged.default_image_mode, Some(ImageMode::Pro));
}
