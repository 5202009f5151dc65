//! Configuration module - environment variables, CLI overrides and settings

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use hyper::header::HeaderValue;

use crate::error::AppError;
use crate::service::image::ImageMode;

/// Environment variable holding the generative-AI provider key
pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";
pub const ENV_GEMINI_MODEL: &str = "GEMINI_MODEL";
pub const ENV_IMAGEN_MODEL: &str = "IMAGEN_MODEL";
pub const ENV_POLLINATIONS_BASE_URL: &str = "POLLINATIONS_BASE_URL";
pub const ENV_FORM_RELAY_URL: &str = "FORM_RELAY_URL";
pub const ENV_IMAGE_MODE: &str = "FOLIO_IMAGE_MODE";
pub const ENV_HOST: &str = "FOLIO_HOST";
pub const ENV_PORT: &str = "FOLIO_PORT";
pub const ENV_CORS_ORIGIN: &str = "FOLIO_CORS_ORIGIN";

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_IMAGEN_MODEL: &str = "imagen-3.0-generate-002";
pub const DEFAULT_POLLINATIONS_BASE_URL: &str = "https://image.pollinations.ai";
pub const DEFAULT_FORM_RELAY_URL: &str = "https://formspree.io/f/xldopzby";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_CORS_ORIGIN: &str = "*";
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 60;

/// Optional configuration parameters for Config::new()
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    pub api_key: Option<String>,
    pub gemini_base_url: Option<String>,
    pub gemini_model: Option<String>,
    pub imagen_model: Option<String>,
    pub pollinations_base_url: Option<String>,
    pub form_relay_url: Option<String>,
    pub default_image_mode: Option<ImageMode>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub cors_origin: Option<String>,
    pub provider_timeout_secs: Option<u64>,
}

impl ConfigOptions {
    /// Read options from the process environment.
    /// Blank values are treated as unset.
    pub fn from_env() -> Result<Self> {
        let default_image_mode = match read_env(ENV_IMAGE_MODE) {
            Some(v) => Some(
                v.parse::<ImageMode>()
                    .map_err(|e| anyhow!("{}: {}", ENV_IMAGE_MODE, e))?,
            ),
            None => None,
        };
        let port = match read_env(ENV_PORT) {
            Some(v) => Some(
                v.parse::<u16>()
                    .with_context(|| format!("{} must be a port number", ENV_PORT))?,
            ),
            None => None,
        };

        Ok(Self {
            api_key: read_env(ENV_API_KEY),
            gemini_base_url: read_env(ENV_GEMINI_BASE_URL),
            gemini_model: read_env(ENV_GEMINI_MODEL),
            imagen_model: read_env(ENV_IMAGEN_MODEL),
            pollinations_base_url: read_env(ENV_POLLINATIONS_BASE_URL),
            form_relay_url: read_env(ENV_FORM_RELAY_URL),
            default_image_mode,
            host: read_env(ENV_HOST),
            port,
            cors_origin: read_env(ENV_CORS_ORIGIN),
            provider_timeout_secs: None,
        })
    }

    /// Values set in `overrides` win over values in `self`
    pub fn merge(self, overrides: ConfigOptions) -> Self {
        Self {
            api_key: overrides.api_key.or(self.api_key),
            gemini_base_url: overrides.gemini_base_url.or(self.gemini_base_url),
            gemini_model: overrides.gemini_model.or(self.gemini_model),
            imagen_model: overrides.imagen_model.or(self.imagen_model),
            pollinations_base_url: overrides
                .pollinations_base_url
                .or(self.pollinations_base_url),
            form_relay_url: overrides.form_relay_url.or(self.form_relay_url),
            default_image_mode: overrides.default_image_mode.or(self.default_image_mode),
            host: overrides.host.or(self.host),
            port: overrides.port.or(self.port),
            cors_origin: overrides.cors_origin.or(self.cors_origin),
            provider_timeout_secs: overrides
                .provider_timeout_secs
                .or(self.provider_timeout_secs),
        }
    }
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub imagen_model: String,
    pub pollinations_base_url: String,
    pub form_relay_url: String,
    /// Image mode applied when a request does not name one
    pub default_image_mode: ImageMode,
    pub host: String,
    pub port: u16,
    /// Value of `Access-Control-Allow-Origin` on every response
    pub cors_origin: String,
    pub provider_timeout_secs: u64,
}

impl Config {
    pub fn new(options: ConfigOptions) -> Result<Arc<Self>> {
        let api_key = options
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let host = options.host.unwrap_or_else(|| DEFAULT_HOST.to_string());
        if host.trim().is_empty() {
            return Err(anyhow!("host cannot be empty"));
        }

        let form_relay_url = normalize_url(
            options
                .form_relay_url
                .as_deref()
                .unwrap_or(DEFAULT_FORM_RELAY_URL),
        );
        if form_relay_url.is_empty() {
            return Err(anyhow!("form relay url cannot be empty"));
        }

        let cors_origin = options
            .cors_origin
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
        if HeaderValue::from_str(&cors_origin).is_err() {
            return Err(anyhow!("invalid CORS origin: {}", cors_origin));
        }

        Ok(Arc::new(Self {
            api_key,
            gemini_base_url: normalize_url(
                options
                    .gemini_base_url
                    .as_deref()
                    .unwrap_or(DEFAULT_GEMINI_BASE_URL),
            ),
            gemini_model: options
                .gemini_model
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            imagen_model: options
                .imagen_model
                .unwrap_or_else(|| DEFAULT_IMAGEN_MODEL.to_string()),
            pollinations_base_url: normalize_url(
                options
                    .pollinations_base_url
                    .as_deref()
                    .unwrap_or(DEFAULT_POLLINATIONS_BASE_URL),
            ),
            form_relay_url,
            default_image_mode: options.default_image_mode.unwrap_or_default(),
            host,
            port: options.port.unwrap_or(DEFAULT_PORT),
            cors_origin,
            provider_timeout_secs: options
                .provider_timeout_secs
                .unwrap_or(DEFAULT_PROVIDER_TIMEOUT_SECS),
        }))
    }

    /// Provider key, or the error both AI endpoints surface when it is absent
    pub fn require_api_key(&self) -> Result<&str, AppError> {
        self.api_key.as_deref().ok_or(AppError::MissingApiKey)
    }
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
