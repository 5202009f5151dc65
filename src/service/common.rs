//! Common types and utilities for provider calls

use std::time::Instant;

use reqwest::RequestBuilder;

use crate::config::Config;
use crate::error::AppError;
use crate::http_logger::{self, HttpRequestLog, HttpResponseLog};

/// Resolved settings for one provider call
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub token: String,
    pub model: String,
}

impl ProviderConfig {
    /// Text-generation settings; fails when no API key is configured
    pub fn text(config: &Config) -> Result<Self, AppError> {
        Ok(Self {
            base_url: config.gemini_base_url.clone(),
            token: config.require_api_key()?.to_string(),
            model: config.gemini_model.clone(),
        })
    }

    /// Image-generation (pro mode) settings; fails when no API key is configured
    pub fn image(config: &Config) -> Result<Self, AppError> {
        Ok(Self {
            base_url: config.gemini_base_url.clone(),
            token: config.require_api_key()?.to_string(),
            model: config.imagen_model.clone(),
        })
    }
}

/// Build `{base}/v1beta/models/{model}:{action}`, tolerating a base that
/// already ends in `/v1beta`
pub fn build_model_url(base_url: &str, model: &str, action: &str) -> String {
    let base_url = base_url.trim_end_matches('/');
    let base_url = base_url.strip_suffix("/v1beta").unwrap_or(base_url);
    format!("{}/v1beta/models/{}:{}", base_url, model, action)
}

/// Map a provider status code to an error, or `Ok` on 2xx
pub fn check_provider_status(status: u16, body: &str, provider: &str) -> Result<(), AppError> {
    match status {
        200..=299 => Ok(()),
        401 => Err(AppError::Api(format!(
            "{} API key invalid or expired",
            provider
        ))),
        403 => Err(AppError::Api(format!(
            "{} access denied, API key may be disabled",
            provider
        ))),
        429 | 503 => Err(AppError::AiServiceUnavailable(format!(
            "{} returned {}",
            provider, status
        ))),
        _ => Err(AppError::Api(format!(
            "{} API failed: {} - {}",
            provider, status, body
        ))),
    }
}

/// A finished exchange. The body has been read in full.
#[derive(Debug)]
pub(crate) struct Exchange {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Send and read the whole body, timing both. Headers are only collected
/// when `capture_headers` is set.
pub(crate) async fn send_timed(
    builder: RequestBuilder,
    capture_headers: bool,
) -> (Result<Exchange, reqwest::Error>, u64) {
    let start_time = Instant::now();
    let result = async {
        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let headers = if capture_headers {
            http_logger::extract_response_headers(&resp)
        } else {
            Vec::new()
        };
        let body = resp.text().await?;
        Ok::<_, reqwest::Error>(Exchange {
            status,
            headers,
            body,
        })
    }
    .await;
    (result, start_time.elapsed().as_millis() as u64)
}

/// Send a request, record it in the HTTP log when enabled, and return the
/// status code with the body text. Transport failures become
/// `Timeout`/`Network`.
pub async fn send_logged(
    builder: RequestBuilder,
    request_log: Option<HttpRequestLog>,
) -> Result<(u16, String), AppError> {
    let (result, duration_ms) = send_timed(builder, request_log.is_some()).await;

    match result {
        Ok(exchange) => {
            if let Some(ref req_log) = request_log {
                let response_log = HttpResponseLog {
                    status: exchange.status,
                    headers: exchange.headers,
                    body: Some(exchange.body.clone()),
                };
                http_logger::log_request(req_log, Some(&response_log), duration_ms, None);
            }
            Ok((exchange.status, exchange.body))
        }
        Err(e) => {
            if let Some(ref req_log) = request_log {
                http_logger::log_request(req_log, None, duration_ms, Some(&e.to_string()));
            }
            Err(AppError::from_reqwest(&e))
        }
    }
}
