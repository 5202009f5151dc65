//! Gemini text-generation service

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::common::{build_model_url, check_provider_status, send_logged, ProviderConfig};
use crate::error::AppError;
use crate::http_logger::HttpRequestLog;

/// Gemini API request structure
#[derive(Debug, Serialize)]
struct GeminiApiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

/// Gemini API response structure
#[derive(Debug, Deserialize)]
struct GeminiApiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

/// Send a single-turn prompt and return the generated text
pub async fn generate_text(
    client: &Client,
    provider: &ProviderConfig,
    prompt: &str,
) -> Result<String, AppError> {
    let payload = GeminiApiRequest {
        contents: vec![GeminiContent {
            role: "user".to_string(),
            parts: vec![GeminiPart {
                text: prompt.to_string(),
            }],
        }],
        generation_config: Some(GeminiGenerationConfig {
            max_output_tokens: 1024,
        }),
    };

    let url = build_model_url(&provider.base_url, &provider.model, "generateContent");
    info!("Calling Gemini API: {}", url);

    let request_log = HttpRequestLog::if_enabled(
        "POST",
        &url,
        &[
            ("Content-Type", "application/json"),
            ("x-goog-api-key", provider.token.as_str()),
        ],
        serde_json::to_string(&payload).ok(),
    );

    let builder = client
        .post(&url)
        .header("Content-Type", "application/json")
        .header("x-goog-api-key", &provider.token)
        .json(&payload);

    let (status, body_text) = send_logged(builder, request_log).await?;
    check_provider_status(status, &body_text, "Gemini")?;

    let api_response: GeminiApiResponse = serde_json::from_str(&body_text)
        .map_err(|e| AppError::Parse(format!("Gemini response: {}", e)))?;

    // Concatenate every text part of the first candidate
    let text: String = api_response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AppError::Parse("Empty response from provider".to_string()));
    }

    Ok(text)
}
