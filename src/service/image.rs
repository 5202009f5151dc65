//! Design image generation
//!
//! Two quality modes:
//! - `basic`: Pollinations, keyless. The image URL is built locally and the
//!   provider renders it on first GET.
//! - `pro`: Imagen through the Gemini API. Needs the API key; the returned
//!   bytes are handed back as a `data:` URL.

use std::fmt;
use std::str::FromStr;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::common::{build_model_url, check_provider_status, send_logged, ProviderConfig};
use crate::config::Config;
use crate::error::AppError;
use crate::http_logger::HttpRequestLog;

/// Square output size requested from Pollinations
pub const BASIC_IMAGE_SIZE: u32 = 1024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageMode {
    #[default]
    Basic,
    Pro,
}

impl fmt::Display for ImageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
            Self::Pro => write!(f, "pro"),
        }
    }
}

impl FromStr for ImageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "pro" => Ok(Self::Pro),
            other => Err(format!(
                "unknown image mode '{}', expected 'basic' or 'pro'",
                other
            )),
        }
    }
}

/// Result of an image request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub mode: ImageMode,
}

#[derive(Debug, Serialize)]
struct ImagenRequest {
    instances: Vec<ImagenInstance>,
    parameters: ImagenParameters,
}

#[derive(Debug, Serialize)]
struct ImagenInstance {
    prompt: String,
}

#[derive(Debug, Serialize)]
struct ImagenParameters {
    #[serde(rename = "sampleCount")]
    sample_count: u32,
}

#[derive(Debug, Deserialize)]
struct ImagenResponse {
    #[serde(default)]
    predictions: Vec<ImagenPrediction>,
}

#[derive(Debug, Deserialize)]
struct ImagenPrediction {
    #[serde(rename = "bytesBase64Encoded")]
    bytes_base64_encoded: Option<String>,
    #[serde(rename = "mimeType")]
    mime_type: Option<String>,
}

/// Generate an image for `prompt` in the given mode
pub async fn generate_image(
    client: &Client,
    config: &Config,
    prompt: &str,
    mode: ImageMode,
) -> Result<GeneratedImage, AppError> {
    let image_url = match mode {
        ImageMode::Basic => build_pollinations_url(&config.pollinations_base_url, prompt)?,
        ImageMode::Pro => {
            let provider = ProviderConfig::image(config)?;
            call_imagen(client, &provider, prompt).await?
        }
    };

    Ok(GeneratedImage { image_url, mode })
}

/// `{base}/prompt/{encoded prompt}?width=..&height=..&nologo=true`
///
/// A prompt of only `.` or `..` is rejected: as a path segment it would be
/// dropped and the URL would carry no prompt at all.
pub fn build_pollinations_url(base_url: &str, prompt: &str) -> Result<String, AppError> {
    if matches!(prompt, "." | "..") {
        return Err(AppError::invalid_input(
            "Prompt",
            "must describe the design, not just dots",
        ));
    }

    let mut url = Url::parse(base_url)
        .map_err(|e| AppError::Api(format!("invalid image provider url {}: {}", base_url, e)))?;

    url.path_segments_mut()
        .map_err(|_| AppError::Api(format!("image provider url {} cannot be a base", base_url)))?
        .pop_if_empty()
        .push("prompt")
        .push(prompt);

    let size = BASIC_IMAGE_SIZE.to_string();
    url.query_pairs_mut()
        .append_pair("width", &size)
        .append_pair("height", &size)
        .append_pair("nologo", "true");

    Ok(url.to_string())
}

async fn call_imagen(
    client: &Client,
    provider: &ProviderConfig,
    prompt: &str,
) -> Result<String, AppError> {
    let payload = ImagenRequest {
        instances: vec![ImagenInstance {
            prompt: prompt.to_string(),
        }],
        parameters: ImagenParameters { sample_count: 1 },
    };

    let url = build_model_url(&provider.base_url, &provider.model, "predict");
    info!("Calling Imagen API: {}", url);

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
    check_provider_status(status, &body_text, "Imagen")?;

    let api_response: ImagenResponse = serde_json::from_str(&body_text)
        .map_err(|e| AppError::Parse(format!("Imagen response: {}", e)))?;

    let prediction = api_response
        .predictions
        .into_iter()
        .find(|p| p.bytes_base64_encoded.as_deref().is_some_and(|b| !b.is_empty()))
        .ok_or_else(|| AppError::Parse("Image provider returned no image".to_string()))?;

    let mime = prediction.mime_type.as_deref().unwrap_or("image/png");
    let bytes = prediction.bytes_base64_encoded.unwrap_or_default();

    Ok(format!("data:{};base64,{}", mime, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_mode_parse() {
        assert_eq!("basic".parse::<ImageMode>().unwrap(), ImageMode::Basic);
        assert_eq!(" PRO ".parse::<ImageMode>().unwrap(), ImageMode::Pro);
        assert!("ultra".parse::<ImageMode>().is_err());
    }

    #[test]
    fn test_image_mode_serde() {
        assert_eq!(serde_json::to_string(&ImageMode::Pro).unwrap(), "\"pro\"");
        let mode: ImageMode = serde_json::from_str("\"basic\"").unwrap();
        assert_eq!(mode, ImageMode::Basic);
    }

    #[test]
    fn test_build_pollinations_url_encodes_prompt() {
        let url = build_pollinations_url(
            "https://image.pollinations.ai",
            "violet logo / teal accents",
        )
        .unwrap();
        assert_eq!(
            url,
            "https://image.pollinations.ai/prompt/violet%20logo%20%2F%20teal%20accents?width=1024&height=1024&nologo=true"
        );
    }

    #[test]
    fn test_build_pollinations_url_rejects_dot_segments() {
        for prompt in [".", ".."] {
            let err = build_pollinations_url("https://image.pollinations.ai", prompt).unwrap_err();
            assert!(matches!(err, AppError::InvalidInput { .. }));
        }
        let url = build_pollinations_url("https://image.pollinations.ai", "...").unwrap();
        assert!(url.contains("/prompt/...?"));
    }

    #[test]
    fn test_build_pollinations_url_rejects_garbage_base() {
        assert!(build_pollinations_url("not a url", "logo").is_err());
    }
}
