//! Typed client for the portfolio API
//!
//! Carries the caller-side rules of the contact UI: input validation before
//! the call, a 30 second budget for brief generation, and mapping of non-2xx
//! answers to `AppError::Fetch`. Nothing is retried.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::error::AppError;
use crate::server::MIN_BRIEF_QUERY_CHARS;
use crate::service::{GeneratedImage, ImageMode};

/// Client-side budget for `/api/generate-brief`
pub const BRIEF_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct BriefResponse {
    brief: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IdeasResponse {
    ideas: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    message: String,
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<ImageMode>,
}

pub struct StudioClient {
    base_url: String,
    http: Client,
    brief_timeout: Duration,
}

impl StudioClient {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let http = Client::builder()
            .build()
            .map_err(|e| AppError::Network(e.to_string()))?;
        Ok(Self::with_client(base_url, http))
    }

    pub fn with_client(base_url: &str, http: Client) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            http,
            brief_timeout: BRIEF_TIMEOUT,
        }
    }

    /// Override the brief budget (tests use a short one)
    pub fn brief_timeout(mut self, timeout: Duration) -> Self {
        self.brief_timeout = timeout;
        self
    }

    /// Generate a design brief for a business idea
    pub async fn generate_brief(&self, query: &str) -> Result<String, AppError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(AppError::empty_input("Business Idea"));
        }
        if trimmed.chars().count() < MIN_BRIEF_QUERY_CHARS {
            return Err(AppError::invalid_input(
                "Business Idea",
                &format!("Please provide at least {} characters", MIN_BRIEF_QUERY_CHARS),
            ));
        }

        let response: BriefResponse = self
            .post_json(
                "/api/generate-brief",
                &json!({ "query": query }),
                Some(self.brief_timeout),
            )
            .await?;

        match response.brief {
            Some(brief) if !brief.trim().is_empty() => Ok(brief),
            _ => Err(AppError::Parse("Empty response from server".to_string())),
        }
    }

    /// Canned ideas from the local template table
    pub async fn idea_template(&self, project_type: &str) -> Result<String, AppError> {
        self.ideas("/api/idea-template", project_type).await
    }

    /// Provider-generated ideas
    pub async fn generate_ideas(&self, project_type: &str) -> Result<String, AppError> {
        self.ideas("/api/generate-ideas", project_type).await
    }

    async fn ideas(&self, path: &str, project_type: &str) -> Result<String, AppError> {
        if project_type.trim().is_empty() {
            return Err(AppError::empty_input("Project Type"));
        }

        let response: IdeasResponse = self
            .post_json(path, &json!({ "projectType": project_type }), None)
            .await?;

        response
            .ideas
            .filter(|ideas| !ideas.trim().is_empty())
            .ok_or_else(|| AppError::Parse("Empty response from server".to_string()))
    }

    pub async fn enhance_message(&self, message: &str) -> Result<String, AppError> {
        let response: MessageResponse = self
            .post_json("/api/enhance-message", &json!({ "message": message }), None)
            .await?;
        Ok(response.message)
    }

    /// Request an image. `None` lets the server apply its configured default mode.
    pub async fn generate_image(
        &self,
        prompt: &str,
        mode: Option<ImageMode>,
    ) -> Result<GeneratedImage, AppError> {
        if prompt.trim().is_empty() {
            return Err(AppError::empty_input("Design Concept"));
        }

        self.post_json("/api/generate-image", &ImageRequest { prompt, mode }, None)
            .await
    }

    async fn post_json<B, T>(
        &self,
        path: &str,
        body: &B,
        timeout: Option<Duration>,
    ) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        info!("POST {}", url);

        let mut request = self.http.post(&url).json(body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| AppError::from_reqwest(&e))?;
        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|e| AppError::from_reqwest(&e))?;

        if !status.is_success() {
            return Err(fetch_error(status.as_u16(), &body_text));
        }

        serde_json::from_str(&body_text).map_err(|e| AppError::Parse(e.to_string()))
    }
}

/// Build a fetch error from a failed response, preferring the server's
/// `error` field
fn fetch_error(status: u16, body: &str) -> AppError {
    let error = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        v.get("error")
            .and_then(Value::as_str)
            .map(|s| s.to_string())
    });
    AppError::Fetch { status, error }
}
