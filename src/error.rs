//! Application error taxonomy
//!
//! Every failure surfaced to a user maps to one of these variants. Each
//! variant carries a machine-readable code, an HTTP status and a message
//! written for end users. Nothing here is retried automatically.

use hyper::StatusCode;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Connection could not be established or was dropped
    #[error("Network request failed: {0}")]
    Network(String),

    /// Upstream answered with a failure status
    #[error("API Error: {0}")]
    Api(String),

    #[error("Validation failed for field: {0}")]
    Validation(String),

    #[error("{0} is empty")]
    EmptyInput(String),

    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Request timed out")]
    Timeout,

    /// Response body was malformed or carried no usable content
    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("API key is not configured")]
    MissingApiKey,

    #[error("AI service is unavailable: {0}")]
    AiServiceUnavailable(String),

    /// Non-2xx answer from our own server, as seen by the client
    #[error("HTTP {status}: {}", .error.as_deref().unwrap_or("Request failed"))]
    Fetch { status: u16, error: Option<String> },
}

impl AppError {
    pub fn empty_input(field: &str) -> Self {
        Self::EmptyInput(field.to_string())
    }

    pub fn invalid_input(field: &str, reason: &str) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Map a transport-level reqwest failure
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err.to_string())
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Network(_) => "NETWORK_ERROR",
            Self::Api(_) => "API_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::EmptyInput(_) => "EMPTY_INPUT",
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::Timeout => "TIMEOUT_ERROR",
            Self::Parse(_) => "PARSE_ERROR",
            Self::MissingApiKey => "MISSING_API_KEY",
            Self::AiServiceUnavailable(_) => "AI_SERVICE_UNAVAILABLE",
            Self::Fetch { .. } => "FETCH_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Network(_) | Self::AiServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Validation(_) | Self::EmptyInput(_) | Self::InvalidInput { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::Api(_) | Self::Parse(_) | Self::MissingApiKey => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Fetch { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }

    /// Message safe to show to an end user
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Unable to connect. Please check your internet connection.".into(),
            Self::Api(_) => "Something went wrong. Please try again.".into(),
            Self::Validation(field) => format!("Please check your {} and try again.", field),
            Self::EmptyInput(field) => format!("Please provide a {}.", field.to_lowercase()),
            Self::InvalidInput { field, reason } => {
                format!("Your {} is invalid: {}", field.to_lowercase(), reason)
            }
            Self::Timeout => "The request took too long. Please try again.".into(),
            Self::Parse(_) => "Failed to process server response. Please try again.".into(),
            Self::MissingApiKey => "Server configuration error. Please contact support.".into(),
            Self::AiServiceUnavailable(_) => {
                "The AI service is temporarily unavailable. Please try again later.".into()
            }
            Self::Fetch {
                error: Some(error), ..
            } => error.clone(),
            Self::Fetch {
                status,
                error: None,
            } => format!(
                "Request failed with status {}. Please try again.",
                status
            ),
        }
    }

    /// Log with the call-site context, e.g. `err.log("generate_brief")`
    pub fn log(&self, context: &str) {
        error!("[{}] ({}): {}", self.code(), context, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            AppError::Network("x".into()),
            AppError::Api("x".into()),
            AppError::Validation("x".into()),
            AppError::empty_input("x"),
            AppError::invalid_input("x", "y"),
            AppError::Timeout,
            AppError::Parse("x".into()),
            AppError::MissingApiKey,
            AppError::AiServiceUnavailable("x".into()),
            AppError::Fetch {
                status: 500,
                error: None,
            },
        ];
        let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_fetch_status_passthrough() {
        let err = AppError::Fetch {
            status: 429,
            error: None,
        };
        assert_eq!(err.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.to_string(), "HTTP 429: Request failed");
    }

    #[test]
    fn test_empty_input_lowercases_field() {
        let err = AppError::empty_input("Business Idea");
        assert_eq!(err.user_message(), "Please provide a business idea.");
        assert_eq!(err.to_string(), "Business Idea is empty");
    }
}
