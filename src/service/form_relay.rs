//! Contact form submission to a third-party form relay

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::common::send_logged;
use crate::error::AppError;
use crate::http_logger::HttpRequestLog;

/// Fields posted to the relay, form-encoded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    /// Reject blank fields and obviously malformed email addresses
    pub fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("Name", &self.name),
            ("Email", &self.email),
            ("Subject", &self.subject),
            ("Message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::empty_input(field));
            }
        }

        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(AppError::Validation("email".to_string())),
        }
    }
}

/// Post the submission to `relay_url`. Any 2xx counts as delivered.
pub async fn submit_contact(
    client: &Client,
    relay_url: &str,
    submission: &ContactSubmission,
) -> Result<(), AppError> {
    submission.validate()?;

    let request_log = HttpRequestLog::if_enabled(
        "POST",
        relay_url,
        &[
            ("Content-Type", "application/x-www-form-urlencoded"),
            ("Accept", "application/json"),
        ],
        None,
    );

    let builder = client
        .post(relay_url)
        .header("Accept", "application/json")
        .form(submission);

    let (status, body_text) = send_logged(builder, request_log).await?;
    if (200..300).contains(&status) {
        info!("Contact form delivered (status {})", status);
        Ok(())
    } else {
        warn!("Form relay rejected submission: {} - {}", status, body_text);
        Err(AppError::Api(format!(
            "form relay returned {}: {}",
            status, body_text
        )))
    }
}
