//! HTTP server exposing the creative-helper JSON endpoints
//!
//! Routes:
//! - `POST /api/generate-brief`   `{query}` -> `{brief}` (provider)
//! - `POST /api/generate-ideas`   `{projectType}` -> `{ideas}` (provider)
//! - `POST /api/idea-template`    `{projectType}` -> `{ideas}` (local table)
//! - `POST /api/enhance-message`  `{message}` -> `{message}` (local rewrite)
//! - `POST /api/generate-image`   `{prompt, mode?}` -> `{imageUrl, mode}`
//! - `GET  /api/health`

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use reqwest::Client;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::config::Config;
use crate::enhancer::templates::{render_brief_prompt, render_ideas_prompt};
use crate::enhancer::{enhance_submission, lookup};
use crate::error::AppError;
use crate::service::{generate_image, generate_text, ImageMode, ProviderConfig};

/// Largest accepted request body
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Shortest business idea accepted by the brief endpoint
pub const MIN_BRIEF_QUERY_CHARS: usize = 10;

const BRIEF_FAILURE: &str = "Failed to generate brief";
const IDEAS_FAILURE: &str = "Failed to generate ideas";
const IMAGE_FAILURE: &str = "Failed to generate image";

/// Shared by every connection
pub struct AppState {
    pub config: Arc<Config>,
    pub client: Client,
}

/// Portfolio API server
pub struct AppServer {
    state: Arc<AppState>,
    local_addr: Arc<RwLock<Option<SocketAddr>>>,
}

impl AppServer {
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.provider_timeout_secs))
            .build()?;

        Ok(Self {
            state: Arc::new(AppState { config, client }),
            local_addr: Arc::new(RwLock::new(None)),
        })
    }

    /// Bind the configured address and serve in a background task.
    /// Returns the bound address (useful with port 0).
    pub async fn start(&self) -> Result<SocketAddr> {
        if let Some(addr) = *self.local_addr.read().await {
            return Ok(addr); // Already running
        }

        let config = &self.state.config;
        let listener = TcpListener::bind((config.host.as_str(), config.port))
            .await
            .map_err(|e| anyhow!("Failed to bind {}:{}: {}", config.host, config.port, e))?;
        let addr = listener.local_addr()?;

        *self.local_addr.write().await = Some(addr);
        info!("Portfolio server started: http://{}", addr);

        let state = self.state.clone();
        tokio::spawn(async move {
            loop {
                let (stream, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(e) => {
                        error!("Failed to accept connection: {}", e);
                        continue;
                    }
                };

                let io = TokioIo::new(stream);
                let state = state.clone();

                tokio::spawn(async move {
                    let service = service_fn(|req| {
                        let state = state.clone();
                        async move { handle_request(req, state).await }
                    });

                    if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                        if !e.to_string().contains("connection closed") {
                            error!("Error serving connection: {}", e);
                        }
                    }
                });
            }
        });

        Ok(addr)
    }

    pub async fn local_addr(&self) -> Option<SocketAddr> {
        *self.local_addr.read().await
    }
}

/// Route one request
async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let span = info_span!("request", id = %Uuid::new_v4(), %method, %path);

    let response = async {
        if method == Method::OPTIONS {
            return empty_response(StatusCode::NO_CONTENT);
        }

        let response = match (method.clone(), path.as_str()) {
            (Method::GET, "/api/health") => {
                json_response(StatusCode::OK, &json!({"status": "ok"}))
            }
            (Method::POST, "/api/generate-brief") => handle_generate_brief(req, &state).await,
            (Method::POST, "/api/generate-ideas") => handle_generate_ideas(req, &state).await,
            (Method::POST, "/api/idea-template") => handle_idea_template(req).await,
            (Method::POST, "/api/enhance-message") => handle_enhance_message(req).await,
            (Method::POST, "/api/generate-image") => handle_generate_image(req, &state).await,
            _ => json_response(StatusCode::NOT_FOUND, &json!({"error": "Not Found"})),
        };
        info!(status = response.status().as_u16(), "handled");
        response
    }
    .instrument(span)
    .await;

    Ok(cors_response(response, &state.config.cors_origin))
}

async fn handle_generate_brief(req: Request<Incoming>, state: &AppState) -> Response<Full<Bytes>> {
    let body = match read_json_body(req).await {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    let query = match non_blank_field(&body, "query") {
        Some(q) => q,
        None => return error_response(&AppError::empty_input("Query"), BRIEF_FAILURE),
    };

    if query.trim().chars().count() < MIN_BRIEF_QUERY_CHARS {
        let err = AppError::invalid_input(
            "Query",
            &format!("Please provide at least {} characters", MIN_BRIEF_QUERY_CHARS),
        );
        return error_response(&err, BRIEF_FAILURE);
    }

    let result = match ProviderConfig::text(&state.config) {
        Ok(provider) => generate_text(&state.client, &provider, &render_brief_prompt(query)).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(brief) => json_response(StatusCode::OK, &json!({ "brief": brief })),
        Err(e) => {
            e.log("generate_brief");
            error_response(&e, BRIEF_FAILURE)
        }
    }
}

async fn handle_generate_ideas(req: Request<Incoming>, state: &AppState) -> Response<Full<Bytes>> {
    let body = match read_json_body(req).await {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    let project_type = match non_blank_field(&body, "projectType") {
        Some(p) => p,
        None => return error_response(&AppError::empty_input("Project type"), IDEAS_FAILURE),
    };

    let result = match ProviderConfig::text(&state.config) {
        Ok(provider) => {
            generate_text(&state.client, &provider, &render_ideas_prompt(project_type)).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(ideas) => json_response(StatusCode::OK, &json!({ "ideas": ideas })),
        Err(e) => {
            e.log("generate_ideas");
            let mut body = error_body(&e, IDEAS_FAILURE);
            if !matches!(e, AppError::MissingApiKey) {
                body["message"] = Value::String(e.to_string());
            }
            json_response(e.status(), &body)
        }
    }
}

async fn handle_idea_template(req: Request<Incoming>) -> Response<Full<Bytes>> {
    let body = match read_json_body(req).await {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    match non_blank_field(&body, "projectType") {
        Some(project_type) => {
            json_response(StatusCode::OK, &json!({ "ideas": lookup(project_type.trim()) }))
        }
        None => error_response(&AppError::empty_input("Project type"), IDEAS_FAILURE),
    }
}

async fn handle_enhance_message(req: Request<Incoming>) -> Response<Full<Bytes>> {
    let body = match read_json_body(req).await {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    // A blank message is valid input and comes back empty
    match body.get("message").and_then(Value::as_str) {
        Some(message) => json_response(
            StatusCode::OK,
            &json!({ "message": enhance_submission(message) }),
        ),
        None => error_response(&AppError::empty_input("Message"), "Failed to enhance message"),
    }
}

async fn handle_generate_image(req: Request<Incoming>, state: &AppState) -> Response<Full<Bytes>> {
    let body = match read_json_body(req).await {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    let prompt = match non_blank_field(&body, "prompt") {
        Some(p) => p,
        None => return error_response(&AppError::empty_input("Prompt"), IMAGE_FAILURE),
    };

    let mode = match body.get("mode") {
        None | Some(Value::Null) => state.config.default_image_mode,
        Some(Value::String(s)) => match s.parse::<ImageMode>() {
            Ok(mode) => mode,
            Err(reason) => {
                return error_response(&AppError::invalid_input("Mode", &reason), IMAGE_FAILURE)
            }
        },
        Some(_) => {
            return error_response(
                &AppError::invalid_input("Mode", "expected 'basic' or 'pro'"),
                IMAGE_FAILURE,
            )
        }
    };

    match generate_image(&state.client, &state.config, prompt, mode).await {
        Ok(image) => match serde_json::to_value(&image) {
            Ok(value) => json_response(StatusCode::OK, &value),
            Err(e) => error_response(&AppError::Parse(e.to_string()), IMAGE_FAILURE),
        },
        Err(e) => {
            e.log("generate_image");
            error_response(&e, IMAGE_FAILURE)
        }
    }
}

/// String field that is present and not blank
fn non_blank_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// Read and parse a JSON body; the error side is a ready 400 response
async fn read_json_body(req: Request<Incoming>) -> Result<Value, Response<Full<Bytes>>> {
    let bytes = read_body_with_limit(req, MAX_BODY_SIZE).await.map_err(|e| {
        json_response(
            StatusCode::BAD_REQUEST,
            &json!({"error": e, "code": "VALIDATION_ERROR"}),
        )
    })?;

    serde_json::from_slice(&bytes).map_err(|_| {
        json_response(
            StatusCode::BAD_REQUEST,
            &json!({"error": "Invalid request body", "code": "VALIDATION_ERROR"}),
        )
    })
}

/// Collect the body, refusing anything over `max_size` bytes while streaming
async fn read_body_with_limit(req: Request<Incoming>, max_size: usize) -> Result<Bytes, String> {
    Limited::new(req.into_body(), max_size)
        .collect()
        .await
        .map(|collected| collected.to_bytes())
        .map_err(|e| {
            if e.downcast_ref::<LengthLimitError>().is_some() {
                format!("Request body too large (max {} bytes)", max_size)
            } else {
                "Failed to read body".to_string()
            }
        })
}

/// Public error message for a failed request. Provider-side failures are
/// collapsed into `failure`; details stay in the log.
fn public_message(err: &AppError, failure: &str) -> String {
    match err {
        AppError::EmptyInput(field) => format!("{} is required", field),
        AppError::InvalidInput { .. } | AppError::Validation(_) => err.to_string(),
        AppError::MissingApiKey => "API key not configured".to_string(),
        AppError::Timeout | AppError::AiServiceUnavailable(_) => err.user_message(),
        _ => failure.to_string(),
    }
}

fn error_body(err: &AppError, failure: &str) -> Value {
    json!({
        "error": public_message(err, failure),
        "code": err.code(),
    })
}

fn error_response(err: &AppError, failure: &str) -> Response<Full<Bytes>> {
    json_response(err.status(), &error_body(err, failure))
}

fn json_response(status: StatusCode, body: &Value) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(body.to_string())));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

fn empty_response(status: StatusCode) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = status;
    response
}

fn cors_response(mut response: Response<Full<Bytes>>, origin: &str) -> Response<Full<Bytes>> {
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(origin) {
        headers.insert("Access-Control-Allow-Origin", value);
    }
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_message_for_validation() {
        assert_eq!(
            public_message(&AppError::empty_input("Query"), BRIEF_FAILURE),
            "Query is required"
        );
        assert_eq!(
            public_message(&AppError::empty_input("Project type"), IDEAS_FAILURE),
            "Project type is required"
        );
    }

    #[test]
    fn test_public_message_hides_provider_details() {
        let err = AppError::Api("Gemini API failed: 500 - stack trace".to_string());
        assert_eq!(public_message(&err, BRIEF_FAILURE), BRIEF_FAILURE);
        assert_eq!(
            public_message(&AppError::MissingApiKey, BRIEF_FAILURE),
            "API key not configured"
        );
    }

    #[test]
    fn test_error_body_has_code() {
        let body = error_body(&AppError::MissingApiKey, BRIEF_FAILURE);
        assert_eq!(body["code"], "MISSING_API_KEY");
        assert_eq!(body["error"], "API key not configured");
    }

    #[test]
    fn test_json_response_content_type() {
        let response = json_response(StatusCode::OK, &json!({}));
        assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_cors_response_sets_origin() {
        let response = cors_response(empty_response(StatusCode::NOT_FOUND), "https://folio.example");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get("Access-Control-Allow-Origin").unwrap(),
            "https://folio.example"
        );
        let methods = response
            .headers()
            .get("Access-Control-Allow-Methods")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(methods.contains("POST"));
    }

    #[test]
    fn test_non_blank_field() {
        let body = json!({"query": "  ", "projectType": "Logo", "n": 3});
        assert_eq!(non_blank_field(&body, "query"), None);
        assert_eq!(non_blank_field(&body, "projectType"), Some("Logo"));
        assert_eq!(non_blank_field(&body, "n"), None);
        assert_eq!(non_blank_field(&body, "missing"), None);
    }
}
