//! Outbound HTTP exchange log
//!
//! Every provider and form-relay call can be appended to a plain-text file
//! for debugging. Off by default; set `FOLIO_HTTP_LOG=1` (or `true`, `yes`,
//! `on`) to turn it on. Secret header values are masked before writing.
//!
//! Entry layout:
//!
//! ```text
//! ==== 2026-01-01 12:00:00.000 POST https://...
//! > content-type: application/json
//! > x-goog-api-key: AIza...eKey
//! >
//! > {request body}
//! < 200 (42 ms)
//! < content-type: application/json
//! <
//! < {response body}
//! ```

use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use chrono::Local;
use tracing::warn;

const ENV_HTTP_LOG: &str = "FOLIO_HTTP_LOG";

const LOG_DIR: &str = ".folio-studio";
const LOG_FILE: &str = "http_requests.log";

/// Bodies longer than this are cut
const BODY_LOG_LIMIT: usize = 10_000;

const MASKED_HEADERS: &[&str] = &[
    "authorization",
    "proxy-authorization",
    "cookie",
    "set-cookie",
    "x-api-key",
    "x-goog-api-key",
];

static WRITE_LOCK: Mutex<()> = Mutex::new(());

pub fn is_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| {
        std::env::var(ENV_HTTP_LOG).is_ok_and(|v| {
            matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
    })
}

#[derive(Debug, Clone)]
pub struct HttpRequestLog {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequestLog {
    /// `None` when logging is off, so callers skip the bookkeeping entirely
    pub fn if_enabled(
        method: &str,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<String>,
    ) -> Option<Self> {
        is_enabled().then(|| Self {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            body,
        })
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponseLog {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// Append an exchange to `.folio-studio/http_requests.log` when enabled
pub fn log_request(
    request: &HttpRequestLog,
    response: Option<&HttpResponseLog>,
    duration_ms: u64,
    error: Option<&str>,
) {
    if !is_enabled() {
        return;
    }
    match log_file_path() {
        Some(path) => log_request_to(&path, request, response, duration_ms, error),
        None => warn!("HTTP log directory {} is not writable", LOG_DIR),
    }
}

/// Append an exchange to `path`. Ignores the env switch.
pub fn log_request_to(
    path: &Path,
    request: &HttpRequestLog,
    response: Option<&HttpResponseLog>,
    duration_ms: u64,
    error: Option<&str>,
) {
    let entry = render_entry(request, response, duration_ms, error);
    if let Err(e) = append(path, &entry) {
        warn!("Failed to write HTTP log {}: {}", path.display(), e);
    }
}

fn log_file_path() -> Option<PathBuf> {
    let dir = PathBuf::from(LOG_DIR);
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join(LOG_FILE))
}

fn render_entry(
    request: &HttpRequestLog,
    response: Option<&HttpResponseLog>,
    duration_ms: u64,
    error: Option<&str>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "==== {} {} {}",
        Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        request.method,
        request.url
    );

    write_block(&mut out, '>', &request.headers, request.body.as_deref());

    if let Some(resp) = response {
        let _ = writeln!(out, "< {} ({} ms)", resp.status, duration_ms);
        write_block(&mut out, '<', &resp.headers, resp.body.as_deref());
    }

    if let Some(err) = error {
        let _ = writeln!(out, "! failed after {} ms: {}", duration_ms, err);
    }

    out.push('\n');
    out
}

/// Headers, then a bare marker line and the body, each line prefixed
fn write_block(out: &mut String, marker: char, headers: &[(String, String)], body: Option<&str>) {
    for (name, value) in headers {
        let shown = if is_sensitive_header(name) {
            mask_token(value)
        } else {
            value.clone()
        };
        let _ = writeln!(out, "{} {}: {}", marker, name.to_ascii_lowercase(), shown);
    }

    if let Some(body) = body {
        let _ = writeln!(out, "{}", marker);
        for line in pretty_body(body).lines() {
            let _ = writeln!(out, "{} {}", marker, line);
        }
    }
}

fn append(path: &Path, entry: &str) -> std::io::Result<()> {
    // One entry per lock so concurrent calls never interleave
    let _guard = WRITE_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?
        .write_all(entry.as_bytes())
}

pub fn is_sensitive_header(name: &str) -> bool {
    MASKED_HEADERS
        .iter()
        .any(|masked| name.eq_ignore_ascii_case(masked))
}

/// Keep the first and last four characters of a secret
pub fn mask_token(value: &str) -> String {
    let (scheme, secret) = value
        .split_once("Bearer ")
        .filter(|(before, _)| before.is_empty())
        .map_or(("", value), |(_, rest)| ("Bearer ", rest));

    let count = secret.chars().count();
    if count <= 8 {
        return format!("{}****", scheme);
    }
    let head: String = secret.chars().take(4).collect();
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{}...{}", scheme, head, tail)
}

/// JSON bodies are pretty-printed; everything is capped at the size limit
fn pretty_body(body: &str) -> String {
    let text = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| serde_json::to_string_pretty(&json).ok())
        .unwrap_or_else(|| body.to_string());
    truncate_utf8_safe(&text, BODY_LOG_LIMIT)
}

/// Cut `s` to at most `max_len` bytes on a char boundary
pub fn truncate_utf8_safe(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let cut = (0..=max_len)
        .rev()
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(0);
    format!("{}...\n[truncated, total {} bytes]", &s[..cut], s.len())
}

pub fn extract_response_headers(response: &reqwest::Response) -> Vec<(String, String)> {
    response
        .headers()
        .iter()
        .map(|(name, value)| {
            let value = value.to_str().map_or_else(|_| "<binary>".to_string(), str::to_string);
            (name.as_str().to_string(), value)
        })
        .collect()
}
