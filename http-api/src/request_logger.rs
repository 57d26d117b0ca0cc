//! Structured request logging middleware for the task API
//!
//! Emits one `tracing` event per `/api` request with method, path, status,
//! timing, and a truncated summary of the JSON body fields.

use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use http_body_util::BodyExt;
use serde_json::Value;
use std::time::Instant;

/// Maximum length for field values before truncation
const MAX_PARAM_LENGTH: usize = 30;

/// Truncation suffix for long values
const TRUNCATION_SUFFIX: &str = "...";

/// Largest body the logger will buffer; bigger bodies are passed through unread
const MAX_LOGGED_BODY: usize = 64 * 1024;

/// API request logging middleware
///
/// Requests outside `/api` (static assets, `/health`) pass through untouched.
pub async fn api_request_logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    if !path.starts_with("/api") {
        return next.run(request).await;
    }

    let declared_len = request
        .headers()
        .get(axum::http::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);

    let (request, params) = if declared_len == 0 || declared_len > MAX_LOGGED_BODY {
        (request, String::new())
    } else {
        let (parts, body) = request.into_parts();
        match body.collect().await {
            Ok(collected) => {
                let bytes = collected.to_bytes();
                let params = match serde_json::from_slice::<Value>(&bytes) {
                    Ok(json) => format_params_summary(&json),
                    Err(_) => "invalid_json".to_string(),
                };
                (Request::from_parts(parts, Body::from(bytes)), params)
            }
            Err(err) => {
                tracing::warn!(%method, %path, error = %err, "Failed to read request body");
                (Request::from_parts(parts, Body::empty()), String::new())
            }
        }
    };

    let response = next.run(request).await;
    let elapsed_ms = start_time.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    if response.status().is_server_error() {
        tracing::warn!(%method, %path, status, elapsed_ms, params = %params, "api request");
    } else {
        tracing::info!(%method, %path, status, elapsed_ms, params = %params, "api request");
    }

    response
}

/// Format body fields into a summary string with truncation
fn format_params_summary(params: &Value) -> String {
    match params {
        Value::Object(map) => {
            let formatted: Vec<String> = map
                .iter()
                .filter_map(|(key, value)| {
                    if is_sensitive_parameter(key) {
                        return Some(format!("{key}=\"[REDACTED]\""));
                    }

                    let formatted_value = format_parameter_value(value);
                    if formatted_value.is_empty() {
                        None
                    } else {
                        Some(format!("{key}=\"{formatted_value}\""))
                    }
                })
                .collect();

            formatted.join(", ")
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        _ => format_parameter_value(params),
    }
}

/// Format a single value with truncation
fn format_parameter_value(value: &Value) -> String {
    let value_str = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{...{} fields}}", obj.len()),
        Value::Null => "null".to_string(),
    };

    truncate_string(&value_str, MAX_PARAM_LENGTH)
}

/// Truncate to at most `max_length` characters, including the suffix
fn truncate_string(input: &str, max_length: usize) -> String {
    if input.chars().count() <= max_length {
        input.to_string()
    } else {
        let keep = max_length.saturating_sub(TRUNCATION_SUFFIX.len());
        let truncated: String = input.chars().take(keep).collect();
        format!("{truncated}{TRUNCATION_SUFFIX}")
    }
}

/// Check if a field should be redacted
fn is_sensitive_parameter(key: &str) -> bool {
    let sensitive_keys = [
        "password",
        "token",
        "secret",
        "key",
        "auth",
        "authorization",
        "credential",
    ];

    let key_lower = key.to_lowercase();
    sensitive_keys
        .iter()
        .any(|&sensitive| key_lower.contains(sensitive))
}
