//! Request outcomes and failure classification

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::transport::{TransportError, TransportResponse};

/// Category of a failed request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Authentication,
    Network,
    Timeout,
    Api,
    RateLimit,
    Unknown,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::Authentication => "authentication",
            ErrorKind::Network => "network",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Api => "api",
            ErrorKind::RateLimit => "rate limit",
            ErrorKind::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// A classified request failure
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{kind} error: {message}")]
pub struct RequestError {
    pub kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl RequestError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
            code: None,
            details: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Transient failures worth another attempt: network, timeout, 5xx
    pub fn is_retryable(&self) -> bool {
        match self.kind {
            ErrorKind::Network | ErrorKind::Timeout => true,
            ErrorKind::Api => self.status.is_some_and(|s| s >= 500),
            ErrorKind::Authentication | ErrorKind::RateLimit | ErrorKind::Unknown => false,
        }
    }

    pub(crate) fn timeout(timeout_ms: u64) -> Self {
        Self::new(ErrorKind::Timeout, format!("Request timed out after {}ms", timeout_ms)).with_code("TIMEOUT")
    }
}

/// Successful response: status plus parsed body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

/// Outcome of one logical request (after retries)
pub type RequestOutcome = Result<ApiResponse, RequestError>;

/// Map a raw transport result onto the fixed error taxonomy
pub fn classify(result: Result<TransportResponse, TransportError>) -> RequestOutcome {
    let response = match result {
        Ok(response) => response,
        Err(TransportError::Connect(reason)) => {
            return Err(RequestError::new(ErrorKind::Network, format!("Network error: {}", reason))
                .with_code("CONNECTION_FAILED"));
        }
        Err(TransportError::Timeout(reason)) => {
            return Err(RequestError::new(ErrorKind::Timeout, format!("Request timed out: {}", reason))
                .with_code("TIMEOUT"));
        }
        Err(TransportError::Request(reason)) => {
            return Err(RequestError::new(ErrorKind::Unknown, format!("Request failed: {}", reason))
                .with_code("REQUEST_FAILED"));
        }
    };

    let status = response.status;
    let body = parse_body(&response.body);

    if (200..300).contains(&status) {
        return Ok(ApiResponse { status, body });
    }

    let upstream = upstream_message(&body);
    let error = match status {
        401 | 403 => {
            let code = if status == 401 { "UNAUTHORIZED" } else { "FORBIDDEN" };
            RequestError::new(
                ErrorKind::Authentication,
                with_upstream(format!("Authentication failed with status {}", status), upstream),
            )
            .with_code(code)
        }
        429 => RequestError::new(
            ErrorKind::RateLimit,
            with_upstream("Rate limit exceeded".to_string(), upstream),
        )
        .with_code("RATE_LIMITED"),
        _ => RequestError::new(
            ErrorKind::Api,
            with_upstream(format!("API request failed with status {}", status), upstream),
        )
        .with_code(format!("HTTP_{}", status)),
    };

    Err(error.with_status(status).with_details(body))
}

fn with_upstream(base: String, upstream: Option<String>) -> String {
    match upstream {
        Some(msg) => format!("{}: {}", base, msg),
        None => base,
    }
}

/// JSON when possible, `null` for empty bodies, the raw text otherwise
pub(crate) fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Pull a human-readable message out of the usual Evolution error envelopes
pub(crate) fn upstream_message(body: &Value) -> Option<String> {
    if body.is_string() {
        return message_text(body);
    }
    [body.pointer("/response/message"), body.get("message"), body.get("error")]
        .into_iter()
        .flatten()
        .find_map(message_text)
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(message_text).collect();
            if parts.is_empty() { None } else { Some(parts.join("; ")) }
        }
        _ => None,
    }
}
