//! Classified errors returned by every client call.
//!
//! Transport failures never reach callers as raw `reqwest` errors. They are
//! normalized into an [`ApiError`] carrying a machine-readable [`ErrorKind`],
//! the HTTP status and body when a response arrived, and a `user_message`
//! suitable for showing directly to a person.

use serde::Serialize;
use thiserror::Error;

use crate::http::request::{RequestContext, RequestId};

/// Message used when no response was received at all.
pub const NETWORK_ERROR_MESSAGE: &str = "Network Error - Please check your connection";

/// Message for statuses missing from [`USER_MESSAGES`].
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

pub const CANCELLED_MESSAGE: &str = "Request cancelled";
pub const CANCELLED_USER_MESSAGE: &str = "Operation was cancelled";

/// Status code → user-facing message.
pub const USER_MESSAGES: &[(u16, &str)] = &[
    (400, "Invalid request - Please check your input"),
    (401, "Session expired - Please login again"),
    (403, "Permission denied - You don't have access"),
    (404, "Resource not found"),
    (409, "Conflict - Resource already exists"),
    (429, "Too many requests - Please slow down"),
    (500, "Server error - Please try again later"),
    (503, "Service unavailable - Maintenance in progress"),
];

/// Failure taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The caller's cancel handle fired.
    Cancelled,
    /// No response was received (connect failure, reset, timeout).
    Network,
    /// Non-success status below 500.
    Client,
    /// Status 500 or above.
    Server,
    /// The request could not be built, so it was never sent.
    Unknown,
    /// Success status, but the body did not match the expected shape.
    Decode,
}

impl ErrorKind {
    /// Network failures and 5xx responses are worth another attempt.
    pub fn is_transient(self) -> bool {
        matches!(self, ErrorKind::Network | ErrorKind::Server)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::Network => "network",
            ErrorKind::Client => "client",
            ErrorKind::Server => "server",
            ErrorKind::Unknown => "unknown",
            ErrorKind::Decode => "decode",
        }
    }
}

/// Normalized failure of an API call.
#[derive(Debug, Clone, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    pub user_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<RequestId>,
    pub retry_count: u32,
}

impl ApiError {
    fn new(kind: ErrorKind, message: impl Into<String>, code: &str) -> Self {
        let message = message.into();
        Self {
            kind,
            user_message: message.clone(),
            message,
            status: None,
            data: None,
            code: Some(code.to_string()),
            request_id: None,
            retry_count: 0,
        }
    }

    pub fn cancelled() -> Self {
        let mut err = Self::new(ErrorKind::Cancelled, CANCELLED_MESSAGE, "ERR_CANCELED");
        err.user_message = CANCELLED_USER_MESSAGE.to_string();
        err
    }

    /// A response arrived with a non-success status.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let (kind, code) = if status >= 500 {
            (ErrorKind::Server, "ERR_BAD_RESPONSE")
        } else {
            (ErrorKind::Client, "ERR_BAD_REQUEST")
        };
        let mut err = Self::new(
            kind,
            format!("Request failed with status code {}", status),
            code,
        );
        err.status = Some(status);
        err.data = body_data(body);
        err
    }

    /// Map a `reqwest` failure that happened before a full response was read.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_builder() {
            return Self::invalid_request(err.to_string());
        }
        let code = if err.is_timeout() { "ECONNABORTED" } else { "ERR_NETWORK" };
        Self::new(ErrorKind::Network, NETWORK_ERROR_MESSAGE, code)
    }

    /// The request could not be constructed. Its error text is kept as the message.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, message, "ERR_BAD_OPTION")
    }

    pub fn decode(status: u16, err: &serde_json::Error) -> Self {
        let mut e = Self::new(
            ErrorKind::Decode,
            format!("Failed to decode response body: {}", err),
            "ERR_DECODE",
        );
        e.status = Some(status);
        e
    }

    /// Stamp the error with its call's context and pick the user message.
    pub(crate) fn finalize(mut self, ctx: &RequestContext) -> Self {
        self.request_id = Some(ctx.request_id());
        self.retry_count = ctx.retry_count();
        if self.kind != ErrorKind::Cancelled {
            self.user_message = user_message_for(self.status, &self.message);
        }
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == ErrorKind::Cancelled
    }
}

/// Pick the user-facing message for a failure.
///
/// With a status, look it up in [`USER_MESSAGES`]; without one, the raw
/// message is already the best description available.
pub fn user_message_for(status: Option<u16>, raw_message: &str) -> String {
    match status {
        Some(code) => USER_MESSAGES
            .iter()
            .find(|(s, _)| *s == code)
            .map(|(_, msg)| *msg)
            .unwrap_or(UNEXPECTED_ERROR_MESSAGE)
            .to_string(),
        None => raw_message.to_string(),
    }
}

/// Log an API error and return the message to show the user.
pub fn handle_api_error(error: &ApiError) -> String {
    tracing::error!(
        kind = error.kind.as_str(),
        status = ?error.status,
        code = ?error.code,
        "API Error: {}",
        error.message
    );
    if error.user_message.is_empty() {
        UNEXPECTED_ERROR_MESSAGE.to_string()
    } else {
        error.user_message.clone()
    }
}

/// Error bodies are kept as JSON when possible, raw text otherwise.
fn body_data(body: &[u8]) -> Option<serde_json::Value> {
    if body.is_empty() {
        return None;
    }
    serde_json::from_slice(body)
        .ok()
        .or_else(|| Some(serde_json::Value::String(String::from_utf8_lossy(body).into_owned())))
}
