//! Outgoing request description and per-call context.
//!
//! # Responsibilities
//! - Generate the request ID (millisecond timestamp, kept strictly increasing)
//! - Carry retry bookkeeping for one call as an immutable value
//! - Describe a request so every attempt resends it unchanged

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use reqwest::Method;
use serde::Serialize;

/// Header carrying the request ID to the backend.
pub const X_REQUEST_ID: &str = "x-request-id";

static LAST_REQUEST_ID: AtomicU64 = AtomicU64::new(0);

/// Per-call identifier: the start time in milliseconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RequestId(pub u64);

impl RequestId {
    /// Next ID. Two calls in the same millisecond still get distinct,
    /// increasing IDs.
    pub fn next() -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        let prev = LAST_REQUEST_ID
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or(now);
        RequestId(now.max(prev + 1))
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Metadata for one call, shared by all of its attempts.
///
/// Retries never mutate a context; [`RequestContext::next_attempt`] returns
/// the context for the following attempt with the same ID and start time.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    request_id: RequestId,
    retry_count: u32,
    started_at: Instant,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            request_id: RequestId::next(),
            retry_count: 0,
            started_at: Instant::now(),
        }
    }

    pub fn next_attempt(&self) -> Self {
        Self {
            retry_count: self.retry_count + 1,
            ..*self
        }
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Retries performed so far (0 on the first attempt).
    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    /// Time since the call started, retries included.
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A request relative to the client's base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the base URL, e.g. "/events/7".
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    pub fn put(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self::new(Method::PUT, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_query(mut self, query: &[(String, String)]) -> Self {
        self.query.extend_from_slice(query);
        self
    }

    /// Read calls don't log their payload.
    pub fn is_read(&self) -> bool {
        self.method == Method::GET
    }
}
