//! Successful responses and body decoding.

use std::future::Future;
use std::time::{Duration, Instant};

use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::http::request::{RequestContext, RequestId};

/// A 2xx response whose body has not been decoded yet.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub duration: Duration,
    pub(crate) method: Method,
    pub(crate) context: RequestContext,
}

impl RawResponse {
    /// Body as text, lossily decoded.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn into_response<T>(self, data: T) -> ApiResponse<T> {
        ApiResponse {
            status: self.status,
            data,
            request_id: self.context.request_id(),
            retry_count: self.context.retry_count(),
            duration: self.duration,
        }
    }
}

/// Decoded response handed back to callers.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub data: T,
    pub request_id: RequestId,
    /// Retries it took to get this response.
    pub retry_count: u32,
    /// Time from the first dispatch to the final response.
    pub duration: Duration,
}

/// Decode a JSON body. An empty body decodes as `null`.
pub fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_value(serde_json::Value::Null)
    } else {
        serde_json::from_slice(body)
    }
}

/// Await a future and report how long it took.
pub async fn with_request_timer<F: Future>(future: F) -> (F::Output, Duration) {
    let start = Instant::now();
    let output = future.await;
    (output, start.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
    }

    fn raw(status: u16, body: &[u8]) -> RawResponse {
        RawResponse {
            status,
            body: body.to_vec(),
            duration: Duration::from_millis(5),
            method: Method::GET,
            context: RequestContext::new(),
        }
    }

    #[test]
    fn test_empty_body_decodes_as_null() {
        decode_body::<()>(b"").unwrap();
        decode_body::<()>(b"  \n").unwrap();
        assert_eq!(decode_body::<Option<Item>>(b"").unwrap(), None);
    }

    #[test]
    fn test_json_body_decodes() {
        assert_eq!(decode_body::<Item>(br#"{"id": 3}"#).unwrap(), Item { id: 3 });
        assert!(decode_body::<Item>(br#"{"nope": true}"#).is_err());
    }

    #[test]
    fn test_into_response_carries_context() {
        let raw = raw(201, br#"{"id": 3}"#);
        let ctx = raw.context;
        let resp = raw.into_response(Item { id: 3 });
        assert_eq!(resp.status, 201);
        assert_eq!(resp.request_id, ctx.request_id());
        assert_eq!(resp.retry_count, 0);
        assert_eq!(resp.duration, Duration::from_millis(5));
    }

    #[tokio::test]
    async fn test_with_request_timer() {
        let (value, elapsed) = with_request_timer(async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            7
        })
        .await;
        assert_eq!(value, 7);
        assert!(elapsed >= Duration::from_millis(20));
    }
}
