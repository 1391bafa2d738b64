//! Request pipeline of the API client.
//!
//! # Responsibilities
//! - Resolve request paths against the configured base URL
//! - Stamp each call with a [`RequestContext`] and log the request
//! - Log successful responses with their latency
//! - Classify failures, retry transient ones, and settle with an [`ApiError`]
//!
//! # Flow of one call
//! ```text
//! request(request, cancel)
//!     → dispatch()
//!         → RequestContext::new()            (id, retry_count = 0, start time)
//!         → attempt()                        (fresh timeout per attempt)
//!             ok  → log status + duration → RawResponse
//!             err → cancelled?               → settle, reject immediately
//!                 → RetryPolicy::decide      → sleep, ctx.next_attempt(), loop
//!                 → settle (user message)    → reject
//!     → complete()                           (decode body, settle once)
//! ```
//!
//! Every call is recorded in metrics exactly once, when it settles. A 2xx
//! body that fails to decode settles as a decode error, not as its status.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::config::ClientConfig;
use crate::http::error::{ApiError, ErrorKind};
use crate::http::request::{ApiRequest, RequestContext, X_REQUEST_ID};
use crate::http::response::{decode_body, ApiResponse, RawResponse};
use crate::lifecycle::{run_until_cancelled, CancelHandle};
use crate::observability::metrics;
use crate::resilience::{RetryDecision, RetryPolicy};

const JSON: &str = "application/json";

/// Errors constructing an [`ApiClient`].
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// HTTP client wrapper for the event portal backend.
///
/// Cheap to clone; clones share the connection pool. Calls may run
/// concurrently, each with its own context.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
    timeout: Duration,
    user_agent: String,
    retry_policy: RetryPolicy,
    metrics_enabled: bool,
}

impl ApiClient {
    /// Create a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, BuildError> {
        // Cookies are never stored or sent.
        let http = reqwest::Client::builder().build()?;
        Self::with_http_client(config, http)
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_http_client(config: &ClientConfig, http: reqwest::Client) -> Result<Self, BuildError> {
        Ok(Self {
            base_url: normalize_base_url(&config.api.base_url)?,
            http,
            timeout: Duration::from_millis(config.api.timeout_ms),
            user_agent: config.api.user_agent.clone(),
            retry_policy: RetryPolicy::new(config.retries.clone()),
            metrics_enabled: config.observability.metrics_enabled,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Send a request and decode a JSON response body into `T`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        cancel: Option<&CancelHandle>,
    ) -> Result<ApiResponse<T>, ApiError> {
        let raw = self.dispatch(request, cancel).await?;
        let decoded = decode_body(&raw.body);
        self.complete(raw, decoded)
    }

    /// Send a request through the full pipeline, retries included, and
    /// hand back the undecoded body. The call settles with its status.
    pub async fn send(
        &self,
        request: ApiRequest,
        cancel: Option<&CancelHandle>,
    ) -> Result<RawResponse, ApiError> {
        let raw = self.dispatch(request, cancel).await?;
        self.record_success(&raw);
        Ok(raw)
    }

    /// Settle a dispatched call with the outcome of decoding its body.
    pub(crate) fn complete<T>(
        &self,
        raw: RawResponse,
        decoded: Result<T, serde_json::Error>,
    ) -> Result<ApiResponse<T>, ApiError> {
        match decoded {
            Ok(data) => {
                self.record_success(&raw);
                Ok(raw.into_response(data))
            }
            Err(e) => {
                let error = ApiError::decode(raw.status, &e);
                log_failure(&error, &raw.context);
                Err(self.settle(raw.method.as_str(), error, &raw.context))
            }
        }
    }

    /// Retry loop. Failures are settled here; successes are left to the caller.
    pub(crate) async fn dispatch(
        &self,
        request: ApiRequest,
        cancel: Option<&CancelHandle>,
    ) -> Result<RawResponse, ApiError> {
        let mut ctx = RequestContext::new();
        let method = request.method.as_str().to_owned();

        tracing::debug!(
            request_id = %ctx.request_id(),
            method = %method,
            path = %request.path,
            params = ?request.query,
            data = ?request.body.as_ref().filter(|_| !request.is_read()),
            "Request: {} {}",
            method,
            request.path
        );

        let url = match self.endpoint(&request.path) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(request_id = %ctx.request_id(), error = %e, "Request Error");
                return Err(self.settle(&method, ApiError::invalid_request(e.to_string()), &ctx));
            }
        };

        loop {
            let outcome = run_until_cancelled(cancel, self.attempt(&url, &request, &ctx))
                .await
                .unwrap_or_else(|| Err(ApiError::cancelled()));

            let error = match outcome {
                Ok(response) => {
                    tracing::debug!(
                        request_id = %ctx.request_id(),
                        status = response.status,
                        duration_ms = response.duration.as_millis() as u64,
                        data = %response.text(),
                        "Response: {} ({}ms)",
                        response.status,
                        response.duration.as_millis()
                    );
                    return Ok(response);
                }
                Err(error) => error,
            };

            if error.is_cancelled() {
                tracing::debug!(request_id = %ctx.request_id(), "Request cancelled");
                return Err(self.settle(&method, error, &ctx));
            }

            log_failure(&error, &ctx);

            let delay = match self.retry_policy.decide(ctx.retry_count(), error.kind) {
                RetryDecision::NoRetry => return Err(self.settle(&method, error, &ctx)),
                RetryDecision::RetryAfter(delay) => delay,
            };

            tracing::debug!(
                request_id = %ctx.request_id(),
                attempt = ctx.retry_count() + 1,
                delay_ms = delay.as_millis() as u64,
                "Retrying ({}/{})",
                ctx.retry_count() + 1,
                self.retry_policy.max_retries()
            );
            if self.metrics_enabled {
                metrics::record_retry(&method);
            }

            if run_until_cancelled(cancel, tokio::time::sleep(delay)).await.is_none() {
                tracing::debug!(request_id = %ctx.request_id(), "Request cancelled");
                return Err(self.settle(&method, ApiError::cancelled(), &ctx));
            }
            ctx = ctx.next_attempt();
        }
    }

    /// One dispatch of `request`, bounded by the per-attempt timeout.
    async fn attempt(
        &self,
        url: &Url,
        request: &ApiRequest,
        ctx: &RequestContext,
    ) -> Result<RawResponse, ApiError> {
        let mut builder = self
            .http
            .request(request.method.clone(), url.clone())
            .timeout(self.timeout)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .header(USER_AGENT, self.user_agent.as_str())
            .header(X_REQUEST_ID, ctx.request_id().to_string());

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            let bytes = serde_json::to_vec(body).map_err(|e| ApiError::invalid_request(e.to_string()))?;
            builder = builder.body(bytes);
        }

        let response = builder.send().await.map_err(|e| ApiError::from_transport(&e))?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| ApiError::from_transport(&e))?;

        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &body));
        }

        Ok(RawResponse {
            status: status.as_u16(),
            body: body.to_vec(),
            duration: ctx.elapsed(),
            method: request.method.clone(),
            context: *ctx,
        })
    }

    /// Resolve a path like "/events/7" below the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path.trim_start_matches('/'))
    }

    fn settle(&self, method: &str, error: ApiError, ctx: &RequestContext) -> ApiError {
        if self.metrics_enabled {
            metrics::record_request(method, &metric_status(&error), ctx.elapsed());
        }
        error.finalize(ctx)
    }

    fn record_success(&self, raw: &RawResponse) {
        if self.metrics_enabled {
            metrics::record_request(raw.method.as_str(), &raw.status.to_string(), raw.duration);
        }
    }
}

/// `status` label for a failed call: the HTTP status for 4xx/5xx, the
/// error kind otherwise.
fn metric_status(error: &ApiError) -> String {
    match (error.kind, error.status) {
        (ErrorKind::Client | ErrorKind::Server, Some(status)) => status.to_string(),
        (kind, _) => kind.as_str().to_string(),
    }
}

fn log_failure(error: &ApiError, ctx: &RequestContext) {
    match error.kind {
        ErrorKind::Client | ErrorKind::Server => tracing::error!(
            request_id = %ctx.request_id(),
            status = ?error.status,
            data = ?error.data,
            "API Error: {}",
            error.status.unwrap_or_default()
        ),
        ErrorKind::Network => tracing::error!(
            request_id = %ctx.request_id(),
            code = ?error.code,
            "Network Error: {}",
            error.message
        ),
        _ => tracing::error!(
            request_id = %ctx.request_id(),
            "Request Error: {}",
            error.message
        ),
    }
}

/// Parse the base URL and make sure relative joins land below its path.
fn normalize_base_url(raw: &str) -> Result<Url, BuildError> {
    let mut url = Url::parse(raw).map_err(|source| BuildError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
