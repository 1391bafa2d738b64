//! Event portal operations on [`ApiClient`].
//!
//! | Operation      | Request              | Result         |
//! |----------------|----------------------|----------------|
//! | `list_events`  | `GET /events`        | `Vec<Event>`   |
//! | `create_event` | `POST /events`       | `Event`        |
//! | `update_event` | `PUT /events/{id}`   | `Event`        |
//! | `delete_event` | `DELETE /events/{id}`| `()`           |
//! | `health_check` | `GET /health`        | `HealthStatus` |

use crate::events::types::{Event, EventId, HealthStatus, NewEvent};
use crate::http::{ApiClient, ApiError, ApiRequest, ApiResponse};
use crate::lifecycle::CancelHandle;

impl ApiClient {
    /// List events, optionally filtered by query parameters.
    pub async fn list_events(
        &self,
        params: &[(String, String)],
        cancel: Option<&CancelHandle>,
    ) -> Result<ApiResponse<Vec<Event>>, ApiError> {
        self.request(ApiRequest::get("/events").with_query(params), cancel)
            .await
    }

    pub async fn create_event(
        &self,
        event: &NewEvent,
        cancel: Option<&CancelHandle>,
    ) -> Result<ApiResponse<Event>, ApiError> {
        let body = to_body(event)?;
        self.request(ApiRequest::post("/events", body), cancel).await
    }

    pub async fn update_event(
        &self,
        id: EventId,
        event: &NewEvent,
        cancel: Option<&CancelHandle>,
    ) -> Result<ApiResponse<Event>, ApiError> {
        let body = to_body(event)?;
        self.request(ApiRequest::put(format!("/events/{}", id), body), cancel)
            .await
    }

    /// Delete an event. The backend answers 204 with no body.
    pub async fn delete_event(
        &self,
        id: EventId,
        cancel: Option<&CancelHandle>,
    ) -> Result<ApiResponse<()>, ApiError> {
        let raw = self
            .dispatch(ApiRequest::delete(format!("/events/{}", id)), cancel)
            .await?;
        self.complete(raw, Ok(()))
    }

    /// Probe backend health.
    ///
    /// Accepts `{"status": "..."}`, a JSON string, or a plain-text body.
    /// The last two become the status.
    pub async fn health_check(
        &self,
        cancel: Option<&CancelHandle>,
    ) -> Result<ApiResponse<HealthStatus>, ApiError> {
        let raw = self.dispatch(ApiRequest::get("/health"), cancel).await?;
        let decoded = parse_health(&raw.body);
        self.complete(raw, decoded)
    }
}

fn parse_health(body: &[u8]) -> Result<HealthStatus, serde_json::Error> {
    serde_json::from_slice::<HealthStatus>(body).or_else(|err| {
        if let Ok(status) = serde_json::from_slice::<String>(body) {
            return Ok(HealthStatus { status });
        }
        let text = String::from_utf8_lossy(body).trim().to_string();
        // Anything that looks like JSON but didn't match is malformed.
        if text.is_empty() || text.starts_with('{') || text.starts_with('"') {
            return Err(err);
        }
        Ok(HealthStatus { status: text })
    })
}

fn to_body(event: &NewEvent) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(event).map_err(|e| ApiError::invalid_request(e.to_string()))
}
