//! HTTP client wrapper subsystem.
//!
//! # Data Flow
//! ```text
//! typed operation (events::api)
//!     → request.rs (ApiRequest + RequestContext)
//!     → client.rs (dispatch, timeout, retry loop)
//!     → response.rs (RawResponse → ApiResponse<T>)
//!     → error.rs (classification, user messages) on failure
//! ```

pub mod client;
pub mod error;
pub mod request;
pub mod response;

pub use client::{ApiClient, BuildError};
pub use error::{handle_api_error, user_message_for, ApiError, ErrorKind, USER_MESSAGES};
pub use request::{ApiRequest, RequestContext, RequestId, X_REQUEST_ID};
pub use response::{with_request_timer, ApiResponse, RawResponse};
