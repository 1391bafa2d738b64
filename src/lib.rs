//! Event Portal API Client Library
//!
//! HTTP client wrapper for the event portal REST backend: every call gets a
//! request context, transient failures are retried, and failures surface as
//! classified [`ApiError`]s with a message fit for end users.
//!
//! ```no_run
//! use event_portal_client::{ApiClient, ClientConfig, CancelHandle, NewEvent};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new(&ClientConfig::default())?;
//! let cancel = CancelHandle::new();
//!
//! let draft = NewEvent {
//!     name: "Demo".into(),
//!     start_time: "2024-01-01T10:00".into(),
//!     end_time: "2024-01-01T11:00".into(),
//!     location: "Hall A".into(),
//!     capacity: 5,
//!     ..NewEvent::default()
//! };
//! match client.create_event(&draft, Some(&cancel)).await {
//!     Ok(created) => println!("created event {}", created.data.id),
//!     Err(err) => eprintln!("{}", err.user_message),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod events;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::ClientConfig;
pub use events::{Event, EventId, HealthStatus, NewEvent};
pub use http::{ApiClient, ApiError, ApiResponse, ErrorKind};
pub use lifecycle::CancelHandle;
