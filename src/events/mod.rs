//! Event portal domain: model, draft validation and typed operations.

pub mod api;
pub mod types;
pub mod validation;

pub use types::{Event, EventId, HealthStatus, NewEvent};
pub use validation::FieldError;
