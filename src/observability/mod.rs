//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! ApiClient request pipeline produces:
//!     → logging.rs (tracing subscriber, structured events)
//!     → metrics.rs (counters, histograms)
//! ```
//!
//! # Design Decisions
//! - Request ID is a field on every request/response/error event
//! - Metrics are cheap no-ops without an installed recorder

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
