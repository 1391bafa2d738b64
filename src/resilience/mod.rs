//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Failed attempt (classified ErrorKind)
//!     → retries.rs (transient? retries left?)
//!     → backoff.rs (how long to wait)
//!     → client resubmits the same request
//! ```
//!
//! # Design Decisions
//! - Every attempt has its own timeout (set by the client)
//! - Fixed delay by default; exponential with jitter is opt-in

pub mod backoff;
pub mod retries;

pub use retries::{RetryDecision, RetryPolicy};
