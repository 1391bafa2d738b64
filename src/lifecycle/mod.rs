//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Caller creates CancelHandle (cancel.rs)
//!     → passes it to any client call
//!     → signals.rs or the caller triggers it
//!     → in-flight attempt / retry delay aborts with a Cancelled error
//! ```

pub mod cancel;
pub mod signals;

pub use cancel::{run_until_cancelled, CancelHandle};
