//! OS signal handling.

use tokio::task::JoinHandle;

use crate::lifecycle::cancel::CancelHandle;

/// Cancel `handle` when Ctrl+C is received.
pub fn cancel_on_ctrl_c(handle: CancelHandle) -> JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Interrupt received, cancelling request");
                handle.cancel();
            }
            Err(e) => tracing::warn!(error = %e, "Failed to install Ctrl+C handler"),
        }
    })
}
