//! Cooperative cancellation for in-flight calls.

use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Handle a caller passes to a call so it can abandon it later.
///
/// Clones share state: cancelling any clone cancels them all. A handle that
/// is already cancelled stops a call before it is dispatched.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the handle is cancelled.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }
}

/// Run `future` unless `cancel` fires first; `None` means it was cancelled.
///
/// An already-cancelled handle wins even if the future is immediately ready.
pub async fn run_until_cancelled<F: Future>(
    cancel: Option<&CancelHandle>,
    future: F,
) -> Option<F::Output> {
    match cancel {
        Some(handle) => tokio::select! {
            biased;
            _ = handle.cancelled() => None,
            output = future => Some(output),
        },
        None => Some(future.await),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_without_handle_runs_to_completion() {
        assert_eq!(run_until_cancelled(None, async { 5 }).await, Some(5));
    }

    #[tokio::test]
    async fn test_pre_cancelled_handle_wins() {
        let handle = CancelHandle::new();
        handle.cancel();
        assert_eq!(run_until_cancelled(Some(&handle), async { 5 }).await, None);
    }

    #[tokio::test]
    async fn test_cancel_interrupts_pending_future() {
        let handle = CancelHandle::new();
        let trigger = handle.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let result = run_until_cancelled(
            Some(&handle),
            tokio::time::sleep(Duration::from_secs(10)),
        )
        .await;
        assert!(result.is_none());
        assert!(handle.is_cancelled());
    }
}
