//! Cancellation plumbing for service operations.
//!
//! Every use case takes a [`CancellationToken`] and races its store calls
//! against it. A cancelled operation aborts without partial-state repair;
//! the store rolls back its own transaction.

use std::future::Future;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error)]
#[error("operation cancelled")]
pub struct Cancelled;

/// Drives `fut` to completion unless `cancel` fires first.
pub(crate) async fn cancellable<F: Future>(
    cancel: &CancellationToken,
    fut: F,
) -> Result<F::Output, Cancelled> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Cancelled),
        out = fut => Ok(out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn completes_when_not_cancelled() {
        let cancel = CancellationToken::new();
        let out = cancellable(&cancel, async { 7 }).await;
        assert_eq!(out.unwrap(), 7);
    }

    #[tokio::test]
    async fn aborts_when_already_cancelled() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let out = cancellable(&cancel, std::future::pending::<()>()).await;
        assert!(out.is_err());
    }
}
