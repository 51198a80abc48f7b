//! Cooperative cancellation for in-flight calls.
//!
//! A [`CancelToken`] is handed to
//! [`HttpClient::execute_with_cancel`](crate::clients::HttpClient::execute_with_cancel)
//! (and the service methods built on it). Cancelling the token aborts the
//! call promptly, whether it is waiting on the network or sleeping out a
//! rate-limit window.
//!
//! # Example
//!
//! ```rust
//! use desk_api::clients::CancelToken;
//!
//! let token = CancelToken::new();
//! let handle = token.clone();
//! assert!(!token.is_cancelled());
//!
//! handle.cancel();
//! assert!(token.is_cancelled());
//! ```

use std::sync::Arc;

use tokio::sync::watch;

/// A cloneable cancellation signal.
///
/// All clones observe the same state. Cancellation is permanent.
#[derive(Debug, Clone)]
pub struct CancelToken {
    sender: Arc<watch::Sender<bool>>,
    receiver: watch::Receiver<bool>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    /// Creates a token that is not yet cancelled.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    /// Cancels every call observing this token.
    pub fn cancel(&self) {
        if !self.sender.send_replace(true) {
            tracing::debug!("Cancellation requested");
        }
    }

    /// Returns whether the token has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Completes once the token is cancelled.
    pub async fn cancelled(&self) {
        let mut receiver = self.receiver.clone();
        loop {
            if *receiver.borrow_and_update() {
                return;
            }
            if receiver.changed().await.is_err() {
                // Sender dropped: the token can no longer be cancelled.
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cancelled_resolves_after_cancel() {
        let token = CancelToken::new();
        let waiter = token.clone();

        let task = tokio::spawn(async move { waiter.cancelled().await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        token.cancel();

        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("cancelled() should resolve")
            .unwrap();
    }

    #[tokio::test]
    async fn test_cancelled_resolves_immediately_when_already_cancelled() {
        let token = CancelToken::new();
        token.cancel();
        tokio::time::timeout(Duration::from_millis(100), token.cancelled())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_uncancelled_token_stays_pending() {
        let token = CancelToken::new();
        let result = tokio::time::timeout(Duration::from_millis(20), token.cancelled()).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let token = CancelToken::new();
        token.cancel();
        token.cancel();
        assert!(token.is_cancelled());
    }
}
