//! Cancellation token for page activations.
//!
//! A [`CancelToken`] is a cloneable flag backed by a watch channel. The
//! fetch task races [`CancelToken::cancelled`] against the request, and
//! every state write checks [`CancelToken::is_cancelled`] first.
//!
//! ```rust
//! use lineage_view::cancel::CancelToken;
//!
//! let token = CancelToken::new();
//! let task_side = token.clone();
//! assert!(!task_side.is_cancelled());
//!
//! token.cancel();
//! assert!(task_side.is_cancelled());
//! ```

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

/// Cloneable, one-way cancellation flag.
///
/// Clones share state. Once cancelled, a token stays cancelled.
#[derive(Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    /// Creates a live token.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Cancels the token and wakes every waiter. Idempotent.
    pub fn cancel(&self) {
        if !self.tx.send_replace(true) {
            tracing::debug!("Activation cancelled");
        }
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Completes when the token is cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
