use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::debug;

/// What happened to a view operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Request succeeded and the view state was updated.
    Applied,
    /// Request failed; the view recorded the failure according to its policy.
    Failed,
    /// The view was closed while the request was pending. Nothing was applied.
    Cancelled,
    /// No signed-in user, so no request was made.
    NoSession,
    /// A request from this view is already in flight.
    Busy,
    /// The user declined a confirmation prompt.
    Declined,
}

/// Lifetime of a mounted view. Requests run inside it and are dropped once it closes.
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope for a nested view; closes with its parent.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    pub fn close(&self) {
        self.token.cancel();
    }

    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Drives `fut` unless the scope closes first. `None` means the result must not be applied.
    pub async fn run<F>(&self, fut: F) -> Option<F::Output>
    where
        F: Future,
    {
        if !self.is_active() {
            return None;
        }

        tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                debug!("View closed, dropping pending request");
                None
            }
            output = fut => Some(output),
        }
    }
}
