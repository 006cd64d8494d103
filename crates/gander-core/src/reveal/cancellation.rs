//! Cancellation support for reveal tasks
//!
//! Stops a running reveal at its last completed tick.

use tokio_util::sync::CancellationToken;

/// Wrapper around CancellationToken for reveal cancellation
#[derive(Clone)]
pub struct RevealCancellation {
    token: CancellationToken,
}

impl RevealCancellation {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Cancel the reveal using this token
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Future that resolves once cancelled
    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }

    /// Create a fresh token (for a new source text)
    pub fn reset(&mut self) {
        self.token = CancellationToken::new();
    }
}

impl Default for RevealCancellation {
    fn default() -> Self {
        Self::new()
    }
}
