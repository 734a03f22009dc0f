//! Cancellation surface: cooperative, polled, never preemptive.

use super::FrameDownloader;
use tokio_util::sync::CancellationToken;

impl FrameDownloader {
    /// Request cancellation of the current run.
    ///
    /// Takes effect at the top of the next per-asset iteration: an image
    /// fetch already in flight completes (or fails) first, so no item is
    /// ever left half-processed by cancellation itself. The run then exits
    /// with [`Error::Cancelled`](crate::Error::Cancelled).
    pub fn cancel(&self) {
        tracing::info!("cancellation requested");
        self.cancel.cancel();
    }

    /// A clone of the cancellation token, for wiring into signal handlers or
    /// shell-side stop buttons.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
