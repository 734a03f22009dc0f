//! Core downloader implementation split into focused submodules.
//!
//! The `FrameDownloader` struct and its methods are organized by domain:
//! - [`control`] - Cancellation surface (cancel token, polled checks)
//! - [`orchestration`] - The per-asset download loop

mod control;
mod orchestration;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

use crate::config::Config;
use crate::error::Result;
use crate::types::Event;

/// Number of events buffered per subscriber before old events are dropped
const EVENT_CHANNEL_CAPACITY: usize = 1000;

/// Main downloader instance (cloneable - shared state is cheaply cloned)
///
/// One `FrameDownloader` performs one logical run at a time, sequentially;
/// there is no internal parallelism. Embedders run it on its own task so an
/// interactive shell stays responsive, and coordinate with it only through
/// the event channel ([`subscribe`](Self::subscribe)) and the cancellation
/// token ([`cancel`](Self::cancel)).
///
/// Cancellation is sticky: once cancelled, every later run aborts at its
/// first cancellation point. Construct a fresh downloader for a fresh run,
/// the same way an interactive shell constructs a fresh worker per download.
#[derive(Clone)]
pub struct FrameDownloader {
    /// Configuration (wrapped in Arc for sharing across tasks)
    pub(crate) config: std::sync::Arc<Config>,
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: tokio::sync::broadcast::Sender<Event>,
    /// Cooperative cancellation token, polled once per asset iteration
    pub(crate) cancel: tokio_util::sync::CancellationToken,
}

impl FrameDownloader {
    /// Create a new FrameDownloader instance.
    ///
    /// Validates that the configuration carries usable credentials; endpoint
    /// and pacing settings fall back to their defaults.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let (event_tx, _rx) = tokio::sync::broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self {
            config: std::sync::Arc::new(config),
            event_tx,
            cancel: tokio_util::sync::CancellationToken::new(),
        })
    }

    /// Subscribe to download events
    ///
    /// Multiple subscribers are supported. Each subscriber receives all
    /// events independently; a subscriber that falls behind by more than the
    /// channel capacity receives a `RecvError::Lagged` error.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Get the current configuration
    pub fn get_config(&self) -> std::sync::Arc<Config> {
        std::sync::Arc::clone(&self.config)
    }

    /// Emit an event to all subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped;
    /// progress reporting is fire-and-forget and never blocks the run.
    pub(crate) fn emit_event(&self, event: Event) {
        self.event_tx.send(event).ok();
    }
}
