//! # aura-dl
//!
//! Embeddable backend library for downloading photos from Aura digital
//! picture frames.
//!
//! ## Design Philosophy
//!
//! aura-dl is designed to be:
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Sensible defaults** - Production endpoints and pacing out of the box
//! - **Event-driven** - Consumers subscribe to progress events, no polling required
//! - **Resilient per item** - One bad photo never aborts a run; presence on
//!   disk is the dedup ledger and the next full run is the retry mechanism
//!
//! ## Quick Start
//!
//! ```no_run
//! use aura_dl::{Config, FrameDownloader, LoginConfig, RunOptions};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         login: LoginConfig {
//!             email: "user@example.com".to_string(),
//!             password: "secret".to_string(),
//!         },
//!         ..Default::default()
//!     };
//!
//!     let downloader = FrameDownloader::new(config)?;
//!
//!     // Subscribe to progress events
//!     let mut events = downloader.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     let summary = downloader
//!         .run("my-frame-id", Path::new("./photos"), RunOptions::default())
//!         .await?;
//!     println!(
//!         "{} downloaded, {} skipped of {}",
//!         summary.downloaded, summary.skipped, summary.total
//!     );
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Outbound HTTP surface (login, listing, image fetch)
pub mod client;
/// Configuration types
pub mod config;
/// Core downloader implementation
pub mod downloader;
/// Error types
pub mod error;
/// Target path derivation
pub mod naming;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use client::Session;
pub use config::{ApiConfig, Config, FrameConfig, LoginConfig, TransferConfig};
pub use downloader::FrameDownloader;
pub use error::{Error, Result};
pub use types::{AssetDescriptor, Event, RunOptions, RunSummary};

/// Helper that turns a termination signal into a cancellation request.
///
/// Spawns a background task that waits for a signal and then cancels the
/// downloader, so an in-flight run winds down at its next cancellation point
/// and returns [`Error::Cancelled`].
///
/// - **Unix:** listens for SIGTERM and SIGINT, with a Ctrl+C fallback if
///   signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// # Example
///
/// ```no_run
/// use aura_dl::{Config, FrameDownloader, RunOptions, spawn_signal_cancel};
/// use std::path::Path;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let downloader = FrameDownloader::new(Config::default())?;
///     spawn_signal_cancel(&downloader);
///
///     // Ctrl+C during the run yields Err(Error::Cancelled)
///     downloader
///         .run("my-frame-id", Path::new("./photos"), RunOptions::default())
///         .await?;
///     Ok(())
/// }
/// ```
pub fn spawn_signal_cancel(downloader: &FrameDownloader) -> tokio::task::JoinHandle<()> {
    let token = downloader.cancel_token();
    tokio::spawn(async move {
        wait_for_signal().await;
        token.cancel();
    })
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Signal registration may fail in restricted environments (containers,
    // tests); fall back to ctrl_c rather than giving up on cancellation.
    match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Ok(mut sigterm), Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            sigterm.recv().await;
            tracing::info!("Received SIGTERM signal");
        }
        (Err(e), Ok(mut sigint)) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            sigint.recv().await;
            tracing::info!("Received SIGINT signal (Ctrl+C)");
        }
        (Err(_), Err(_)) => {
            tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
            tokio::signal::ctrl_c().await.ok();
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
