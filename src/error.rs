//! Error types for aura-dl
//!
//! Two categories matter to callers:
//! - Fatal errors (`Config`, `Authentication`, `NoAssets`) abort a run before
//!   any image is fetched.
//! - `Cancelled` is a cooperative abort, surfaced as its own variant so
//!   callers can distinguish "the user asked to stop" from a failure.
//!
//! Per-asset failures (network, filesystem, malformed asset fields) are
//! contained inside the orchestrator loop and never reach the caller; they
//! show up only in logs and as [`crate::types::Event::ItemFailed`] events.

use thiserror::Error;

/// Result type alias for aura-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for aura-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "login.email")
        key: Option<String>,
    },

    /// Authentication failed: bad credentials or a malformed login response.
    ///
    /// A malformed success body (missing user id or auth token) is reported
    /// the same way as rejected credentials: no partial session is ever
    /// returned.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The asset listing response did not contain an assets collection.
    ///
    /// Distinct from a legitimately empty frame, which is a valid listing.
    /// Carries the raw response body for diagnostics.
    #[error("frame {frame_id} returned no asset collection")]
    NoAssets {
        /// The frame whose listing was malformed
        frame_id: String,
        /// Raw response body, kept for diagnostics
        body: String,
    },

    /// Run cancelled cooperatively via the cancellation token
    #[error("download cancelled")]
    Cancelled,

    /// A fetched asset element was missing a required field
    #[error("invalid asset: {0}")]
    InvalidAsset(String),

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for building a configuration error
    pub(crate) fn config(message: impl Into<String>, key: Option<&str>) -> Self {
        Error::Config {
            message: message.into(),
            key: key.map(str::to_string),
        }
    }
}
