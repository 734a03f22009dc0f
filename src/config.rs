//! Configuration types for aura-dl

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Login credentials for the Aura account
///
/// Supplied once per run and never mutated. No local format validation is
/// performed; the remote service is the source of truth for what constitutes
/// a valid email/password pair.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LoginConfig {
    /// Account email address
    pub email: String,

    /// Account password
    pub password: String,
}

/// Per-frame download settings
///
/// A frame is a remote collection of photo assets associated with one
/// physical display device.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FrameConfig {
    /// Stable frame identifier assigned by the service
    pub frame_id: String,

    /// Directory that downloaded photos are written to
    pub download_dir: PathBuf,

    /// Nest files under a subdirectory named by the capture year
    #[serde(default)]
    pub organize_by_year: bool,
}

/// API endpoint configuration
///
/// Defaults point at the production service. Overriding these is primarily
/// useful for pointing the client at a test double.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the frame API (login and asset listing)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Base URL of the image proxy that serves raw photo bytes
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
        }
    }
}

/// Transfer pacing and timeout settings
///
/// The delays are static pacing, not adaptive backoff; the service does not
/// expose a rate-limit signal to react to. Defaults preserve the observed
/// 90/2/10 second behavior.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Timeout for a single image fetch, in seconds (default: 90)
    #[serde(default = "default_image_timeout_secs")]
    pub image_timeout_secs: u64,

    /// Pause after each successful download, in seconds (default: 2)
    #[serde(default = "default_throttle_delay_secs")]
    pub throttle_delay_secs: u64,

    /// Pause after a per-item failure, in seconds (default: 10)
    #[serde(default = "default_failure_backoff_secs")]
    pub failure_backoff_secs: u64,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            image_timeout_secs: default_image_timeout_secs(),
            throttle_delay_secs: default_throttle_delay_secs(),
            failure_backoff_secs: default_failure_backoff_secs(),
        }
    }
}

impl TransferConfig {
    /// Timeout for a single image fetch
    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs)
    }

    /// Pause after each successful download
    pub fn throttle_delay(&self) -> Duration {
        Duration::from_secs(self.throttle_delay_secs)
    }

    /// Pause after a per-item failure
    pub fn failure_backoff(&self) -> Duration {
        Duration::from_secs(self.failure_backoff_secs)
    }
}

/// Main configuration for [`FrameDownloader`](crate::FrameDownloader)
///
/// Endpoint and pacing sub-configs are flattened for serialization, so the
/// JSON format stays flat (no nesting beyond `login` and `frames`).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Account credentials
    pub login: LoginConfig,

    /// Named frames available for download
    #[serde(default)]
    pub frames: HashMap<String, FrameConfig>,

    /// API endpoints
    #[serde(flatten)]
    pub api: ApiConfig,

    /// Transfer pacing and timeouts
    #[serde(flatten)]
    pub transfer: TransferConfig,
}

impl Config {
    /// Load configuration from a JSON file.
    ///
    /// A missing file, unreadable contents, or invalid JSON all map to
    /// [`Error::Config`] so callers can treat "bad config" as one category.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(
                format!("cannot read config file '{}': {}", path.display(), e),
                None,
            )
        })?;

        let config: Config = serde_json::from_str(&contents).map_err(|e| {
            Error::config(
                format!("cannot parse config file '{}': {}", path.display(), e),
                None,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Check that the credentials required for any run are present.
    pub fn validate(&self) -> Result<()> {
        if self.login.email.is_empty() {
            return Err(Error::config("login email is empty", Some("login.email")));
        }
        if self.login.password.is_empty() {
            return Err(Error::config(
                "login password is empty",
                Some("login.password"),
            ));
        }
        Ok(())
    }

    /// Resolve a named frame from the `frames` map.
    pub fn frame(&self, name: &str) -> Result<&FrameConfig> {
        self.frames.get(name).ok_or_else(|| {
            Error::config(
                format!("no frame named '{name}' in configuration"),
                Some("frames"),
            )
        })
    }

    /// Names of all configured frames, sorted for stable display.
    pub fn frame_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.frames.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn default_base_url() -> String {
    "https://api.pushd.com/v5".to_string()
}

fn default_image_base_url() -> String {
    "https://imgproxy.pushd.com".to_string()
}

fn default_image_timeout_secs() -> u64 {
    90
}

fn default_throttle_delay_secs() -> u64 {
    2
}

fn default_failure_backoff_secs() -> u64 {
    10
}
