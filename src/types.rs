//! Core types and events for aura-dl

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One remote photo record, as returned by the frame's asset listing.
///
/// Assets are decoded individually from the raw listing so that a single
/// malformed element cannot poison the whole run; see
/// [`AssetDescriptor::from_value`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    /// Owning user id, used to build the image URL
    pub user_id: String,
    /// Stored filename on the service, used to build the image URL and to
    /// carry the extension into the local filename
    pub file_name: String,
    /// Capture timestamp as reported by the service (e.g. "2023-01-01T10:00:00Z")
    pub taken_at: String,
    /// Stable asset id, the uniqueness component of the local filename
    pub id: String,
}

impl AssetDescriptor {
    /// Decode a single asset element from the raw listing.
    ///
    /// A missing or mistyped field yields [`Error::InvalidAsset`], which the
    /// orchestrator treats as a per-item failure rather than a run failure.
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        serde_json::from_value(value.clone())
            .map_err(|e| Error::InvalidAsset(format!("asset element failed to decode: {e}")))
    }
}

/// Options controlling a single download run
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct RunOptions {
    /// Nest downloaded files under a subdirectory named by the capture year
    #[serde(default)]
    pub organize_by_year: bool,

    /// Only compute the asset total; fetch nothing and write nothing
    #[serde(default)]
    pub count_only: bool,
}

/// Counts produced by one completed run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of assets fetched and written during this run
    pub downloaded: usize,
    /// Number of assets already present at their target path
    pub skipped: usize,
    /// Total number of assets in the frame's listing
    pub total: usize,
}

/// Event emitted during a download run
///
/// Events are broadcast to all subscribers and are fire-and-forget: the
/// orchestrator never blocks on a slow or absent consumer.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Login request is being sent
    Authenticating,

    /// Login succeeded
    Authenticated {
        /// Server-issued user id bound to the session
        user_id: String,
    },

    /// Asset listing request is being sent
    Listing {
        /// The frame being listed
        frame_id: String,
    },

    /// Asset listing arrived
    Listed {
        /// Number of assets in the listing
        total: usize,
    },

    /// An asset is now being considered (fires before the existence check,
    /// so progress reflects "now considering", not "now downloaded")
    Considering {
        /// 1-based position within the listing
        index: usize,
        /// Total number of assets in the listing
        total: usize,
        /// Derived local filename for this asset
        filename: String,
    },

    /// An asset was already present at its target path
    Skipped {
        /// 1-based position within the listing
        index: usize,
        /// Derived local filename for this asset
        filename: String,
    },

    /// An asset was fetched and written
    Downloaded {
        /// 1-based position within the listing
        index: usize,
        /// Derived local filename for this asset
        filename: String,
    },

    /// An asset failed and was left unresolved (retried on the next full run)
    ItemFailed {
        /// 1-based position within the listing
        index: usize,
        /// Error message
        error: String,
    },

    /// The run finished normally
    Complete {
        /// Final counts for the run
        summary: RunSummary,
    },

    /// The run stopped at a cancellation point
    Cancelled,
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn asset_decodes_from_complete_element() {
        let value = json!({
            "user_id": "u1",
            "file_name": "a.jpg",
            "taken_at": "2023-01-01T10:00:00Z",
            "id": "1",
        });

        let asset = AssetDescriptor::from_value(&value).unwrap();
        assert_eq!(asset.user_id, "u1");
        assert_eq!(asset.file_name, "a.jpg");
        assert_eq!(asset.taken_at, "2023-01-01T10:00:00Z");
        assert_eq!(asset.id, "1");
    }

    #[test]
    fn asset_with_extra_fields_still_decodes() {
        // The real API side-loads plenty of metadata we do not care about
        let value = json!({
            "user_id": "u1",
            "file_name": "a.jpg",
            "taken_at": "2023-01-01T10:00:00Z",
            "id": "1",
            "width": 4032,
            "height": 3024,
            "favorite": true,
        });

        assert!(AssetDescriptor::from_value(&value).is_ok());
    }

    #[test]
    fn asset_missing_file_name_is_invalid_asset() {
        let value = json!({
            "user_id": "u1",
            "taken_at": "2023-01-01T10:00:00Z",
            "id": "1",
        });

        let err = AssetDescriptor::from_value(&value).unwrap_err();
        assert!(
            matches!(err, crate::error::Error::InvalidAsset(_)),
            "missing field must map to InvalidAsset, got {err:?}"
        );
    }

    #[test]
    fn asset_with_non_string_id_is_invalid_asset() {
        let value = json!({
            "user_id": "u1",
            "file_name": "a.jpg",
            "taken_at": "2023-01-01T10:00:00Z",
            "id": 1,
        });

        assert!(matches!(
            AssetDescriptor::from_value(&value),
            Err(crate::error::Error::InvalidAsset(_))
        ));
    }

    #[test]
    fn event_serializes_with_snake_case_tag() {
        let event = Event::Considering {
            index: 3,
            total: 10,
            filename: "2023-01-01T10-00-00Z_1.jpg".into(),
        };

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "considering");
        assert_eq!(value["index"], 3);
        assert_eq!(value["total"], 10);
        assert_eq!(value["filename"], "2023-01-01T10-00-00Z_1.jpg");
    }

    #[test]
    fn run_summary_default_is_all_zero() {
        let summary = RunSummary::default();
        assert_eq!(summary.downloaded, 0);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.total, 0);
    }
}
