//! Target path derivation for downloaded photos
//!
//! The mapping from an asset to its local path is a pure function of
//! `(taken_at, id, file_name, organize_by_year, base directory)`. Re-running
//! against the same directory derives identical paths for identical assets,
//! which is what makes the skip-if-exists check a correct dedup ledger: the
//! files on disk are the only persistent state.

use crate::types::AssetDescriptor;
use std::path::{Path, PathBuf};

/// Replace characters that are illegal on common filesystems.
///
/// Colons appear in every capture timestamp and are rejected on Windows and
/// by some network shares, so they become hyphens.
pub fn sanitize_timestamp(taken_at: &str) -> String {
    taken_at.replace(':', "-")
}

/// Derive the local filename for an asset: sanitized timestamp, `_`, asset
/// id, plus the extension carried over from the remote filename.
pub fn target_filename(asset: &AssetDescriptor) -> String {
    let clean_time = sanitize_timestamp(&asset.taken_at);
    match Path::new(&asset.file_name).extension() {
        Some(ext) => format!("{}_{}.{}", clean_time, asset.id, ext.to_string_lossy()),
        None => format!("{}_{}", clean_time, asset.id),
    }
}

/// Subdirectory name used when organizing by year: the first four characters
/// of the sanitized timestamp.
pub fn year_component(taken_at: &str) -> String {
    sanitize_timestamp(taken_at).chars().take(4).collect()
}

/// Derive the full target path for an asset under `base`.
///
/// With `organize_by_year`, only the directory component changes; the base
/// filename is identical either way.
pub fn target_path(base: &Path, asset: &AssetDescriptor, organize_by_year: bool) -> PathBuf {
    let filename = target_filename(asset);
    if organize_by_year {
        base.join(year_component(&asset.taken_at)).join(filename)
    } else {
        base.join(filename)
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn asset(taken_at: &str, id: &str, file_name: &str) -> AssetDescriptor {
        AssetDescriptor {
            user_id: "u1".into(),
            file_name: file_name.into(),
            taken_at: taken_at.into(),
            id: id.into(),
        }
    }

    #[test]
    fn sanitize_replaces_every_colon() {
        assert_eq!(
            sanitize_timestamp("2023-01-01T10:00:00Z"),
            "2023-01-01T10-00-00Z"
        );
    }

    #[test]
    fn sanitize_leaves_clean_input_untouched() {
        assert_eq!(sanitize_timestamp("2023-01-01"), "2023-01-01");
    }

    #[test]
    fn flat_layout_matches_the_documented_example() {
        let a = asset("2023-01-01T10:00:00Z", "1", "a.jpg");
        assert_eq!(
            target_path(Path::new("/out"), &a, false),
            PathBuf::from("/out/2023-01-01T10-00-00Z_1.jpg")
        );
    }

    #[test]
    fn year_layout_nests_under_four_char_year() {
        let a = asset("2023-01-01T10:00:00Z", "1", "a.jpg");
        assert_eq!(
            target_path(Path::new("/out"), &a, true),
            PathBuf::from("/out/2023/2023-01-01T10-00-00Z_1.jpg")
        );
    }

    #[test]
    fn organize_by_year_changes_only_the_directory_component() {
        let a = asset("2019-07-04T08:30:15Z", "abc", "photo.heic");

        let flat = target_path(Path::new("/photos"), &a, false);
        let yearly = target_path(Path::new("/photos"), &a, true);

        assert_eq!(flat.file_name(), yearly.file_name());
        assert_ne!(flat.parent(), yearly.parent());
        assert_eq!(yearly.parent().unwrap(), Path::new("/photos/2019"));
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = asset("2023-01-01T10:00:00Z", "1", "a.jpg");
        let first = target_path(Path::new("/out"), &a, true);
        let second = target_path(Path::new("/out"), &a, true);
        assert_eq!(first, second);
    }

    #[test]
    fn remote_filename_without_extension_yields_bare_name() {
        let a = asset("2023-01-01T10:00:00Z", "42", "blob");
        assert_eq!(target_filename(&a), "2023-01-01T10-00-00Z_42");
    }

    #[test]
    fn extension_is_carried_from_the_remote_filename() {
        let a = asset("2023-01-01T10:00:00Z", "42", "IMG_0001.HEIC");
        assert_eq!(target_filename(&a), "2023-01-01T10-00-00Z_42.HEIC");
    }

    #[test]
    fn short_timestamp_does_not_panic_year_extraction() {
        assert_eq!(year_component("20"), "20");
        assert_eq!(year_component(""), "");
    }
}
