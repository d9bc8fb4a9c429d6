//! Object storage gateway.
//!
//! Blobs are addressed by a slash-separated path on upload and by the
//! returned download reference afterwards.

use crate::error::Result;
use crate::image::StagedFile;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use rand::Rng;
use rand::distributions::Alphanumeric;
use regex::Regex;
use std::sync::Arc;

/// Receives upload progress as a whole percentage (0-100).
pub type ProgressCallback = Arc<dyn Fn(u8) + Send + Sync>;

/// Length of the random component of generated file names.
const RANDOM_SUFFIX_LEN: usize = 11;

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]").expect("static regex is valid"));

/// Gateway to the blob store holding gallery images.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Uploads `file` to `path` and returns its download reference.
    ///
    /// `on_progress` is invoked with increasing percentages and receives
    /// `100` before the call returns successfully.
    async fn upload(
        &self,
        file: &StagedFile,
        path: &str,
        on_progress: Option<ProgressCallback>,
    ) -> Result<String>;

    /// Deletes the object behind a download reference.
    ///
    /// Idempotent: deleting a missing object is not an error.
    async fn delete(&self, reference: &str) -> Result<()>;
}

/// Generates a collision-resistant file name for an upload.
///
/// Format: `{prefix-}{sanitized-base}-{millis}-{random}.{ext}`.
pub fn generate_unique_name(original_name: &str, prefix: Option<&str>) -> String {
    let random: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_SUFFIX_LEN)
        .map(char::from)
        .collect::<String>()
        .to_lowercase();
    format_unique_name(
        original_name,
        prefix,
        chrono::Utc::now().timestamp_millis(),
        &random,
    )
}

/// Deterministic part of [`generate_unique_name`].
///
/// The base name is everything before the last dot with every
/// non-alphanumeric character replaced by `-`, lowercased. A name without a
/// dot keeps no extension.
pub fn format_unique_name(
    original_name: &str,
    prefix: Option<&str>,
    timestamp_millis: i64,
    random: &str,
) -> String {
    let (base, extension) = match original_name.rsplit_once('.') {
        Some((base, ext)) => (base, Some(ext)),
        None => (original_name, None),
    };
    let clean_base = NON_ALPHANUMERIC.replace_all(base, "-").to_lowercase();
    let prefix_part = prefix.map(|p| format!("{p}-")).unwrap_or_default();

    match extension {
        Some(ext) => format!("{prefix_part}{clean_base}-{timestamp_millis}-{random}.{ext}"),
        None => format!("{prefix_part}{clean_base}-{timestamp_millis}-{random}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_unique_name() {
        assert_eq!(
            format_unique_name("My Photo (1).JPG", Some("project"), 1700000000000, "abc123"),
            "project-my-photo--1--1700000000000-abc123.JPG"
        );
    }

    #[test]
    fn test_format_unique_name_keeps_inner_dots_in_base() {
        assert_eq!(
            format_unique_name("archive.v2.png", None, 5, "r"),
            "archive-v2-5-r.png"
        );
        assert_eq!(format_unique_name("README", None, 5, "r"), "readme-5-r");
    }

    #[test]
    fn test_generated_names_differ() {
        let a = generate_unique_name("a.png", Some("travel"));
        let b = generate_unique_name("a.png", Some("travel"));
        assert!(a.starts_with("travel-a-"));
        assert!(a.ends_with(".png"));
        assert_ne!(a, b);
    }
}
