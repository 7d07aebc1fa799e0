//! Pipeline data model and serialization helpers.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

pub mod commit;
pub mod yaml;

pub use commit::{ClassifiedCommit, CommitRecord, Intent, RawCommit, Sentiment};
pub use yaml::*;

/// Reads a commit file (JSON array, or YAML sequence for `.yaml`/`.yml`)
/// and validates every entry into a [`CommitRecord`].
///
/// The first invalid entry aborts the read with its [`GlyphError`](crate::GlyphError)
/// as the root cause.
pub fn read_commit_file<P: AsRef<Path>>(path: P) -> Result<Vec<CommitRecord>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read commit file: {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let raw: Vec<RawCommit> = if is_yaml {
        from_yaml(&content)?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse commit file: {}", path.display()))?
    };
    debug!("Read {} raw commits from {}", raw.len(), path.display());

    raw.into_iter()
        .enumerate()
        .map(|(index, entry)| {
            CommitRecord::try_from(entry)
                .with_context(|| format!("Invalid commit at index {index} in {}", path.display()))
        })
        .collect()
}
