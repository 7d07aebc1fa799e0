//! Repository access: reads commit history into pipeline records.

pub mod commit;
pub mod repository;

pub use commit::record_from_commit;
pub use repository::{CommitFilter, GitRepository};

/// Number of hex characters to show in abbreviated commit hashes.
pub const SHORT_HASH_LEN: usize = 8;

/// Truncates a commit hash to [`SHORT_HASH_LEN`] characters.
pub fn short_hash(hash: &str) -> &str {
    hash.get(..SHORT_HASH_LEN).unwrap_or(hash)
}
