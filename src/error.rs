//! Ingest and option validation errors.

use thiserror::Error;

/// Errors raised while turning external input into pipeline records.
///
/// The analytics themselves never fail on well-formed records; these
/// variants only surface at the ingest boundary or when parsing options.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GlyphError {
    /// A timestamp could not be parsed as RFC 3339.
    #[error("Invalid timestamp '{value}' for commit {sha}")]
    InvalidTimestamp {
        /// Commit the timestamp belongs to.
        sha: String,
        /// The offending value.
        value: String,
    },

    /// A line count was negative.
    #[error("Negative {field} count ({value}) for commit {sha}")]
    NegativeCount {
        /// Commit the count belongs to.
        sha: String,
        /// Which count was negative (`additions` or `deletions`).
        field: &'static str,
        /// The offending value.
        value: i64,
    },

    /// A required field was empty.
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    /// A path exclusion pattern was not a valid glob.
    #[error("Invalid exclude pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern as supplied.
        pattern: String,
        /// Why the glob compiler rejected it.
        reason: String,
    },
}
