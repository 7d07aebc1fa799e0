//! Commit records and their classified form.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GlyphError;

/// A single commit as supplied by a repository access collaborator.
///
/// Records are immutable once produced. The author email is the stable
/// identity key; the display name is kept for presentation and for the
/// name-based grouping done by the statistics aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Full commit id.
    pub sha: String,
    /// Complete commit message.
    pub message: String,
    /// Author display name.
    pub author_name: String,
    /// Author email address.
    pub author_email: String,
    /// Author timestamp, normalized to UTC.
    pub timestamp: DateTime<Utc>,
    /// Branch the commit was read from, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Paths touched by the commit.
    #[serde(default)]
    pub changed_files: BTreeSet<String>,
    /// Lines added, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additions: Option<u64>,
    /// Lines deleted, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletions: Option<u64>,
}

impl CommitRecord {
    /// Returns the UTC calendar date of the commit.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// Returns additions plus deletions, or `None` if neither is known.
    pub fn churn(&self) -> Option<u64> {
        match (self.additions, self.deletions) {
            (None, None) => None,
            (a, d) => Some(a.unwrap_or(0) + d.unwrap_or(0)),
        }
    }

    /// Returns the first line of the message.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

/// Unvalidated commit as read from a JSON commit file.
///
/// Converting into a [`CommitRecord`] is where malformed timestamps and
/// negative counts are rejected.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawCommit {
    /// Commit id.
    pub sha: String,
    /// Commit message.
    #[serde(default)]
    pub message: String,
    /// Author display name.
    #[serde(default)]
    pub author_name: String,
    /// Author email address.
    #[serde(default)]
    pub author_email: String,
    /// RFC 3339 timestamp; any offset is accepted and normalized to UTC.
    pub timestamp: String,
    /// Branch name.
    #[serde(default)]
    pub branch: Option<String>,
    /// Touched paths.
    #[serde(default)]
    pub changed_files: Vec<String>,
    /// Lines added.
    #[serde(default)]
    pub additions: Option<i64>,
    /// Lines deleted.
    #[serde(default)]
    pub deletions: Option<i64>,
}

impl TryFrom<RawCommit> for CommitRecord {
    type Error = GlyphError;

    fn try_from(raw: RawCommit) -> Result<Self, Self::Error> {
        if raw.sha.trim().is_empty() {
            return Err(GlyphError::MissingField("sha"));
        }

        let timestamp = DateTime::parse_from_rfc3339(raw.timestamp.trim())
            .map_err(|_| GlyphError::InvalidTimestamp {
                sha: raw.sha.clone(),
                value: raw.timestamp.clone(),
            })?
            .with_timezone(&Utc);

        let additions = non_negative(&raw.sha, "additions", raw.additions)?;
        let deletions = non_negative(&raw.sha, "deletions", raw.deletions)?;

        Ok(Self {
            sha: raw.sha,
            message: raw.message,
            author_name: raw.author_name,
            author_email: raw.author_email,
            timestamp,
            branch: raw.branch,
            changed_files: raw.changed_files.into_iter().collect(),
            additions,
            deletions,
        })
    }
}

fn non_negative(
    sha: &str,
    field: &'static str,
    value: Option<i64>,
) -> Result<Option<u64>, GlyphError> {
    match value {
        None => Ok(None),
        Some(v) => u64::try_from(v).map(Some).map_err(|_| GlyphError::NegativeCount {
            sha: sha.to_string(),
            field,
            value: v,
        }),
    }
}

/// Purpose category of a commit message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// New functionality.
    Feature,
    /// Defect correction.
    BugFix,
    /// Restructuring without behavior change.
    Refactor,
    /// Documentation changes.
    Documentation,
    /// Formatting and style.
    Style,
    /// Tests.
    Test,
    /// Maintenance.
    Chore,
    /// Build system.
    Build,
    /// Continuous integration.
    Ci,
    /// Performance work.
    Performance,
    /// Reverted change.
    Revert,
    /// Configuration changes.
    Configuration,
    /// Merge commits.
    Merge,
    /// Nothing recognized.
    Other,
}

impl Intent {
    /// Returns the wire name of the intent.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::BugFix => "bug_fix",
            Self::Refactor => "refactor",
            Self::Documentation => "documentation",
            Self::Style => "style",
            Self::Test => "test",
            Self::Chore => "chore",
            Self::Build => "build",
            Self::Ci => "ci",
            Self::Performance => "performance",
            Self::Revert => "revert",
            Self::Configuration => "configuration",
            Self::Merge => "merge",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Three-way polarity label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Compound score at or above 0.05.
    Positive,
    /// Compound score strictly between -0.05 and 0.05.
    Neutral,
    /// Compound score at or below -0.05.
    Negative,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        })
    }
}

/// A commit tagged with its intent and sentiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedCommit {
    /// Source commit.
    #[serde(flatten)]
    pub commit: CommitRecord,
    /// Classified intent.
    pub intent: Intent,
    /// Classified sentiment.
    pub sentiment: Sentiment,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(timestamp: &str) -> RawCommit {
        RawCommit {
            sha: "abc123".to_string(),
            message: "feat: add login\n\nLong body".to_string(),
            author_name: "Ada".to_string(),
            author_email: "ada@example.com".to_string(),
            timestamp: timestamp.to_string(),
            branch: Some("main".to_string()),
            changed_files: vec!["src/b.rs".to_string(), "src/a.rs".to_string()],
            additions: Some(10),
            deletions: Some(2),
        }
    }

    #[test]
    fn raw_commit_normalizes_offset_to_utc() {
        let record = CommitRecord::try_from(raw("2024-03-01T23:30:00-05:00")).unwrap();
        assert_eq!(record.timestamp.to_rfc3339(), "2024-03-02T04:30:00+00:00");
        assert_eq!(record.date().to_string(), "2024-03-02");
        assert_eq!(record.summary(), "feat: add login");
        assert_eq!(record.churn(), Some(12));
        let files: Vec<_> = record.changed_files.iter().cloned().collect();
        assert_eq!(files, vec!["src/a.rs", "src/b.rs"]);
    }

    #[test]
    fn raw_commit_rejects_malformed_timestamp() {
        let err = CommitRecord::try_from(raw("yesterday")).unwrap_err();
        assert!(matches!(err, GlyphError::InvalidTimestamp { .. }));
    }

    #[test]
    fn raw_commit_rejects_negative_counts() {
        let mut input = raw("2024-03-01T10:00:00Z");
        input.deletions = Some(-4);
        let err = CommitRecord::try_from(input).unwrap_err();
        assert_eq!(
            err,
            GlyphError::NegativeCount {
                sha: "abc123".to_string(),
                field: "deletions",
                value: -4,
            }
        );
    }

    #[test]
    fn raw_commit_requires_sha() {
        let mut input = raw("2024-03-01T10:00:00Z");
        input.sha = "  ".to_string();
        assert_eq!(
            CommitRecord::try_from(input).unwrap_err(),
            GlyphError::MissingField("sha")
        );
    }

    #[test]
    fn churn_is_none_without_counts() {
        let mut input = raw("2024-03-01T10:00:00Z");
        input.additions = None;
        input.deletions = None;
        assert_eq!(CommitRecord::try_from(input).unwrap().churn(), None);
    }

    #[test]
    fn intent_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Intent::BugFix).unwrap(), "\"bug_fix\"");
        assert_eq!(Intent::Performance.to_string(), "performance");
        assert_eq!(serde_json::to_string(&Sentiment::Neutral).unwrap(), "\"neutral\"");
    }
}
