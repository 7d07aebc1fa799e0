//! Commit history access for local repositories.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use git2::{Repository, Sort};
use tracing::{debug, warn};

use crate::data::CommitRecord;
use crate::git::commit::record_from_commit;

/// Selection of commits to read from history.
#[derive(Debug, Clone, Default)]
pub struct CommitFilter {
    /// Branch or revision to walk from; `HEAD` when unset.
    pub branch: Option<String>,
    /// Oldest author timestamp to include.
    pub since: Option<DateTime<Utc>>,
    /// Newest author timestamp to include.
    pub until: Option<DateTime<Utc>>,
    /// Cursor: stop before the commit whose id starts with this prefix.
    pub stop_at: Option<String>,
    /// Maximum number of commits to return.
    pub max_commits: Option<usize>,
}

impl CommitFilter {
    /// Whether a timestamp falls inside the inclusive `since..=until` window.
    pub fn in_window(&self, timestamp: DateTime<Utc>) -> bool {
        self.since.map_or(true, |since| timestamp >= since)
            && self.until.map_or(true, |until| timestamp <= until)
    }

    /// Whether `sha` is the cursor commit. An empty cursor matches nothing.
    pub fn is_cursor(&self, sha: &str) -> bool {
        self.stop_at
            .as_deref()
            .is_some_and(|cursor| !cursor.is_empty() && sha.starts_with(cursor))
    }

    /// Whether `selected` commits already fill the cap.
    pub fn is_full(&self, selected: usize) -> bool {
        self.max_commits.is_some_and(|max| selected >= max)
    }
}

/// Git repository wrapper.
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Opens the repository at or above `path`.
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::discover(path)
            .with_context(|| format!("Not a git repository: {}", path.display()))?;
        Ok(Self { repo })
    }

    /// Short name of the checked-out branch, if HEAD is not detached.
    pub fn current_branch(&self) -> Option<String> {
        let head = self.repo.head().ok()?;
        head.shorthand()
            .filter(|name| *name != "HEAD")
            .map(str::to_string)
    }

    /// Reads commits newest first.
    pub fn commits(&self, filter: &CommitFilter) -> Result<Vec<CommitRecord>> {
        let mut walker = self.repo.revwalk().context("Failed to create revwalk")?;
        walker
            .set_sorting(Sort::TOPOLOGICAL | Sort::TIME)
            .context("Failed to set revwalk sorting")?;

        let branch_label = match &filter.branch {
            Some(rev) => {
                let start = self
                    .repo
                    .revparse_single(rev)
                    .with_context(|| format!("Failed to resolve revision: {rev}"))?
                    .peel_to_commit()
                    .with_context(|| format!("Revision is not a commit: {rev}"))?;
                walker.push(start.id()).context("Failed to push start commit")?;
                Some(rev.clone())
            }
            None => {
                walker.push_head().context("Failed to push HEAD")?;
                self.current_branch()
            }
        };

        let mut records = Vec::new();
        for oid in walker {
            let oid = oid.context("Failed to get commit OID from walker")?;
            let sha = oid.to_string();

            if filter.is_cursor(&sha) {
                debug!("Reached cursor {sha}, stopping walk");
                break;
            }

            let commit = self.repo.find_commit(oid).context("Failed to find commit")?;
            // Author time decides the window; checked before the diff.
            let authored = DateTime::from_timestamp(commit.author().when().seconds(), 0);
            if authored.is_some_and(|ts| !filter.in_window(ts)) {
                continue;
            }

            if filter.is_full(records.len()) {
                warn!("Commit limit of {} reached, history truncated", records.len());
                break;
            }
            records.push(record_from_commit(
                &self.repo,
                &commit,
                branch_label.as_deref(),
            )?);
        }

        debug!("Read {} commits from {}", records.len(), self.repo.path().display());
        Ok(records)
    }
}
