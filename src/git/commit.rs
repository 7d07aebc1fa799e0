//! Conversion of git commits into pipeline records.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use git2::{Commit, Diff, Repository};

use crate::data::CommitRecord;

/// Builds a [`CommitRecord`] from a git commit, diffing against its first parent.
pub fn record_from_commit(
    repo: &Repository,
    commit: &Commit,
    branch: Option<&str>,
) -> Result<CommitRecord> {
    let sha = commit.id().to_string();
    let author = commit.author();

    let when = author.when();
    let timestamp: DateTime<Utc> = DateTime::from_timestamp(when.seconds(), 0)
        .with_context(|| format!("Invalid commit timestamp for {sha}"))?;

    let diff = first_parent_diff(repo, commit)
        .with_context(|| format!("Failed to diff commit {sha}"))?;
    let changed_files = changed_paths(&diff)?;
    let stats = diff.stats().context("Failed to get diff stats")?;

    Ok(CommitRecord {
        message: commit.message().unwrap_or("").to_string(),
        author_name: author.name().unwrap_or("Unknown").to_string(),
        author_email: author.email().unwrap_or("unknown@example.com").to_string(),
        timestamp,
        branch: branch.map(str::to_string),
        changed_files,
        additions: Some(stats.insertions() as u64),
        deletions: Some(stats.deletions() as u64),
        sha,
    })
}

fn first_parent_diff<'r>(repo: &'r Repository, commit: &Commit) -> Result<Diff<'r>> {
    let tree = commit.tree().context("Failed to get commit tree")?;
    let parent_tree = if commit.parent_count() > 0 {
        Some(
            commit
                .parent(0)
                .context("Failed to get parent commit")?
                .tree()
                .context("Failed to get parent tree")?,
        )
    } else {
        None
    };

    repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)
        .context("Failed to create diff")
}

fn changed_paths(diff: &Diff<'_>) -> Result<BTreeSet<String>> {
    let mut paths = BTreeSet::new();
    diff.foreach(
        &mut |delta, _progress| {
            // Deleted files only carry the old side.
            let path = delta.new_file().path().or_else(|| delta.old_file().path());
            if let Some(path) = path.and_then(|p| p.to_str()) {
                paths.insert(path.to_string());
            }
            true
        },
        None,
        None,
        None,
    )
    .context("Failed to process diff")?;
    Ok(paths)
}
