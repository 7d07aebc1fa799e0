//! Badge-style achievements awarded from batch metrics.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use anyhow::Result;
use chrono::Duration;
use serde::Serialize;
use tracing::info;

use crate::data::{ClassifiedCommit, Intent};
use crate::store::AchievementStore;

const DAYS_PER_YEAR: f64 = 365.25;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Metrics every achievement criterion is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatchMetrics {
    /// Commits in the batch.
    pub total_commits: usize,
    /// Distinct author emails.
    pub distinct_authors: usize,
    /// Time between the oldest and newest commit.
    #[serde(skip)]
    pub span: Duration,
    /// `span` in 365.25-day years.
    pub span_years: f64,
    /// Share of `bug_fix` commits in `[0, 1]`.
    pub bug_fix_share: f64,
    /// Share of `feature` commits in `[0, 1]`.
    pub feature_share: f64,
}

impl BatchMetrics {
    /// Derives the metrics of a batch. Shares are 0 for an empty batch.
    pub fn from_commits(commits: &[ClassifiedCommit]) -> Self {
        let total_commits = commits.len();
        let distinct_authors = commits
            .iter()
            .map(|c| c.commit.author_email.as_str())
            .collect::<HashSet<_>>()
            .len();

        let oldest = commits.iter().map(|c| c.commit.timestamp).min();
        let newest = commits.iter().map(|c| c.commit.timestamp).max();
        let span = match (oldest, newest) {
            (Some(oldest), Some(newest)) => newest - oldest,
            _ => Duration::zero(),
        };
        let span_years = span.num_seconds() as f64 / SECONDS_PER_DAY / DAYS_PER_YEAR;

        let share = |intent: Intent| {
            if total_commits == 0 {
                0.0
            } else {
                commits.iter().filter(|c| c.intent == intent).count() as f64
                    / total_commits as f64
            }
        };

        Self {
            total_commits,
            distinct_authors,
            span,
            span_years,
            bug_fix_share: share(Intent::BugFix),
            feature_share: share(Intent::Feature),
        }
    }
}

/// A badge and the rule that earns it.
#[derive(Clone, Copy, Serialize)]
pub struct Achievement {
    /// Stable identifier.
    pub id: &'static str,
    /// Display title.
    pub title: &'static str,
    /// What earns the badge.
    pub description: &'static str,
    /// Criterion over the batch metrics.
    #[serde(skip)]
    pub criteria: fn(&BatchMetrics) -> bool,
}

impl fmt::Debug for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Achievement")
            .field("id", &self.id)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// The fixed rule set.
pub const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: "decade_of_code",
        title: "Decade of Code",
        description: "Commit history spans at least ten years.",
        criteria: |m| m.span_years >= 10.0,
    },
    Achievement {
        id: "team_titan",
        title: "Team Titan",
        description: "At least five different authors contributed.",
        criteria: |m| m.distinct_authors >= 5,
    },
    Achievement {
        id: "solo_voyager",
        title: "Solo Voyager",
        description: "A single author made at least 1000 commits.",
        criteria: |m| m.distinct_authors <= 1 && m.total_commits >= 1000,
    },
    Achievement {
        id: "bug_hunter",
        title: "Bug Hunter",
        description: "At least 30% of commits fix bugs.",
        criteria: |m| m.bug_fix_share >= 0.30,
    },
    Achievement {
        id: "feature_fanatic",
        title: "Feature Fanatic",
        description: "At least half of all commits add features.",
        criteria: |m| m.feature_share >= 0.50,
    },
];

/// Looks up an achievement by id.
pub fn find(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Every achievement whose criterion holds for the metrics.
pub fn qualifying(metrics: &BatchMetrics) -> Vec<&'static Achievement> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| (a.criteria)(metrics))
        .collect()
}

/// Awards achievements through a store.
pub struct AchievementEngine<S> {
    store: S,
}

impl<S: AchievementStore> AchievementEngine<S> {
    /// Creates an engine backed by `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Evaluates a batch for a user and returns the ids awarded by this call.
    ///
    /// Ids the user already holds are not returned again, and nothing is
    /// ever removed, so repeated evaluation is idempotent.
    pub fn evaluate(
        &mut self,
        user_id: &str,
        commits: &[ClassifiedCommit],
    ) -> Result<BTreeSet<String>> {
        let metrics = BatchMetrics::from_commits(commits);
        let held = self.store.awarded(user_id)?;

        let new_ids: BTreeSet<String> = qualifying(&metrics)
            .into_iter()
            .map(|a| a.id.to_string())
            .filter(|id| !held.contains(id))
            .collect();

        if !new_ids.is_empty() {
            info!("Awarding {new_ids:?} to {user_id}");
            self.store.grant(user_id, &new_ids)?;
        }

        Ok(new_ids)
    }

    /// All ids held by a user.
    pub fn awarded(&self, user_id: &str) -> Result<BTreeSet<String>> {
        self.store.awarded(user_id)
    }
}
