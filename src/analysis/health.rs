//! Project health snapshot consumed by digest notifications.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::{ClassifiedCommit, Intent};

const DAYS_PER_MONTH: f64 = 30.0;

/// Headline health metrics of a commit batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    /// Feature commits per bug-fix commit (fixes floored at one).
    pub feature_to_fix_ratio: f64,
    /// Coefficient of variation of per-commit churn.
    pub churn_volatility: f64,
    /// Commits per 30-day month over the history span.
    pub commit_cadence: f64,
}

impl HealthSnapshot {
    /// Computes the snapshot of a batch. An empty batch is all zeros.
    pub fn from_commits(commits: &[ClassifiedCommit]) -> Self {
        Self {
            feature_to_fix_ratio: feature_to_fix_ratio(commits),
            churn_volatility: churn_volatility(commits),
            commit_cadence: commit_cadence(commits),
        }
    }
}

impl fmt::Display for HealthSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Feature vs. Fix Ratio: {:.2}", self.feature_to_fix_ratio)?;
        writeln!(f, "Commit Cadence: {:.2} commits/month", self.commit_cadence)?;
        write!(f, "Code Churn Volatility: {:.2}", self.churn_volatility)
    }
}

fn feature_to_fix_ratio(commits: &[ClassifiedCommit]) -> f64 {
    let features = commits.iter().filter(|c| c.intent == Intent::Feature).count();
    let fixes = commits.iter().filter(|c| c.intent == Intent::BugFix).count();
    features as f64 / fixes.max(1) as f64
}

fn churn_volatility(commits: &[ClassifiedCommit]) -> f64 {
    let churn: Vec<f64> = commits
        .iter()
        .filter_map(|c| c.commit.churn())
        .map(|n| n as f64)
        .collect();
    if churn.len() < 2 {
        return 0.0;
    }

    let n = churn.len() as f64;
    let mean = churn.iter().sum::<f64>() / n;
    if mean == 0.0 {
        return 0.0;
    }
    let variance = churn.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt() / mean
}

fn commit_cadence(commits: &[ClassifiedCommit]) -> f64 {
    let dates = commits.iter().map(|c| c.commit.date());
    let (Some(first), Some(last)) = (dates.clone().min(), dates.max()) else {
        return 0.0;
    };

    let span_days = (last - first).num_days() as f64 + 1.0;
    let months = (span_days / DAYS_PER_MONTH).max(1.0);
    commits.len() as f64 / months
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::statistics::tests::classified;

    fn with_churn(mut c: ClassifiedCommit, additions: u64, deletions: u64) -> ClassifiedCommit {
        c.commit.additions = Some(additions);
        c.commit.deletions = Some(deletions);
        c
    }

    #[test]
    fn empty_batch_is_all_zero() {
        let snapshot = HealthSnapshot::from_commits(&[]);
        assert_eq!(snapshot.feature_to_fix_ratio, 0.0);
        assert_eq!(snapshot.churn_volatility, 0.0);
        assert_eq!(snapshot.commit_cadence, 0.0);
    }

    #[test]
    fn ratio_floors_fixes_at_one() {
        let features = vec![
            classified("Ada", (2024, 1, 1), Intent::Feature),
            classified("Ada", (2024, 1, 1), Intent::Feature),
        ];
        assert_eq!(HealthSnapshot::from_commits(&features).feature_to_fix_ratio, 2.0);

        let mut mixed = features;
        for _ in 0..4 {
            mixed.push(classified("Ada", (2024, 1, 1), Intent::BugFix));
        }
        assert_eq!(HealthSnapshot::from_commits(&mixed).feature_to_fix_ratio, 0.5);
    }

    #[test]
    fn volatility_is_coefficient_of_variation() {
        let steady = vec![
            with_churn(classified("Ada", (2024, 1, 1), Intent::Other), 5, 5),
            with_churn(classified("Ada", (2024, 1, 2), Intent::Other), 10, 0),
        ];
        assert_eq!(HealthSnapshot::from_commits(&steady).churn_volatility, 0.0);

        let spiky = vec![
            with_churn(classified("Ada", (2024, 1, 1), Intent::Other), 0, 0),
            with_churn(classified("Ada", (2024, 1, 2), Intent::Other), 20, 0),
            classified("Ada", (2024, 1, 3), Intent::Other),
        ];
        // mean 10, stddev 10
        assert!((HealthSnapshot::from_commits(&spiky).churn_volatility - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cadence_counts_short_histories_as_one_month() {
        let commits = vec![
            classified("Ada", (2024, 1, 1), Intent::Other),
            classified("Ada", (2024, 1, 10), Intent::Other),
        ];
        assert_eq!(HealthSnapshot::from_commits(&commits).commit_cadence, 2.0);
    }

    #[test]
    fn cadence_over_long_span() {
        // 2024-01-01 ..= 2024-03-30 is 90 days, three months.
        let commits: Vec<_> = (0..6)
            .map(|_| classified("Ada", (2024, 1, 1), Intent::Other))
            .chain(std::iter::once(classified("Ada", (2024, 3, 30), Intent::Other)))
            .collect();
        let cadence = HealthSnapshot::from_commits(&commits).commit_cadence;
        assert!((cadence - 7.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn display_renders_digest_summary() {
        let snapshot = HealthSnapshot {
            feature_to_fix_ratio: 1.5,
            churn_volatility: 0.25,
            commit_cadence: 12.0,
        };
        assert_eq!(
            snapshot.to_string(),
            "Feature vs. Fix Ratio: 1.50\nCommit Cadence: 12.00 commits/month\nCode Churn Volatility: 0.25"
        );
    }
}
