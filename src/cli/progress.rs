//! Progress command: scores history against a goal's keywords.

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use crate::analysis::{Goal, KeywordMatchers};
use crate::data::CommitRecord;
use crate::git::short_hash;
use crate::utils::Settings;

use super::source::{emit, SourceArgs};

/// Progress command options.
#[derive(Parser)]
pub struct ProgressCommand {
    /// Goal keyword; repeat for several.
    #[arg(long = "keyword", short = 'k', value_name = "WORD", required = true)]
    pub keywords: Vec<String>,

    /// Goal name shown in the report.
    #[arg(long, default_value = "goal")]
    pub goal: String,

    /// Commit source and output options.
    #[command(flatten)]
    pub source: SourceArgs,
}

/// A commit that mentions at least one keyword.
#[derive(Debug, Serialize)]
pub struct MatchingCommit {
    /// Commit id.
    pub sha: String,
    /// First line of the message.
    pub summary: String,
    /// Keywords found in the message.
    pub hits: usize,
}

/// Progress command result.
#[derive(Debug, Serialize)]
pub struct ProgressReport {
    /// The goal scored.
    pub goal: Goal,
    /// Messages considered.
    pub commits: usize,
    /// Score in `[0, 1]`.
    pub score: f64,
    /// Commits contributing to the score.
    pub matches: Vec<MatchingCommit>,
}

impl ProgressCommand {
    /// Executes the progress command.
    pub fn execute(self, settings: &Settings) -> Result<()> {
        let commits = self.source.load_commits(settings)?;
        let goal = Goal {
            name: self.goal,
            keywords: self.keywords,
        };

        let report = progress_report(goal, &commits);
        emit(self.source.output_format(), &report, render_text)
    }
}

fn progress_report(goal: Goal, commits: &[CommitRecord]) -> ProgressReport {
    let matchers = KeywordMatchers::new(&goal.keywords);

    let messages: Vec<&str> = commits.iter().map(|c| c.message.as_str()).collect();
    let score = matchers.score(&messages);
    let matches = commits
        .iter()
        .filter_map(|c| {
            let hits = matchers.hits(&c.message);
            (hits > 0).then(|| MatchingCommit {
                sha: c.sha.clone(),
                summary: c.summary().to_string(),
                hits,
            })
        })
        .collect();

    ProgressReport {
        goal,
        commits: commits.len(),
        score,
        matches,
    }
}

fn render_text(report: &ProgressReport) -> String {
    let mut out = format!(
        "{}: {:.1}% ({} of {} commit(s) mention {})\n",
        report.goal.name,
        report.score * 100.0,
        report.matches.len(),
        report.commits,
        report.goal.keywords.join(", ")
    );
    for m in &report.matches {
        out.push_str(&format!("  {}  [{}] {}\n", short_hash(&m.sha), m.hits, m.summary));
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn commit(sha: &str, message: &str) -> CommitRecord {
        CommitRecord {
            sha: sha.to_string(),
            message: message.to_string(),
            author_name: "Ada".to_string(),
            author_email: "ada@example.com".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            branch: None,
            changed_files: Default::default(),
            additions: None,
            deletions: None,
        }
    }

    #[test]
    fn report_scores_and_lists_matching_commits() {
        let goal = Goal {
            name: "auth".to_string(),
            keywords: vec!["login".to_string(), "oauth".to_string()],
        };
        let commits = vec![
            commit("c3", "feat: OAuth login\n\nbody"),
            commit("b2", "fix: typo"),
            commit("a1", "docs: login guide"),
        ];

        let report = progress_report(goal, &commits);
        assert_eq!(report.commits, 3);
        assert!((report.score - 0.5).abs() < 1e-12);
        let hits: Vec<(&str, usize)> = report
            .matches
            .iter()
            .map(|m| (m.sha.as_str(), m.hits))
            .collect();
        assert_eq!(hits, vec![("c3", 2), ("a1", 1)]);
        assert_eq!(report.matches[0].summary, "feat: OAuth login");
    }

    #[test]
    fn text_report_lists_matches() {
        let report = ProgressReport {
            goal: Goal {
                name: "auth".to_string(),
                keywords: vec!["login".to_string(), "oauth".to_string()],
            },
            commits: 4,
            score: 0.25,
            matches: vec![MatchingCommit {
                sha: "0123456789abcdef".to_string(),
                summary: "feat: oauth login".to_string(),
                hits: 2,
            }],
        };

        assert_eq!(
            render_text(&report),
            "auth: 25.0% (1 of 4 commit(s) mention login, oauth)\n  01234567  [2] feat: oauth login"
        );
    }
}
