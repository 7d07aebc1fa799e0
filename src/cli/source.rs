//! Shared options: where commits come from and how results are printed.

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::builder::NonEmptyStringValueParser;
use clap::Args;
use serde::Serialize;
use tracing::{info, warn};

use crate::data::{read_commit_file, CommitRecord};
use crate::git::{CommitFilter, GitRepository};
use crate::utils::Settings;

/// Where to read commit history from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Repository to analyze.
    #[arg(long, default_value = ".", conflicts_with = "input")]
    pub repo: PathBuf,

    /// Reads commits from a JSON or YAML file instead of a repository.
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Branch or revision to walk from (defaults to HEAD).
    #[arg(long)]
    pub branch: Option<String>,

    /// Only commits at or after this date (YYYY-MM-DD or RFC 3339).
    #[arg(long, value_parser = parse_date_bound)]
    pub since: Option<DateTime<Utc>>,

    /// Only commits at or before this date (YYYY-MM-DD or RFC 3339).
    #[arg(long, value_parser = parse_date_bound)]
    pub until: Option<DateTime<Utc>>,

    /// Stops reading history at this commit (exclusive).
    #[arg(long, value_name = "SHA", value_parser = NonEmptyStringValueParser::new())]
    pub stop_at: Option<String>,

    /// Maximum number of commits to analyze (defaults to settings).
    #[arg(long)]
    pub max_commits: Option<usize>,

    /// Output format: text (default), json, yaml.
    #[arg(long, default_value = "text")]
    pub format: String,
}

impl SourceArgs {
    /// Parsed output format; unknown values fall back to text.
    pub fn output_format(&self) -> OutputFormat {
        self.format.parse().unwrap_or_else(|()| {
            warn!("Unknown output format {:?}, using text", self.format);
            OutputFormat::Text
        })
    }

    /// Loads the commits selected by these options.
    pub fn load_commits(&self, settings: &Settings) -> Result<Vec<CommitRecord>> {
        let max_commits = self.max_commits.unwrap_or(settings.analysis.max_commits);
        let filter = CommitFilter {
            branch: self.branch.clone(),
            since: self.since,
            until: self.until,
            stop_at: self.stop_at.clone(),
            max_commits: Some(max_commits),
        };

        let commits = match &self.input {
            Some(path) => apply_filter(read_commit_file(path)?, &filter),
            None => GitRepository::open_at(&self.repo)
                .context("Failed to open git repository")?
                .commits(&filter)?,
        };

        info!("Loaded {} commits", commits.len());
        Ok(commits)
    }
}

/// Applies the date window, cursor and size cap to file-supplied commits.
///
/// Files are expected newest first, like repository history.
fn apply_filter(commits: Vec<CommitRecord>, filter: &CommitFilter) -> Vec<CommitRecord> {
    let mut selected = Vec::new();
    for commit in commits {
        if filter.is_cursor(&commit.sha) {
            break;
        }
        if !filter.in_window(commit.timestamp) {
            continue;
        }
        if filter.is_full(selected.len()) {
            warn!("Commit limit of {} reached, input truncated", selected.len());
            break;
        }
        selected.push(commit);
    }
    selected
}

/// Parses `YYYY-MM-DD` (start of day, UTC) or an RFC 3339 timestamp.
pub fn parse_date_bound(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| format!("Invalid date '{value}', expected YYYY-MM-DD or RFC 3339"))
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text format.
    #[default]
    Text,
    /// JSON format.
    Json,
    /// YAML format.
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Prints a report in a structured format, or calls `text` for plain output.
pub fn emit<T, F>(format: OutputFormat, report: &T, text: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    let rendered = match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).context("Failed to serialize report")?
        }
        OutputFormat::Yaml => crate::data::to_yaml(report)?,
        OutputFormat::Text => text(report),
    };
    println!("{rendered}");
    Ok(())
}
