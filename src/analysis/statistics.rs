//! Aggregate volume and health statistics over a batch of classified commits.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::data::{ClassifiedCommit, Intent};

/// Placeholder for `busiest_day` when there are no commits.
pub const NO_BUSIEST_DAY: &str = "N/A";

/// Number of contributors reported by default.
pub const DEFAULT_TOP_CONTRIBUTORS: usize = 5;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Aggregate view of a commit batch, recomputed per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphStatistics {
    /// Number of commits in the batch.
    pub total_commits: usize,
    /// Calendar date (UTC, `YYYY-MM-DD`) with the most commits, or `"N/A"`.
    pub busiest_day: String,
    /// Busiest authors by display name, most active first.
    pub top_contributors: Vec<ContributorCount>,
    /// Commits per weekday, Monday first, weekdays without commits omitted.
    pub cadence: Vec<WeekdayCount>,
    /// Percentage of commits per observed intent.
    pub intent_breakdown: BTreeMap<Intent, f64>,
}

/// Commit volume of one author display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorCount {
    /// Author display name.
    pub name: String,
    /// Commits in the batch.
    pub commits: usize,
}

/// Commit volume of one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayCount {
    /// English weekday name.
    pub weekday: String,
    /// Commits made on that weekday.
    pub commits: usize,
}

impl GlyphStatistics {
    /// The result for an empty batch.
    pub fn empty() -> Self {
        Self {
            total_commits: 0,
            busiest_day: NO_BUSIEST_DAY.to_string(),
            top_contributors: Vec::new(),
            cadence: Vec::new(),
            intent_breakdown: BTreeMap::new(),
        }
    }
}

/// Aggregates a batch, reporting the default number of top contributors.
pub fn aggregate(commits: &[ClassifiedCommit]) -> GlyphStatistics {
    aggregate_with_top(commits, DEFAULT_TOP_CONTRIBUTORS)
}

/// Aggregates a batch, reporting at most `top_n` contributors.
pub fn aggregate_with_top(commits: &[ClassifiedCommit], top_n: usize) -> GlyphStatistics {
    if commits.is_empty() {
        return GlyphStatistics::empty();
    }

    GlyphStatistics {
        total_commits: commits.len(),
        busiest_day: busiest_day(commits),
        top_contributors: top_contributors(commits, top_n),
        cadence: cadence(commits),
        intent_breakdown: intent_breakdown(commits),
    }
}

/// Date with the most commits; ties go to the earliest date.
fn busiest_day(commits: &[ClassifiedCommit]) -> String {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for c in commits {
        *per_day.entry(c.commit.date()).or_insert(0) += 1;
    }

    let mut best: Option<(NaiveDate, usize)> = None;
    for (date, count) in per_day {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((date, count));
        }
    }

    best.map_or_else(
        || NO_BUSIEST_DAY.to_string(),
        |(date, _)| date.format("%Y-%m-%d").to_string(),
    )
}

/// Groups by display name; a stable sort keeps first-seen order on ties.
fn top_contributors(commits: &[ClassifiedCommit], top_n: usize) -> Vec<ContributorCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<ContributorCount> = Vec::new();

    for c in commits {
        let name = c.commit.author_name.as_str();
        match index.get(name) {
            Some(&i) => counts[i].commits += 1,
            None => {
                index.insert(name, counts.len());
                counts.push(ContributorCount {
                    name: name.to_string(),
                    commits: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.commits.cmp(&a.commits));
    counts.truncate(top_n);
    counts
}

fn cadence(commits: &[ClassifiedCommit]) -> Vec<WeekdayCount> {
    let mut per_weekday = [0_usize; 7];
    for c in commits {
        per_weekday[c.commit.timestamp.weekday().num_days_from_monday() as usize] += 1;
    }

    WEEKDAYS
        .iter()
        .zip(per_weekday)
        .filter(|(_, count)| *count > 0)
        .map(|(day, commits)| WeekdayCount {
            weekday: weekday_name(*day).to_string(),
            commits,
        })
        .collect()
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn intent_breakdown(commits: &[ClassifiedCommit]) -> BTreeMap<Intent, f64> {
    let mut counts: BTreeMap<Intent, usize> = BTreeMap::new();
    for c in commits {
        *counts.entry(c.intent).or_insert(0) += 1;
    }

    let total = commits.len() as f64;
    counts
        .into_iter()
        .map(|(intent, count)| (intent, count as f64 / total * 100.0))
        .collect()
}
