//! Achievements command: evaluates a batch and records new badges.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::analysis::achievements::find;
use crate::analysis::{classify_all, AchievementEngine};
use crate::store::FileAchievementStore;
use crate::utils::Settings;

use super::source::{emit, SourceArgs};

/// Environment variable naming the user achievements are awarded to.
pub const USER_ENV_VAR: &str = "GITGLYPH_USER";

/// Achievements command options.
#[derive(Parser)]
pub struct AchievementsCommand {
    /// User to award achievements to (defaults to $GITGLYPH_USER).
    #[arg(long)]
    pub user: Option<String>,

    /// Achievement store file (defaults to settings, then ~/.gitglyph/achievements.json).
    #[arg(long, value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// Commit source and output options.
    #[command(flatten)]
    pub source: SourceArgs,
}

/// A badge in command output.
#[derive(Debug, Serialize)]
pub struct BadgeView {
    /// Achievement id.
    pub id: String,
    /// Display title, when the id is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl BadgeView {
    fn new(id: String) -> Self {
        let title = find(&id).map(|a| a.title.to_string());
        Self { id, title }
    }

    fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }
}

/// Achievements command result.
#[derive(Debug, Serialize)]
pub struct AchievementReport {
    /// User evaluated.
    pub user: String,
    /// Badges awarded by this run.
    pub newly_awarded: Vec<BadgeView>,
    /// Every badge the user holds.
    pub held: Vec<BadgeView>,
}

impl AchievementsCommand {
    /// Executes the achievements command.
    pub fn execute(self, settings: &Settings) -> Result<()> {
        let user = match self.user.clone() {
            Some(user) => user,
            None => settings.get_env_var(USER_ENV_VAR).with_context(|| {
                format!("No user given: pass --user or set {USER_ENV_VAR}")
            })?,
        };

        let store_path = match self
            .store
            .clone()
            .or_else(|| settings.analysis.achievements_path.clone())
        {
            Some(path) => path,
            None => FileAchievementStore::default_path()?,
        };

        let commits = classify_all(self.source.load_commits(settings)?);
        let mut engine = AchievementEngine::new(FileAchievementStore::with_path(store_path));
        let newly_awarded = engine.evaluate(&user, &commits)?;
        let held = engine.awarded(&user)?;

        let report = AchievementReport {
            user,
            newly_awarded: newly_awarded.into_iter().map(BadgeView::new).collect(),
            held: held.into_iter().map(BadgeView::new).collect(),
        };

        emit(self.source.output_format(), &report, render_text)
    }
}

fn render_text(report: &AchievementReport) -> String {
    let mut out = String::new();
    if report.newly_awarded.is_empty() {
        out.push_str(&format!("No new achievements for {}.\n", report.user));
    } else {
        out.push_str(&format!("New achievements for {}:\n", report.user));
        for badge in &report.newly_awarded {
            out.push_str(&format!("  🏆 {}\n", badge.label()));
        }
    }

    if !report.held.is_empty() {
        let labels: Vec<&str> = report.held.iter().map(BadgeView::label).collect();
        out.push_str(&format!("Held: {}\n", labels.join(", ")));
    }
    out.trim_end().to_string()
}
