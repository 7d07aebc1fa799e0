//! CLI interface for gitglyph.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod achievements;
pub mod classify;
pub mod graph;
pub mod health;
pub mod keywords;
pub mod progress;
pub mod source;
pub mod stats;

pub use source::{OutputFormat, SourceArgs};

use crate::utils::Settings;

/// gitglyph: commit history analytics.
#[derive(Parser)]
#[command(name = "gitglyph")]
#[command(about = "Turns commit history into intent tags, health metrics, collaboration graphs and achievements", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Analysis commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Classifies commit messages by intent and sentiment.
    Classify(classify::ClassifyCommand),
    /// Aggregates commit statistics.
    Stats(stats::StatsCommand),
    /// Builds the contributor collaboration graph.
    Graph(graph::GraphCommand),
    /// Evaluates and awards achievements.
    Achievements(achievements::AchievementsCommand),
    /// Scores commit messages against goal keywords.
    Progress(progress::ProgressCommand),
    /// Summarizes project health for digests.
    Health(health::HealthCommand),
    /// Suggests goal keywords from text.
    Keywords(keywords::KeywordsCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub fn execute(self) -> Result<()> {
        let settings = Settings::load()?;
        match self.command {
            Commands::Classify(cmd) => cmd.execute(&settings),
            Commands::Stats(cmd) => cmd.execute(&settings),
            Commands::Graph(cmd) => cmd.execute(&settings),
            Commands::Achievements(cmd) => cmd.execute(&settings),
            Commands::Progress(cmd) => cmd.execute(&settings),
            Commands::Health(cmd) => cmd.execute(&settings),
            Commands::Keywords(cmd) => cmd.execute(),
        }
    }
}
