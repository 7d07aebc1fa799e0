//! Health command: digest-ready project health snapshot.

use anyhow::Result;
use clap::Parser;

use crate::analysis::{classify_all, HealthSnapshot};
use crate::utils::Settings;

use super::source::{emit, SourceArgs};

/// Health command options.
#[derive(Parser)]
pub struct HealthCommand {
    /// Commit source and output options.
    #[command(flatten)]
    pub source: SourceArgs,
}

impl HealthCommand {
    /// Executes the health command.
    pub fn execute(self, settings: &Settings) -> Result<()> {
        let commits = classify_all(self.source.load_commits(settings)?);
        let snapshot = HealthSnapshot::from_commits(&commits);

        emit(self.source.output_format(), &snapshot, ToString::to_string)
    }
}
