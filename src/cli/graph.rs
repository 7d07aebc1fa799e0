//! Graph command: contributor collaboration graph.

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use crate::analysis::collaboration::{compile_excludes, exclude_paths};
use crate::analysis::{build_graph, CollaborationGraph};
use crate::utils::Settings;

use super::source::{emit, SourceArgs};

/// Graph command options.
#[derive(Parser)]
pub struct GraphCommand {
    /// Path globs to ignore, in addition to those in settings.
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Commit source and output options.
    #[command(flatten)]
    pub source: SourceArgs,
}

impl GraphCommand {
    /// Executes the graph command.
    pub fn execute(self, settings: &Settings) -> Result<()> {
        let patterns: Vec<&str> = settings
            .analysis
            .exclude
            .iter()
            .chain(&self.exclude)
            .map(String::as_str)
            .collect();
        debug!("Excluding paths matching {patterns:?}");
        let excludes = compile_excludes(&patterns)?;

        let commits = exclude_paths(&self.source.load_commits(settings)?, &excludes);
        let graph = build_graph(&commits);

        emit(self.source.output_format(), &graph, render_text)
    }
}

fn render_text(graph: &CollaborationGraph) -> String {
    let mut out = format!("Contributors ({}):\n", graph.nodes.len());
    for node in &graph.nodes {
        out.push_str(&format!(
            "  {} <{}>  {} commit(s)\n",
            node.name, node.id, node.commits
        ));
    }

    if graph.links.is_empty() {
        out.push_str("\nNo shared files between contributors.");
        return out;
    }

    out.push_str(&format!("\nLinks ({}):\n", graph.links.len()));
    for link in &graph.links {
        out.push_str(&format!(
            "  {} <-> {}  {} shared file(s)\n",
            link.source, link.target, link.weight
        ));
    }
    out.trim_end().to_string()
}
