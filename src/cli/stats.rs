//! Stats command: aggregate volume, cadence and intent mix.

use anyhow::Result;
use clap::Parser;

use crate::analysis::{aggregate_with_top, classify_all, GlyphStatistics};
use crate::utils::Settings;

use super::source::{emit, SourceArgs};

/// Stats command options.
#[derive(Parser)]
pub struct StatsCommand {
    /// Number of contributors to list (defaults to settings).
    #[arg(long)]
    pub top: Option<usize>,

    /// Commit source and output options.
    #[command(flatten)]
    pub source: SourceArgs,
}

impl StatsCommand {
    /// Executes the stats command.
    pub fn execute(self, settings: &Settings) -> Result<()> {
        let top = self.top.unwrap_or(settings.analysis.top_contributors);
        let commits = classify_all(self.source.load_commits(settings)?);
        let stats = aggregate_with_top(&commits, top);

        emit(self.source.output_format(), &stats, render_text)
    }
}

fn render_text(stats: &GlyphStatistics) -> String {
    let mut out = format!(
        "Total commits: {}\nBusiest day:   {}\n",
        stats.total_commits, stats.busiest_day
    );

    if !stats.top_contributors.is_empty() {
        out.push_str("\nTop contributors:\n");
        for c in &stats.top_contributors {
            out.push_str(&format!("  {:<24} {}\n", c.name, c.commits));
        }
    }

    if !stats.cadence.is_empty() {
        out.push_str("\nCadence:\n");
        for day in &stats.cadence {
            out.push_str(&format!("  {:<10} {}\n", day.weekday, day.commits));
        }
    }

    if !stats.intent_breakdown.is_empty() {
        out.push_str("\nIntents:\n");
        for (intent, pct) in &stats.intent_breakdown {
            out.push_str(&format!("  {intent:<14} {pct:>6.2}%\n"));
        }
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregate;
    use crate::analysis::statistics::tests::classified;
    use crate::data::Intent;

    #[test]
    fn text_lists_every_section() {
        let commits = vec![
            classified("Ada", (2024, 1, 1), Intent::Feature),
            classified("Ada", (2024, 1, 1), Intent::BugFix),
            classified("Lin", (2024, 1, 2), Intent::Feature),
        ];
        let text = render_text(&aggregate(&commits));

        assert!(text.starts_with("Total commits: 3\nBusiest day:   2024-01-01"));
        assert!(text.contains("Top contributors:"));
        assert!(text.contains("Monday"));
        assert!(text.contains(" 66.67%"));
    }

    #[test]
    fn empty_batch_has_no_sections() {
        let text = render_text(&GlyphStatistics::empty());
        assert_eq!(text, "Total commits: 0\nBusiest day:   N/A");
    }
}
