//! Classify command: tags messages or commits with intent and sentiment.

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use crate::analysis::classify;
use crate::data::{Intent, Sentiment};
use crate::git::short_hash;
use crate::utils::Settings;

use super::source::{emit, SourceArgs};

/// Classify command options.
#[derive(Parser)]
pub struct ClassifyCommand {
    /// Messages to classify; when omitted, the selected history is classified.
    #[arg(value_name = "MESSAGE")]
    pub messages: Vec<String>,

    /// Commit source and output options.
    #[command(flatten)]
    pub source: SourceArgs,
}

/// One classified message.
#[derive(Debug, Serialize)]
pub struct ClassifiedMessage {
    /// Commit id, when the message came from history.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    /// First line of the message.
    pub summary: String,
    /// Detected intent.
    pub intent: Intent,
    /// Sentiment label.
    pub sentiment: Sentiment,
    /// Compound polarity score.
    pub compound: f64,
}

impl ClassifyCommand {
    /// Executes the classify command.
    pub fn execute(self, settings: &Settings) -> Result<()> {
        let entries: Vec<(Option<String>, String)> = if self.messages.is_empty() {
            self.source
                .load_commits(settings)?
                .into_iter()
                .map(|c| (Some(c.sha), c.message))
                .collect()
        } else {
            self.messages.into_iter().map(|m| (None, m)).collect()
        };

        let report: Vec<ClassifiedMessage> = entries
            .into_iter()
            .map(|(sha, message)| {
                let result = classify(&message);
                ClassifiedMessage {
                    sha,
                    summary: message.lines().next().unwrap_or("").to_string(),
                    intent: result.intent,
                    sentiment: result.sentiment.label,
                    compound: result.sentiment.compound,
                }
            })
            .collect();

        emit(self.source.output_format(), &report, |rows| {
            rows.iter()
                .map(|r| {
                    let id = r.sha.as_deref().map(short_hash).unwrap_or("-");
                    format!(
                        "{id:<8}  {:<13}  {:<8} ({:+.3})  {}",
                        r.intent, r.sentiment, r.compound, r.summary
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
    }
}
