//! Keywords command: suggests goal keywords from free text.

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Parser;

use crate::analysis::extract_keywords;

use super::source::{emit, OutputFormat};

/// Keywords command options.
#[derive(Parser)]
pub struct KeywordsCommand {
    /// Text to analyze; read from stdin when omitted.
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,

    /// Output format: text (default), json, yaml.
    #[arg(long, default_value = "text")]
    pub format: String,
}

impl KeywordsCommand {
    /// Executes the keywords command.
    pub fn execute(self) -> Result<()> {
        let text = if self.text.is_empty() {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read text from stdin")?;
            buf
        } else {
            self.text.join(" ")
        };

        let format = self.format.parse().unwrap_or(OutputFormat::Text);
        let keywords = extract_keywords(&text);
        emit(format, &keywords, |words| words.join("\n"))
    }
}
