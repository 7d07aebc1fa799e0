//! Settings and configuration utilities.
//!
//! Settings are read from `$HOME/.gitglyph/settings.json`. The `env` map
//! backs up environment variables; the `analysis` section provides defaults
//! for command line options.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::statistics::DEFAULT_TOP_CONTRIBUTORS;

/// Commits read per invocation unless configured otherwise.
pub const DEFAULT_MAX_COMMITS: usize = 50_000;

/// Settings loaded from `$HOME/.gitglyph/settings.json`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    /// Environment variable overrides.
    #[serde(default)]
    pub env: HashMap<String, String>,

    /// Analysis defaults.
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

/// Defaults for the analysis commands.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AnalysisSettings {
    /// Cap on commits read from history.
    #[serde(default = "default_max_commits", rename = "maxCommits")]
    pub max_commits: usize,

    /// Contributors listed in statistics.
    #[serde(default = "default_top_contributors", rename = "topContributors")]
    pub top_contributors: usize,

    /// Path globs ignored when building the collaboration graph.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Achievement store location; `$HOME/.gitglyph/achievements.json` when unset.
    #[serde(default, rename = "achievementsPath")]
    pub achievements_path: Option<PathBuf>,
}

fn default_max_commits() -> usize {
    DEFAULT_MAX_COMMITS
}

fn default_top_contributors() -> usize {
    DEFAULT_TOP_CONTRIBUTORS
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            max_commits: DEFAULT_MAX_COMMITS,
            top_contributors: DEFAULT_TOP_CONTRIBUTORS,
            exclude: Vec::new(),
            achievements_path: None,
        }
    }
}

impl Settings {
    /// Loads settings from the default location.
    pub fn load() -> Result<Self> {
        let settings_path = Self::get_settings_path()?;
        Self::load_from_path(&settings_path)
    }

    /// Loads settings from a specific path; a missing file yields defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        serde_json::from_str::<Self>(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Returns the default settings path.
    pub fn get_settings_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;

        Ok(home_dir.join(".gitglyph").join("settings.json"))
    }

    /// Returns an environment variable with fallback to settings.
    pub fn get_env_var(&self, key: &str) -> Option<String> {
        env::var(key).ok().or_else(|| self.env.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn settings_load_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let settings_path = temp_dir.path().join("settings.json");

        let settings_json = r#"{
            "env": {
                "GITGLYPH_USER": "octocat"
            },
            "analysis": {
                "maxCommits": 200,
                "exclude": ["*.lock"]
            }
        }"#;
        fs::write(&settings_path, settings_json).unwrap();

        let settings = Settings::load_from_path(&settings_path).unwrap();

        assert_eq!(settings.env.get("GITGLYPH_USER").unwrap(), "octocat");
        assert_eq!(settings.analysis.max_commits, 200);
        assert_eq!(settings.analysis.top_contributors, DEFAULT_TOP_CONTRIBUTORS);
        assert_eq!(settings.analysis.exclude, vec!["*.lock".to_string()]);
        assert!(settings.analysis.achievements_path.is_none());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_from_path(temp_dir.path().join("absent.json")).unwrap();
        assert!(settings.env.is_empty());
        assert_eq!(settings.analysis, AnalysisSettings::default());
    }

    #[test]
    fn settings_get_env_var_prefers_environment() {
        let mut settings = Settings::default();
        settings
            .env
            .insert("GITGLYPH_TEST_VAR".to_string(), "from_settings".to_string());

        env::set_var("GITGLYPH_TEST_VAR", "from_env");
        assert_eq!(settings.get_env_var("GITGLYPH_TEST_VAR").unwrap(), "from_env");

        env::remove_var("GITGLYPH_TEST_VAR");
        assert_eq!(
            settings.get_env_var("GITGLYPH_TEST_VAR").unwrap(),
            "from_settings"
        );
        assert!(settings.get_env_var("GITGLYPH_TEST_ABSENT").is_none());
    }
}
