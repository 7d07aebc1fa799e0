//! Achievement storage.
//!
//! The analytics never own persistence; they talk to an [`AchievementStore`].
//! Stores only ever add ids to a user's set.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Key-value store of awarded achievement ids per user.
pub trait AchievementStore {
    /// Returns the ids already awarded to a user.
    fn awarded(&self, user_id: &str) -> Result<BTreeSet<String>>;

    /// Adds ids to a user's set. Ids the user already holds are ignored.
    fn grant(&mut self, user_id: &str, ids: &BTreeSet<String>) -> Result<()>;
}

/// Process-local store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryAchievementStore {
    awards: HashMap<String, BTreeSet<String>>,
}

impl InMemoryAchievementStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl AchievementStore for InMemoryAchievementStore {
    fn awarded(&self, user_id: &str) -> Result<BTreeSet<String>> {
        Ok(self.awards.get(user_id).cloned().unwrap_or_default())
    }

    fn grant(&mut self, user_id: &str, ids: &BTreeSet<String>) -> Result<()> {
        self.awards
            .entry(user_id.to_string())
            .or_default()
            .extend(ids.iter().cloned());
        Ok(())
    }
}

/// On-disk layout of the file store.
#[derive(Debug, Default, Serialize, Deserialize)]
struct AchievementFile {
    #[serde(default)]
    users: BTreeMap<String, BTreeSet<String>>,
}

/// JSON file store, by default at `$HOME/.gitglyph/achievements.json`.
#[derive(Debug, Clone)]
pub struct FileAchievementStore {
    path: PathBuf,
}

impl FileAchievementStore {
    /// Uses the store at the given path; the file is created on first grant.
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Returns the default store path.
    pub fn default_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;
        Ok(home_dir.join(".gitglyph").join("achievements.json"))
    }

    fn load(&self) -> Result<AchievementFile> {
        if !self.path.exists() {
            return Ok(AchievementFile::default());
        }

        let content = std::fs::read_to_string(&self.path).with_context(|| {
            format!("Failed to read achievement store: {}", self.path.display())
        })?;
        serde_json::from_str(&content).with_context(|| {
            format!("Failed to parse achievement store: {}", self.path.display())
        })
    }

    fn save(&self, file: &AchievementFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create store directory: {}", parent.display())
            })?;
        }

        let content =
            serde_json::to_string_pretty(file).context("Failed to serialize achievements")?;
        std::fs::write(&self.path, content).with_context(|| {
            format!("Failed to write achievement store: {}", self.path.display())
        })
    }
}

impl AchievementStore for FileAchievementStore {
    fn awarded(&self, user_id: &str) -> Result<BTreeSet<String>> {
        Ok(self.load()?.users.remove(user_id).unwrap_or_default())
    }

    fn grant(&mut self, user_id: &str, ids: &BTreeSet<String>) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let mut file = self.load()?;
        file.users
            .entry(user_id.to_string())
            .or_default()
            .extend(ids.iter().cloned());
        debug!(
            "Granting {} achievement(s) to {user_id} in {}",
            ids.len(),
            self.path.display()
        );
        self.save(&file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ids(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn in_memory_grants_accumulate() {
        let mut store = InMemoryAchievementStore::new();
        store.grant("ada", &ids(&["team_titan"])).unwrap();
        store.grant("ada", &ids(&["bug_hunter", "team_titan"])).unwrap();
        assert_eq!(
            store.awarded("ada").unwrap(),
            ids(&["bug_hunter", "team_titan"])
        );
        assert!(store.awarded("bo").unwrap().is_empty());
    }

    #[test]
    fn file_store_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("achievements.json");

        let mut store = FileAchievementStore::with_path(&path);
        assert!(store.awarded("ada").unwrap().is_empty());
        store.grant("ada", &ids(&["solo_voyager"])).unwrap();
        assert!(path.exists());

        let mut reopened = FileAchievementStore::with_path(&path);
        reopened.grant("ada", &ids(&["bug_hunter"])).unwrap();
        reopened.grant("bo", &ids(&["team_titan"])).unwrap();

        let store = FileAchievementStore::with_path(&path);
        assert_eq!(
            store.awarded("ada").unwrap(),
            ids(&["bug_hunter", "solo_voyager"])
        );
        assert_eq!(store.awarded("bo").unwrap(), ids(&["team_titan"]));
    }

    #[test]
    fn file_store_rejects_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("achievements.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(FileAchievementStore::with_path(&path).awarded("ada").is_err());
    }
}
