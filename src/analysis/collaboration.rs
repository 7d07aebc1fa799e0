//! Contributor collaboration graph derived from shared file touches.
//!
//! Two contributors are linked when they have touched at least one common
//! file. The link weight is the size of the intersection of their complete
//! touched-file sets, computed once per unordered pair.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::CommitRecord;
use crate::error::GlyphError;

/// A contributor folded from the commits they authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    /// Author email, the identity key.
    pub email: String,
    /// Display name from the first commit seen.
    pub name: String,
    /// Commits authored.
    pub commit_count: usize,
    /// Every path the contributor touched.
    pub files_touched: BTreeSet<String>,
}

/// Graph node, one per contributor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Contributor email.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Commits authored.
    pub commits: usize,
}

/// Undirected link between two contributors; `source < target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    /// Lexicographically smaller email of the pair.
    pub source: String,
    /// Lexicographically larger email of the pair.
    pub target: String,
    /// Number of files both contributors touched.
    pub weight: usize,
}

/// Weighted co-authorship graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationGraph {
    /// Contributors in first-seen order.
    pub nodes: Vec<GraphNode>,
    /// Deduplicated links with positive weight.
    pub links: Vec<GraphLink>,
}

impl CollaborationGraph {
    /// Returns the link between two contributors, in either order.
    pub fn link_between(&self, a: &str, b: &str) -> Option<&GraphLink> {
        let (source, target) = canonical_pair(a, b);
        self.links
            .iter()
            .find(|l| l.source == source && l.target == target)
    }
}

/// Accumulated per-contributor and per-file state.
#[derive(Debug, Default)]
pub struct ContributorIndex {
    contributors: Vec<Contributor>,
    by_email: HashMap<String, usize>,
    file_authors: BTreeMap<String, BTreeSet<String>>,
}

impl ContributorIndex {
    /// Folds a batch of commits.
    pub fn from_commits(commits: &[CommitRecord]) -> Self {
        let mut index = Self::default();
        for commit in commits {
            index.add(commit);
        }
        index
    }

    /// Folds one commit into the index.
    pub fn add(&mut self, commit: &CommitRecord) {
        let slot = match self.by_email.get(&commit.author_email) {
            Some(&slot) => slot,
            None => {
                let slot = self.contributors.len();
                self.by_email.insert(commit.author_email.clone(), slot);
                self.contributors.push(Contributor {
                    email: commit.author_email.clone(),
                    name: commit.author_name.clone(),
                    commit_count: 0,
                    files_touched: BTreeSet::new(),
                });
                slot
            }
        };

        let contributor = &mut self.contributors[slot];
        contributor.commit_count += 1;
        for file in &commit.changed_files {
            contributor.files_touched.insert(file.clone());
            self.file_authors
                .entry(file.clone())
                .or_default()
                .insert(commit.author_email.clone());
        }
    }

    /// Looks up a contributor by email.
    pub fn get(&self, email: &str) -> Option<&Contributor> {
        self.by_email.get(email).map(|&i| &self.contributors[i])
    }

    /// Number of files both contributors touched.
    pub fn shared_files(&self, a: &str, b: &str) -> usize {
        match (self.get(a), self.get(b)) {
            (Some(a), Some(b)) => a.files_touched.intersection(&b.files_touched).count(),
            _ => 0,
        }
    }

    /// Builds the graph from the folded state.
    pub fn into_graph(self) -> CollaborationGraph {
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut links = Vec::new();

        for authors in self.file_authors.values() {
            let authors: Vec<&String> = authors.iter().collect();
            for (i, a) in authors.iter().enumerate() {
                for b in &authors[i + 1..] {
                    let (source, target) = canonical_pair(a, b);
                    if !seen.insert((source.to_string(), target.to_string())) {
                        continue;
                    }

                    let weight = self.shared_files(source, target);
                    if weight > 0 {
                        links.push(GraphLink {
                            source: source.to_string(),
                            target: target.to_string(),
                            weight,
                        });
                    }
                }
            }
        }

        let nodes = self
            .contributors
            .into_iter()
            .map(|c| GraphNode {
                id: c.email,
                name: c.name,
                commits: c.commit_count,
            })
            .collect::<Vec<_>>();

        debug!(
            "Built collaboration graph with {} nodes and {} links",
            nodes.len(),
            links.len()
        );

        CollaborationGraph { nodes, links }
    }
}

fn canonical_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Builds the collaboration graph of a batch.
pub fn build_graph(commits: &[CommitRecord]) -> CollaborationGraph {
    ContributorIndex::from_commits(commits).into_graph()
}

/// Compiles path exclusion globs.
pub fn compile_excludes<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet, GlyphError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let glob = Glob::new(pattern).map_err(|e| GlyphError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.kind().to_string(),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| GlyphError::InvalidPattern {
        pattern: patterns
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(", "),
        reason: e.to_string(),
    })
}

/// Drops changed paths matching any exclusion glob.
pub fn exclude_paths(commits: &[CommitRecord], excludes: &GlobSet) -> Vec<CommitRecord> {
    if excludes.is_empty() {
        return commits.to_vec();
    }

    commits
        .iter()
        .map(|commit| {
            let mut commit = commit.clone();
            commit.changed_files.retain(|path| !excludes.is_match(path));
            commit
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn commit(email: &str, files: &[&str]) -> CommitRecord {
        CommitRecord {
            sha: format!("{email}-{}", files.join(",")),
            message: "work".to_string(),
            author_name: email.split('@').next().unwrap_or_default().to_string(),
            author_email: email.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            branch: None,
            changed_files: files.iter().map(|f| (*f).to_string()).collect(),
            additions: None,
            deletions: None,
        }
    }

    #[test]
    fn three_shared_files_make_one_link() {
        let commits = vec![
            commit("ada@x.io", &["a.rs", "b.rs", "c.rs", "only_ada.rs"]),
            commit("ada@x.io", &["ada2.rs"]),
            commit("bo@x.io", &["a.rs", "b.rs", "c.rs", "only_bo.rs", "bo2.rs"]),
        ];
        let graph = build_graph(&commits);

        assert_eq!(graph.links.len(), 1);
        let link = &graph.links[0];
        assert_eq!(link.source, "ada@x.io");
        assert_eq!(link.target, "bo@x.io");
        assert_eq!(link.weight, 3);
    }

    #[test]
    fn nodes_carry_commit_counts_in_first_seen_order() {
        let commits = vec![
            commit("zed@x.io", &["a.rs"]),
            commit("ada@x.io", &["a.rs"]),
            commit("zed@x.io", &[]),
        ];
        let graph = build_graph(&commits);
        let nodes: Vec<_> = graph
            .nodes
            .iter()
            .map(|n| (n.id.as_str(), n.commits))
            .collect();
        assert_eq!(nodes, vec![("zed@x.io", 2), ("ada@x.io", 1)]);
    }

    #[test]
    fn commits_without_files_create_no_links() {
        let commits = vec![commit("ada@x.io", &[]), commit("bo@x.io", &[])];
        let graph = build_graph(&commits);
        assert_eq!(graph.nodes.len(), 2);
        assert!(graph.links.is_empty());
    }

    #[test]
    fn disjoint_contributors_are_not_linked() {
        let commits = vec![commit("ada@x.io", &["a.rs"]), commit("bo@x.io", &["b.rs"])];
        assert!(build_graph(&commits).links.is_empty());
    }

    #[test]
    fn weight_uses_complete_file_sets() {
        // Pair first meets on a.rs but also shares b.rs and c.rs.
        let commits = vec![
            commit("ada@x.io", &["a.rs"]),
            commit("bo@x.io", &["a.rs"]),
            commit("ada@x.io", &["b.rs", "c.rs"]),
            commit("bo@x.io", &["b.rs", "c.rs"]),
            commit("cy@x.io", &["c.rs"]),
        ];
        let graph = build_graph(&commits);

        assert_eq!(graph.link_between("bo@x.io", "ada@x.io").unwrap().weight, 3);
        assert_eq!(graph.link_between("cy@x.io", "ada@x.io").unwrap().weight, 1);
        assert_eq!(graph.link_between("bo@x.io", "cy@x.io").unwrap().weight, 1);
        assert_eq!(graph.links.len(), 3);
    }

    #[test]
    fn shared_files_is_symmetric() {
        let commits = vec![
            commit("ada@x.io", &["a.rs", "b.rs"]),
            commit("bo@x.io", &["b.rs", "c.rs"]),
        ];
        let index = ContributorIndex::from_commits(&commits);
        assert_eq!(index.shared_files("ada@x.io", "bo@x.io"), 1);
        assert_eq!(index.shared_files("bo@x.io", "ada@x.io"), 1);
        assert_eq!(index.shared_files("ada@x.io", "nobody@x.io"), 0);
    }

    #[test]
    fn excludes_filter_changed_paths() {
        let commits = vec![
            commit("ada@x.io", &["Cargo.lock", "src/a.rs"]),
            commit("bo@x.io", &["Cargo.lock"]),
        ];
        let excludes = compile_excludes(&["Cargo.lock"]).unwrap();
        let filtered = exclude_paths(&commits, &excludes);
        assert_eq!(filtered[0].changed_files.len(), 1);
        assert!(build_graph(&filtered).links.is_empty());
        assert_eq!(build_graph(&commits).links.len(), 1);
    }

    #[test]
    fn invalid_exclude_pattern_is_rejected() {
        let err = compile_excludes(&["src/[a"]).unwrap_err();
        assert!(matches!(err, GlyphError::InvalidPattern { .. }));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn batch() -> impl Strategy<Value = Vec<CommitRecord>> {
            proptest::collection::vec(
                (0_usize..6, proptest::collection::vec(0_usize..8, 0..5)),
                0..30,
            )
            .prop_map(|entries| {
                entries
                    .into_iter()
                    .map(|(author, files)| {
                        let email = format!("dev{author}@x.io");
                        let files: Vec<String> = files.iter().map(|f| format!("f{f}.rs")).collect();
                        let refs: Vec<&str> = files.iter().map(String::as_str).collect();
                        commit(&email, &refs)
                    })
                    .collect()
            })
        }

        proptest! {
            #[test]
            fn links_unique_positive_and_symmetric(commits in batch()) {
                let graph = build_graph(&commits);
                let index = ContributorIndex::from_commits(&commits);
                let mut pairs = HashSet::new();
                for link in &graph.links {
                    prop_assert!(link.source < link.target);
                    prop_assert!(link.weight > 0);
                    prop_assert!(pairs.insert((link.source.clone(), link.target.clone())));
                    prop_assert_eq!(
                        index.shared_files(&link.source, &link.target),
                        index.shared_files(&link.target, &link.source)
                    );
                    prop_assert_eq!(link.weight, index.shared_files(&link.target, &link.source));
                }
            }
        }
    }
}
