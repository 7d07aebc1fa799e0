//! Commit history analytics.
//!
//! Every function here is a pure transformation over in-memory commit
//! batches: no I/O, no shared state. Independent batches can be processed
//! concurrently without coordination.

pub mod achievements;
pub mod classifier;
pub mod collaboration;
pub mod health;
pub mod progress;
pub mod sentiment;
pub mod statistics;

pub use achievements::{Achievement, AchievementEngine, BatchMetrics, ACHIEVEMENTS};
pub use classifier::{classify, classify_all, classify_commit, Classification};
pub use collaboration::{build_graph, CollaborationGraph, Contributor, GraphLink, GraphNode};
pub use health::HealthSnapshot;
pub use progress::{extract_keywords, keyword_hits, score, Goal, KeywordMatchers};
pub use sentiment::SentimentScore;
pub use statistics::{aggregate, aggregate_with_top, GlyphStatistics};
