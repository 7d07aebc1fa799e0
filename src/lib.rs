//! # gitglyph
//!
//! Commit history analytics: intent and sentiment tagging, aggregate
//! statistics, contributor collaboration graphs, achievements and goal
//! progress scoring.
//!
//! ## Quick Start
//!
//! ```rust
//! use gitglyph::analysis::classify;
//! use gitglyph::data::Intent;
//!
//! let result = classify("fix: handle empty input");
//! assert_eq!(result.intent, Intent::BugFix);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod cli;
pub mod data;
pub mod error;
pub mod git;
pub mod store;
pub mod utils;

pub use crate::cli::Cli;
pub use crate::error::GlyphError;

/// The current version of gitglyph.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
