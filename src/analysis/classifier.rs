//! Intent and sentiment classification of commit messages.
//!
//! Intent rules live in an ordered table and the first matching rule wins,
//! since several rules can match the same message ("fix: add guard" starts
//! with `fix` and also contains `add`). Prefix rules always run before
//! keyword rules.

use crate::analysis::sentiment::{self, SentimentScore};
use crate::data::{ClassifiedCommit, CommitRecord, Intent, Sentiment};

/// How a rule inspects a lowercased message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Message starts with the given conventional-commit type.
    Prefix(&'static str),
    /// Message contains any of the given keywords.
    Contains(&'static [&'static str]),
}

impl Matcher {
    fn matches(self, message: &str) -> bool {
        match self {
            Self::Prefix(prefix) => message.starts_with(prefix),
            Self::Contains(keywords) => keywords.iter().any(|k| message.contains(k)),
        }
    }
}

/// A single (matcher, intent) pair of the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentRule {
    /// Condition on the lowercased message.
    pub matcher: Matcher,
    /// Intent assigned when the condition holds.
    pub intent: Intent,
}

const fn prefix(p: &'static str, intent: Intent) -> IntentRule {
    IntentRule {
        matcher: Matcher::Prefix(p),
        intent,
    }
}

const fn keywords(k: &'static [&'static str], intent: Intent) -> IntentRule {
    IntentRule {
        matcher: Matcher::Contains(k),
        intent,
    }
}

/// Intent rules in evaluation order.
pub const INTENT_RULES: &[IntentRule] = &[
    prefix("feat", Intent::Feature),
    prefix("fix", Intent::BugFix),
    prefix("refactor", Intent::Refactor),
    prefix("docs", Intent::Documentation),
    prefix("style", Intent::Style),
    prefix("test", Intent::Test),
    prefix("chore", Intent::Chore),
    prefix("build", Intent::Build),
    prefix("ci", Intent::Ci),
    prefix("perf", Intent::Performance),
    prefix("revert", Intent::Revert),
    keywords(&["add", "implement"], Intent::Feature),
    keywords(&["bug", "issue", "correct"], Intent::BugFix),
    keywords(&["update"], Intent::Chore),
    keywords(&["remove", "delete"], Intent::Chore),
    keywords(&["config"], Intent::Configuration),
    keywords(&["merge"], Intent::Merge),
];

/// Result of classifying one message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// Detected intent.
    pub intent: Intent,
    /// Polarity of the message.
    pub sentiment: SentimentScore,
}

/// Resolves the intent of a message against [`INTENT_RULES`].
pub fn detect_intent(message: &str) -> Intent {
    let normalized = message.trim_start().to_lowercase();
    if normalized.is_empty() {
        return Intent::Other;
    }

    INTENT_RULES
        .iter()
        .find(|rule| rule.matcher.matches(&normalized))
        .map_or(Intent::Other, |rule| rule.intent)
}

/// Classifies a message into an intent and a sentiment. Never fails.
pub fn classify(message: &str) -> Classification {
    if message.trim().is_empty() {
        return Classification {
            intent: Intent::Other,
            sentiment: SentimentScore {
                compound: 0.0,
                label: Sentiment::Neutral,
            },
        };
    }

    Classification {
        intent: detect_intent(message),
        sentiment: sentiment::score(message),
    }
}

/// Tags a commit with the classification of its message.
pub fn classify_commit(commit: CommitRecord) -> ClassifiedCommit {
    let Classification { intent, sentiment } = classify(&commit.message);
    ClassifiedCommit {
        commit,
        intent,
        sentiment: sentiment.label,
    }
}

/// Tags every commit of a batch.
pub fn classify_all<I>(commits: I) -> Vec<ClassifiedCommit>
where
    I: IntoIterator<Item = CommitRecord>,
{
    commits.into_iter().map(classify_commit).collect()
}
