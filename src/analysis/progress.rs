//! Goal progress scoring and keyword suggestion.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of keywords returned by [`extract_keywords`].
pub const KEYWORD_LIMIT: usize = 5;

/// A user-defined goal: commits mentioning its keywords count as progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Goal name.
    pub name: String,
    /// Words that signal progress towards the goal.
    pub keywords: Vec<String>,
}

impl Goal {
    /// Scores a set of messages against this goal's keywords.
    pub fn score<S: AsRef<str>>(&self, messages: &[S]) -> f64 {
        score(messages, &self.keywords)
    }
}

/// Compiled whole-word, case-insensitive keyword matchers.
///
/// Blank keywords compile to no matcher and therefore never match, but they
/// still count towards the keyword total.
pub struct KeywordMatchers {
    matchers: Vec<Option<Regex>>,
}

impl KeywordMatchers {
    /// Compiles one matcher per keyword.
    pub fn new<K: AsRef<str>>(keywords: &[K]) -> Self {
        let matchers = keywords
            .iter()
            .map(|k| {
                let k = k.as_ref().trim();
                if k.is_empty() {
                    return None;
                }
                // Escaped input always yields a valid pattern.
                RegexBuilder::new(&format!(r"\b{}\b", regex::escape(k)))
                    .case_insensitive(true)
                    .build()
                    .ok()
            })
            .collect();
        Self { matchers }
    }

    /// Number of keywords found as whole words in a message.
    pub fn hits(&self, message: &str) -> usize {
        self.matchers
            .iter()
            .flatten()
            .filter(|re| re.is_match(message))
            .count()
    }

    /// Progress score of a set of messages; see [`score`].
    pub fn score<S: AsRef<str>>(&self, messages: &[S]) -> f64 {
        let total: usize = messages.iter().map(|m| self.hits(m.as_ref())).sum();

        let denominator = match messages.len() * self.matchers.len() {
            0 => 1,
            n => n,
        };

        debug!(
            "Goal progress: {total} hit(s) over {} message(s) and {} keyword(s)",
            messages.len(),
            self.matchers.len()
        );
        (total as f64 / denominator as f64).min(1.0)
    }
}

/// Number of keywords found as whole words in a message.
pub fn keyword_hits<K: AsRef<str>>(message: &str, keywords: &[K]) -> usize {
    KeywordMatchers::new(keywords).hits(message)
}

/// Scores messages against keywords, in `[0, 1]`.
///
/// Each (message, keyword) whole-word match adds one; the total is divided
/// by `messages × keywords` and clamped to 1. When that product is zero the
/// divisor is 1, so an empty keyword list always scores 0.
// TODO: decide whether an empty keyword list should be rejected instead of scoring 0.
pub fn score<S: AsRef<str>, K: AsRef<str>>(messages: &[S], keywords: &[K]) -> f64 {
    KeywordMatchers::new(keywords).score(messages)
}

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves",
    // Contraction fragments.
    "ain", "aren", "couldn", "d", "didn", "doesn", "don", "hadn", "hasn", "haven", "isn", "ll",
    "m", "mightn", "mustn", "needn", "o", "re", "s", "shan", "shouldn", "t", "ve", "wasn",
    "weren", "won", "wouldn", "y",
];

static STOP_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").unwrap());

/// Returns the most frequent non-stop-words of a text, ties in first-seen order.
///
/// Contractions split at the apostrophe and their fragments are stop words.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for word in WORD_PATTERN.find_iter(&lowered).map(|m| m.as_str()) {
        if !word.chars().all(char::is_alphabetic) || STOP_WORD_SET.contains(word) {
            continue;
        }
        let count = counts.entry(word).or_insert(0);
        if *count == 0 {
            order.push(word);
        }
        *count += 1;
    }

    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order
        .into_iter()
        .take(KEYWORD_LIMIT)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_word_case_insensitive_hits() {
        let message = "feat: Implement user Authentication module and fix login bug";
        let keywords = ["authentication", "login", "module"];
        assert_eq!(keyword_hits(message, &keywords), 3);
        assert_eq!(keyword_hits("relogin flow", &["login"]), 0);
        assert_eq!(keyword_hits("login-page", &["login"]), 1);
    }

    #[test]
    fn keywords_are_regex_escaped() {
        assert_eq!(keyword_hits("bump v1.2", &["v1.2"]), 1);
        assert_eq!(keyword_hits("bump v1x2", &["v1.2"]), 0);
    }

    #[test]
    fn score_normalizes_by_messages_and_keywords() {
        let messages = ["add login page", "fix login redirect", "update docs"];
        let keywords = ["login", "page"];
        // 2 + 1 + 0 hits over 6 pairs.
        assert!((score(&messages, &keywords) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn score_is_clamped_to_one() {
        let messages = ["login login"];
        assert_eq!(score(&messages, &["login"]), 1.0);
    }

    #[test]
    fn empty_keyword_list_scores_zero() {
        let keywords: [&str; 0] = [];
        assert_eq!(score(&["anything at all"], &keywords), 0.0);
    }

    #[test]
    fn empty_messages_score_zero() {
        let messages: [&str; 0] = [];
        assert_eq!(score(&messages, &["login"]), 0.0);
    }

    #[test]
    fn blank_keywords_never_match_but_count() {
        assert_eq!(keyword_hits("some words", &["", "  "]), 0);
        assert!((score(&["login"], &["login", ""]) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn goal_scores_its_keywords() {
        let goal = Goal {
            name: "auth".to_string(),
            keywords: vec!["oauth".to_string()],
        };
        assert_eq!(goal.score(&["Add OAuth flow", "refactor db"]), 0.5);
    }

    #[test]
    fn compiled_matchers_are_reusable() {
        let matchers = KeywordMatchers::new(&["login", " "]);
        let messages = ["login page", "Login again", "unrelated"];
        assert_eq!(matchers.hits("fix login"), 1);
        assert_eq!(matchers.score(&messages), score(&messages, &["login", " "]));
        assert!((matchers.score(&messages) - 2.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn extract_keywords_by_frequency() {
        let text = "feat: Implement user authentication module and fix login bug in the login module";
        assert_eq!(
            extract_keywords(text),
            vec!["module", "login", "feat", "implement", "user"]
        );
    }

    #[test]
    fn extract_keywords_skips_numbers_and_stop_words() {
        assert_eq!(extract_keywords("the 42 of v2 and it"), Vec::<String>::new());
        assert!(extract_keywords("").is_empty());
    }

    #[test]
    fn extract_keywords_drops_contractions() {
        assert_eq!(extract_keywords("it's done, don't break it"), vec!["done", "break"]);
        assert_eq!(
            extract_keywords("Parser isn’t ready; parser can't wait"),
            vec!["parser", "ready", "wait"]
        );
        assert_eq!(extract_keywords("the user's parser"), vec!["user", "parser"]);
    }
}
