//! Lexicon-based polarity scoring for commit messages.
//!
//! Each token found in the valence lexicon contributes its score. A negation
//! within the three preceding tokens flips and dampens it, and an intensifier
//! directly before it pushes it further from zero. Exclamation marks amplify
//! the total. The sum is normalized into a compound score in `[-1, 1]`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::data::Sentiment;

/// Compound score at or above which a message is positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;

/// Compound score at or below which a message is negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

const NORMALIZATION_ALPHA: f64 = 15.0;
const NEGATION_SCALAR: f64 = -0.74;
const INTENSIFIER_INCREMENT: f64 = 0.293;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const NEGATION_WINDOW: usize = 3;

const LEXICON: &[(&str, f64)] = &[
    // positive
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("clean", 1.7),
    ("cleaner", 1.7),
    ("cool", 1.3),
    ("elegant", 2.1),
    ("excellent", 3.2),
    ("fantastic", 2.6),
    ("fun", 2.3),
    ("glad", 2.0),
    ("good", 1.9),
    ("great", 3.1),
    ("happy", 2.7),
    ("improve", 1.9),
    ("improved", 2.1),
    ("improvement", 2.0),
    ("improves", 1.9),
    ("love", 3.2),
    ("lovely", 2.8),
    ("nice", 1.8),
    ("perfect", 2.7),
    ("robust", 1.4),
    ("simpler", 1.3),
    ("stable", 1.2),
    ("success", 2.7),
    ("successful", 2.8),
    ("successfully", 2.6),
    ("thank", 1.5),
    ("thanks", 1.9),
    ("win", 2.8),
    ("wonderful", 2.7),
    ("yay", 2.4),
    // negative
    ("annoying", -1.7),
    ("awful", -2.0),
    ("bad", -2.5),
    ("broke", -1.8),
    ("broken", -2.1),
    ("crash", -1.7),
    ("crashes", -1.7),
    ("damn", -1.7),
    ("disaster", -3.1),
    ("error", -1.7),
    ("errors", -1.4),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failing", -2.3),
    ("fails", -1.8),
    ("failure", -2.3),
    ("hate", -2.7),
    ("horrible", -2.5),
    ("mess", -1.5),
    ("messy", -1.5),
    ("panic", -1.9),
    ("problem", -1.7),
    ("problems", -1.7),
    ("sad", -2.1),
    ("stupid", -2.4),
    ("terrible", -2.1),
    ("ugh", -1.8),
    ("ugly", -2.3),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -2.1),
];

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "didnt", "doesnt", "dont", "hadnt", "hasnt",
    "isnt", "never", "no", "nobody", "none", "nor", "not", "nothing", "nowhere", "shouldnt",
    "wasnt", "werent", "without", "wont", "wouldnt",
];

const INTENSIFIERS: &[&str] = &[
    "absolutely",
    "completely",
    "extremely",
    "highly",
    "hugely",
    "incredibly",
    "really",
    "so",
    "super",
    "totally",
    "very",
];

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z']+").unwrap());

/// Polarity of a message: the compound score and its three-way label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    /// Normalized score in `[-1, 1]`.
    pub compound: f64,
    /// Label derived from the compound score.
    pub label: Sentiment,
}

impl SentimentScore {
    /// Maps a compound score onto its label.
    pub fn label_for(compound: f64) -> Sentiment {
        if compound >= POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if compound <= NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

/// Scores the polarity of a message.
pub fn score(message: &str) -> SentimentScore {
    let lowered = message.to_lowercase();
    let tokens: Vec<String> = TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().replace('\'', ""))
        .filter(|t| !t.is_empty())
        .collect();

    let mut sum = 0.0;
    for (index, token) in tokens.iter().enumerate() {
        let Some(mut valence) = valence_of(token) else {
            continue;
        };

        if index > 0 && INTENSIFIERS.contains(&tokens[index - 1].as_str()) {
            valence += INTENSIFIER_INCREMENT.copysign(valence);
        }

        let window_start = index.saturating_sub(NEGATION_WINDOW);
        if tokens[window_start..index]
            .iter()
            .any(|t| NEGATIONS.contains(&t.as_str()))
        {
            valence *= NEGATION_SCALAR;
        }

        sum += valence;
    }

    if sum != 0.0 {
        let bangs = message.matches('!').count().min(MAX_EXCLAMATIONS) as f64;
        sum += (bangs * EXCLAMATION_INCREMENT).copysign(sum);
    }

    let compound = normalize(sum);
    SentimentScore {
        compound,
        label: SentimentScore::label_for(compound),
    }
}

fn valence_of(token: &str) -> Option<f64> {
    LEXICON
        .iter()
        .find(|(word, _)| *word == token)
        .map(|(_, valence)| *valence)
}

fn normalize(sum: f64) -> f64 {
    (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}
