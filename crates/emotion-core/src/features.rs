use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;
use crate::preprocess::preprocess;

/// Surface signals taken from the raw (un-normalized) text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFeatures {
    pub has_exclamation: bool,
    pub has_question: bool,
    /// Two or more consecutive ASCII capitals somewhere in the text.
    pub has_repeated_caps: bool,
    pub word_count: usize,
    pub has_intensifiers: bool,
    /// Any keyword of any category occurs as a substring.
    pub has_emotional_words: bool,
    /// Whole-word negation present after contraction expansion. Not used for scoring.
    pub has_negation: bool,
}

impl TextFeatures {
    pub fn extract(raw: &str, lexicon: &Lexicon) -> Self {
        let lower = raw.to_lowercase();
        Self {
            has_exclamation: raw.contains('!'),
            has_question: raw.contains('?'),
            has_repeated_caps: has_repeated_caps(raw),
            word_count: raw.split_whitespace().count(),
            has_intensifiers: lexicon.intensifiers().iter().any(|w| lower.contains(w.as_str())),
            has_emotional_words: lexicon.all_keywords().any(|w| lower.contains(w)),
            has_negation: has_negation(&preprocess(raw), lexicon),
        }
    }
}

fn has_repeated_caps(raw: &str) -> bool {
    raw.as_bytes()
        .windows(2)
        .any(|w| w[0].is_ascii_uppercase() && w[1].is_ascii_uppercase())
}

// "don't" only reads as negated once expanded to "do not"
fn has_negation(normalized: &str, lexicon: &Lexicon) -> bool {
    normalized
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .any(|t| lexicon.negations().iter().any(|n| n == t))
}
