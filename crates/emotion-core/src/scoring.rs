//! Keyword scoring with uniform feature bonuses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::features::TextFeatures;
use crate::lexicon::{EmotionCategory, Lexicon};

/// Score per distinct keyword found in the normalized text.
pub const KEYWORD_WEIGHT: f64 = 0.3;
pub const EXCLAMATION_BONUS: f64 = 0.1;
pub const INTENSIFIER_BONUS: f64 = 0.2;
pub const REPEATED_CAPS_BONUS: f64 = 0.05;
pub const EMOTIONAL_WORDS_BONUS: f64 = 0.1;

/// One score in [0, 1] for every category.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<EmotionCategory, f64>",
    into = "BTreeMap<EmotionCategory, f64>"
)]
pub struct EmotionScores([f64; EmotionCategory::COUNT]);

impl EmotionScores {
    /// Clamps every value into [0, 1].
    pub fn from_values(values: [f64; EmotionCategory::COUNT]) -> Self {
        Self(values.map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }))
    }

    pub fn get(&self, category: EmotionCategory) -> f64 {
        self.0[category.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (EmotionCategory, f64)> + '_ {
        EmotionCategory::ALL.into_iter().zip(self.0.iter().copied())
    }

    /// Highest score; on ties the earliest category in declaration order wins.
    pub fn primary(&self) -> (EmotionCategory, f64) {
        let mut best = (EmotionCategory::ALL[0], self.0[0]);
        for (cat, v) in self.iter().skip(1) {
            if v > best.1 {
                best = (cat, v);
            }
        }
        best
    }

    pub fn rounded(&self) -> Self {
        Self(self.0.map(round2))
    }
}

impl TryFrom<BTreeMap<EmotionCategory, f64>> for EmotionScores {
    type Error = String;

    fn try_from(map: BTreeMap<EmotionCategory, f64>) -> Result<Self, Self::Error> {
        let mut values = [0.0; EmotionCategory::COUNT];
        for cat in EmotionCategory::ALL {
            let v = *map.get(&cat).ok_or_else(|| format!("missing score for `{cat}`"))?;
            if !(0.0..=1.0).contains(&v) {
                return Err(format!("score for `{cat}` out of range: {v}"));
            }
            values[cat.index()] = v;
        }
        Ok(Self(values))
    }
}

impl From<EmotionScores> for BTreeMap<EmotionCategory, f64> {
    fn from(scores: EmotionScores) -> Self {
        scores.iter().collect()
    }
}

/// Round half away from zero to two decimals.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Sum of the bonuses the features earn; identical for every category.
pub fn feature_bonus(features: &TextFeatures) -> f64 {
    let mut bonus = 0.0;
    if features.has_exclamation {
        bonus += EXCLAMATION_BONUS;
    }
    if features.has_intensifiers {
        bonus += INTENSIFIER_BONUS;
    }
    if features.has_repeated_caps {
        bonus += REPEATED_CAPS_BONUS;
    }
    if features.has_emotional_words {
        bonus += EMOTIONAL_WORDS_BONUS;
    }
    bonus
}

/// Number of distinct keywords of `category` present in `normalized`.
pub fn keyword_hits(normalized: &str, category: EmotionCategory, lexicon: &Lexicon) -> usize {
    lexicon
        .keywords(category)
        .iter()
        .filter(|k| normalized.contains(k.as_str()))
        .count()
}

pub fn score(normalized: &str, features: &TextFeatures, lexicon: &Lexicon) -> EmotionScores {
    let bonus = feature_bonus(features);
    let values = EmotionCategory::ALL.map(|cat| {
        KEYWORD_WEIGHT * keyword_hits(normalized, cat, lexicon) as f64 + bonus
    });
    EmotionScores::from_values(values)
}
