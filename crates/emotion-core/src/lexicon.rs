//! Emotion categories and the keyword lexicon they are scored against.
//!
//! The lexicon is built once (either the built-in table or a JSON file) and is
//! read-only afterwards, so any number of analyzers can share it without locks.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{EmotionError, Result};
use crate::preprocess::preprocess;

/// Closed set of labels the classifier can output.
/// Declaration order is the tie-break order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionCategory {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Love,
    Neutral,
}

impl EmotionCategory {
    pub const COUNT: usize = 7;

    pub const ALL: [EmotionCategory; Self::COUNT] = [
        EmotionCategory::Joy,
        EmotionCategory::Sadness,
        EmotionCategory::Anger,
        EmotionCategory::Fear,
        EmotionCategory::Surprise,
        EmotionCategory::Love,
        EmotionCategory::Neutral,
    ];

    /// Position in `ALL`.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EmotionCategory::Joy => "joy",
            EmotionCategory::Sadness => "sadness",
            EmotionCategory::Anger => "anger",
            EmotionCategory::Fear => "fear",
            EmotionCategory::Surprise => "surprise",
            EmotionCategory::Love => "love",
            EmotionCategory::Neutral => "neutral",
        }
    }
}

impl fmt::Display for EmotionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionCategory {
    type Err = EmotionError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        EmotionCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| EmotionError::config(format!("unknown emotion category `{s}`")))
    }
}

const JOY: &[&str] = &[
    "happy", "excited", "thrilled", "amazing", "wonderful", "fantastic", "love", "great", "awesome",
    "brilliant",
];
const SADNESS: &[&str] = &[
    "sad", "devastated", "heartbroken", "depressed", "lonely", "hurt", "cry", "miss", "grief",
    "sorrow",
];
const ANGER: &[&str] = &[
    "angry", "furious", "mad", "livid", "hate", "annoying", "irritated", "outrageous", "frustrated",
    "rage",
];
const FEAR: &[&str] = &[
    "scared", "afraid", "terrified", "anxious", "worried", "nervous", "panic", "frightening",
    "alarming", "disturbing",
];
const SURPRISE: &[&str] = &[
    "shocked", "surprised", "amazed", "stunned", "unbelievable", "incredible", "wow", "astonishing",
    "remarkable",
];
const LOVE: &[&str] = &[
    "love", "adore", "cherish", "devoted", "treasure", "precious", "soulmate", "passionate", "worship",
];
const NEUTRAL: &[&str] = &[
    "okay", "fine", "normal", "alright", "average", "ordinary", "typical", "standard", "moderate",
];

const INTENSIFIERS: &[&str] = &[
    "very", "really", "extremely", "incredibly", "absolutely", "totally", "completely", "utterly",
];
const NEGATIONS: &[&str] =
    &["not", "no", "never", "nothing", "nowhere", "nobody", "none", "cannot"];

/// Keyword table indexed by `EmotionCategory::index`.
const BUILTIN_KEYWORDS: [&[&str]; EmotionCategory::COUNT] =
    [JOY, SADNESS, ANGER, FEAR, SURPRISE, LOVE, NEUTRAL];

static BUILTIN: Lazy<Lexicon> = Lazy::new(|| {
    Lexicon::new(
        BUILTIN_KEYWORDS.map(owned_words),
        owned_words(INTENSIFIERS),
        owned_words(NEGATIONS),
    )
    .expect("built-in lexicon satisfies its invariants")
});

fn owned_words(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Immutable category → keyword sets, plus intensifier and negation words.
#[derive(Clone, Debug, PartialEq)]
pub struct Lexicon {
    keywords: [Vec<String>; EmotionCategory::COUNT],
    intensifiers: Vec<String>,
    negations: Vec<String>,
}

/// On-disk JSON shape of a lexicon.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LexiconFile {
    pub categories: BTreeMap<EmotionCategory, Vec<String>>,
    #[serde(default)]
    pub intensifiers: Vec<String>,
    #[serde(default)]
    pub negations: Vec<String>,
}

impl Lexicon {
    /// Validates and normalizes the tables. Every category needs at least one
    /// keyword and no entry may be blank.
    pub fn new(
        keywords: [Vec<String>; EmotionCategory::COUNT],
        intensifiers: Vec<String>,
        negations: Vec<String>,
    ) -> Result<Self> {
        let mut normalized: [Vec<String>; EmotionCategory::COUNT] = Default::default();
        for (cat, words) in EmotionCategory::ALL.into_iter().zip(keywords) {
            let set = normalize_set(cat.as_str(), words, preprocess)?;
            if set.is_empty() {
                return Err(EmotionError::config(format!(
                    "category `{cat}` has an empty keyword set"
                )));
            }
            normalized[cat.index()] = set;
        }
        Ok(Self {
            keywords: normalized,
            intensifiers: normalize_set("intensifiers", intensifiers, fold)?,
            negations: normalize_set("negations", negations, fold)?,
        })
    }

    /// Shared built-in table.
    pub fn builtin() -> &'static Lexicon {
        &BUILTIN
    }

    pub fn from_file(mut file: LexiconFile) -> Result<Self> {
        let mut keywords: [Vec<String>; EmotionCategory::COUNT] = Default::default();
        for cat in EmotionCategory::ALL {
            keywords[cat.index()] = file
                .categories
                .remove(&cat)
                .ok_or_else(|| EmotionError::config(format!("category `{cat}` is missing")))?;
        }
        Self::new(keywords, file.intensifiers, file.negations)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: LexiconFile = serde_json::from_str(json)
            .map_err(|e| EmotionError::config(format!("malformed lexicon JSON: {e}")))?;
        Self::from_file(file)
    }

    /// Reads a JSON lexicon from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            EmotionError::config(format!("cannot read lexicon {}: {e}", path.display()))
        })?;
        let lexicon = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            keywords = lexicon.all_keywords().count(),
            intensifiers = lexicon.intensifiers.len(),
            "loaded lexicon"
        );
        Ok(lexicon)
    }

    pub fn to_file(&self) -> LexiconFile {
        LexiconFile {
            categories: EmotionCategory::ALL
                .into_iter()
                .map(|c| (c, self.keywords(c).to_vec()))
                .collect(),
            intensifiers: self.intensifiers.clone(),
            negations: self.negations.clone(),
        }
    }

    pub fn keywords(&self, category: EmotionCategory) -> &[String] {
        &self.keywords[category.index()]
    }

    pub fn intensifiers(&self) -> &[String] {
        &self.intensifiers
    }

    pub fn negations(&self) -> &[String] {
        &self.negations
    }

    /// Keywords of every category, in category order (may repeat across categories).
    pub fn all_keywords(&self) -> impl Iterator<Item = &str> + '_ {
        self.keywords.iter().flatten().map(String::as_str)
    }
}

fn fold(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Normalize and dedup; blank entries would match any text so they are rejected.
/// Category keywords go through the text preprocessor, since scoring matches
/// them against preprocessed text.
fn normalize_set(
    label: &str,
    words: Vec<String>,
    normalize: fn(&str) -> String,
) -> Result<Vec<String>> {
    let mut set = BTreeSet::new();
    for w in words {
        let w = normalize(&w);
        if w.is_empty() {
            return Err(EmotionError::config(format!("`{label}` contains a blank entry")));
        }
        set.insert(w);
    }
    Ok(set.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_every_category() {
        let lex = Lexicon::builtin();
        for cat in EmotionCategory::ALL {
            assert!(!lex.keywords(cat).is_empty(), "{cat} is empty");
        }
        assert!(lex.intensifiers().contains(&"very".to_string()));
        assert!(lex.keywords(EmotionCategory::Fear).contains(&"terrified".to_string()));
    }

    #[test]
    fn category_order_and_names() {
        assert_eq!(EmotionCategory::ALL[0], EmotionCategory::Joy);
        assert_eq!(EmotionCategory::ALL[6], EmotionCategory::Neutral);
        for (i, cat) in EmotionCategory::ALL.into_iter().enumerate() {
            assert_eq!(cat.index(), i);
            assert_eq!(cat.as_str().parse::<EmotionCategory>().unwrap(), cat);
        }
        assert!("disgust".parse::<EmotionCategory>().is_err());
        assert_eq!(serde_json::to_string(&EmotionCategory::Surprise).unwrap(), "\"surprise\"");
    }

    #[test]
    fn empty_category_is_rejected() {
        let mut keywords: [Vec<String>; EmotionCategory::COUNT] = Default::default();
        for cat in EmotionCategory::ALL {
            keywords[cat.index()] = vec!["x".into()];
        }
        keywords[EmotionCategory::Love.index()].clear();
        let err = Lexicon::new(keywords, vec![], vec![]).unwrap_err();
        assert!(matches!(err, EmotionError::Configuration(ref m) if m.contains("love")));
    }

    #[test]
    fn blank_keyword_is_rejected() {
        let keywords: [Vec<String>; EmotionCategory::COUNT] =
            std::array::from_fn(|_| vec!["ok".to_string(), "  ".to_string()]);
        assert!(Lexicon::new(keywords, vec![], vec![]).is_err());
    }

    #[test]
    fn keywords_are_normalized() {
        let keywords: [Vec<String>; EmotionCategory::COUNT] =
            std::array::from_fn(|_| vec![" Happy ".to_string(), "happy".to_string()]);
        let lex = Lexicon::new(keywords, vec!["VERY".into()], vec![]).unwrap();
        assert_eq!(lex.keywords(EmotionCategory::Joy), &["happy".to_string()]);
        assert_eq!(lex.intensifiers(), &["very".to_string()]);
    }

    #[test]
    fn phrase_keywords_match_preprocessed_text() {
        let mut keywords: [Vec<String>; EmotionCategory::COUNT] =
            std::array::from_fn(|_| vec!["x".to_string()]);
        keywords[EmotionCategory::Anger.index()] = vec!["Can't  STAND".into()];
        keywords[EmotionCategory::Fear.index()] = vec!["worried \t sick!!".into()];
        let lex = Lexicon::new(keywords, vec![], vec![]).unwrap();
        assert_eq!(lex.keywords(EmotionCategory::Anger), &["cannot stand".to_string()]);
        assert_eq!(lex.keywords(EmotionCategory::Fear), &["worried sick!".to_string()]);
    }

    #[test]
    fn json_round_trip_through_file_shape() {
        let json = serde_json::to_string(&Lexicon::builtin().to_file()).unwrap();
        let lex = Lexicon::from_json_str(&json).unwrap();
        assert_eq!(&lex, Lexicon::builtin());
    }

    #[test]
    fn json_missing_category_fails() {
        let json = r#"{ "categories": { "joy": ["happy"] }, "intensifiers": ["very"] }"#;
        let err = Lexicon::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("sadness"));
    }

    #[test]
    fn json_unknown_category_fails() {
        let json = r#"{ "categories": { "disgust": ["gross"] } }"#;
        assert!(matches!(
            Lexicon::from_json_str(json),
            Err(EmotionError::Configuration(_))
        ));
    }

    #[test]
    fn load_reads_file_and_reports_missing_path() {
        let path = std::env::temp_dir().join(format!("feelback-lexicon-{}.json", std::process::id()));
        std::fs::write(&path, serde_json::to_string(&Lexicon::builtin().to_file()).unwrap()).unwrap();
        let lex = Lexicon::load(&path).unwrap();
        assert_eq!(&lex, Lexicon::builtin());
        std::fs::remove_file(&path).ok();

        assert!(Lexicon::load(path.with_extension("missing")).is_err());
    }
}
