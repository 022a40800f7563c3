//! Rule-based lexical emotion classifier.
//!
//! Raw text is normalized, surface features are taken from the raw text, and
//! every category is scored from keyword hits plus uniform feature bonuses.
//! The same input and lexicon always produce the same scores.

pub mod analyzer;
pub mod error;
pub mod features;
pub mod intensity;
pub mod lexicon;
pub mod preprocess;
pub mod scoring;

use once_cell::sync::Lazy;

pub use analyzer::{AnalysisResult, AnalyzerOptions, EmotionAnalyzer};
pub use error::{EmotionError, Result};
pub use features::TextFeatures;
pub use intensity::Intensity;
pub use lexicon::{EmotionCategory, Lexicon, LexiconFile};
pub use preprocess::{preprocess, Preprocessor};
pub use scoring::EmotionScores;

static DEFAULT_ANALYZER: Lazy<EmotionAnalyzer> = Lazy::new(EmotionAnalyzer::default);

/// Analyze with the built-in lexicon and default options.
pub fn analyze(text: &str) -> AnalysisResult {
    DEFAULT_ANALYZER.analyze(text)
}
