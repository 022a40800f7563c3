use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::features::TextFeatures;
use crate::intensity::Intensity;
use crate::lexicon::{EmotionCategory, Lexicon};
use crate::preprocess::Preprocessor;
use crate::scoring::{score, EmotionScores};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerOptions {
    /// Drop URLs, e-mails and mentions, unwrap hashtags before scoring.
    pub strip_web_artifacts: bool,
}

/// Output of one `analyze` call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub emotion: EmotionCategory,
    /// Score of `emotion`, two decimals.
    pub confidence: f64,
    pub intensity: Intensity,
    pub all_emotions: EmotionScores,
    pub processed_text: String,
    pub features: TextFeatures,
    pub timestamp: DateTime<Utc>,
}

/// Stateless classifier over a shared, immutable lexicon. Cheap to clone.
#[derive(Clone, Debug)]
pub struct EmotionAnalyzer {
    lexicon: Arc<Lexicon>,
    preprocessor: Preprocessor,
}

impl Default for EmotionAnalyzer {
    fn default() -> Self {
        Self::new(Lexicon::builtin().clone(), AnalyzerOptions::default())
    }
}

impl EmotionAnalyzer {
    pub fn new(lexicon: Lexicon, options: AnalyzerOptions) -> Self {
        Self {
            lexicon: Arc::new(lexicon),
            preprocessor: Preprocessor::new(options.strip_web_artifacts),
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn options(&self) -> AnalyzerOptions {
        AnalyzerOptions { strip_web_artifacts: self.preprocessor.strip_web_artifacts }
    }

    pub fn preprocess(&self, text: &str) -> String {
        self.preprocessor.process(text)
    }

    pub fn features(&self, text: &str) -> TextFeatures {
        TextFeatures::extract(text, &self.lexicon)
    }

    pub fn analyze(&self, text: &str) -> AnalysisResult {
        self.analyze_at(text, Utc::now())
    }

    /// Like `analyze`, with a caller-supplied timestamp.
    pub fn analyze_at(&self, text: &str, timestamp: DateTime<Utc>) -> AnalysisResult {
        let processed_text = self.preprocessor.process(text);
        let features = TextFeatures::extract(text, &self.lexicon);
        let all_emotions = score(&processed_text, &features, &self.lexicon).rounded();
        let (emotion, confidence) = all_emotions.primary();
        // band the rounded value so confidence and intensity always agree
        let intensity = Intensity::from_confidence(confidence);
        debug!(%emotion, confidence, %intensity, words = features.word_count, "analyzed text");

        AnalysisResult {
            emotion,
            confidence,
            intensity,
            all_emotions,
            processed_text,
            features,
            timestamp,
        }
    }

    /// Decodes UTF-8 first; malformed input is `InvalidInput`.
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<AnalysisResult> {
        let text = std::str::from_utf8(bytes)?;
        Ok(self.analyze(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EmotionError;

    #[test]
    fn analyzer_is_send_sync_clone() {
        fn assert_bounds<T: Send + Sync + Clone + 'static>() {}
        assert_bounds::<EmotionAnalyzer>();
    }

    #[test]
    fn confidence_matches_primary_entry() {
        let a = EmotionAnalyzer::default();
        let r = a.analyze("I am furious and livid, this is outrageous");
        assert_eq!(r.emotion, EmotionCategory::Anger);
        assert_eq!(r.confidence, r.all_emotions.get(EmotionCategory::Anger));
        assert_eq!(r.confidence, 1.0);
        assert_eq!(r.intensity, Intensity::High);
    }

    #[test]
    fn fixed_timestamp_is_kept() {
        let ts: DateTime<Utc> = "2025-06-15T10:30:00Z".parse().unwrap();
        let r = EmotionAnalyzer::default().analyze_at("so sad", ts);
        assert_eq!(r.timestamp, ts);
        assert_eq!(r.emotion, EmotionCategory::Sadness);
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let err = EmotionAnalyzer::default().analyze_bytes(&[0x66, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, EmotionError::InvalidInput(_)));
        assert!(EmotionAnalyzer::default().analyze_bytes("ok".as_bytes()).is_ok());
    }

    #[test]
    fn options_reach_the_preprocessor() {
        let a = EmotionAnalyzer::new(
            Lexicon::builtin().clone(),
            AnalyzerOptions { strip_web_artifacts: true },
        );
        assert!(a.options().strip_web_artifacts);
        let r = a.analyze("look https://sad.example.com");
        assert_eq!(r.processed_text, "look");
        // features still see the raw text
        assert!(r.features.has_emotional_words);
        assert_eq!(r.all_emotions.get(EmotionCategory::Sadness), 0.1);
    }

    #[test]
    fn result_serializes_with_iso_timestamp() {
        let ts: DateTime<Utc> = "2025-06-15T10:30:00Z".parse().unwrap();
        let r = EmotionAnalyzer::default().analyze_at("wow!", ts);
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["emotion"], "surprise");
        assert_eq!(v["intensity"], "low");
        assert_eq!(v["timestamp"], "2025-06-15T10:30:00Z");
        assert_eq!(v["features"]["has_exclamation"], true);
        assert_eq!(v["all_emotions"].as_object().unwrap().len(), EmotionCategory::COUNT);

        let back: AnalysisResult = serde_json::from_value(v).unwrap();
        assert_eq!(back, r);
    }
}
