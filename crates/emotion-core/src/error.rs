use thiserror::Error;

/// Failures the analysis core can report.
#[derive(Debug, Error)]
pub enum EmotionError {
    /// Input bytes did not decode as UTF-8.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] std::str::Utf8Error),

    /// The lexicon broke a load-time invariant; the analyzer must not start.
    #[error("lexicon configuration error: {0}")]
    Configuration(String),
}

impl EmotionError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        EmotionError::Configuration(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, EmotionError>;
