use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use emotion_core::{AnalysisResult, EmotionAnalyzer, TextFeatures};
use serde::Deserialize;

/// Upper bound on accepted text, in Unicode scalar values (not UTF-16 units,
/// so an emoji counts once).
pub const MAX_TEXT_CHARS: usize = 5000;

#[derive(Clone, Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug)]
pub enum ApiError {
    InvalidInput(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidInput(msg) => {
                tracing::debug!(%msg, "rejected request");
                (StatusCode::BAD_REQUEST, Json(serde_json::json!({ "error": msg }))).into_response()
            }
        }
    }
}

fn validate(text: &str) -> Result<(), ApiError> {
    let n = text.chars().count();
    if n == 0 {
        return Err(ApiError::InvalidInput("text must not be empty".into()));
    }
    if n > MAX_TEXT_CHARS {
        return Err(ApiError::InvalidInput(format!(
            "text is {n} characters, limit is {MAX_TEXT_CHARS}"
        )));
    }
    Ok(())
}

pub fn router(analyzer: EmotionAnalyzer) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/emotions/analyze", post(analyze))
        .route("/emotions/features", post(features))
        .with_state(analyzer)
}

async fn analyze(
    State(analyzer): State<EmotionAnalyzer>,
    Json(req): Json<TextRequest>,
) -> Result<Json<AnalysisResult>, ApiError> {
    validate(&req.text)?;
    let result = analyzer.analyze(&req.text);
    tracing::info!(emotion = %result.emotion, confidence = result.confidence, "analyzed");
    Ok(Json(result))
}

async fn features(
    State(analyzer): State<EmotionAnalyzer>,
    Json(req): Json<TextRequest>,
) -> Result<Json<TextFeatures>, ApiError> {
    validate(&req.text)?;
    Ok(Json(analyzer.features(&req.text)))
}
