mod config;
mod routes;

use anyhow::{Context, Result};
use emotion_core::{AnalyzerOptions, EmotionAnalyzer, Lexicon};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

fn build_analyzer(cfg: &Config) -> Result<EmotionAnalyzer> {
    // a broken lexicon stops the service here, before any request is served
    let lexicon = match &cfg.lexicon {
        Some(p) => Lexicon::load(p)?,
        None => Lexicon::builtin().clone(),
    };
    Ok(EmotionAnalyzer::new(lexicon, AnalyzerOptions { strip_web_artifacts: cfg.strip_web }))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Config::from_env()?;
    let analyzer = build_analyzer(&cfg)?;
    let app = routes::router(analyzer);

    let listener = tokio::net::TcpListener::bind(cfg.addr)
        .await
        .with_context(|| format!("failed binding {}", cfg.addr))?;
    tracing::info!("listening on http://{}", cfg.addr);
    axum::serve(listener, app).await?;
    Ok(())
}
