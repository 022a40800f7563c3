use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use emotion_core::{AnalyzerOptions, EmotionAnalyzer, Lexicon};
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// feelback – rule-based emotion analysis of short texts.
/// Commands:
///   - analyze --text "..."      (or text on STDIN)
///   - features / preprocess     (debug views of the pipeline)
///   - lexicon                   (dump the active keyword table)
#[derive(Parser, Debug)]
#[command(name = "feelback", version, about = "Lexical emotion classifier")]
struct Cli {
    /// JSON lexicon to use instead of the built-in one
    #[arg(long, global = true)]
    lexicon: Option<PathBuf>,

    /// Remove URLs, e-mails and @mentions and unwrap #hashtags before scoring
    #[arg(long, global = true)]
    strip_web: bool,

    /// Pretty-print JSON
    #[arg(long, global = true)]
    pretty: bool,

    /// Write the output to this file instead of STDOUT
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify text into an emotion with confidence and intensity
    Analyze {
        /// The text; read from STDIN when missing
        #[arg(long)]
        text: Option<String>,
    },

    /// (Debug) Surface features of the raw text
    Features {
        #[arg(long)]
        text: Option<String>,
    },

    /// (Debug) Normalized text as the scorer sees it
    Preprocess {
        #[arg(long)]
        text: Option<String>,
    },

    /// Print the active lexicon in its file format
    Lexicon,
}

fn read_stdin_bytes() -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    io::stdin().read_to_end(&mut buf).context("failed reading STDIN")?;
    Ok(buf)
}

/// `--text` if given, otherwise STDIN, which must be valid UTF-8.
fn input_text(text: Option<String>) -> Result<String> {
    match text {
        Some(t) => Ok(t),
        None => {
            let bytes = read_stdin_bytes()?;
            let text = std::str::from_utf8(&bytes).map_err(emotion_core::EmotionError::from)?;
            Ok(text.to_string())
        }
    }
}

fn emit(out: Option<&Path>, body: &str) -> Result<()> {
    match out {
        Some(p) => {
            if let Some(dir) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)
                    .with_context(|| format!("failed creating {}", dir.display()))?;
            }
            fs::write(p, body).with_context(|| format!("failed writing {}", p.display()))?;
            eprintln!("✓ wrote {}", p.display());
        }
        None => println!("{body}"),
    }
    Ok(())
}

fn render(value: &Value, pretty: bool) -> Result<String> {
    Ok(if pretty { serde_json::to_string_pretty(value)? } else { serde_json::to_string(value)? })
}

fn build_analyzer(cli: &Cli) -> Result<EmotionAnalyzer> {
    let lexicon = match &cli.lexicon {
        Some(p) => Lexicon::load(p)?,
        None => Lexicon::builtin().clone(),
    };
    let options = AnalyzerOptions { strip_web_artifacts: cli.strip_web };
    Ok(EmotionAnalyzer::new(lexicon, options))
}

fn main() -> Result<()> {
    // logs go to stderr so STDOUT stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let analyzer = build_analyzer(&cli)?;

    let body = match cli.cmd {
        Commands::Analyze { ref text } => {
            let txt = input_text(text.clone())?;
            let result = analyzer.analyze(&txt);
            tracing::info!(emotion = %result.emotion, confidence = result.confidence, "analysis done");
            render(&serde_json::to_value(&result)?, cli.pretty)?
        }
        Commands::Features { ref text } => {
            let txt = input_text(text.clone())?;
            render(&serde_json::to_value(analyzer.features(&txt))?, cli.pretty)?
        }
        Commands::Preprocess { ref text } => {
            let txt = input_text(text.clone())?;
            analyzer.preprocess(&txt)
        }
        Commands::Lexicon => {
            render(&serde_json::to_value(analyzer.lexicon().to_file())?, cli.pretty)?
        }
    };

    emit(cli.out.as_deref(), &body)
}
