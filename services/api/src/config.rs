use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Service settings, read once from the environment at start.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub addr: SocketAddr,
    pub lexicon: Option<PathBuf>,
    pub strip_web: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let addr = get("FEELBACK_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr
            .parse()
            .with_context(|| format!("FEELBACK_ADDR is not a socket address: {addr}"))?;
        let lexicon = get("FEELBACK_LEXICON").filter(|p| !p.trim().is_empty()).map(PathBuf::from);
        let strip_web = match get("FEELBACK_STRIP_WEB").as_deref().map(str::trim) {
            None | Some("") | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => bail!("FEELBACK_STRIP_WEB must be true or false, got `{other}`"),
        };
        Ok(Self { addr, lexicon, strip_web })
    }
}
