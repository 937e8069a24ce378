use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::llm_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub gemini_timeout: Duration,
    /// When set, prompts are read from this directory instead of the bundled copies.
    pub prompt_dir: Option<PathBuf>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            gemini_timeout: parse_timeout(
                &std::env::var("GEMINI_TIMEOUT_SECS").unwrap_or_else(|_| "60".to_string()),
            )?,
            prompt_dir: std::env::var("PROMPT_DIR").ok().map(PathBuf::from),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs = raw
        .parse::<u64>()
        .context("GEMINI_TIMEOUT_SECS must be a whole number of seconds")?;
    if secs == 0 {
        bail!("GEMINI_TIMEOUT_SECS must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timeout_accepts_positive_seconds() {
        assert_eq!(parse_timeout("60").unwrap(), Duration::from_secs(60));
    }

    #[test]
    fn test_parse_timeout_rejects_zero() {
        let err = parse_timeout("0").unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_parse_timeout_rejects_non_numeric() {
        let err = parse_timeout("soon").unwrap_err();
        assert!(err.to_string().contains("whole number of seconds"));
    }
}
