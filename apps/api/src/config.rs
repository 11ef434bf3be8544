use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// The AI and renderer credentials are optional on purpose: their absence is
/// detected up front and the affected features degrade to local fallbacks
/// (or a clear error, for export) instead of failing mid-call.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub anthropic_api_key: Option<String>,
    pub pdf_renderer_url: Option<String>,
    /// Directory the single-key JSON storage lives in.
    pub data_dir: PathBuf,
    pub autosave_debounce_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            pdf_renderer_url: optional_env("PDF_RENDERER_URL"),
            data_dir: optional_env("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            autosave_debounce_ms: std::env::var("AUTOSAVE_DEBOUNCE_MS")
                .unwrap_or_else(|_| "300".to_string())
                .parse::<u64>()
                .context("AUTOSAVE_DEBOUNCE_MS must be a duration in milliseconds")?,
        })
    }
}

/// Reads an optional variable, treating empty values as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
