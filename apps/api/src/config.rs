use anyhow::{Context, Result};

use crate::llm_client::OPENROUTER_API_URL;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Optional at startup; AI endpoints refuse to run without it.
    pub openrouter_api_key: Option<String>,
    pub openrouter_api_url: String,
    /// Sent upstream as the `HTTP-Referer` tag.
    pub site_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openrouter_api_key: optional_env("OPENROUTER_API_KEY"),
            openrouter_api_url: optional_env("OPENROUTER_API_URL")
                .unwrap_or_else(|| OPENROUTER_API_URL.to_string()),
            site_url: optional_env("SITE_URL")
                .unwrap_or_else(|| "http://localhost:8000".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads a variable, treating unset and blank the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
