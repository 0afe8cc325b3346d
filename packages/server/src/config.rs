use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Default chat model when `LLM_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub model: String,
    /// Key material for the secret codec. May be a URL-safe base64 key or a
    /// passphrase; absent means an ephemeral key is generated per process.
    pub encryption_key: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            model: env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            encryption_key: env::var("ENCRYPTION_KEY").ok(),
            max_tokens: env::var("LLM_MAX_TOKENS")
                .unwrap_or_else(|_| "500".to_string())
                .parse()
                .context("LLM_MAX_TOKENS must be a valid number")?,
            temperature: env::var("LLM_TEMPERATURE")
                .unwrap_or_else(|_| "0.7".to_string())
                .parse()
                .context("LLM_TEMPERATURE must be a valid number")?,
        })
    }
}
