use anyhow::{bail, Context, Result};

use crate::generation_client::DEFAULT_SERVICE_URL;

/// What happens to the result slot once the résumé view has rendered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultRetention {
    /// Keep it; reloading or printing the view shows the same résumé until
    /// the next successful submission overwrites it.
    Persist,
    /// Delete it after the first render.
    ConsumeOnce,
}

impl ResultRetention {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "persist" => Ok(ResultRetention::Persist),
            "consume-once" | "consume_once" => Ok(ResultRetention::ConsumeOnce),
            other => bail!("RESULT_RETENTION must be 'persist' or 'consume-once', got '{other}'"),
        }
    }
}

/// Builder configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub generation_service_url: String,
    /// Slots go to Redis when set, otherwise they stay in process memory.
    pub redis_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub result_retention: ResultRetention,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            generation_service_url: std::env::var("GENERATION_SERVICE_URL")
                .unwrap_or_else(|_| DEFAULT_SERVICE_URL.to_string()),
            redis_url: std::env::var("REDIS_URL").ok().filter(|v| !v.trim().is_empty()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            result_retention: match std::env::var("RESULT_RETENTION") {
                Ok(v) => ResultRetention::parse(&v)?,
                Err(_) => ResultRetention::Persist,
            },
        })
    }
}
