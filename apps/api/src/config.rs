use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails with context if a required variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Number of panel questions generated per session.
    pub question_count: usize,
    /// Overall interview duration budget, in minutes.
    pub interview_minutes: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            question_count: std::env::var("INTERVIEW_QUESTIONS")
                .unwrap_or_else(|_| "8".to_string())
                .parse::<usize>()
                .context("INTERVIEW_QUESTIONS must be a non-negative integer")?,
            interview_minutes: std::env::var("INTERVIEW_MINUTES")
                .unwrap_or_else(|_| "45".to_string())
                .parse::<u64>()
                .context("INTERVIEW_MINUTES must be a positive integer")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
