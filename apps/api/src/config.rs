use anyhow::{Context, Result};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Application configuration loaded from environment variables.
/// Everything except the port and log level is optional: without `DATABASE_URL`
/// assessments are kept in memory, without `REDIS_URL` enrichment is not cached,
/// and without `GEMINI_API_KEY` enrichment falls back to static catalog data.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub redis_url: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub catalog_path: Option<String>,
    pub top_matches: usize,
    pub enrichment_cache_ttl_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            redis_url: optional_env("REDIS_URL"),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_model: optional_env("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            catalog_path: optional_env("CATALOG_PATH"),
            top_matches: parse_env("TOP_MATCHES", 5)?,
            enrichment_cache_ttl_secs: parse_env("ENRICHMENT_CACHE_TTL_SECS", 3600)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            redis_url: None,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            catalog_path: None,
            top_matches: 5,
            enrichment_cache_ttl_secs: 3600,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

/// Unset and blank values are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
