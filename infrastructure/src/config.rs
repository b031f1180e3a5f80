use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct Config {
    /// Left unset until the first LLM call needs it.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub db_path: PathBuf,
    pub model_dir: PathBuf,
    pub max_tokens: usize,
    pub top_k: usize,
    pub http_timeout: Duration,
    pub http_max_retries: u32,
}

impl Config {
    pub fn load() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unparseable numbers fall
    /// back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed = |key: &str, default| parse_or(lookup(key), default);
        Self {
            gemini_api_key: lookup("GEMINI_KEY").filter(|k| !k.trim().is_empty()),
            gemini_model: lookup("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: lookup("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            db_path: lookup("VECTOR_DB_PATH")
                .unwrap_or_else(|| "data/paragraphs.db".to_string())
                .into(),
            model_dir: lookup("EMBED_MODEL_DIR")
                .unwrap_or_else(|| "models/multilingual-e5-base".to_string())
                .into(),
            max_tokens: parsed("EMBED_MAX_TOKENS", 512),
            top_k: parsed("RAG_TOP_K", DEFAULT_TOP_K),
            http_timeout: Duration::from_secs(parse_or(lookup("HTTP_TIMEOUT_SECS"), 60)),
            http_max_retries: parse_or(lookup("HTTP_MAX_RETRIES"), 3),
        }
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
