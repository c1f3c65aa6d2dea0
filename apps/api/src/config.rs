use anyhow::{Context, Result};

/// Application configuration loaded from environment variables once at startup.
/// Passed explicitly into the components that need it; no global state.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    /// Allowed CORS origins for browser clients. Empty means permissive
    /// (local development).
    pub allowed_origins: Vec<String>,
    /// Word cap applied to extracted text before embedding.
    pub max_text_words: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            allowed_origins: parse_origins(
                &std::env::var("API_ALLOWED_ORIGINS").unwrap_or_default(),
            ),
            max_text_words: std::env::var("MAX_TEXT_WORDS")
                .unwrap_or_else(|_| "300".to_string())
                .parse::<usize>()
                .context("MAX_TEXT_WORDS must be a positive integer")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Splits a comma-separated origin list, dropping empty entries.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_splits_and_trims() {
        let origins = parse_origins("https://a.example.com, https://b.example.com");
        assert_eq!(
            origins,
            vec!["https://a.example.com", "https://b.example.com"]
        );
    }

    #[test]
    fn test_parse_origins_empty_string_yields_no_origins() {
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_parse_origins_drops_empty_entries() {
        let origins = parse_origins("https://a.example.com,,");
        assert_eq!(origins, vec!["https://a.example.com"]);
    }
}
