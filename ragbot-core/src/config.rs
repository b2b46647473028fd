//! Environment-sourced configuration
//!
//! All secrets come from the process environment. Startup fails fast when a
//! required value is missing or empty.

use crate::error::{Error, Result};

/// Name of the vector index holding document records
pub const INDEX_NAME: &str = "ragbot-docs";

/// Model used for answer generation
pub const COMPLETION_MODEL: &str = "gpt-4o-mini";

/// Runtime configuration for the bot
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot token
    pub telegram_token: String,
    /// OpenAI API key (embeddings + completions)
    pub openai_api_key: String,
    /// Pinecone API key
    pub pinecone_api_key: String,
    /// Pinecone environment (region) hosting the index
    pub pinecone_environment: String,
    /// Directory for rotated log files
    pub log_dir: String,
    /// Default log level when RUST_LOG is unset
    pub log_level: String,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            telegram_token: required("TELEGRAM_BOT_TOKEN")?,
            openai_api_key: required("OPENAI_API_KEY")?,
            pinecone_api_key: required("PINECONE_API_KEY")?,
            pinecone_environment: required("PINECONE_ENVIRONMENT")?,
            log_dir: optional("RAGBOT_LOG_DIR", "logs"),
            log_level: optional("RAGBOT_LOG_LEVEL", "info"),
        })
    }
}

fn required(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::config(format!("{} must be set", name))),
    }
}

fn optional(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_missing() {
        std::env::remove_var("RAGBOT_TEST_MISSING");
        assert!(required("RAGBOT_TEST_MISSING").is_err());
    }

    #[test]
    fn test_required_rejects_empty() {
        std::env::set_var("RAGBOT_TEST_EMPTY", "   ");
        assert!(required("RAGBOT_TEST_EMPTY").is_err());
        std::env::remove_var("RAGBOT_TEST_EMPTY");
    }

    #[test]
    fn test_optional_default() {
        std::env::remove_var("RAGBOT_TEST_OPT");
        assert_eq!(optional("RAGBOT_TEST_OPT", "info"), "info");
    }
}
