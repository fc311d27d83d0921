//! Startup configuration, read from the process environment (optionally
//! seeded from a local `.env` file by the CLI before this runs).

use std::env;
use std::fmt;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingApiKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingApiKey => write!(
                f,
                "GEMINI_API_KEY environment variable not set\n\n\
                 Please set your Gemini API key:\n\
                 export GEMINI_API_KEY=\"your-api-key-here\"\n\n\
                 Or add it to a .env file in the current directory:\n\
                 GEMINI_API_KEY=your-api-key-here\n\n\
                 Optionally, you can also set a custom base URL:\n\
                 export GEMINI_BASE_URL=\"{DEFAULT_BASE_URL}\""
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
        let api_key = lookup("GEMINI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let base_url = lookup("GEMINI_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Config { api_key, base_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_is_an_error_naming_the_variable() {
        let err = Config::from_lookup(|_| None).expect_err("config should fail without a key");
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn blank_api_key_is_treated_as_missing() {
        let result = Config::from_lookup(|key| match key {
            "GEMINI_API_KEY" => Some("   ".to_string()),
            _ => None,
        });
        assert!(result.is_err());
    }

    #[test]
    fn base_url_defaults_when_unset() {
        let config = Config::from_lookup(|key| match key {
            "GEMINI_API_KEY" => Some("k".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn base_url_override_is_respected() {
        let config = Config::from_lookup(|key| match key {
            "GEMINI_API_KEY" => Some("k".to_string()),
            "GEMINI_BASE_URL" => Some("http://localhost:9999/v1beta".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:9999/v1beta");
    }
}
