// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{ChatbotError, Result};
use crate::matching::ACCEPTANCE_THRESHOLD;
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub knowledge_base: KnowledgeBaseConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    pub fallback: FallbackConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KnowledgeBaseConfig {
    pub path: PathBuf,
    /// Sections to load, in this order. Empty loads every section in file order.
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchingConfig {
    #[serde(default = "default_threshold")]
    pub threshold: u8,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: ACCEPTANCE_THRESHOLD,
        }
    }
}

fn default_threshold() -> u8 {
    ACCEPTANCE_THRESHOLD
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FallbackConfig {
    pub enabled: bool,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl FallbackConfig {
    /// True when the generator can actually be constructed.
    pub fn is_configured(&self) -> bool {
        self.enabled
            && self
                .api_key
                .as_deref()
                .is_some_and(|key| !key.trim().is_empty())
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("KEPLER_CHATBOT")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| ChatbotError::Config(e.to_string()))?;

        let mut config: Config = settings
            .try_deserialize()
            .map_err(|e| ChatbotError::Config(e.to_string()))?;

        config.apply_env_api_key();
        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        let mut config = Self {
            knowledge_base: KnowledgeBaseConfig {
                path: PathBuf::from("data/kepler_data.json"),
                categories: vec![
                    "Admissions".to_string(),
                    "Orientation".to_string(),
                    "Programs".to_string(),
                ],
            },
            matching: MatchingConfig::default(),
            fallback: FallbackConfig {
                enabled: true,
                api_key: None,
                model: "llama-3.1-8b-instant".to_string(),
                endpoint: "https://api.groq.com/openai/v1/chat/completions".to_string(),
                timeout_secs: 30,
            },
        };
        config.apply_env_api_key();
        config
    }

    /// The conventional `GROQ_API_KEY` variable fills in a missing key.
    fn apply_env_api_key(&mut self) {
        if self.fallback.api_key.is_none() {
            self.fallback.api_key = std::env::var("GROQ_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty());
        }
    }

    fn validate(&self) -> Result<()> {
        Validator::validate_threshold(self.matching.threshold)
            .map_err(|e| ChatbotError::Config(e.to_string()))?;

        if self.fallback.timeout_secs == 0 {
            return Err(ChatbotError::Config(
                "fallback.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.fallback.model.trim().is_empty() {
            return Err(ChatbotError::Config(
                "fallback.model must not be empty".to_string(),
            ));
        }

        Validator::validate_url(&self.fallback.endpoint)
            .map_err(|e| ChatbotError::Config(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.matching.threshold, ACCEPTANCE_THRESHOLD);
    }

    #[test]
    fn test_load_from_toml() {
        let file = write_config(
            r#"
[knowledge_base]
path = "data/faq.json"
categories = ["Programs"]

[fallback]
enabled = true
api_key = "test-key"
model = "llama-3.1-8b-instant"
endpoint = "https://api.groq.com/openai/v1/chat/completions"
timeout_secs = 10
"#,
        );

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.knowledge_base.path, PathBuf::from("data/faq.json"));
        assert_eq!(config.knowledge_base.categories, vec!["Programs"]);
        assert_eq!(config.matching.threshold, ACCEPTANCE_THRESHOLD);
        assert_eq!(config.fallback.timeout_secs, 10);
        assert!(config.fallback.is_configured());
    }

    #[test]
    fn test_rejects_threshold_above_100() {
        let file = write_config(
            r#"
[knowledge_base]
path = "data/faq.json"

[matching]
threshold = 120

[fallback]
enabled = false
model = "m"
endpoint = "https://example.com/v1/chat/completions"
timeout_secs = 10
"#,
        );

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ChatbotError::Config(_)));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = Config::default_config();
        config.fallback.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fallback_not_configured_without_key_or_when_disabled() {
        let mut fallback = Config::default_config().fallback;
        fallback.api_key = None;
        assert!(!fallback.is_configured());

        fallback.api_key = Some("   ".to_string());
        assert!(!fallback.is_configured());

        fallback.api_key = Some("key".to_string());
        fallback.enabled = false;
        assert!(!fallback.is_configured());
    }
}
