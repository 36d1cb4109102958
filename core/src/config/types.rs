//! Configuration types for quill core
//!
//! Core only accepts fully resolved, validated configuration.
//! All discovery, loading, and merging happens in CLI layer.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported LLM protocols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    /// OpenAI-compatible chat completions API
    #[serde(rename = "openai")]
    OpenAICompat,
    /// Anthropic messages API
    #[serde(rename = "anthropic")]
    Anthropic,
}

impl Protocol {
    /// Get the protocol name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::OpenAICompat => "openai",
            Protocol::Anthropic => "anthropic",
        }
    }

    /// Get the default base URL for this protocol
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Protocol::OpenAICompat => "https://api.openai.com/v1",
            Protocol::Anthropic => "https://api.anthropic.com",
        }
    }

    /// Get the default model for this protocol
    pub fn default_model(&self) -> &'static str {
        match self {
            Protocol::OpenAICompat => "gpt-4o",
            Protocol::Anthropic => "claude-3-5-sonnet-20241022",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" | "openai_compat" => Ok(Protocol::OpenAICompat),
            "anthropic" | "claude" => Ok(Protocol::Anthropic),
            other => Err(ConfigError::UnsupportedProtocol {
                name: other.to_string(),
            }),
        }
    }
}

/// Model parameters for LLM requests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelParams {
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature for sampling (0.0 to 2.0)
    pub temperature: Option<f32>,
    /// Top-p sampling parameter
    pub top_p: Option<f32>,
}

/// A fully resolved LLM configuration ready for use by core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedLlmConfig {
    /// The protocol to use
    pub protocol: Protocol,
    /// Base URL for the API
    pub base_url: String,
    /// API key for authentication
    pub api_key: String,
    /// Model name/identifier
    pub model: String,
    /// Model parameters
    #[serde(default)]
    pub params: ModelParams,
}

impl ResolvedLlmConfig {
    /// Create a new resolved LLM config
    pub fn new(protocol: Protocol, base_url: String, api_key: String, model: String) -> Self {
        Self {
            protocol,
            base_url,
            api_key,
            model,
            params: ModelParams::default(),
        }
    }

    /// Set model parameters
    pub fn with_params(mut self, params: ModelParams) -> Self {
        self.params = params;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.is_empty() {
            return Err(ConfigError::MissingField {
                field: "api_key".to_string(),
            });
        }

        if self.model.is_empty() {
            return Err(ConfigError::MissingField {
                field: "model".to_string(),
            });
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "base_url".to_string(),
                value: self.base_url.clone(),
            });
        }

        if let Some(temp) = self.params.temperature {
            if !(0.0..=2.0).contains(&temp) {
                return Err(ConfigError::InvalidValue {
                    field: "temperature".to_string(),
                    value: temp.to_string(),
                });
            }
        }

        if let Some(top_p) = self.params.top_p {
            if !(0.0..=1.0).contains(&top_p) {
                return Err(ConfigError::InvalidValue {
                    field: "top_p".to_string(),
                    value: top_p.to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ResolvedLlmConfig {
        ResolvedLlmConfig::new(
            Protocol::Anthropic,
            Protocol::Anthropic.default_base_url().to_string(),
            "sk-test".to_string(),
            "claude-test".to_string(),
        )
    }

    #[test]
    fn test_protocol_from_str() {
        assert_eq!("openai".parse::<Protocol>().unwrap(), Protocol::OpenAICompat);
        assert_eq!("Anthropic".parse::<Protocol>().unwrap(), Protocol::Anthropic);
        assert!(matches!(
            "google_ai".parse::<Protocol>(),
            Err(ConfigError::UnsupportedProtocol { name }) if name == "google_ai"
        ));
    }

    #[test]
    fn test_protocol_serde_names() {
        let json = serde_json::to_string(&Protocol::OpenAICompat).unwrap();
        assert_eq!(json, "\"openai\"");
        let protocol: Protocol = serde_json::from_str("\"anthropic\"").unwrap();
        assert_eq!(protocol, Protocol::Anthropic);
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_key() {
        let mut config = config();
        config.api_key.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingField { field }) if field == "api_key"
        ));
    }

    #[test]
    fn test_validate_rejects_bad_url_and_ranges() {
        let mut bad_url = config();
        bad_url.base_url = "api.anthropic.com".to_string();
        assert!(bad_url.validate().is_err());

        let hot = config().with_params(ModelParams {
            temperature: Some(3.0),
            ..Default::default()
        });
        assert!(hot.validate().is_err());

        let wide = config().with_params(ModelParams {
            top_p: Some(1.5),
            ..Default::default()
        });
        assert!(wide.validate().is_err());
    }
}
