//! LLM client abstractions and implementations

pub mod client;
pub mod message;
pub mod providers;

pub use client::{FinishReason, LlmClient, LlmResponse, Usage};
pub use message::{LlmMessage, MessageRole};
pub use providers::*;

use crate::config::{Protocol, ResolvedLlmConfig};
use crate::error::Result;
use std::sync::Arc;

/// Create the backend adapter matching the configured protocol
pub fn create_client(config: &ResolvedLlmConfig) -> Result<Arc<dyn LlmClient>> {
    config.validate()?;

    let client: Arc<dyn LlmClient> = match config.protocol {
        Protocol::OpenAICompat => Arc::new(OpenAiClient::new(config)?),
        Protocol::Anthropic => Arc::new(AnthropicClient::new(config)?),
    };

    tracing::debug!(
        "Created {} client for model {} at {}",
        client.provider_name(),
        config.model,
        config.base_url
    );

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_per_protocol() {
        for protocol in [Protocol::OpenAICompat, Protocol::Anthropic] {
            let config = ResolvedLlmConfig::new(
                protocol,
                protocol.default_base_url().to_string(),
                "sk-test".to_string(),
                protocol.default_model().to_string(),
            );
            let client = create_client(&config).unwrap();
            assert_eq!(client.provider_name(), protocol.as_str());
        }
    }

    #[test]
    fn test_create_client_rejects_invalid_config() {
        let config = ResolvedLlmConfig::new(
            Protocol::Anthropic,
            "https://api.anthropic.com".to_string(),
            String::new(),
            "claude-test".to_string(),
        );
        assert!(create_client(&config).is_err());
    }
}
