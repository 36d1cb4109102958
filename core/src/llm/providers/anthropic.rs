//! Anthropic Claude client implementation

use crate::config::ResolvedLlmConfig;
use crate::error::{LlmError, Result};
use crate::llm::{FinishReason, LlmClient, LlmMessage, LlmResponse, MessageRole, Usage};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Anthropic Claude client
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: Option<f32>,
    top_p: Option<f32>,
}

impl AnthropicClient {
    /// Create a new Anthropic client from resolved LLM config
    pub fn new(config: &ResolvedLlmConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(LlmError::Authentication {
                message: "No API key found for Anthropic".to_string(),
            }
            .into());
        }

        Ok(Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.params.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: config.params.temperature,
            top_p: config.params.top_p,
        })
    }

    fn build_request(&self, messages: &[LlmMessage]) -> AnthropicRequest {
        // The messages API takes the system prompt as a top-level field
        let mut system_parts = Vec::new();
        let mut conversation = Vec::new();

        for message in messages {
            match message.role {
                MessageRole::System => system_parts.push(message.content.clone()),
                role => conversation.push(AnthropicMessage {
                    role: role.as_str().to_string(),
                    content: message.content.clone(),
                }),
            }
        }

        AnthropicRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            system: if system_parts.is_empty() {
                None
            } else {
                Some(system_parts.join("\n\n"))
            },
            messages: conversation,
            temperature: self.temperature,
            top_p: self.top_p,
        }
    }

    fn convert_response(response: AnthropicResponse) -> Result<LlmResponse> {
        let content = response
            .content
            .iter()
            .filter(|block| block.content_type == "text")
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("");

        if content.is_empty() && response.content.is_empty() {
            return Err(LlmError::MalformedResponse {
                message: "No content blocks in response".to_string(),
            }
            .into());
        }

        let usage = response.usage.map(|u| Usage {
            prompt_tokens: u.input_tokens,
            completion_tokens: u.output_tokens,
            total_tokens: u.input_tokens + u.output_tokens,
        });

        let finish_reason = response.stop_reason.map(|reason| match reason.as_str() {
            "end_turn" | "stop_sequence" => FinishReason::Stop,
            "max_tokens" => FinishReason::Length,
            _ => FinishReason::Other(reason),
        });

        Ok(LlmResponse {
            content,
            model: response.model,
            usage,
            finish_reason,
        })
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn chat_completion(&self, messages: &[LlmMessage]) -> Result<LlmResponse> {
        let request = self.build_request(messages);

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Network {
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| LlmError::Network {
            message: e.to_string(),
        })?;

        if !status.is_success() {
            tracing::debug!("Anthropic API returned {}", status);
            return Err(LlmError::ApiError {
                status: status.as_u16(),
                message: body,
            }
            .into());
        }

        let anthropic_response: AnthropicResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::MalformedResponse {
                message: format!("Failed to parse response: {}", e),
            })?;

        Self::convert_response(anthropic_response)
    }

    fn provider_name(&self) -> &str {
        "anthropic"
    }
}

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    model: String,
    content: Vec<AnthropicContent>,
    stop_reason: Option<String>,
    usage: Option<AnthropicUsage>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}
