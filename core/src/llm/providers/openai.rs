//! OpenAI-compatible client implementation using async-openai library

use crate::config::ResolvedLlmConfig;
use crate::error::{LlmError, Result};
use crate::llm::{FinishReason, LlmClient, LlmMessage, LlmResponse, MessageRole, Usage};
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;

/// OpenAI client using async-openai library
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    top_p: Option<f32>,
}

impl OpenAiClient {
    /// Create a new OpenAI client from resolved LLM config
    pub fn new(config: &ResolvedLlmConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(LlmError::Authentication {
                message: "No API key found for OpenAI".to_string(),
            }
            .into());
        }

        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.api_key)
            .with_api_base(config.base_url.trim_end_matches('/'));

        Ok(Self {
            client: Client::with_config(openai_config),
            model: config.model.clone(),
            max_tokens: config.params.max_tokens,
            temperature: config.params.temperature,
            top_p: config.params.top_p,
        })
    }

    /// Convert our internal message format to async-openai format
    fn convert_messages(messages: &[LlmMessage]) -> Vec<ChatCompletionRequestMessage> {
        messages
            .iter()
            .map(|message| match message.role {
                MessageRole::System => {
                    ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                        content: message.content.clone().into(),
                        name: None,
                    })
                }
                MessageRole::User => {
                    ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                        content: message.content.clone().into(),
                        name: None,
                    })
                }
                MessageRole::Assistant => {
                    ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                        content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                            message.content.clone(),
                        )),
                        name: None,
                        tool_calls: None,
                        audio: None,
                        refusal: None,
                        ..Default::default()
                    })
                }
            })
            .collect()
    }

    /// Convert async-openai response to our internal format
    fn convert_response(
        response: async_openai::types::CreateChatCompletionResponse,
    ) -> Result<LlmResponse> {
        let choice =
            response
                .choices
                .into_iter()
                .next()
                .ok_or_else(|| LlmError::MalformedResponse {
                    message: "No choices in response".to_string(),
                })?;

        let content = choice
            .message
            .content
            .ok_or_else(|| LlmError::MalformedResponse {
                message: "Response message has no content".to_string(),
            })?;

        let usage = response.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        let finish_reason = choice.finish_reason.map(|reason| match reason {
            async_openai::types::FinishReason::Stop => FinishReason::Stop,
            async_openai::types::FinishReason::Length => FinishReason::Length,
            async_openai::types::FinishReason::ContentFilter => FinishReason::ContentFilter,
            other => FinishReason::Other(format!("{:?}", other)),
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
impl LlmClient for OpenAiClient {
    async fn chat_completion(&self, messages: &[LlmMessage]) -> Result<LlmResponse> {
        let mut request_builder = CreateChatCompletionRequestArgs::default();
        request_builder.model(&self.model);
        request_builder.messages(Self::convert_messages(messages));

        if let Some(max_tokens) = self.max_tokens {
            request_builder.max_tokens(max_tokens);
        }
        if let Some(temperature) = self.temperature {
            request_builder.temperature(temperature);
        }
        if let Some(top_p) = self.top_p {
            request_builder.top_p(top_p);
        }

        let request = request_builder.build().map_err(|e| {
            tracing::debug!("Failed to build OpenAI request: {}", e);
            LlmError::InvalidRequest {
                message: format!("Failed to build request: {}", e),
            }
        })?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            tracing::debug!("OpenAI API call failed: {}", e);
            match e {
                async_openai::error::OpenAIError::Reqwest(err) => LlmError::Network {
                    message: err.to_string(),
                },
                async_openai::error::OpenAIError::JSONDeserialize(err) => {
                    LlmError::MalformedResponse {
                        message: err.to_string(),
                    }
                }
                // async-openai doesn't expose status codes directly
                other => LlmError::ApiError {
                    status: 500,
                    message: other.to_string(),
                },
            }
        })?;

        Self::convert_response(response)
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}
