//! LLM client trait and response structures

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::message::LlmMessage;

/// A text-generation backend: transcript in, reply text out.
///
/// Implementations own everything protocol specific (endpoint, auth header,
/// request and response field mapping).
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send the ordered messages and return the model's reply
    async fn chat_completion(&self, messages: &[LlmMessage]) -> Result<LlmResponse>;

    /// Get the provider name
    fn provider_name(&self) -> &str {
        "custom"
    }
}

/// Response from an LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    /// The generated reply text
    pub content: String,

    /// Model used for generation
    pub model: String,

    /// Usage statistics
    pub usage: Option<Usage>,

    /// Finish reason
    pub finish_reason: Option<FinishReason>,
}

impl LlmResponse {
    /// Response carrying only reply text
    pub fn text<S: Into<String>>(content: S) -> Self {
        Self {
            content: content.into(),
            model: String::new(),
            usage: None,
            finish_reason: None,
        }
    }
}

/// Usage statistics for a request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,

    /// Number of tokens in the completion
    pub completion_tokens: u32,

    /// Total number of tokens
    pub total_tokens: u32,
}

/// Reason why generation finished
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Generation completed naturally
    Stop,

    /// Hit the maximum token limit
    Length,

    /// Content was filtered
    ContentFilter,

    /// Other reason
    Other(String),
}
