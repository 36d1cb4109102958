//! Session - one conversation with the model

use super::config::SessionConfig;
use super::prompt::build_system_prompt;
use super::transcript::Transcript;
use crate::command::parse_reply;
use crate::error::Result;
use crate::llm::{FinishReason, LlmClient, LlmMessage};
use crate::tools::ToolExecutor;
use std::fmt;
use std::sync::Arc;

/// How a turn ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The reply carried a command and it ran
    CommandExecuted { name: String, result: String },

    /// The reply was plain conversation
    PlainReply(String),
}

impl TurnOutcome {
    /// Text shown to the user for this turn
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TurnOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnOutcome::CommandExecuted { name, result } => write!(f, "[{}] {}", name, result),
            TurnOutcome::PlainReply(reply) => f.write_str(reply),
        }
    }
}

/// Format a command result as the synthetic user message fed back to the model
pub fn tool_result_message(name: &str, result: &str) -> String {
    format!("Tool result ({}):\n{}", name, result)
}

/// Owns the transcript and runs one request/response/execute cycle per turn
pub struct Session {
    config: SessionConfig,
    llm_client: Arc<dyn LlmClient>,
    tool_executor: ToolExecutor,
    transcript: Transcript,
    system_prompt: String,
}

impl Session {
    /// Create a session with the built-in file tools
    pub fn new(config: SessionConfig, llm_client: Arc<dyn LlmClient>) -> Self {
        let tool_executor = ToolExecutor::with_builtin_tools(config.working_dir.clone());
        Self::with_executor(config, llm_client, tool_executor)
    }

    /// Create a session with a custom tool executor
    pub fn with_executor(
        config: SessionConfig,
        llm_client: Arc<dyn LlmClient>,
        tool_executor: ToolExecutor,
    ) -> Self {
        let system_prompt = build_system_prompt(
            &config.working_dir,
            &tool_executor,
            config.system_prompt.as_deref(),
        );

        Self {
            config,
            llm_client,
            tool_executor,
            transcript: Transcript::new(),
            system_prompt,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// System preamble followed by the whole transcript
    fn build_request(&self) -> Vec<LlmMessage> {
        let mut messages = Vec::with_capacity(self.transcript.len() + 1);
        messages.push(LlmMessage::system(self.system_prompt.clone()));
        messages.extend(self.transcript.messages().iter().cloned());
        messages
    }

    /// Run one turn for the given user input
    ///
    /// A failure aborts the turn and leaves the transcript as it was at the
    /// failing step; nothing is rolled back.
    pub async fn handle_turn(&mut self, user_text: &str) -> Result<TurnOutcome> {
        self.transcript.push(LlmMessage::user(user_text));

        let messages = self.build_request();
        tracing::debug!(
            "Sending {} messages to {}",
            messages.len(),
            self.llm_client.provider_name()
        );

        let response = match self.llm_client.chat_completion(&messages).await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("LLM request failed: {}", e);
                return Err(e);
            }
        };

        if let Some(usage) = &response.usage {
            tracing::debug!(
                "Token usage: {} prompt + {} completion = {}",
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens
            );
        }

        if response.finish_reason == Some(FinishReason::Length) {
            tracing::warn!("Reply from {} was cut off at the token limit", response.model);
        }

        let reply = response.content;
        let extraction = parse_reply(&reply);
        for tag in &extraction.skipped {
            tracing::debug!("Skipped unterminated tag <{}> at byte {}", tag.name, tag.offset);
        }

        match extraction.command {
            Some(command) => {
                tracing::info!("Executing command: {}", command.name);
                let result = self.tool_executor.run(&command).await?;

                self.transcript.push(LlmMessage::assistant(reply));
                self.transcript
                    .push(LlmMessage::user(tool_result_message(&command.name, &result)));

                Ok(TurnOutcome::CommandExecuted {
                    name: command.name,
                    result,
                })
            }
            None => {
                self.transcript.push(LlmMessage::assistant(reply.clone()));
                Ok(TurnOutcome::PlainReply(reply))
            }
        }
    }
}
