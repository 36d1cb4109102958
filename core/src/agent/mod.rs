//! Session loop, transcript and system prompt

pub mod config;
pub mod prompt;
pub mod session;
pub mod transcript;

pub use config::SessionConfig;
pub use prompt::{build_system_prompt, QUILL_SYSTEM_PROMPT};
pub use session::{tool_result_message, Session, TurnOutcome};
pub use transcript::Transcript;
