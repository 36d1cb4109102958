//! # quill Core
//!
//! Core library for quill - a small conversational agent that can read and
//! write files on behalf of the user.
//!
//! A [`Session`] keeps the conversation transcript, sends it to an
//! [`LlmClient`] every turn, looks for one tagged command in the reply and runs
//! it against the working directory.

// Core modules
pub mod agent;
pub mod command;
pub mod config;
pub mod error;
pub mod llm;
pub mod tools;

// Re-export commonly used types
pub use agent::{Session, SessionConfig, Transcript, TurnOutcome};
pub use command::{extract, parse_reply, Command};
pub use config::{ModelParams, Protocol, ResolvedLlmConfig};
pub use llm::{create_client, LlmClient};
pub use tools::ToolExecutor;

/// Current version of the quill-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing with a specific debug mode
///
/// `RUST_LOG` takes precedence when set. Logs go to stderr so that stdout only
/// carries turn output.
pub fn init_tracing_with_debug(debug: bool) {
    let filter = if debug { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}
