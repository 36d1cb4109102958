//! Error types and handling for quill core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for quill operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for quill core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// LLM client errors
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Command execution errors
    #[error("Command error: {0}")]
    Command(#[from] CommandError),
}

impl Error {
    /// Whether this error is a filesystem "not found" failure
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::Command(CommandError::Filesystem { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },

    #[error("Unsupported protocol: {name}")]
    UnsupportedProtocol { name: String },
}

/// LLM client errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Unrecognized command: {name}")]
    UnknownCommand { name: String },

    #[error("Invalid command parameters: {message}")]
    InvalidParameters { message: String },

    #[error("{}: {}", .path.display(), .source)]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
