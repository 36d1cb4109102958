//! CLI-specific output implementations
//!
//! Formatting of turn results, errors and the waiting spinner.

pub mod cli_handler;

pub use cli_handler::{CliOutputConfig, CliOutputHandler};
