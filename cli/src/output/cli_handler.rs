//! CLI output handler implementation

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use quill_core::TurnOutcome;
use std::fmt::Display;
use std::time::Duration;

/// CLI output configuration
#[derive(Debug, Clone)]
pub struct CliOutputConfig {
    /// Show a spinner while waiting for the model
    pub show_spinner: bool,
}

impl Default for CliOutputConfig {
    fn default() -> Self {
        Self { show_spinner: true }
    }
}

/// Formats turn results for terminal display
pub struct CliOutputHandler {
    config: CliOutputConfig,
}

impl CliOutputHandler {
    /// Create a new CLI output handler
    pub fn new(config: CliOutputConfig) -> Self {
        Self { config }
    }

    /// Start a spinner on stderr, if enabled
    pub fn start_thinking(&self) -> Option<ProgressBar> {
        if !self.config.show_spinner {
            return None;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("thinking...");
        spinner.enable_steady_tick(Duration::from_millis(80));
        Some(spinner)
    }

    /// Print a turn result to stdout
    pub fn print_outcome(&self, outcome: &TurnOutcome) {
        println!("{}", format_outcome(outcome));
    }

    /// Print a turn failure to stderr
    pub fn print_error(&self, error: &dyn Display) {
        eprintln!("{} {}", "Error:".red().bold(), error);
    }
}

/// Render a turn result, highlighting the command name
pub fn format_outcome(outcome: &TurnOutcome) -> String {
    match outcome {
        TurnOutcome::CommandExecuted { name, result } => {
            format!("{} {}", format!("[{}]", name).as_str().cyan().bold(), result)
        }
        TurnOutcome::PlainReply(reply) => reply.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_reply_is_unchanged() {
        colored::control::set_override(false);
        let outcome = TurnOutcome::PlainReply("just text".to_string());
        assert_eq!(format_outcome(&outcome), "just text");
    }

    #[test]
    fn test_command_outcome_names_command() {
        colored::control::set_override(false);
        let outcome = TurnOutcome::CommandExecuted {
            name: "write_file".to_string(),
            result: "File written successfully: a.txt".to_string(),
        };
        assert_eq!(
            format_outcome(&outcome),
            "[write_file] File written successfully: a.txt"
        );
        assert_eq!(format_outcome(&outcome), outcome.text());
    }

    #[test]
    fn test_spinner_disabled() {
        let handler = CliOutputHandler::new(CliOutputConfig {
            show_spinner: false,
        });
        assert!(handler.start_thinking().is_none());
    }
}
