//! Interactive mode command

use crate::output::{CliOutputConfig, CliOutputHandler};
use anyhow::Result;
use quill_core::Session;
use std::io::{IsTerminal, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

/// Line that ends the session
const EXIT_COMMAND: &str = "exit";

/// Read prompts from stdin until `exit` or end of input
pub async fn interactive_command(session: Session) -> Result<()> {
    let interactive = std::io::stdin().is_terminal();
    let output = CliOutputHandler::new(CliOutputConfig {
        show_spinner: interactive,
    });

    if interactive {
        println!(
            "quill {} in {} - type '{}' to quit",
            quill_core::VERSION,
            session.config().working_dir.display(),
            EXIT_COMMAND
        );
    }

    let stdin = BufReader::new(tokio::io::stdin());
    run_loop(session, stdin, &output, interactive).await
}

/// Drive turns from a line source
///
/// A failed turn is reported and the loop keeps going.
async fn run_loop<R>(
    mut session: Session,
    input: R,
    output: &CliOutputHandler,
    show_prompt: bool,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    loop {
        if show_prompt {
            print!("> ");
            std::io::stdout().flush()?;
        }

        let Some(line) = lines.next_line().await? else {
            debug!("End of input");
            break;
        };

        // Match control lines on trimmed text but send the line as typed
        let trimmed = line.trim();
        if trimmed == EXIT_COMMAND {
            break;
        }
        if trimmed.is_empty() {
            continue;
        }

        let spinner = output.start_thinking();
        let result = session.handle_turn(&line).await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        match result {
            Ok(outcome) => output.print_outcome(&outcome),
            Err(e) => {
                debug!("Turn failed: {}", e);
                output.print_error(&e);
            }
        }
    }

    debug!(
        "Session ended with {} messages in transcript",
        session.transcript().len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quill_core::error::{LlmError, Result as CoreResult};
    use quill_core::llm::{LlmClient, LlmMessage, LlmResponse};
    use quill_core::SessionConfig;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    /// Echoes the last user message back, failing on "boom"
    struct EchoClient {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LlmClient for EchoClient {
        async fn chat_completion(&self, messages: &[LlmMessage]) -> CoreResult<LlmResponse> {
            let last = messages.last().map(|m| m.content.clone()).unwrap_or_default();
            self.prompts.lock().unwrap().push(last.clone());
            if last == "boom" {
                return Err(LlmError::Network {
                    message: "boom".to_string(),
                }
                .into());
            }
            Ok(LlmResponse::text(last))
        }
    }

    async fn run_lines(input: &'static str) -> Vec<String> {
        let temp_dir = tempdir().unwrap();
        let client = Arc::new(EchoClient {
            prompts: Mutex::new(Vec::new()),
        });
        let session = Session::new(SessionConfig::new(temp_dir.path()), client.clone());
        let output = CliOutputHandler::new(CliOutputConfig {
            show_spinner: false,
        });

        run_loop(session, input.as_bytes(), &output, false)
            .await
            .unwrap();

        let prompts = client.prompts.lock().unwrap().clone();
        prompts
    }

    #[tokio::test]
    async fn test_exit_line_stops_loop() {
        assert_eq!(run_lines("one\ntwo\nexit\nthree\n").await, ["one", "two"]);
    }

    #[tokio::test]
    async fn test_end_of_input_stops_loop() {
        assert_eq!(run_lines("one\n\n   \ntwo").await, ["one", "two"]);
    }

    #[tokio::test]
    async fn test_failed_turn_does_not_end_session() {
        assert_eq!(run_lines("boom\nafter\nexit\n").await, ["boom", "after"]);
    }

    #[tokio::test]
    async fn test_line_is_sent_as_typed() {
        assert_eq!(
            run_lines("  indented text \n  exit  \nlater\n").await,
            ["  indented text "]
        );
    }
}
