//! Single prompt execution command

use crate::output::{CliOutputConfig, CliOutputHandler};
use anyhow::Result;
use quill_core::Session;
use tracing::debug;

/// Run one turn and print its result
///
/// Any failure is returned so the process exits with a non-zero status.
pub async fn run_command(mut session: Session, prompt: String) -> Result<()> {
    debug!("Running single prompt: {}", prompt);

    let output = CliOutputHandler::new(CliOutputConfig {
        show_spinner: false,
    });

    let outcome = session.handle_turn(&prompt).await?;
    output.print_outcome(&outcome);

    Ok(())
}
