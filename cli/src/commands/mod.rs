//! CLI command implementations

pub mod interactive;
pub mod run;
pub mod tools;

pub use interactive::interactive_command;
pub use run::run_command;
pub use tools::tools_command;

use anyhow::{Context, Result};
use quill_core::{create_client, Session, SessionConfig};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Resolve configuration and build a session rooted at `working_dir`
pub async fn build_session(
    config_loader: &crate::config::CliConfigLoader,
    working_dir: &Path,
    system_prompt_file: Option<&Path>,
) -> Result<Session> {
    let llm_config = config_loader.load().await?;
    info!("Using protocol: {}", llm_config.protocol);
    info!("Using model: {}", llm_config.model);

    let system_prompt = match system_prompt_file {
        Some(path) => Some(
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read system prompt: {}", path.display()))?,
        ),
        None => None,
    };

    let client = create_client(&llm_config)?;
    let config = SessionConfig::new(working_dir).with_system_prompt(system_prompt);
    debug!("Working directory: {}", working_dir.display());

    Ok(Session::new(config, client))
}

/// Absolute working directory for file commands
pub fn resolve_working_dir(working_dir: Option<PathBuf>) -> Result<PathBuf> {
    let dir = match working_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    Ok(dir.canonicalize().unwrap_or(dir))
}
