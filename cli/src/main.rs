//! # quill CLI
//!
//! Command-line interface for quill - chat with an LLM that can read and write
//! files in the working directory.
//!
//! ## Usage
//!
//! - `quill` - Start interactive mode (type `exit` to quit)
//! - `quill "summarize notes.txt"` - Run a single prompt
//! - `quill --list-tools` - Show the file commands the model can use

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;
mod config;
mod output;

use commands::{
    build_session, interactive_command, resolve_working_dir, run_command, tools_command,
};
use config::CliConfigLoader;

/// quill - a conversational agent that can read and write files
#[derive(Parser)]
#[command(name = "quill")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Chat with an LLM that can read and write files")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file or directory path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Protocol to use (openai, anthropic)
    #[arg(long)]
    protocol: Option<String>,

    /// API key override
    #[arg(long)]
    api_key: Option<String>,

    /// Base URL override
    #[arg(long)]
    base_url: Option<String>,

    /// Model name override
    #[arg(long)]
    model: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Working directory that file paths are resolved against
    #[arg(long)]
    working_dir: Option<PathBuf>,

    /// File whose contents replace the default system prompt
    #[arg(long)]
    system_prompt: Option<PathBuf>,

    /// Show the file commands the model can use and exit
    #[arg(long)]
    list_tools: bool,

    /// Prompt to run once; words are joined with spaces
    prompt: Vec<String>,
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli, working_dir: &std::path::Path) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new().with_search_dir(working_dir.to_path_buf());

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(protocol) = &cli.protocol {
        loader = loader.with_protocol_override(protocol.clone());
    }

    if let Some(api_key) = &cli.api_key {
        loader = loader.with_api_key_override(api_key.clone());
    }

    if let Some(base_url) = &cli.base_url {
        loader = loader.with_base_url_override(base_url.clone());
    }

    if let Some(model) = &cli.model {
        loader = loader.with_model_override(model.clone());
    }

    loader
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    quill_core::init_tracing_with_debug(cli.verbose);

    let working_dir = resolve_working_dir(cli.working_dir.clone())?;

    if cli.list_tools {
        return tools_command(&working_dir).await;
    }

    let config_loader = build_config_loader(&cli, &working_dir);
    let session = build_session(&config_loader, &working_dir, cli.system_prompt.as_deref()).await?;

    if cli.prompt.is_empty() {
        interactive_command(session).await
    } else {
        run_command(session, cli.prompt.join(" ")).await
    }
}
