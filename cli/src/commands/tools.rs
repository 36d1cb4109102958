//! Tools listing command

use anyhow::Result;
use colored::Colorize;
use quill_core::ToolExecutor;
use std::path::Path;
use tracing::info;

/// Show the commands the model can issue
pub async fn tools_command(working_dir: &Path) -> Result<()> {
    info!("Listing available commands");

    println!("{}\n", "Available commands".bold());

    let executor = ToolExecutor::with_builtin_tools(working_dir);
    for name in executor.list_tools() {
        let Some(tool) = executor.get_tool(name) else {
            continue;
        };
        println!("{}", tool.name().cyan().bold());
        println!("   {}", tool.description());
        for line in tool.usage().lines() {
            println!("   {}", line.dimmed());
        }
        println!();
    }

    println!(
        "Paths are resolved against {}",
        executor.working_dir().display()
    );

    Ok(())
}
