//! System preamble sent ahead of the transcript on every request

use crate::tools::ToolExecutor;
use std::path::Path;

/// Default instructions given to the model
pub const QUILL_SYSTEM_PROMPT: &str = "You are a helpful assistant that can read and write files on the user's machine.\n\
\n\
You may answer in plain text. When you need to touch a file, include exactly one command \
in your reply using the tagged format shown below. Only the first command in a reply is \
executed; its result is sent back to you in the next message.\n\
\n\
Rules:\n\
* Before writing or overwriting a file, describe the change and ask the user to confirm.\n\
* Always send the complete file contents with write_file; partial edits are not supported.\n\
* Use paths relative to the working directory.\n\
* Do not wrap commands in code fences.";

/// Build the system preamble for a working directory
///
/// `custom_prompt` replaces the default instructions; the command reference
/// and working directory are always included.
pub fn build_system_prompt(
    working_dir: &Path,
    tools: &ToolExecutor,
    custom_prompt: Option<&str>,
) -> String {
    let mut prompt = String::from(custom_prompt.unwrap_or(QUILL_SYSTEM_PROMPT));

    prompt.push_str("\n\nAvailable commands:\n");
    for tool in tools.tools() {
        prompt.push_str(&format!(
            "\n{}: {}\n{}\n",
            tool.name(),
            tool.description(),
            tool.usage()
        ));
    }

    prompt.push_str(&format!(
        "\n[Working directory]: {}",
        working_dir.display()
    ));

    prompt
}
