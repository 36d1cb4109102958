//! Base tool traits and the command executor

use crate::command::Command;
use crate::error::{CommandError, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Trait for all file commands
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the name of the tool (the outer tag of its command)
    fn name(&self) -> &str;

    /// Get the description of the tool
    fn description(&self) -> &str;

    /// Parameters the tool accepts
    fn parameters(&self) -> &[ToolParameter];

    /// Execute the tool with validated parameters
    async fn execute(&self, params: &HashMap<String, String>, ctx: &ToolContext)
        -> Result<String>;

    /// Render the tagged form the model should emit
    fn usage(&self) -> String {
        let mut usage = format!("<{}>\n", self.name());
        for param in self.parameters() {
            usage.push_str(&format!(
                "<{name}>{hint}</{name}>\n",
                name = param.name,
                hint = param.description
            ));
        }
        usage.push_str(&format!("</{}>", self.name()));
        usage
    }
}

/// A named parameter of a tool
#[derive(Debug, Clone, Copy)]
pub struct ToolParameter {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

impl ToolParameter {
    pub const fn required(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            required: true,
        }
    }
}

/// Environment a tool runs in
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Root that relative paths are resolved against
    pub working_dir: PathBuf,
}

impl ToolContext {
    pub fn new<P: Into<PathBuf>>(working_dir: P) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    /// Resolve a command-supplied path against the working directory
    pub fn resolve(&self, path: &str) -> PathBuf {
        let resolved = super::utils::resolve_path(&self.working_dir, path);
        if !resolved.starts_with(super::utils::normalize_path(&self.working_dir)) {
            tracing::warn!(
                "Path {} resolves outside the working directory {}",
                resolved.display(),
                self.working_dir.display()
            );
        }
        resolved
    }
}

/// Dispatches commands to the registered tools
pub struct ToolExecutor {
    tools: BTreeMap<String, Box<dyn Tool>>,
    context: ToolContext,
}

impl ToolExecutor {
    /// Create an executor with no tools
    pub fn new<P: Into<PathBuf>>(working_dir: P) -> Self {
        Self {
            tools: BTreeMap::new(),
            context: ToolContext::new(working_dir),
        }
    }

    /// Create an executor with the built-in file tools
    pub fn with_builtin_tools<P: Into<PathBuf>>(working_dir: P) -> Self {
        let mut executor = Self::new(working_dir);
        executor.register_tool(Box::new(super::builtin::ReadFileTool));
        executor.register_tool(Box::new(super::builtin::WriteFileTool));
        executor
    }

    /// Register a tool
    pub fn register_tool(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// List all available tools, sorted by name
    pub fn list_tools(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Iterate over the registered tools, sorted by name
    pub fn tools(&self) -> impl Iterator<Item = &dyn Tool> {
        self.tools.values().map(|t| t.as_ref())
    }

    pub fn working_dir(&self) -> &Path {
        &self.context.working_dir
    }

    /// Execute a named command with its parameters
    pub async fn execute(&self, name: &str, params: &HashMap<String, String>) -> Result<String> {
        let tool = self
            .get_tool(name)
            .ok_or_else(|| CommandError::UnknownCommand {
                name: name.to_string(),
            })?;

        if let Some(missing) = tool
            .parameters()
            .iter()
            .find(|p| p.required && !params.contains_key(p.name))
        {
            return Err(CommandError::InvalidParameters {
                message: format!("{} requires parameter '{}'", name, missing.name),
            }
            .into());
        }

        let start_time = std::time::Instant::now();
        let result = tool.execute(params, &self.context).await;
        tracing::debug!(
            "Command {} finished in {}ms (ok: {})",
            name,
            start_time.elapsed().as_millis(),
            result.is_ok()
        );

        result
    }

    /// Execute an extracted command
    pub async fn run(&self, command: &Command) -> Result<String> {
        self.execute(&command.name, &command.parameters).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_unknown_command_names_the_command() {
        let executor = ToolExecutor::with_builtin_tools("/tmp");
        let err = executor
            .run(&Command::new("delete_file").with_parameter("path", "x"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            crate::error::Error::Command(CommandError::UnknownCommand { ref name }) if name == "delete_file"
        ));
        assert!(err.to_string().contains("delete_file"));
    }

    #[tokio::test]
    async fn test_missing_parameter_rejected_before_execution() {
        let temp_dir = tempdir().unwrap();
        let executor = ToolExecutor::with_builtin_tools(temp_dir.path());

        let err = executor
            .run(&Command::new("write_file").with_parameter("path", "a.txt"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("content"));
        assert!(!temp_dir.path().join("a.txt").exists());
    }

    #[test]
    fn test_builtin_tools_listed_in_order() {
        let executor = ToolExecutor::with_builtin_tools("/tmp");
        assert_eq!(executor.list_tools(), vec!["read_file", "write_file"]);
    }

    #[test]
    fn test_usage_renders_tagged_form() {
        let executor = ToolExecutor::with_builtin_tools("/tmp");
        let usage = executor.get_tool("write_file").unwrap().usage();

        assert!(usage.starts_with("<write_file>\n<path>"));
        assert!(usage.contains("<content>"));
        assert!(usage.ends_with("</write_file>"));
    }
}
