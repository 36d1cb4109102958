//! write_file: create or overwrite a file

use crate::error::{CommandError, Result};
use crate::tools::{Tool, ToolContext, ToolParameter};
use async_trait::async_trait;
use std::collections::HashMap;

const PARAMETERS: &[ToolParameter] = &[
    ToolParameter::required("path", "path of the file, relative to the working directory"),
    ToolParameter::required("content", "the complete new contents of the file"),
];

/// Writes a whole file, creating parent directories as needed
pub struct WriteFileTool;

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Write content to a file, replacing it if it exists. Missing directories are created."
    }

    fn parameters(&self) -> &[ToolParameter] {
        PARAMETERS
    }

    async fn execute(
        &self,
        params: &HashMap<String, String>,
        ctx: &ToolContext,
    ) -> Result<String> {
        let (Some(path), Some(content)) = (params.get("path"), params.get("content")) else {
            return Err(CommandError::InvalidParameters {
                message: "write_file requires parameters 'path' and 'content'".to_string(),
            }
            .into());
        };
        let resolved = ctx.resolve(path);

        if let Some(parent) = resolved.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| CommandError::Filesystem {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tracing::debug!("Writing {} bytes to {}", content.len(), resolved.display());
        tokio::fs::write(&resolved, content)
            .await
            .map_err(|source| CommandError::Filesystem {
                path: resolved.clone(),
                source,
            })?;

        Ok(format!("File written successfully: {}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn params(path: &str, content: &str) -> HashMap<String, String> {
        HashMap::from([
            ("path".to_string(), path.to_string()),
            ("content".to_string(), content.to_string()),
        ])
    }

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let temp_dir = tempdir().unwrap();
        let ctx = ToolContext::new(temp_dir.path());

        let result = WriteFileTool
            .execute(&params("a/b.txt", "hello"), &ctx)
            .await
            .unwrap();

        assert!(result.contains("a/b.txt"));
        assert!(temp_dir.path().join("a").is_dir());
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("a/b.txt")).unwrap(),
            "hello"
        );
    }

    #[tokio::test]
    async fn test_write_overwrites_existing_file() {
        let temp_dir = tempdir().unwrap();
        let file = temp_dir.path().join("out.txt");
        std::fs::write(&file, "a much longer original body").unwrap();
        let ctx = ToolContext::new(temp_dir.path());

        WriteFileTool
            .execute(&params("out.txt", "short"), &ctx)
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&file).unwrap(), "short");
    }

    #[tokio::test]
    async fn test_write_empty_content() {
        let temp_dir = tempdir().unwrap();
        let ctx = ToolContext::new(temp_dir.path());

        WriteFileTool
            .execute(&params("empty.txt", ""), &ctx)
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("empty.txt")).unwrap(),
            ""
        );
    }

    #[tokio::test]
    async fn test_write_escaping_working_dir_is_honored() {
        let temp_dir = tempdir().unwrap();
        let work = temp_dir.path().join("work");
        std::fs::create_dir(&work).unwrap();
        let ctx = ToolContext::new(&work);

        WriteFileTool
            .execute(&params("../outside.txt", "x"), &ctx)
            .await
            .unwrap();

        assert!(temp_dir.path().join("outside.txt").exists());
    }
}
