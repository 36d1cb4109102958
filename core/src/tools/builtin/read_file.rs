//! read_file: return a file's contents

use crate::error::{CommandError, Result};
use crate::tools::{Tool, ToolContext, ToolParameter};
use async_trait::async_trait;
use std::collections::HashMap;

const PARAMETERS: &[ToolParameter] = &[ToolParameter::required(
    "path",
    "path of the file, relative to the working directory",
)];

/// Reads a whole file as text
pub struct ReadFileTool;

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read the full contents of a text file."
    }

    fn parameters(&self) -> &[ToolParameter] {
        PARAMETERS
    }

    async fn execute(
        &self,
        params: &HashMap<String, String>,
        ctx: &ToolContext,
    ) -> Result<String> {
        let path = params
            .get("path")
            .ok_or_else(|| CommandError::InvalidParameters {
                message: "read_file requires parameter 'path'".to_string(),
            })?;
        let resolved = ctx.resolve(path);

        tracing::debug!("Reading {}", resolved.display());
        let content = tokio::fs::read_to_string(&resolved)
            .await
            .map_err(|source| CommandError::Filesystem {
                path: resolved.clone(),
                source,
            })?;

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn params(path: &str) -> HashMap<String, String> {
        HashMap::from([("path".to_string(), path.to_string())])
    }

    #[tokio::test]
    async fn test_read_existing_file() {
        let temp_dir = tempdir().unwrap();
        std::fs::write(temp_dir.path().join("notes.txt"), "line one\nline two\n").unwrap();

        let ctx = ToolContext::new(temp_dir.path());
        let content = ReadFileTool.execute(&params("notes.txt"), &ctx).await.unwrap();

        assert_eq!(content, "line one\nline two\n");
    }

    #[tokio::test]
    async fn test_read_missing_file_is_not_found() {
        let temp_dir = tempdir().unwrap();
        let ctx = ToolContext::new(temp_dir.path());

        let err = ReadFileTool
            .execute(&params("missing.txt"), &ctx)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().contains("missing.txt"));
    }

    #[tokio::test]
    async fn test_read_directory_fails() {
        let temp_dir = tempdir().unwrap();
        std::fs::create_dir(temp_dir.path().join("sub")).unwrap();
        let ctx = ToolContext::new(temp_dir.path());

        let err = ReadFileTool.execute(&params("sub"), &ctx).await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Command(CommandError::Filesystem { .. })
        ));
    }
}
