//! Simple CLI configuration loader for quill
//!
//! Implements single-source priority loading with flag overrides:
//! 1. --config file/dir (highest priority)
//! 2. Current working directory: ./quill.json or ./.quill/config.json
//! 3. Git repository root: <repo_root>/.quill/config.json
//! 4. User config dir: <config_dir>/quill/config.json
//! 5. Environment variables only (no files)

use anyhow::{anyhow, Context, Result};
use quill_core::{ModelParams, Protocol, ResolvedLlmConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Raw configuration file format (simple single-file schema)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawConfig {
    /// Protocol to use
    pub protocol: String,
    /// API key (can be "env:VAR_NAME" for environment variable)
    pub api_key: String,
    /// Base URL (optional, uses protocol default if not specified)
    pub base_url: Option<String>,
    /// Model name (optional, uses protocol default if not specified)
    pub model: Option<String>,
    /// Model parameters (optional)
    #[serde(default)]
    pub params: ModelParams,
}

/// CLI configuration loader
#[derive(Debug, Default)]
pub struct CliConfigLoader {
    /// Directory searched for project config files
    search_dir: Option<PathBuf>,
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Flag overrides
    protocol_override: Option<String>,
    api_key_override: Option<String>,
    base_url_override: Option<String>,
    model_override: Option<String>,
}

impl CliConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory searched for project config files
    pub fn with_search_dir(mut self, dir: PathBuf) -> Self {
        self.search_dir = Some(dir);
        self
    }

    /// Set config file/directory override
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(path);
        self
    }

    /// Set protocol override
    pub fn with_protocol_override(mut self, protocol: String) -> Self {
        self.protocol_override = Some(protocol);
        self
    }

    /// Set API key override
    pub fn with_api_key_override(mut self, api_key: String) -> Self {
        self.api_key_override = Some(api_key);
        self
    }

    /// Set base URL override
    pub fn with_base_url_override(mut self, base_url: String) -> Self {
        self.base_url_override = Some(base_url);
        self
    }

    /// Set model override
    pub fn with_model_override(mut self, model: String) -> Self {
        self.model_override = Some(model);
        self
    }

    /// Load and resolve configuration
    pub async fn load(&self) -> Result<ResolvedLlmConfig> {
        // Step 1: Find and load base configuration
        let mut config = if let Some(override_path) = &self.config_override {
            self.load_from_path(override_path).await.with_context(|| {
                format!(
                    "Failed to load config from override path: {}",
                    override_path.display()
                )
            })?
        } else {
            self.search_and_load().await?
        };

        // Step 2: Apply flag overrides
        if let Some(protocol) = &self.protocol_override {
            config.protocol = protocol.clone();
        }
        if let Some(api_key) = &self.api_key_override {
            config.api_key = api_key.clone();
        }
        if let Some(base_url) = &self.base_url_override {
            config.base_url = Some(base_url.clone());
        }
        if let Some(model) = &self.model_override {
            config.model = Some(model.clone());
        }

        // Step 3: Resolve to final LLM config
        self.resolve_config(config, |key| std::env::var(key).ok())
    }

    fn search_dir(&self) -> Result<PathBuf> {
        match &self.search_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }

    /// Search for config in priority order
    async fn search_and_load(&self) -> Result<RawConfig> {
        let search_dir = self.search_dir()?;

        let candidates = [
            Some(search_dir.join("quill.json")),
            Some(search_dir.join(".quill").join("config.json")),
            find_git_root(&search_dir).map(|root| root.join(".quill").join("config.json")),
            dirs::config_dir().map(|dir| dir.join("quill").join("config.json")),
        ];

        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                tracing::debug!("Using config file {}", path.display());
                return self.load_file(&path).await;
            }
        }

        let env_protocol = std::env::var("QUILL_PROTOCOL").ok();
        self.raw_from_env(env_protocol.as_deref(), |key| std::env::var(key).ok())
    }

    /// Build a config from credential environment variables
    fn raw_from_env<F>(&self, env_protocol: Option<&str>, lookup: F) -> Result<RawConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let openai_key = lookup("OPENAI_API_KEY").filter(|k| !k.is_empty());
        let anthropic_key = lookup("ANTHROPIC_API_KEY").filter(|k| !k.is_empty());

        let protocol_preference = self.protocol_override.as_deref().or(env_protocol);

        let protocol = match protocol_preference {
            Some(preferred) => preferred
                .parse::<Protocol>()
                .map_err(|e| anyhow!("{}", e))?,
            None => match (&openai_key, &anthropic_key) {
                (Some(_), _) => Protocol::OpenAICompat,
                (None, Some(_)) => Protocol::Anthropic,
                (None, None) => {
                    return Err(anyhow!(
                        "No API key found. Set OPENAI_API_KEY or ANTHROPIC_API_KEY, or create a quill.json config file"
                    ))
                }
            },
        };

        let (api_key, base_url, model) = match protocol {
            Protocol::OpenAICompat => (
                openai_key,
                lookup("OPENAI_BASE_URL"),
                lookup("OPENAI_MODEL"),
            ),
            Protocol::Anthropic => (
                anthropic_key,
                lookup("ANTHROPIC_BASE_URL"),
                lookup("ANTHROPIC_MODEL"),
            ),
        };

        let api_key = match (api_key, &self.api_key_override) {
            (Some(key), _) => key,
            (None, Some(_)) => String::new(), // replaced by the flag override
            (None, None) => {
                return Err(anyhow!(
                    "Protocol '{}' specified but no corresponding API key found",
                    protocol
                ))
            }
        };

        Ok(RawConfig {
            protocol: protocol.as_str().to_string(),
            api_key,
            base_url,
            model: model.or_else(|| lookup("QUILL_MODEL")),
            params: ModelParams::default(),
        })
    }

    /// Load configuration from a specific path (file or directory)
    async fn load_from_path(&self, path: &Path) -> Result<RawConfig> {
        if path.is_file() {
            self.load_file(path).await
        } else if path.is_dir() {
            let config_file = path.join("config.json");
            if config_file.exists() {
                self.load_file(&config_file).await
            } else {
                Err(anyhow!(
                    "No config.json found in directory: {}",
                    path.display()
                ))
            }
        } else {
            Err(anyhow!("Config path does not exist: {}", path.display()))
        }
    }

    /// Load a single config file
    async fn load_file(&self, path: &Path) -> Result<RawConfig> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Resolve raw config to ResolvedLlmConfig
    fn resolve_config<F>(&self, config: RawConfig, lookup: F) -> Result<ResolvedLlmConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let protocol: Protocol = config.protocol.parse()?;

        // Resolve API key (handle env: prefix)
        let api_key = match config.api_key.strip_prefix("env:") {
            Some(var_name) => lookup(var_name)
                .ok_or_else(|| anyhow!("Environment variable not found: {}", var_name))?,
            None => config.api_key,
        };

        let base_url = config
            .base_url
            .unwrap_or_else(|| protocol.default_base_url().to_string());
        let model = config
            .model
            .unwrap_or_else(|| protocol.default_model().to_string());

        let resolved =
            ResolvedLlmConfig::new(protocol, base_url, api_key, model).with_params(config.params);

        resolved
            .validate()
            .context("Configuration validation failed")?;

        Ok(resolved)
    }
}

/// Find git repository root
fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}
