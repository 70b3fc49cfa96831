//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use mindmap_pipeline::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Language model provider
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Pipeline tuning
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Which backend answers generation calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Local Ollama server
    Ollama,
    /// OpenAI-compatible chat completions API
    #[serde(rename = "openai")]
    OpenAi,
    /// Offline scripted provider
    Mock,
}

/// Provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Backend kind
    #[serde(default = "default_kind")]
    pub kind: ProviderKind,

    /// Server URL; each backend has its own default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the API key (OpenAI only)
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Summary with a topic table
    Summary,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".mindmap").join("config.toml"))
    }

    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load_from(&Self::path()?),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.pipeline.validate().map_err(CliError::Config)?;
        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            endpoint: None,
            model: default_model(),
            api_key_env: default_api_key_env(),
            temperature: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Summary,
        }
    }
}

fn default_kind() -> ProviderKind {
    ProviderKind::Ollama
}

fn default_model() -> String {
    "llama3.1".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindmap_pipeline::TopicMode;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.provider.kind, ProviderKind::Ollama);
        assert_eq!(config.provider.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.pipeline.max_clean_iterations, 5);
        assert!(config.settings.color);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.provider.kind = ProviderKind::OpenAi;
        config.provider.model = "gpt-4o-mini".to_string();
        config.pipeline.topic_mode = TopicMode::WholeDocument;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.provider.kind, ProviderKind::OpenAi);
        assert_eq!(loaded.provider.model, "gpt-4o-mini");
        assert_eq!(loaded.pipeline.topic_mode, TopicMode::WholeDocument);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.provider.model, "llama3.1");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[provider]\nkind = \"mock\"\n\n[pipeline]\nchunk_size = 800\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.provider.kind, ProviderKind::Mock);
        assert_eq!(config.pipeline.chunk_size, 800);
        assert_eq!(config.pipeline.chunk_overlap, 200);
        assert_eq!(config.settings.format, OutputFormat::Summary);
    }

    #[test]
    fn test_invalid_pipeline_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[pipeline]\nchunk_size = 100\nchunk_overlap = 100\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(CliError::Config(_))));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[provider\nkind = ").unwrap();

        assert!(matches!(Config::load_from(&path), Err(CliError::Toml(_))));
    }
}
