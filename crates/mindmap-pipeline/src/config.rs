//! Configuration for the pipeline

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How topics are extracted from the cleaned transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicMode {
    /// One call per chunk, results merged in chunk order
    #[default]
    Chunked,
    /// One call over the whole cleaned transcript
    WholeDocument,
}

impl TopicMode {
    /// Name as used in config files and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicMode::Chunked => "chunked",
            TopicMode::WholeDocument => "whole_document",
        }
    }
}

/// Configuration for the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Maximum chunk length (characters)
    pub chunk_size: usize,

    /// Characters shared between consecutive chunks
    pub chunk_overlap: usize,

    /// Maximum number of Cleaner passes before giving up
    pub max_clean_iterations: u32,

    /// Maximum time for a single generation call (seconds)
    pub call_timeout_secs: u64,

    /// Maximum number of in-flight per-chunk calls per extractor
    pub max_concurrent_calls: usize,

    /// Topic extraction mode
    pub topic_mode: TopicMode,
}

impl PipelineConfig {
    /// Get the per-call timeout as a Duration
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be greater than 0".to_string());
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            ));
        }
        if self.max_clean_iterations == 0 {
            return Err("max_clean_iterations must be greater than 0".to_string());
        }
        if self.call_timeout_secs == 0 {
            return Err("call_timeout_secs must be greater than 0".to_string());
        }
        if self.max_concurrent_calls == 0 {
            return Err("max_concurrent_calls must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    /// Default configuration: 1500/200 chunking, chunked topic extraction
    fn default() -> Self {
        Self {
            chunk_size: 1500,
            chunk_overlap: 200,
            max_clean_iterations: 5,
            call_timeout_secs: 120,
            max_concurrent_calls: 4,
            topic_mode: TopicMode::Chunked,
        }
    }
}

impl PipelineConfig {
    /// Fast preset: single topic call, fewer clean passes, shorter timeout
    pub fn fast() -> Self {
        Self {
            max_clean_iterations: 2,
            call_timeout_secs: 60,
            max_concurrent_calls: 8,
            topic_mode: TopicMode::WholeDocument,
            ..Self::default()
        }
    }

    /// Thorough preset: more clean passes and a longer timeout
    pub fn thorough() -> Self {
        Self {
            max_clean_iterations: 10,
            call_timeout_secs: 300,
            max_concurrent_calls: 2,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_size, 1500);
        assert_eq!(config.chunk_overlap, 200);
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(PipelineConfig::fast().validate().is_ok());
        assert!(PipelineConfig::thorough().validate().is_ok());
        assert_eq!(PipelineConfig::fast().topic_mode, TopicMode::WholeDocument);
    }

    #[test]
    fn test_overlap_must_be_smaller_than_chunk() {
        let config = PipelineConfig {
            chunk_overlap: 1500,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_values_rejected() {
        for config in [
            PipelineConfig { chunk_size: 0, chunk_overlap: 0, ..PipelineConfig::default() },
            PipelineConfig { max_clean_iterations: 0, ..PipelineConfig::default() },
            PipelineConfig { call_timeout_secs: 0, ..PipelineConfig::default() },
            PipelineConfig { max_concurrent_calls: 0, ..PipelineConfig::default() },
        ] {
            assert!(config.validate().is_err(), "{:?}", config);
        }
    }

    #[test]
    fn test_toml_round_trip() {
        let config = PipelineConfig::thorough();
        let toml_str = config.to_toml().unwrap();
        let parsed = PipelineConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = PipelineConfig::from_toml("topic_mode = \"whole_document\"\n").unwrap();
        assert_eq!(parsed.topic_mode, TopicMode::WholeDocument);
        assert_eq!(parsed.chunk_size, 1500);
    }
}
