//! Downstream collaborators that receive finished analyses

use mindmap_domain::traits::TranscriptSink;
use mindmap_domain::TranscriptAnalysis;
use std::convert::Infallible;
use std::path::{Path, PathBuf};
use tracing::info;

/// Keeps every analysis in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    analyses: Vec<TranscriptAnalysis>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything persisted so far, in order
    pub fn analyses(&self) -> &[TranscriptAnalysis] {
        &self.analyses
    }

    /// Most recent analysis
    pub fn last(&self) -> Option<&TranscriptAnalysis> {
        self.analyses.last()
    }
}

impl TranscriptSink for MemorySink {
    type Error = Infallible;

    fn persist(&mut self, analysis: &TranscriptAnalysis) -> Result<(), Self::Error> {
        self.analyses.push(analysis.clone());
        Ok(())
    }
}

/// Writes each analysis as pretty-printed JSON, replacing the file
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    /// Sink writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Output path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TranscriptSink for JsonFileSink {
    type Error = std::io::Error;

    fn persist(&mut self, analysis: &TranscriptAnalysis) -> Result<(), Self::Error> {
        let json = serde_json::to_string_pretty(analysis).map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, json)?;
        info!(path = %self.path.display(), topics = analysis.topics.len(), "analysis written");
        Ok(())
    }
}
