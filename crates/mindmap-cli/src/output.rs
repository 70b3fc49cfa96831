//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use mindmap_domain::{Topic, TranscriptAnalysis};
use mindmap_pipeline::RunMetadata;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a finished analysis.
    pub fn format_analysis(&self, analysis: &TranscriptAnalysis, metadata: &RunMetadata) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(analysis)?),
            OutputFormat::Summary => Ok(self.format_summary(analysis, metadata)),
        }
    }

    fn format_summary(&self, analysis: &TranscriptAnalysis, metadata: &RunMetadata) -> String {
        let mut out = String::new();

        out.push_str(&self.info(&format!(
            "{} clean pass(es), {} chunk(s), {} mode, model {}, {} ms",
            metadata.clean_iterations,
            metadata.chunk_count,
            metadata.topic_mode.as_str(),
            metadata.model_name,
            metadata.processing_time_ms
        )));
        out.push_str("\n\n");

        let heading = self.colorize("Participants", "cyan");
        if analysis.participants.is_empty() {
            out.push_str(&format!("{}: {}\n\n", heading, self.colorize("none found", "yellow")));
        } else {
            out.push_str(&format!("{}: {}\n\n", heading, analysis.participants.join(", ")));
        }

        out.push_str(&self.format_topics_table(&analysis.topics));
        out
    }

    /// Format topics as a table.
    fn format_topics_table(&self, topics: &[Topic]) -> String {
        if topics.is_empty() {
            return self.colorize("No topics found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Topic", "Quotes", "Speakers", "Connected topics"]);

        for topic in topics {
            let mut speakers: Vec<&str> = Vec::new();
            for speaker in topic.content.iter().filter_map(|c| c.speaker.as_deref()) {
                if !speakers.contains(&speaker) {
                    speakers.push(speaker);
                }
            }
            builder.push_record([
                topic.title.clone(),
                topic.content.len().to_string(),
                speakers.join(", "),
                topic.connected_topics.join(", "),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindmap_domain::ContentItem;
    use mindmap_pipeline::TopicMode;

    fn sample() -> (TranscriptAnalysis, RunMetadata) {
        let analysis = TranscriptAnalysis {
            transcript: "Alice: we need budget.".to_string(),
            participants: vec!["Alice".to_string(), "Bob".to_string()],
            topics: vec![Topic::new("Budget")
                .with_content(ContentItem::new(Some("Alice"), "we need budget"))
                .with_content(ContentItem::new(Some("Alice"), "more budget"))
                .with_connection("Hiring")],
        };
        let metadata = RunMetadata {
            model_name: "llama3.1".to_string(),
            clean_iterations: 2,
            chunk_count: 1,
            topic_mode: TopicMode::Chunked,
            processing_time_ms: 42,
            timestamp: 0,
        };
        (analysis, metadata)
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let (analysis, metadata) = sample();
        let output = formatter.format_analysis(&analysis, &metadata).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["participants"][1], "Bob");
        assert_eq!(value["topics"][0]["title"], "Budget");
    }

    #[test]
    fn test_summary_format() {
        let formatter = Formatter::new(OutputFormat::Summary, false);
        let (analysis, metadata) = sample();
        let output = formatter.format_analysis(&analysis, &metadata).unwrap();
        assert!(output.contains("Participants: Alice, Bob"));
        assert!(output.contains("Connected topics"));
        assert!(output.contains("Budget"));
        assert!(output.contains("Hiring"));
        assert!(output.contains("2 clean pass(es)"));
    }

    #[test]
    fn test_summary_without_topics() {
        let formatter = Formatter::new(OutputFormat::Summary, false);
        let (mut analysis, metadata) = sample();
        analysis.topics.clear();
        analysis.participants.clear();
        let output = formatter.format_analysis(&analysis, &metadata).unwrap();
        assert!(output.contains("No topics found."));
        assert!(output.contains("none found"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Summary, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.warning("w"), "⚠ w");
    }
}
