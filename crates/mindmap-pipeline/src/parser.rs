//! Parse structured LLM output into domain values

use crate::error::PipelineError;
use mindmap_domain::{ContentItem, QualityScore, Topic};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

#[derive(Deserialize)]
struct QualityCheckOutput {
    quality_check: Value,
}

#[derive(Deserialize)]
struct ParticipantsOutput {
    participants: Vec<Value>,
}

#[derive(Deserialize)]
struct TopicsOutput {
    topics: Vec<Value>,
}

/// Extract JSON from response, handling markdown code blocks
pub fn extract_json(response: &str) -> Result<&str, PipelineError> {
    let trimmed = response.trim();

    // LLMs sometimes wrap JSON in markdown code blocks
    if let Some(fenced) = trimmed.strip_prefix("```") {
        // Drop the info string (```json) up to the first newline
        let body = match fenced.find('\n') {
            Some(pos) => &fenced[pos + 1..],
            None => {
                return Err(PipelineError::InvalidResponse(
                    "Empty code block".to_string(),
                ))
            }
        };
        let body = body.trim_end();
        Ok(body.strip_suffix("```").unwrap_or(body).trim())
    } else {
        // Already raw JSON
        Ok(trimmed)
    }
}

/// Parse the Quality Gate answer `{ "quality_check": n }`
///
/// Whole numbers outside [1, 10] are clipped into range with a warning.
/// Fractional or non-numeric scores are rejected.
pub fn parse_quality(response: &str) -> Result<QualityScore, PipelineError> {
    let output: QualityCheckOutput = serde_json::from_str(extract_json(response)?)?;

    let raw = match &output.quality_check {
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(v), _) => v,
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => f as i64,
            _ => {
                return Err(PipelineError::InvalidResponse(format!(
                    "quality_check must be a whole number, got {}",
                    n
                )))
            }
        },
        other => {
            return Err(PipelineError::InvalidResponse(format!(
                "quality_check must be a number, got {}",
                other
            )))
        }
    };

    QualityScore::new(raw).or_else(|e| {
        warn!("{}; clipping into range", e);
        Ok(QualityScore::clamped(raw))
    })
}

/// Parse the Participant Extractor answer `{ "participants": [string] }`
///
/// Non-string and blank entries are dropped. Names are kept verbatim.
pub fn parse_participants(response: &str) -> Result<Vec<String>, PipelineError> {
    let output: ParticipantsOutput = serde_json::from_str(extract_json(response)?)?;

    let mut names = Vec::with_capacity(output.participants.len());
    for (idx, value) in output.participants.into_iter().enumerate() {
        match value {
            Value::String(name) if !name.trim().is_empty() => names.push(name),
            Value::String(_) => warn!("Participant {} is blank, skipping", idx),
            other => warn!("Participant {} is not a string ({}), skipping", idx, other),
        }
    }
    Ok(names)
}

/// Parse the Topic Extractor answer
///
/// Candidates without a usable title and content items without text are
/// skipped; the rest of the answer is kept.
pub fn parse_topics(response: &str) -> Result<Vec<Topic>, PipelineError> {
    let output: TopicsOutput = serde_json::from_str(extract_json(response)?)?;

    let mut topics = Vec::with_capacity(output.topics.len());
    for (idx, topic_json) in output.topics.iter().enumerate() {
        match parse_topic_json(topic_json) {
            Ok(topic) => topics.push(topic),
            Err(e) => warn!("Failed to parse topic {}: {}", idx, e),
        }
    }
    Ok(topics)
}

/// Parse a single topic from JSON
fn parse_topic_json(json: &Value) -> Result<Topic, String> {
    let obj = json
        .as_object()
        .ok_or_else(|| "Topic is not a JSON object".to_string())?;

    let title = obj
        .get("title")
        .and_then(|v| v.as_str())
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| "Missing or blank 'title'".to_string())?;

    let mut topic = Topic::new(title);

    if let Some(items) = obj.get("content").and_then(|v| v.as_array()) {
        for (idx, item) in items.iter().enumerate() {
            match parse_content_json(item) {
                Ok(content) => topic.content.push(content),
                Err(e) => warn!("Topic '{}': skipping content {}: {}", title, idx, e),
            }
        }
    }

    if let Some(connected) = obj.get("connected_topics").and_then(|v| v.as_array()) {
        topic.connected_topics.extend(
            connected
                .iter()
                .filter_map(|v| v.as_str())
                .filter(|t| !t.trim().is_empty())
                .map(str::to_string),
        );
    }

    Ok(topic)
}

fn parse_content_json(json: &Value) -> Result<ContentItem, String> {
    let obj = json
        .as_object()
        .ok_or_else(|| "Content is not a JSON object".to_string())?;

    let text = obj
        .get("text")
        .and_then(|v| v.as_str())
        .ok_or_else(|| "Missing or invalid 'text'".to_string())?;

    let speaker = obj.get("speaker").and_then(|v| v.as_str());

    Ok(ContentItem::new(speaker, text))
}
