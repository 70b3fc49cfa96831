//! LLM prompt engineering for each pipeline stage
//!
//! Every stage sends a fixed system instruction plus a user payload that
//! embeds the text under analysis. Structured stages also send the JSON
//! Schema of the answer they expect.

/// A fully built request for the generation capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Fixed instruction for the stage
    pub system: &'static str,
    /// Payload embedding the transcript or chunk
    pub user: String,
    /// JSON Schema of the expected answer; `None` for free text
    pub schema: Option<&'static str>,
}

impl Prompt {
    /// Cleaner request (free text)
    pub fn clean(transcript: &str) -> Self {
        Self {
            system: CLEAN_TRANSCRIPT_SYSTEM,
            user: format!(
                "Here is the transcript that you need to clean:\n---\n{}\n---\nReturn the cleaned transcript.",
                transcript
            ),
            schema: None,
        }
    }

    /// Quality gate request
    pub fn quality_check(transcript: &str) -> Self {
        Self {
            system: QUALITY_CHECK_SYSTEM,
            user: format!(
                "Here is the transcript that you need to check the quality of:\n---\n{}\n---\n\
                 Return a whole number rating between 1 and 10 for the quality of the transcript.\n\
                 1 is the lowest quality and 10 is the highest quality.",
                transcript
            ),
            schema: Some(QUALITY_CHECK_SCHEMA),
        }
    }

    /// Participant extraction request for one chunk
    pub fn participants(chunk: &str) -> Self {
        Self {
            system: IDENTIFY_PARTICIPANTS_SYSTEM,
            user: format!(
                "Here is the transcript that you need to identify the participants of:\n---\n{}\n---\n\
                 Identify all participants who spoke and had a significant role in the meeting.",
                chunk
            ),
            schema: Some(PARTICIPANTS_SCHEMA),
        }
    }

    /// Topic extraction request for one chunk or the whole transcript
    pub fn topics(text: &str) -> Self {
        Self {
            system: IDENTIFY_TOPICS_SYSTEM,
            user: format!(
                "Here is the transcript that you need to identify the topics of:\n---\n{}\n---\n\n\
                 For each topic, provide:\n\
                 - A concise, descriptive title (maximum 4 words)\n\
                 - Relevant content segments with speaker and text\n\
                 - Connected topic titles that relate to this topic\n\n\
                 Ensure each content segment belongs to exactly one topic, and use only \
                 information directly from the transcript.",
                text
            ),
            schema: Some(TOPICS_SCHEMA),
        }
    }
}

/// System instruction for the Cleaner
pub const CLEAN_TRANSCRIPT_SYSTEM: &str = r#"In this context you will be given a piece of text that is a transcription of a meeting.
Your task is to clean the transcript by:
- Removing timestamps and platform-specific noise. Leave speaker labels.
- Correcting grammar, punctuation, and capitalization
- Removing filler words (um, uh, etc.) and transcription errors
- Handling different formats (Zoom, Teams, Discord, etc.)
- Improving readability while preserving meaning
- Improving clarity and coherence"#;

/// System instruction for the Quality Gate
pub const QUALITY_CHECK_SYSTEM: &str = r#"You are an expert in English grammar and punctuation.
In this context you will be given a piece of text that is a transcription of a meeting.
Your task is to check the quality of the transcript by:
- Checking for grammatical errors
- Checking for punctuation errors
- Checking for capitalization errors
- Checking for spelling errors
- Checking for clarity and coherence
- Checking for completeness
- Checking for formatting"#;

/// System instruction for the Participant Extractor
pub const IDENTIFY_PARTICIPANTS_SYSTEM: &str = "You are analyzing a transcript of a meeting. \
Identify the participants who spoke and had a significant role in the meeting.";

/// System instruction for the Topic Extractor
pub const IDENTIFY_TOPICS_SYSTEM: &str = r#"You are analyzing a transcript of a meeting. Identify the topics, supporting quotes and connections between topics that were discussed in the meeting.
For topic organization:
- Each topic should represent a single, coherent theme or discussion point
- Create concise titles (maximum 4 words) that capture the essence of each topic
- Extract relevant content segments that support each topic
- Identify logical connections between related topics

Quality requirements:
- Topic titles should be unique and descriptive (e.g., "Client Onboarding Process" not just "Client")
- Each content segment should belong to exactly one topic
- Topics can be connected if they're contextually related but still distinct
- Use only information directly from the transcript"#;

/// `{ "quality_check": integer }`
pub const QUALITY_CHECK_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "quality_check": { "type": "integer" }
  },
  "required": ["quality_check"],
  "additionalProperties": false
}"#;

/// `{ "participants": [string] }`
pub const PARTICIPANTS_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "participants": { "type": "array", "items": { "type": "string" } }
  },
  "required": ["participants"],
  "additionalProperties": false
}"#;

/// `{ "topics": [{ title, content: [{ speaker, text }], connected_topics }] }`
pub const TOPICS_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "topics": {
      "type": "array",
      "items": {
        "type": "object",
        "properties": {
          "title": { "type": "string" },
          "content": {
            "type": "array",
            "items": {
              "type": "object",
              "properties": {
                "speaker": { "type": ["string", "null"] },
                "text": { "type": "string" }
              },
              "required": ["speaker", "text"],
              "additionalProperties": false
            }
          },
          "connected_topics": { "type": "array", "items": { "type": "string" } }
        },
        "required": ["title", "content", "connected_topics"],
        "additionalProperties": false
      }
    }
  },
  "required": ["topics"],
  "additionalProperties": false
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_prompt_is_free_text() {
        let prompt = Prompt::clean("Alice: um hi");
        assert_eq!(prompt.system, CLEAN_TRANSCRIPT_SYSTEM);
        assert!(prompt.user.contains("Alice: um hi"));
        assert!(prompt.schema.is_none());
    }

    #[test]
    fn test_structured_prompts_carry_schema() {
        assert_eq!(Prompt::quality_check("t").schema, Some(QUALITY_CHECK_SCHEMA));
        assert_eq!(Prompt::participants("t").schema, Some(PARTICIPANTS_SCHEMA));
        assert_eq!(Prompt::topics("t").schema, Some(TOPICS_SCHEMA));
    }

    #[test]
    fn test_topic_prompt_includes_rules() {
        let prompt = Prompt::topics("Bob: budget");
        assert!(prompt.user.contains("Bob: budget"));
        assert!(prompt.user.contains("maximum 4 words"));
        assert!(prompt.system.contains("exactly one topic"));
    }

    #[test]
    fn test_system_instructions_are_distinct() {
        // Scripted providers route calls by system-instruction fragments
        assert!(!QUALITY_CHECK_SYSTEM.contains("clean the transcript"));
        assert!(!IDENTIFY_TOPICS_SYSTEM.contains("Identify the participants"));
        assert!(!IDENTIFY_PARTICIPANTS_SYSTEM.contains("Identify the topics"));
    }

    #[test]
    fn test_schemas_are_valid_json() {
        for schema in [QUALITY_CHECK_SCHEMA, PARTICIPANTS_SCHEMA, TOPICS_SCHEMA] {
            let value: serde_json::Value = serde_json::from_str(schema).unwrap();
            assert_eq!(value["type"], "object");
        }
    }

    fn assert_strict_compatible(value: &serde_json::Value) {
        if let Some(map) = value.as_object() {
            for keyword in ["minimum", "maximum", "minItems", "maxItems", "pattern", "format"] {
                assert!(!map.contains_key(keyword), "unsupported keyword {}", keyword);
            }
            if map.get("type") == Some(&serde_json::json!("object")) {
                let properties = map["properties"].as_object().unwrap();
                let required: Vec<&str> = map["required"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|r| r.as_str().unwrap())
                    .collect();
                assert_eq!(map["additionalProperties"], false);
                for key in properties.keys() {
                    assert!(required.contains(&key.as_str()), "{} not required", key);
                }
            }
            map.values().for_each(assert_strict_compatible);
        }
    }

    #[test]
    fn test_schemas_fit_strict_structured_output() {
        for schema in [QUALITY_CHECK_SCHEMA, PARTICIPANTS_SCHEMA, TOPICS_SCHEMA] {
            let value: serde_json::Value = serde_json::from_str(schema).unwrap();
            assert_strict_compatible(&value);
        }
    }
}
