//! MindMap Transcript Loader
//!
//! Implements the text-extraction capability: turns an uploaded file or a
//! path on disk into the plain transcript text the pipeline starts from.
//!
//! # Supported formats
//!
//! - Plain text (`txt`, `md`, `text`, `log`, `vtt`, `srt`, `csv`)
//! - Word-processor documents (`docx`)
//! - Anything else goes through a fallback that accepts UTF-8 text and
//!   rejects binary content as an unsupported format
//!
//! # Example
//!
//! ```no_run
//! use mindmap_domain::{traits::TextExtractor, Source};
//! use mindmap_loader::FileLoader;
//!
//! let loader = FileLoader::new();
//! let text = loader.extract(&Source::from_path("standup.docx")).unwrap();
//! println!("{} characters", text.chars().count());
//! ```

#![warn(missing_docs)]

pub mod docx;
pub mod error;
pub mod plain;

pub use error::LoadError;

use mindmap_domain::traits::TextExtractor;
use mindmap_domain::Source;
use std::borrow::Cow;
use tracing::{debug, info};

/// Extensions decoded as plain UTF-8 text
pub const PLAIN_TEXT_EXTENSIONS: &[&str] = &["txt", "md", "text", "log", "vtt", "srt", "csv"];

/// Extractor chosen for a source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// UTF-8 text
    PlainText,
    /// Office Open XML word-processor document
    Docx,
    /// Unknown or missing extension
    Fallback,
}

impl Format {
    /// Pick an extractor from a lower-cased extension hint
    pub fn from_extension(extension: Option<&str>) -> Self {
        match extension {
            Some("docx") => Format::Docx,
            Some(ext) if PLAIN_TEXT_EXTENSIONS.contains(&ext) => Format::PlainText,
            _ => Format::Fallback,
        }
    }
}

/// Default [`TextExtractor`] used by the pipeline
#[derive(Debug, Clone, Default)]
pub struct FileLoader {
    _private: (),
}

impl FileLoader {
    /// Create a loader
    pub fn new() -> Self {
        Self::default()
    }

    fn read_source<'a>(&self, source: &'a Source) -> Result<Cow<'a, [u8]>, LoadError> {
        match source {
            Source::Bytes { data, .. } => Ok(Cow::Borrowed(data.as_slice())),
            Source::Path(path) => std::fs::read(path)
                .map(Cow::Owned)
                .map_err(|e| LoadError::Io {
                    path: path.display().to_string(),
                    source: e,
                }),
        }
    }
}

impl TextExtractor for FileLoader {
    type Error = LoadError;

    fn extract(&self, source: &Source) -> Result<String, Self::Error> {
        let name = source.describe();
        let extension = source.extension();
        let format = Format::from_extension(extension.as_deref());
        debug!(source = %name, ?format, "extracting text");

        let data = self.read_source(source)?;
        let text = match format {
            Format::PlainText => plain::extract_plain(&data, &name)?,
            Format::Docx => docx::extract_docx(&data, &name)?,
            Format::Fallback => {
                if !plain::looks_like_text(&data) {
                    return Err(LoadError::UnsupportedFormat(match extension {
                        Some(ext) => format!("'.{}' files are not supported ({})", ext, name),
                        None => format!("binary content without a known extension ({})", name),
                    }));
                }
                plain::extract_plain(&data, &name)?
            }
        };

        if text.trim().is_empty() {
            return Err(LoadError::Empty(name));
        }

        info!(source = %name, chars = text.chars().count(), "transcript loaded");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::from_extension(Some("docx")), Format::Docx);
        assert_eq!(Format::from_extension(Some("txt")), Format::PlainText);
        assert_eq!(Format::from_extension(Some("vtt")), Format::PlainText);
        assert_eq!(Format::from_extension(Some("pdf")), Format::Fallback);
        assert_eq!(Format::from_extension(None), Format::Fallback);
    }

    #[test]
    fn test_bytes_source_plain_text() {
        let loader = FileLoader::new();
        let source = Source::from_bytes(b"Alice: hi\nBob: hello".to_vec(), Some("m.txt".into()));
        assert_eq!(loader.extract(&source).unwrap(), "Alice: hi\nBob: hello");
    }

    #[test]
    fn test_fallback_accepts_text_without_extension() {
        let loader = FileLoader::new();
        let source = Source::from_bytes(b"Carol: ok".to_vec(), None);
        assert_eq!(loader.extract(&source).unwrap(), "Carol: ok");
    }

    #[test]
    fn test_fallback_rejects_binary() {
        let loader = FileLoader::new();
        let source = Source::from_bytes(vec![0x89, b'P', b'N', b'G', 0, 0], Some("x.png".into()));
        assert!(matches!(
            loader.extract(&source),
            Err(LoadError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let loader = FileLoader::new();
        let source = Source::from_bytes(b"  \n\t ".to_vec(), Some("blank.txt".into()));
        assert!(matches!(loader.extract(&source), Err(LoadError::Empty(_))));
    }
}
