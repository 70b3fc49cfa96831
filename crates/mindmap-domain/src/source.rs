//! Source module - the raw input reference a pipeline run starts from

use std::path::{Path, PathBuf};

/// Raw input for a single pipeline run
///
/// Uploads arrive as bytes with an optional original filename; local runs
/// reference a file on disk. The format hint for the loader is the extension
/// of whichever name is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// In-memory upload
    Bytes {
        /// File contents
        data: Vec<u8>,
        /// Original filename, used only as a format hint
        filename: Option<String>,
    },

    /// File on the local filesystem
    Path(PathBuf),
}

impl Source {
    /// Create a source from raw bytes
    pub fn from_bytes(data: impl Into<Vec<u8>>, filename: Option<String>) -> Self {
        Source::Bytes {
            data: data.into(),
            filename,
        }
    }

    /// Create a source that points at a file
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Source::Path(path.into())
    }

    /// Lower-cased file extension, if the source carries a name with one
    ///
    /// # Examples
    ///
    /// ```
    /// use mindmap_domain::Source;
    ///
    /// let source = Source::from_path("uploads/Standup.DOCX");
    /// assert_eq!(source.extension().as_deref(), Some("docx"));
    ///
    /// let source = Source::from_bytes(b"hello".to_vec(), None);
    /// assert_eq!(source.extension(), None);
    /// ```
    pub fn extension(&self) -> Option<String> {
        let name: &Path = match self {
            Source::Bytes { filename, .. } => Path::new(filename.as_deref()?),
            Source::Path(path) => path.as_path(),
        };
        name.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }

    /// Human-readable label for logging
    pub fn describe(&self) -> String {
        match self {
            Source::Bytes { data, filename } => match filename {
                Some(name) => format!("upload '{}' ({} bytes)", name, data.len()),
                None => format!("upload ({} bytes)", data.len()),
            },
            Source::Path(path) => format!("file '{}'", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_from_filename() {
        let source = Source::from_bytes(vec![1, 2, 3], Some("meeting.txt".to_string()));
        assert_eq!(source.extension().as_deref(), Some("txt"));
    }

    #[test]
    fn test_extension_missing() {
        let source = Source::from_bytes(vec![], Some("README".to_string()));
        assert_eq!(source.extension(), None);

        let source = Source::from_path("/tmp/transcript");
        assert_eq!(source.extension(), None);
    }

    #[test]
    fn test_extension_is_lowercased() {
        let source = Source::from_path("Notes.Docx");
        assert_eq!(source.extension().as_deref(), Some("docx"));
    }

    #[test]
    fn test_describe() {
        let source = Source::from_bytes(vec![0; 4], Some("a.txt".to_string()));
        assert_eq!(source.describe(), "upload 'a.txt' (4 bytes)");

        let source = Source::from_path("x/y.txt");
        assert!(source.describe().contains("y.txt"));
    }
}
