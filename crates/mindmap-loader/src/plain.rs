//! Plain-text extraction

use crate::error::LoadError;

const UTF8_BOM: &str = "\u{feff}";

/// Decode UTF-8 text, stripping a leading byte-order mark
pub fn extract_plain(data: &[u8], name: &str) -> Result<String, LoadError> {
    let text = std::str::from_utf8(data).map_err(|e| LoadError::Unreadable {
        name: name.to_string(),
        reason: format!("not valid UTF-8: {}", e),
    })?;
    Ok(text.strip_prefix(UTF8_BOM).unwrap_or(text).to_string())
}

/// Heuristic used by the fallback extractor: valid UTF-8 with no NUL bytes
pub fn looks_like_text(data: &[u8]) -> bool {
    !data.contains(&0) && std::str::from_utf8(data).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bom_is_stripped() {
        let data = "\u{feff}Alice: hello".as_bytes();
        assert_eq!(extract_plain(data, "a.txt").unwrap(), "Alice: hello");
    }

    #[test]
    fn test_invalid_utf8_is_unreadable() {
        let result = extract_plain(&[0xff, 0xfe, 0x41], "bad.txt");
        assert!(matches!(result, Err(LoadError::Unreadable { .. })));
    }

    #[test]
    fn test_looks_like_text() {
        assert!(looks_like_text(b"plain words"));
        assert!(!looks_like_text(b"bin\0ary"));
        assert!(!looks_like_text(&[0xc3, 0x28]));
    }
}
