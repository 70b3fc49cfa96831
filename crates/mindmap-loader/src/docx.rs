//! Word-processor (`.docx`) extraction
//!
//! A `.docx` file is a zip container; the body text lives in
//! `word/document.xml` as WordprocessingML. Only run text is kept:
//! `<w:t>` contents, with `<w:tab/>` as a tab, `<w:br/>`/`<w:cr/>` as line
//! breaks and one newline per closed paragraph.

use crate::error::LoadError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract the body text of a `.docx` document held in memory
pub fn extract_docx(data: &[u8], name: &str) -> Result<String, LoadError> {
    let unreadable = |reason: String| LoadError::Unreadable {
        name: name.to_string(),
        reason,
    };

    let mut archive = zip::ZipArchive::new(Cursor::new(data))
        .map_err(|e| unreadable(format!("not a zip container: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| unreadable(format!("missing {}: {}", DOCUMENT_PART, e)))?
        .read_to_string(&mut xml)
        .map_err(|e| unreadable(format!("failed to read {}: {}", DOCUMENT_PART, e)))?;

    document_xml_to_text(&xml).map_err(unreadable)
}

/// Flatten WordprocessingML into plain text
pub fn document_xml_to_text(xml: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if e.name().as_ref() == b"w:t" {
                    in_text = true;
                }
            }
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => out.push('\t'),
                b"w:br" | b"w:cr" => out.push('\n'),
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| format!("bad text at {}: {}", reader.buffer_position(), e))?;
                out.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(format!(
                    "malformed XML at {}: {}",
                    reader.buffer_position(),
                    e
                ))
            }
        }
    }

    Ok(out)
}
