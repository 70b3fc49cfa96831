//! Recursive character splitting of transcripts into overlapping chunks
//!
//! The splitter looks for the coarsest separator present in the text
//! (paragraph, line, sentence, word), cuts there, and recurses into any
//! piece that is still too long with the next finer separator. As a last
//! resort it cuts between characters. Pieces are then greedily packed into
//! chunks of at most `chunk_size` characters, carrying up to
//! `chunk_overlap` trailing characters into the next chunk.
//!
//! Lengths are counted in `char`s. The output is a pure function of the
//! input text and the three parameters.

use tracing::warn;

/// Separators in preference order; `""` means "between any two characters"
pub const DEFAULT_SEPARATORS: &[&str] = &["\n\n", "\n", ". ", " ", ""];

/// Splits text into bounded, overlapping chunks
#[derive(Debug, Clone)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: Vec<String>,
}

impl TextSplitter {
    /// Create a splitter with the default separators
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replace the separator list (coarsest first)
    pub fn with_separators<I, S>(mut self, separators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.separators = separators.into_iter().map(Into::into).collect();
        self
    }

    /// Maximum chunk length in characters
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Split the given text
    ///
    /// Chunks are whitespace-trimmed and never empty; blank input yields no
    /// chunks.
    pub fn split(&self, text: &str) -> Vec<String> {
        let separators: Vec<&str> = self.separators.iter().map(String::as_str).collect();
        self.split_recursive(text, &separators)
    }

    fn split_recursive(&self, text: &str, separators: &[&str]) -> Vec<String> {
        let mut final_chunks = Vec::new();

        // Coarsest separator that actually occurs; "" always matches
        let mut separator = separators.last().copied().unwrap_or("");
        let mut finer: &[&str] = &[];
        for (i, candidate) in separators.iter().enumerate() {
            if candidate.is_empty() {
                separator = candidate;
                break;
            }
            if text.contains(candidate) {
                separator = candidate;
                finer = &separators[i + 1..];
                break;
            }
        }

        let mut good_splits: Vec<&str> = Vec::new();
        for piece in split_keeping_separator(text, separator) {
            if char_len(piece) < self.chunk_size {
                good_splits.push(piece);
                continue;
            }

            if !good_splits.is_empty() {
                final_chunks.extend(self.merge_splits(&good_splits));
                good_splits.clear();
            }
            if finer.is_empty() {
                if let Some(chunk) = trimmed(piece) {
                    final_chunks.push(chunk);
                }
            } else {
                final_chunks.extend(self.split_recursive(piece, finer));
            }
        }

        if !good_splits.is_empty() {
            final_chunks.extend(self.merge_splits(&good_splits));
        }

        final_chunks
    }

    /// Greedily pack pieces into chunks, carrying overlap forward
    fn merge_splits(&self, splits: &[&str]) -> Vec<String> {
        let mut docs = Vec::new();
        let mut current: std::collections::VecDeque<(&str, usize)> =
            std::collections::VecDeque::new();
        let mut total = 0usize;

        for &piece in splits {
            let len = char_len(piece);

            if total + len > self.chunk_size {
                if total > self.chunk_size {
                    warn!(
                        "Created a chunk of size {}, which is longer than the specified {}",
                        total, self.chunk_size
                    );
                }
                if !current.is_empty() {
                    if let Some(doc) = join_pieces(&current) {
                        docs.push(doc);
                    }
                    // Drop leading pieces until what is left fits as overlap
                    // and leaves room for the incoming piece
                    while total > self.chunk_overlap
                        || (total + len > self.chunk_size && total > 0)
                    {
                        match current.pop_front() {
                            Some((_, dropped)) => total -= dropped,
                            None => break,
                        }
                    }
                }
            }

            current.push_back((piece, len));
            total += len;
        }

        if let Some(doc) = join_pieces(&current) {
            docs.push(doc);
        }
        docs
    }
}

impl Default for TextSplitter {
    /// 1500 characters with 200 characters of overlap
    fn default() -> Self {
        Self::new(1500, 200)
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn trimmed(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

fn join_pieces(pieces: &std::collections::VecDeque<(&str, usize)>) -> Option<String> {
    let joined: String = pieces.iter().map(|(piece, _)| *piece).collect();
    trimmed(&joined)
}

/// Split on `separator`, keeping each separator at the start of the piece
/// that follows it. Empty pieces are dropped. An empty separator splits into
/// single characters.
fn split_keeping_separator<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        return text
            .char_indices()
            .map(|(i, c)| &text[i..i + c.len_utf8()])
            .collect();
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    for (pos, _) in text.match_indices(separator) {
        if pos > start {
            pieces.push(&text[start..pos]);
        }
        start = pos;
    }
    if start < text.len() {
        pieces.push(&text[start..]);
    }
    pieces.retain(|p| !p.is_empty());
    pieces
}
