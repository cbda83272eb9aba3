//! Document type.

use serde::{Deserialize, Serialize};

/// A named document split into lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Stable document identifier (the file name for directory corpora).
    pub name: String,

    /// The document's lines, without line terminators.
    pub lines: Vec<String>,
}

impl Document {
    /// Create a document from pre-split lines.
    pub fn new<S: Into<String>>(name: S, lines: Vec<String>) -> Self {
        Document {
            name: name.into(),
            lines,
        }
    }

    /// Create a document by splitting text on `\n` and `\r\n`.
    ///
    /// A trailing newline does not start an extra empty line, and empty text
    /// yields a document with zero lines. A `\r` ending the last line is
    /// dropped too.
    pub fn from_text<S: Into<String>>(name: S, text: &str) -> Self {
        Document {
            name: name.into(),
            lines: text
                .lines()
                .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
                .collect(),
        }
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if the document has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
