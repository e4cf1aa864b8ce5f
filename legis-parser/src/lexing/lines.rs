//! Source splitting.

use crate::lexing::jurisdiction::Jurisdiction;
use crate::lexing::line_classification::{classify_line, LineType};
use crate::lexing::markers::normalize_line;

/// One classified source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 0-based line index.
    pub index: usize,
    /// Byte offset of the line start in the source.
    pub offset: usize,
    /// Marker-free, trimmed text of the whole line.
    pub text: String,
    pub line_type: LineType,
}

impl Line {
    /// Text as it contributes to a content block: unescaped for text lines, whole otherwise.
    pub fn block_text(&self) -> &str {
        match &self.line_type {
            LineType::Text(text) => text,
            _ => &self.text,
        }
    }
}

/// Splits `source` into lines and classifies each of them.
pub fn tokenize_lines(jurisdiction: &Jurisdiction, source: &str) -> Vec<Line> {
    let mut offset = 0;
    source
        .split_inclusive('\n')
        .enumerate()
        .map(|(index, raw)| {
            let start = offset;
            offset += raw.len();
            let marked = normalize_line(raw.trim_end_matches(['\n', '\r']));
            let line_type = classify_line(jurisdiction, &marked);
            Line {
                index,
                offset: start,
                text: marked.text.trim().to_string(),
                line_type,
            }
        })
        .collect()
}
