//! Line Classification
//!
//!     Every line gets exactly one [LineType]. A real line can look like more than one
//!     thing (an indented dash that also starts with a number, an escaped header), so the
//!     order of the checks in [classify_line] is what makes the result unambiguous:
//!
//!         1. blank lines
//!         2. escaped lines, which are always text
//!         3. indentation markers of level 2 and up: tirets
//!         4. indentation markers of level 0 or 1, and unmarked dash lines: dash lines
//!         5. jurisdiction keywords and numbering shapes
//!         6. everything else is text

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{ContainerLevel, TiretDepth};
use crate::lexing::jurisdiction::Jurisdiction;
use crate::lexing::markers::MarkedLine;

/// Leading character that forces a line to be read as plain text.
pub const ESCAPE_CHAR: char = '\\';

static LEADING_DASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:[–-]\s*)+").unwrap());
static DASH_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[–-](?:\s|$)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineType {
    Blank,
    /// Plain text. Escaped lines carry their text without the escape character.
    Text(String),
    Header {
        level: ContainerLevel,
        number: String,
        heading: Option<String>,
    },
    Schedule {
        number: Option<String>,
        title: Option<String>,
    },
    /// `Art. N.`
    StatuteUnit { number: String, rest: String },
    /// `§ N.`
    ParagraphSign { number: String, rest: String },
    /// `N.`
    Level1 { number: String, rest: String },
    /// `N)`
    Point { number: String, rest: String },
    /// `abc)`
    Letter { number: String, rest: String },
    /// Indentation marker of level 2 or deeper; text has its leading dashes stripped.
    Tiret { depth: TiretDepth, text: String },
    /// A dash line that may close an enumeration; text keeps its dash.
    Dash { marker: Option<u8>, text: String },
}

impl LineType {
    /// Short description used in mismatch reports.
    pub fn describe(&self) -> &'static str {
        match self {
            LineType::Blank => "blank line",
            LineType::Text(_) => "text",
            LineType::Header { level, .. } => level.name(),
            LineType::Schedule { .. } => "schedule",
            LineType::StatuteUnit { .. } => "statute level-0 unit",
            LineType::ParagraphSign { .. } => "paragraph sign unit",
            LineType::Level1 { .. } => "level-1 unit",
            LineType::Point { .. } => "point",
            LineType::Letter { .. } => "letter",
            LineType::Tiret { .. } => "tiret",
            LineType::Dash { .. } => "dash line",
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, LineType::Blank)
    }
}

/// Classifies a single marked line.
pub fn classify_line(jurisdiction: &Jurisdiction, line: &MarkedLine) -> LineType {
    let text = line.text.trim();

    if text.is_empty() && line.indent.is_none() {
        return LineType::Blank;
    }

    if line.indent.is_none() {
        if let Some(escaped) = text.strip_prefix(ESCAPE_CHAR) {
            return LineType::Text(escaped.to_string());
        }
    }

    match line.indent {
        Some(level) if level >= 2 => {
            return LineType::Tiret {
                depth: TiretDepth::from_depth(level - 1),
                text: LEADING_DASHES.replace(text, "").trim().to_string(),
            };
        }
        Some(level) => {
            return LineType::Dash {
                marker: Some(level),
                text: text.to_string(),
            };
        }
        None => {}
    }

    if DASH_LINE.is_match(text) {
        return LineType::Dash {
            marker: None,
            text: text.to_string(),
        };
    }

    jurisdiction
        .classify(text)
        .unwrap_or_else(|| LineType::Text(text.to_string()))
}
