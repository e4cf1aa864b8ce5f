//! Escaping of literal lines
//!
//! A content line that the grammar engine would read as structure gets the escape character
//! prepended. The classifier strips it again on the way in, so the line comes back verbatim as
//! plain text. Two sources decide what needs escaping: a fixed set of generic triggers
//! (keywords, bare numbering, parenthesised numbering, table starts, leading dashes) and the
//! jurisdiction's own classifier.

use std::borrow::Cow;

use legis_parser::{Jurisdiction, ESCAPE_CHAR};
use once_cell::sync::Lazy;
use regex::RegexSet;

static GENERIC_TRIGGERS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"^(?i:chapter|part|schedule)\s+\S+",
        r"^(?:BODY|PREAMBLE|PREFACE)\b",
        r"^[0-9]+[a-z]*\.(?:\s|$)",
        r"^[0-9]+\.[0-9]+",
        r"^\([0-9]+[a-z]*\)",
        r"^\([a-z]+\)",
        r"^\{\|",
        r"^[–—-]",
        r"^@@INDENT[0-9]+@@",
    ])
    .unwrap()
});

pub struct Escaper<'a> {
    jurisdiction: &'a Jurisdiction,
}

impl<'a> Escaper<'a> {
    pub fn new(jurisdiction: &'a Jurisdiction) -> Self {
        Self { jurisdiction }
    }

    /// Whether `line` would be read as anything but plain text.
    ///
    /// Lines that already start with the escape character never need another one.
    pub fn needs_escape(&self, line: &str) -> bool {
        let text = line.trim();
        if text.is_empty() || text.starts_with(ESCAPE_CHAR) {
            return false;
        }
        GENERIC_TRIGGERS.is_match(text) || self.jurisdiction.classify(text).is_some()
    }

    pub fn escape_line<'l>(&self, line: &'l str) -> Cow<'l, str> {
        if self.needs_escape(line) {
            Cow::Owned(format!("{ESCAPE_CHAR}{}", line.trim_start()))
        } else {
            Cow::Borrowed(line)
        }
    }

    /// Escapes every line of `text` independently.
    pub fn escape_text(&self, text: &str) -> String {
        let mut out = text
            .lines()
            .map(|line| self.escape_line(line))
            .collect::<Vec<_>>()
            .join("\n");
        if text.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}
