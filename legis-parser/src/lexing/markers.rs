//! Preprocessor marker lexer.
//!
//! Upstream converters mark list indentation with `@@INDENT<n>@@` at the start of a line and
//! wrap superscripts in `@@SUPERSCRIPT@@ … ##SUPERSCRIPT##`. Both are folded away here so the
//! classifier only ever sees plain text plus an optional indentation level.

use logos::Logos;

#[derive(Logos, Debug, PartialEq, Clone)]
pub enum MarkerToken {
    #[regex(r"@@INDENT[0-9]+@@", indent_level)]
    Indent(u8),

    #[token("@@SUPERSCRIPT@@")]
    SuperscriptStart,

    #[token("##SUPERSCRIPT##")]
    SuperscriptEnd,

    #[regex(r"[^@#]+")]
    Text,

    #[token("@")]
    At,

    #[token("#")]
    Hash,
}

fn indent_level(lex: &mut logos::Lexer<MarkerToken>) -> Option<u8> {
    let slice = lex.slice();
    slice
        .strip_prefix("@@INDENT")?
        .strip_suffix("@@")?
        .parse()
        .ok()
}

/// A line with its markers folded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkedLine {
    /// Level of a leading `@@INDENT<n>@@` marker.
    pub indent: Option<u8>,
    pub text: String,
}

/// Folds the markers of a single line.
///
/// Only a marker at the very start of the line counts as indentation; anywhere else it is
/// kept as literal text. Superscripts become `^` followed by the superscripted run.
pub fn normalize_line(raw: &str) -> MarkedLine {
    let mut indent = None;
    let mut text = String::with_capacity(raw.len());
    let mut lexer = MarkerToken::lexer(raw);
    while let Some(token) = lexer.next() {
        match token {
            Ok(MarkerToken::Indent(level)) if indent.is_none() && text.is_empty() => {
                indent = Some(level);
            }
            Ok(MarkerToken::SuperscriptStart) => text.push('^'),
            Ok(MarkerToken::SuperscriptEnd) => {}
            _ => text.push_str(lexer.slice()),
        }
    }
    MarkedLine { indent, text }
}
