//! Parse errors.

use thiserror::Error;

/// Errors produced while turning source text into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No rule could consume the input at `line`.
    ///
    /// `line` is 1-based, `offset` is the byte offset of the line start. `expected` lists
    /// every rule that was tried at the furthest line any rule reached.
    #[error("line {line}: expected one of: {}; found `{found}`", .expected.join(", "))]
    GrammarMismatch {
        line: usize,
        offset: usize,
        expected: Vec<String>,
        found: String,
    },

    /// A jurisdiction table carried a pattern that does not compile.
    #[error("invalid jurisdiction rule `{name}`: {message}")]
    InvalidRules { name: String, message: String },

    #[error("unknown entry rule `{0}`")]
    UnknownRule(String),
}

impl ParseError {
    /// The 1-based line of a grammar mismatch.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::GrammarMismatch { line, .. } => Some(*line),
            _ => None,
        }
    }
}
