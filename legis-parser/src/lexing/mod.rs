//! Lexing
//!
//!     Lexing turns raw source into classified lines. It runs in two steps:
//!
//!         1. Marker normalization: preprocessor markers (indentation levels and
//!            superscripts) are recognized by a logos lexer and folded into a [MarkedLine].
//!         2. Classification: each marked line gets exactly one [LineType]. The order of
//!            the checks matters; see [classify_line].
//!
//!     Keyword and numbering shapes are not hard-coded here. They come from a
//!     [Jurisdiction], which compiles a [JurisdictionRules] table.

pub mod jurisdiction;
pub mod line_classification;
pub mod lines;
pub mod markers;

pub use jurisdiction::{Jurisdiction, JurisdictionRules};
pub use line_classification::{classify_line, LineType, ESCAPE_CHAR};
pub use lines::{tokenize_lines, Line};
pub use markers::{normalize_line, MarkedLine, MarkerToken};
