//! Grammar
//!
//!     The grammar is a hand-written recursive matcher over classified lines. Each
//!     [EntryRule] names a starting point: a whole act, a single element, or a schedule
//!     section. The matcher must consume the entire input from that rule; anything left
//!     over becomes a [ParseError::GrammarMismatch](crate::ParseError::GrammarMismatch).
//!
//!     Whether unit titles come before or after the unit number is the one thing the
//!     lines alone cannot tell; see [guess_section_number_after_title].

mod engine;
mod resolver;
mod rules;

pub use engine::{Fragment, ParseOptions, Parser};
pub use resolver::guess_section_number_after_title;
pub use rules::EntryRule;
