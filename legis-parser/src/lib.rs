//! # legis-parser
//!
//! Structural parser for plain-text legal instruments.
//!
//! Pipeline
//!
//!     Source text goes through three stages, each in its own module:
//!
//!         - lexing: preprocessor markers are folded into each line, then every line is
//!           classified against the jurisdiction's keyword tables into a [LineType].
//!         - grammar: a recursive matcher walks the classified lines starting from an
//!           [EntryRule] and builds the structural tree.
//!         - ids: hierarchical identifiers are assigned to the finished tree.
//!
//!     The output tree lives in [ast] and is what the serializers in legis-babel consume.
//!
//! For the fluent assertions used throughout the test suites see the [testing] module.

pub mod ast;
pub mod error;
pub mod grammar;
pub mod ids;
pub mod lexing;
pub mod testing;

pub use ast::{
    ContainerLevel, Contents, DocType, Document, Node, NodeKind, PointKind, Preface, Schedule,
    ScheduleContainer, SectionLevel, SubsectionLevel, TiretDepth,
};
pub use error::ParseError;
pub use grammar::{guess_section_number_after_title, EntryRule, Fragment, ParseOptions, Parser};
pub use ids::{assign_document, assign_fragment, assign_node};
pub use lexing::{Jurisdiction, JurisdictionRules, Line, LineType, ESCAPE_CHAR};
