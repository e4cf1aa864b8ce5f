//! Structural tree produced by the parser.
//!
//!     A [Document] has an optional [Preface], a body [Node] and optional schedules. Every
//!     structural element below the body is a [Node]; what kind of element it is lives in
//!     [NodeKind]. A node either carries flat content lines, or an optional intro followed
//!     by children, never both (see [Contents]).

mod document;
mod node;

pub use document::{DocType, Document, Preface, Schedule, ScheduleContainer};
pub use node::{
    ContainerLevel, Contents, Node, NodeKind, PointKind, SectionLevel, SubsectionLevel,
    TiretDepth,
};
