//! Format interoperability for legis documents
//!
//!     This crate converts between the structural tree built by legis-parser and the
//!     formats documents travel in:
//!
//!         - akn: Akoma Ntoso 2.0 XML, both written and read back
//!         - text: the plain-text input format, parsed with legis-parser and written back
//!           with escaping so it re-parses to the same structure
//!         - json: a serde dump of the tree, for debugging and downstream tooling
//!
//! Architecture
//!
//!     - Format trait: uniform interface for all formats (parsing and/or serialization)
//!     - FormatRegistry: discovery and selection of formats by name
//!     - Format implementations: one module per format under `formats/`
//!
//!     This is a pure lib: nothing here prints, reads environment variables or touches the
//!     filesystem. The CLI owns all of that.
//!
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── akn                 # identity, serializer, reader
//!     │   ├── text                # escaper, serializer
//!     │   └── json.rs
//!     └── lib.rs

pub mod error;
pub mod format;
pub mod formats;
pub mod registry;

pub use error::FormatError;
pub use format::Format;
pub use formats::akn::{AknFormat, Identity};
pub use formats::json::JsonFormat;
pub use formats::text::{unparse, Escaper, TextFormat, TextSerializer};
pub use registry::FormatRegistry;
