//! Akoma Ntoso 2.0 format
//!
//!     Serializes documents as `akomaNtoso/act` with an FRBR identification block, the preface,
//!     the body and one `component` per schedule, and reads such documents back.
//!
//!     Output is deterministic: the FRBR values come from an [Identity] and the manifestation
//!     date is a plain field set by the caller, so the same tree always yields the same bytes.

mod identity;
mod reader;
mod serializer;

pub use identity::Identity;
pub use reader::read_document;
pub use serializer::{
    serialize_document, serialize_node, serialize_preface, serialize_schedules, AKN_NAMESPACE,
};

use chrono::NaiveDate;
use legis_parser::Document;

use crate::error::FormatError;
use crate::format::Format;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AknFormat {
    pub identity: Identity,
    /// Date written into the manifestation block.
    pub generation_date: NaiveDate,
}

impl AknFormat {
    pub fn new(identity: Identity, generation_date: NaiveDate) -> Self {
        Self {
            identity,
            generation_date,
        }
    }
}

impl Default for AknFormat {
    fn default() -> Self {
        let identity = Identity::default();
        let generation_date = identity.expression_date;
        Self::new(identity, generation_date)
    }
}

impl Format for AknFormat {
    fn name(&self) -> &str {
        "akn"
    }

    fn description(&self) -> &str {
        "Akoma Ntoso 2.0 XML"
    }

    fn file_extensions(&self) -> &[&str] {
        &["xml", "akn"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        read_document(source)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serialize_document(doc, &self.identity, self.generation_date)
    }
}
