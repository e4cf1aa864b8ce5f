//! Plain-text format
//!
//!     Parsing runs the grammar engine with the `act` entry rule and assigns identifiers;
//!     serialization writes the tree back with the jurisdiction's keywords, escaping every
//!     literal line that would otherwise be read as structure.
//!
//!     [unparse] is the inverse of the XML pipeline: it reads Akoma Ntoso and emits the text.

mod escaper;
mod serializer;

pub use escaper::Escaper;
pub use serializer::TextSerializer;

use legis_parser::{assign_document, Document, Jurisdiction, Parser};

use crate::error::FormatError;
use crate::format::Format;
use crate::formats::akn::read_document;

pub struct TextFormat {
    parser: Parser,
    id_prefix: String,
}

impl TextFormat {
    pub fn new(parser: Parser) -> Self {
        Self {
            parser,
            id_prefix: String::new(),
        }
    }

    /// Prefix prepended to every root-level identifier.
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }
}

impl Format for TextFormat {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Plain-text legal instrument with preprocessor markers"
    }

    fn file_extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        let document = self.parser.parse_act(source)?;
        Ok(assign_document(document, &self.id_prefix))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(TextSerializer::new(self.parser.jurisdiction()).serialize_document(doc))
    }
}

/// Reads Akoma Ntoso XML and renders it as escaped plain text.
pub fn unparse(xml: &str, jurisdiction: &Jurisdiction) -> Result<String, FormatError> {
    let document = read_document(xml)?;
    Ok(TextSerializer::new(jurisdiction).serialize_document(&document))
}
