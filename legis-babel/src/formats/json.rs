//! JSON dump of the document tree
//!
//! Serialize-only. The output mirrors the tree types one to one and is meant for debugging
//! and for tools that want the structure without going through XML.

use crate::error::FormatError;
use crate::format::Format;
use legis_parser::Document;

pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "JSON dump of the document tree"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_json::to_string_pretty(doc)
            .map_err(|err| FormatError::SerializationError(err.to_string()))
    }
}
