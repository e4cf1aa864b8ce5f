//! Error types for format operations

use legis_parser::ParseError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),

    /// Format does not support the requested operation
    #[error("{0}")]
    NotSupported(String),

    /// Input could not be read into a document
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Output could not be produced
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The tree handed to a serializer breaks a structural rule.
    ///
    /// This signals a bug upstream of the serializer, not bad input.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl From<ParseError> for FormatError {
    fn from(err: ParseError) -> Self {
        FormatError::ParseError(err.to_string())
    }
}

impl From<quick_xml::Error> for FormatError {
    fn from(err: quick_xml::Error) -> Self {
        FormatError::ParseError(format!("XML: {err}"))
    }
}
