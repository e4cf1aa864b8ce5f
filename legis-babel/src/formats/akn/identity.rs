//! FRBR identity of a serialized document

use chrono::NaiveDate;

/// Caller supplied values behind the FRBR work, expression and manifestation blocks.
///
/// Nothing in here is derived from the document text. The generation date of the
/// manifestation is passed separately to the serializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Work URI, e.g. `/pl/act/2011/174`.
    pub frbr_uri: String,
    /// Country code carried by `FRBRcountry`.
    pub country: String,
    /// ISO 639-2 language code of the expression.
    pub language: String,
    pub work_date: NaiveDate,
    pub expression_date: NaiveDate,
    /// Reference to the authoring body of the work and expression.
    pub author: String,
    /// Reference to the producer of the manifestation.
    pub generator: String,
}

impl Identity {
    pub fn work_uri(&self) -> &str {
        &self.frbr_uri
    }

    pub fn expression_uri(&self) -> String {
        format!("{}/{}@", self.frbr_uri, self.language)
    }

    pub fn manifestation_uri(&self) -> String {
        self.expression_uri()
    }
}

impl Default for Identity {
    fn default() -> Self {
        let date = NaiveDate::from_ymd_opt(1980, 1, 1).unwrap_or_default();
        Self {
            frbr_uri: "/pl/act/1980/01".to_string(),
            country: "pl".to_string(),
            language: "pol".to_string(),
            work_date: date,
            expression_date: date,
            author: "#council".to_string(),
            generator: "#legis".to_string(),
        }
    }
}
