//! Format registry
//!
//! Formats are keyed by name (`akn`, `text`, `json`). Besides lookup, the registry is
//! where a conversion is planned: [FormatRegistry::for_extension] picks the input format
//! for a file, [FormatRegistry::convert] runs one format's reader into another's writer
//! with a [Document] in between, refusing formats that lack the capability asked of them.
//!
//! [FormatRegistry::with_defaults] wires the built-in formats with the Polish vocabulary,
//! a default [crate::Identity] and no id prefix. Applications that read a configuration
//! build their own registry with [FormatRegistry::new] and [FormatRegistry::register].

use crate::error::FormatError;
use crate::format::Format;
use legis_parser::{Document, Jurisdiction, Parser};
use std::collections::HashMap;

/// Registry of document formats
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::with_defaults();
/// let xml = registry.convert(source, "text", "akn")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Registers `format` under its name, replacing any format of the same name.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Format names, sorted.
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// The format claiming `extension`, compared case-insensitively.
    ///
    /// When several formats claim the same extension the first by name wins. `None` leaves
    /// the fallback to the caller (the CLI reads unknown extensions as plain text).
    pub fn for_extension(&self, extension: &str) -> Option<&dyn Format> {
        let mut names = self.list_formats();
        names.retain(|name| {
            self.formats[name]
                .file_extensions()
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(extension))
        });
        names.first().map(|name| self.formats[name].as_ref())
    }

    /// Reads `source` into a [Document] with the format named `format`.
    pub fn parse(&self, source: &str, format: &str) -> Result<Document, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "Format '{}' does not support parsing",
                format
            )));
        }
        fmt.parse(source)
    }

    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{}' does not support serialization",
                format
            )));
        }
        fmt.serialize(doc)
    }

    /// Reads with `from`, writes with `to`.
    ///
    /// Ids come from whichever reader ran: the text reader applies its configured prefix,
    /// the Akoma Ntoso reader reassigns them from the root. `to` is checked before any
    /// input is read.
    pub fn convert(&self, source: &str, from: &str, to: &str) -> Result<String, FormatError> {
        tracing::debug!(from, to, "converting");
        let target = self.get(to)?;
        if !target.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{}' does not support serialization",
                to
            )));
        }
        let doc = self.parse(source, from)?;
        target.serialize(&doc)
    }

    /// Registry holding `akn`, `json` and a Polish `text` format.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::akn::AknFormat::default());
        registry.register(crate::formats::json::JsonFormat);
        match Jurisdiction::polish() {
            Ok(jurisdiction) => {
                registry.register(crate::formats::text::TextFormat::new(Parser::new(jurisdiction)))
            }
            Err(err) => tracing::error!(%err, "built-in jurisdiction failed to compile"),
        }

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
