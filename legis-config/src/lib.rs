//! Shared configuration loader for the legis toolchain.
//!
//! `defaults/legis.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`LegisConfig`].
//!
//! The configuration only describes how to parse and how to label output. Turning it into
//! the objects the libraries consume is done by [`LegisConfig::parser`],
//! [`LegisConfig::identity`] and friends.

use chrono::NaiveDate;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use legis_babel::Identity;
use legis_parser::{Jurisdiction, ParseError, ParseOptions, Parser};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

const DEFAULT_TOML: &str = include_str!("../defaults/legis.default.toml");

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unknown jurisdiction '{0}'")]
    UnknownJurisdiction(String),

    #[error(transparent)]
    InvalidJurisdiction(#[from] ParseError),
}

/// Top-level configuration consumed by legis applications.
#[derive(Debug, Clone, Deserialize)]
pub struct LegisConfig {
    pub parsing: ParsingConfig,
    pub identity: IdentityConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParsingConfig {
    pub jurisdiction: String,
    pub section_layout: SectionLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionLayout {
    Auto,
    NumberFirst,
    TitleFirst,
}

impl SectionLayout {
    pub fn number_after_title(self) -> Option<bool> {
        match self {
            SectionLayout::Auto => None,
            SectionLayout::NumberFirst => Some(false),
            SectionLayout::TitleFirst => Some(true),
        }
    }
}

/// FRBR metadata stamped on Akoma Ntoso output.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    pub frbr_uri: String,
    pub country: String,
    pub language: String,
    pub work_date: NaiveDate,
    pub expression_date: NaiveDate,
    pub author: String,
    pub generator: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub id_prefix: String,
    #[serde(default)]
    pub generation_date: Option<NaiveDate>,
}

impl LegisConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            section_number_after_title: self.parsing.section_layout.number_after_title(),
        }
    }

    /// Compiles the configured jurisdiction table.
    pub fn jurisdiction(&self) -> Result<Jurisdiction, LoadError> {
        let code = &self.parsing.jurisdiction;
        match Jurisdiction::by_code(code) {
            Some(jurisdiction) => Ok(jurisdiction?),
            None => Err(LoadError::UnknownJurisdiction(code.clone())),
        }
    }

    /// A parser for the configured jurisdiction and layout.
    pub fn parser(&self) -> Result<Parser, LoadError> {
        Ok(Parser::new(self.jurisdiction()?).with_options(self.parse_options()))
    }

    pub fn identity(&self) -> Identity {
        let identity = &self.identity;
        Identity {
            frbr_uri: identity.frbr_uri.clone(),
            country: identity.country.clone(),
            language: identity.language.clone(),
            work_date: identity.work_date,
            expression_date: identity.expression_date,
            author: identity.author.clone(),
            generator: identity.generator.clone(),
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<LegisConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<LegisConfig, ConfigError> {
    Loader::new().build()
}
