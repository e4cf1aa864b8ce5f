//! Jurisdiction keyword tables.
//!
//!     Everything language specific about the input lives in a [JurisdictionRules] table:
//!     the header keywords, the numbering shapes of every unit, the preface layout, the
//!     folding applied to part numbers and the ordinal words used for books. A table is
//!     compiled once into a [Jurisdiction], which the classifier and the serializers share.
//!
//!     Patterns use named groups: `num` for the unit number, `rest` for text following the
//!     number on the same line, `title` for a schedule title, and `number`, `kind`, `date`,
//!     `title` for the preface.

use regex::Regex;

use crate::ast::{ContainerLevel, DocType, Preface};
use crate::error::ParseError;
use crate::lexing::line_classification::LineType;

const UNIT_NUMBER: &str = r"[0-9]+[a-z]*(?:\^[0-9a-z]+)?";
const CONTAINER_NUMBER: &str = r"[IVXLCDM]+[a-z]*|[0-9]+[a-z]*(?:\^[0-9a-z]+)?";

/// Source table for a [Jurisdiction].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JurisdictionRules {
    pub code: String,
    /// Header patterns, one per container level.
    pub headers: Vec<(ContainerLevel, String)>,
    pub schedule: String,
    pub statute_unit: String,
    pub paragraph_sign: String,
    pub level1: String,
    pub point: String,
    pub letter: String,
    pub preface: String,
    /// Preface keywords and the document type each one announces.
    pub doc_types: Vec<(String, DocType)>,
    /// Canonical keywords used when writing text back out.
    pub header_keywords: Vec<(ContainerLevel, String)>,
    pub statute_keyword: String,
    pub paragraph_sign_keyword: String,
    pub schedule_keyword: String,
    /// Character folding applied to lowercased part numbers.
    pub folding: Vec<(char, char)>,
    /// Ordinal words (already folded) mapped to book numbers.
    pub ordinals: Vec<(String, String)>,
}

impl JurisdictionRules {
    /// Polish statutes and ordinances.
    pub fn polish() -> Self {
        let header = |keyword: &str, number: &str| {
            format!(r"^(?i:{keyword})\s+(?P<num>{number})\.?(?:\s+(?P<rest>.*))?$")
        };
        Self {
            code: "pl".to_string(),
            headers: vec![
                (
                    ContainerLevel::Part,
                    r"^(?i:część)\s+(?P<num>\p{L}+)\.?(?:\s*[.:–-]\s*(?P<rest>.*))?$".to_string(),
                ),
                (
                    ContainerLevel::Book,
                    r"^(?i:księga)\s+(?P<num>\p{L}+|[0-9]+)\.?(?:\s*[.:–-]\s*(?P<rest>.*))?$"
                        .to_string(),
                ),
                (ContainerLevel::Title, header("tytuł", CONTAINER_NUMBER)),
                (ContainerLevel::Division, header("dział", CONTAINER_NUMBER)),
                (ContainerLevel::Chapter, header("rozdział", CONTAINER_NUMBER)),
                (ContainerLevel::Subdivision, header("oddział", CONTAINER_NUMBER)),
            ],
            schedule: r"^(?i:załącznik|schedule)(?:\s+(?i:nr\.?)?\s*(?P<num>[0-9]+[a-z]*|[IVXLCDM]+))?(?:\s*[–:.-]\s*(?P<title>.+?))?\s*$"
                .to_string(),
            statute_unit: format!(
                r"^Art\.\s*(?P<num>{UNIT_NUMBER}(?:–{UNIT_NUMBER})?)\.(?:\s+(?P<rest>.*))?$"
            ),
            paragraph_sign: format!(
                r"^§\s*(?P<num>{UNIT_NUMBER}(?:–{UNIT_NUMBER})?)\.(?:\s+(?P<rest>.*))?$"
            ),
            level1: format!(r"^(?P<num>{UNIT_NUMBER})\.(?:\s+(?P<rest>.*))?$"),
            point: format!(r"^(?P<num>{UNIT_NUMBER})\)(?:\s+(?P<rest>.*))?$"),
            letter: r"^(?P<num>[a-z]+(?:\^[0-9a-z]+)?)\)(?:\s+(?P<rest>.*))?$".to_string(),
            preface: r"^(?P<number>(?:Dz\.\s*U\.\s.*?)?)(?P<kind>USTAWA|ROZPORZĄDZENIE)\s+(?P<date>z dnia\s.*?\sr\.\s+)?(?P<title>.*)$"
                .to_string(),
            doc_types: vec![
                ("USTAWA".to_string(), DocType::Statute),
                ("ROZPORZĄDZENIE".to_string(), DocType::Ordinance),
            ],
            header_keywords: vec![
                (ContainerLevel::Part, "CZĘŚĆ".to_string()),
                (ContainerLevel::Book, "KSIĘGA".to_string()),
                (ContainerLevel::Title, "TYTUŁ".to_string()),
                (ContainerLevel::Division, "DZIAŁ".to_string()),
                (ContainerLevel::Chapter, "Rozdział".to_string()),
                (ContainerLevel::Subdivision, "Oddział".to_string()),
            ],
            statute_keyword: "Art.".to_string(),
            paragraph_sign_keyword: "§".to_string(),
            schedule_keyword: "Załącznik".to_string(),
            folding: vec![
                ('ą', 'a'),
                ('ć', 'c'),
                ('ę', 'e'),
                ('ł', 'l'),
                ('ń', 'n'),
                ('ó', 'o'),
                ('ś', 's'),
                ('ź', 'z'),
                ('ż', 'z'),
            ],
            ordinals: [
                "pierwsza",
                "druga",
                "trzecia",
                "czwarta",
                "piata",
                "szosta",
                "siodma",
                "osma",
                "dziewiata",
                "dziesiata",
            ]
            .iter()
            .enumerate()
            .map(|(index, word)| (word.to_string(), (index + 1).to_string()))
            .collect(),
        }
    }
}

/// A compiled [JurisdictionRules] table.
#[derive(Debug, Clone)]
pub struct Jurisdiction {
    rules: JurisdictionRules,
    headers: Vec<(ContainerLevel, Regex)>,
    schedule: Regex,
    statute_unit: Regex,
    paragraph_sign: Regex,
    level1: Regex,
    point: Regex,
    letter: Regex,
    preface: Regex,
}

fn compile(name: &str, pattern: &str) -> Result<Regex, ParseError> {
    Regex::new(pattern).map_err(|err| ParseError::InvalidRules {
        name: name.to_string(),
        message: err.to_string(),
    })
}

fn capture(caps: &regex::Captures<'_>, name: &str) -> Option<String> {
    caps.name(name)
        .map(|m| m.as_str().trim().to_string())
        .filter(|text| !text.is_empty())
}

impl Jurisdiction {
    pub fn from_rules(rules: JurisdictionRules) -> Result<Self, ParseError> {
        let headers = rules
            .headers
            .iter()
            .map(|(level, pattern)| Ok((*level, compile(level.name(), pattern)?)))
            .collect::<Result<Vec<_>, ParseError>>()?;
        Ok(Self {
            headers,
            schedule: compile("schedule", &rules.schedule)?,
            statute_unit: compile("statute_unit", &rules.statute_unit)?,
            paragraph_sign: compile("paragraph_sign", &rules.paragraph_sign)?,
            level1: compile("level1", &rules.level1)?,
            point: compile("point", &rules.point)?,
            letter: compile("letter", &rules.letter)?,
            preface: compile("preface", &rules.preface)?,
            rules,
        })
    }

    /// Looks up a built-in table by its code.
    pub fn by_code(code: &str) -> Option<Result<Self, ParseError>> {
        match code {
            "pl" => Some(Self::from_rules(JurisdictionRules::polish())),
            _ => None,
        }
    }

    pub fn polish() -> Result<Self, ParseError> {
        Self::from_rules(JurisdictionRules::polish())
    }

    pub fn code(&self) -> &str {
        &self.rules.code
    }

    pub fn rules(&self) -> &JurisdictionRules {
        &self.rules
    }

    /// Classifies a trimmed, marker-free line by keyword and numbering shape.
    ///
    /// Returns `None` for plain text. Schedules are tried first, then containers from the
    /// outermost level inwards, then units from level 0 down to letters.
    pub fn classify(&self, text: &str) -> Option<LineType> {
        if let Some(caps) = self.schedule.captures(text) {
            return Some(LineType::Schedule {
                number: capture(&caps, "num"),
                title: capture(&caps, "title"),
            });
        }
        for (level, regex) in &self.headers {
            if let Some(caps) = regex.captures(text) {
                let Some(raw) = caps.name("num") else {
                    continue;
                };
                return Some(LineType::Header {
                    level: *level,
                    number: self.container_number(*level, raw.as_str()),
                    heading: capture(&caps, "rest"),
                });
            }
        }
        let unit = |regex: &Regex| -> Option<(String, String)> {
            let caps = regex.captures(text)?;
            let number = caps.name("num")?.as_str().to_string();
            Some((number, capture(&caps, "rest").unwrap_or_default()))
        };
        if let Some((number, rest)) = unit(&self.statute_unit) {
            return Some(LineType::StatuteUnit { number, rest });
        }
        if let Some((number, rest)) = unit(&self.paragraph_sign) {
            return Some(LineType::ParagraphSign { number, rest });
        }
        if let Some((number, rest)) = unit(&self.level1) {
            return Some(LineType::Level1 { number, rest });
        }
        if let Some((number, rest)) = unit(&self.point) {
            return Some(LineType::Point { number, rest });
        }
        if let Some((number, rest)) = unit(&self.letter) {
            return Some(LineType::Letter { number, rest });
        }
        None
    }

    /// Canonical form of a container number.
    ///
    /// Part numbers are words and get lowercased and folded; book numbers written as
    /// ordinal words become digits. Everything else is kept verbatim.
    pub fn container_number(&self, level: ContainerLevel, raw: &str) -> String {
        match level {
            ContainerLevel::Part => self.fold(raw),
            ContainerLevel::Book => {
                let folded = self.fold(raw);
                self.rules
                    .ordinals
                    .iter()
                    .find(|(word, _)| *word == folded)
                    .map(|(_, number)| number.clone())
                    .unwrap_or_else(|| raw.to_string())
            }
            _ => raw.to_string(),
        }
    }

    fn fold(&self, raw: &str) -> String {
        raw.to_lowercase()
            .chars()
            .map(|c| {
                self.rules
                    .folding
                    .iter()
                    .find(|(from, _)| *from == c)
                    .map_or(c, |(_, to)| *to)
            })
            .collect()
    }

    /// Splits a joined preface block into its parts.
    pub fn parse_preface(&self, text: &str) -> Option<Preface> {
        let caps = self.preface.captures(text)?;
        let kind = caps.name("kind")?.as_str();
        let doc_type = self
            .rules
            .doc_types
            .iter()
            .find(|(keyword, _)| keyword == kind)
            .map(|(_, doc_type)| *doc_type)?;
        let raw = |name: &str| caps.name(name).map_or("", |m| m.as_str()).to_string();
        Some(Preface {
            doc_number: raw("number"),
            doc_type,
            doc_date: raw("date"),
            doc_title: caps.name("title")?.as_str().trim().to_string(),
        })
    }

    pub fn header_keyword(&self, level: ContainerLevel) -> &str {
        self.rules
            .header_keywords
            .iter()
            .find(|(candidate, _)| *candidate == level)
            .map_or(level.name(), |(_, keyword)| keyword.as_str())
    }

    pub fn doc_type_keyword(&self, doc_type: DocType) -> &str {
        self.rules
            .doc_types
            .iter()
            .find(|(_, candidate)| *candidate == doc_type)
            .map_or(doc_type.as_str(), |(keyword, _)| keyword.as_str())
    }

    pub fn statute_keyword(&self) -> &str {
        &self.rules.statute_keyword
    }

    pub fn paragraph_sign_keyword(&self) -> &str {
        &self.rules.paragraph_sign_keyword
    }

    pub fn schedule_keyword(&self) -> &str {
        &self.rules.schedule_keyword
    }
}
