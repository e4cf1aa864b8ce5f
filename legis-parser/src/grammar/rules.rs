use std::fmt;
use std::str::FromStr;

use crate::ast::{ContainerLevel, PointKind, SectionLevel, SubsectionLevel, TiretDepth};
use crate::error::ParseError;

/// Starting points accepted by [Parser::parse](super::Parser::parse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryRule {
    Act,
    Preface,
    Body,
    Container(ContainerLevel),
    Section(SectionLevel),
    Subsection(SubsectionLevel),
    Point(PointKind),
    Tiret(TiretDepth),
    Schedules,
}

impl EntryRule {
    pub const ALL: [EntryRule; 19] = [
        EntryRule::Act,
        EntryRule::Preface,
        EntryRule::Body,
        EntryRule::Container(ContainerLevel::Part),
        EntryRule::Container(ContainerLevel::Book),
        EntryRule::Container(ContainerLevel::Title),
        EntryRule::Container(ContainerLevel::Division),
        EntryRule::Container(ContainerLevel::Chapter),
        EntryRule::Container(ContainerLevel::Subdivision),
        EntryRule::Section(SectionLevel::Statute),
        EntryRule::Section(SectionLevel::Ordinance),
        EntryRule::Subsection(SubsectionLevel::Noncode),
        EntryRule::Subsection(SubsectionLevel::Code),
        EntryRule::Point(PointKind::Point),
        EntryRule::Point(PointKind::Letter),
        EntryRule::Tiret(TiretDepth::Single),
        EntryRule::Tiret(TiretDepth::Double),
        EntryRule::Tiret(TiretDepth::Triple),
        EntryRule::Schedules,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EntryRule::Act => "act",
            EntryRule::Preface => "preface",
            EntryRule::Body => "body",
            EntryRule::Container(level) => level.name(),
            EntryRule::Section(SectionLevel::Statute) => "statute_level0_unit",
            EntryRule::Section(SectionLevel::Ordinance) => "ordinance_level0_unit",
            EntryRule::Subsection(SubsectionLevel::Noncode) => "noncode_level1_unit",
            EntryRule::Subsection(SubsectionLevel::Code) => "code_level1_unit",
            EntryRule::Point(PointKind::Point) => "point",
            EntryRule::Point(PointKind::Letter) => "letter_unit",
            EntryRule::Tiret(TiretDepth::Single) => "tiret",
            EntryRule::Tiret(TiretDepth::Double) => "double_tiret",
            EntryRule::Tiret(TiretDepth::Triple) => "triple_tiret",
            EntryRule::Schedules => "schedules",
        }
    }
}

impl fmt::Display for EntryRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntryRule {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntryRule::ALL
            .into_iter()
            .find(|rule| rule.name() == s)
            .ok_or_else(|| ParseError::UnknownRule(s.to_string()))
    }
}
