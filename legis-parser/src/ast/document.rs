use serde::Serialize;

use super::node::{Node, NodeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocType {
    Statute,
    Ordinance,
}

impl DocType {
    pub fn as_str(self) -> &'static str {
        match self {
            DocType::Statute => "statute",
            DocType::Ordinance => "ordinance",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "statute" => Some(DocType::Statute),
            "ordinance" => Some(DocType::Ordinance),
            _ => None,
        }
    }
}

/// Identification block that precedes the body.
///
/// Number and date keep their trailing whitespace exactly as captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preface {
    pub doc_number: String,
    pub doc_type: DocType,
    pub doc_date: String,
    pub doc_title: String,
}

/// One annex attached after the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    /// Component identifier, set by the id assigner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub body: Node,
}

impl Schedule {
    pub fn new(number: Option<String>, title: Option<String>) -> Self {
        Self {
            number,
            title,
            heading: None,
            id: None,
            body: Node::new(NodeKind::Body),
        }
    }

    /// Human readable name: the title when present, otherwise a numbered default.
    pub fn alias(&self) -> String {
        match (&self.title, &self.number) {
            (Some(title), _) => title.clone(),
            (None, Some(number)) => format!("Schedule {number}"),
            (None, None) => "Schedule".to_string(),
        }
    }

    /// Name of the component document: `schedule<N>` when numbered, else a slug of the alias.
    pub fn component_name(&self) -> String {
        match &self.number {
            Some(number) => format!("schedule{number}"),
            None => self
                .alias()
                .to_lowercase()
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleContainer {
    pub schedules: Vec<Schedule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preface: Option<Preface>,
    pub body: Node,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedules: Option<ScheduleContainer>,
}

impl Document {
    pub fn new(body: Node) -> Self {
        Self {
            preface: None,
            body,
            schedules: None,
        }
    }
}
