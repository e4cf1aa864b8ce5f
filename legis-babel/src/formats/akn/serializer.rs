//! Akoma Ntoso serializer
//!
//! Every node kind maps to one element. Numbered units carry `<num>`, containers an optional
//! `<heading>`, and text always sits in `<p>` elements wrapped by `<content>` (flat units) or
//! `<intro>` (text before child units). Wrap-ups hold their `<p>` directly.
//!
//! ## Example
//!
//! ```text
//! <section id="section-2" refersTo="statute">
//!   <num>2</num>
//!   <subsection id="section-2.subsection-1" refersTo="noncode_level1_unit">
//!     <num>1</num>
//!     <content>
//!       <p>Przepisów ustawy nie stosuje się do rolnictwa.</p>
//!     </content>
//!   </subsection>
//! </section>
//! ```
//!
//! The serializer trusts the grammar engine: a tree that breaks the content-or-children
//! rule, or reaches this point without identifiers, is reported as
//! [FormatError::InvariantViolation] instead of being patched up.

use chrono::NaiveDate;
use legis_parser::{Contents, Document, Node, NodeKind, Preface, Schedule, ScheduleContainer};

use super::identity::Identity;
use crate::error::FormatError;

pub const AKN_NAMESPACE: &str = "http://www.akomantoso.org/2.0";

type Attributes<'a> = [(&'a str, &'a str)];

/// Indented XML writer producing one element per line.
struct XmlWriter {
    output: String,
    indent_level: usize,
}

impl XmlWriter {
    fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
        }
    }

    fn indent(&self) -> String {
        "  ".repeat(self.indent_level)
    }

    fn push_indent(&mut self, s: &str) {
        self.output.push_str(&self.indent());
        self.output.push_str(s);
    }

    fn start_tag(name: &str, attributes: &Attributes<'_>) -> String {
        let mut tag = format!("<{name}");
        for (key, value) in attributes {
            tag.push_str(&format!(" {key}=\"{}\"", escape_attribute(value)));
        }
        tag
    }

    fn open(&mut self, name: &str, attributes: &Attributes<'_>) {
        let tag = Self::start_tag(name, attributes);
        self.push_indent(&tag);
        self.output.push_str(">\n");
        self.indent_level += 1;
    }

    fn close(&mut self, name: &str) {
        self.indent_level = self.indent_level.saturating_sub(1);
        self.push_indent(format!("</{name}>\n").as_str());
    }

    /// Element with text only; self-closed when the text is empty.
    fn leaf(&mut self, name: &str, attributes: &Attributes<'_>, text: &str) {
        let tag = Self::start_tag(name, attributes);
        self.push_indent(&tag);
        if text.is_empty() {
            self.output.push_str("/>\n");
        } else {
            self.output
                .push_str(&format!(">{}</{name}>\n", escape_text(text)));
        }
    }

    fn empty(&mut self, name: &str, attributes: &Attributes<'_>) {
        self.leaf(name, attributes, "");
    }

    /// `<p>` per line; an empty block still yields one empty paragraph.
    fn lines(&mut self, lines: &[String]) {
        if lines.is_empty() {
            self.empty("p", &[]);
        }
        for line in lines {
            self.leaf("p", &[], line);
        }
    }

    fn wrapped_lines(&mut self, wrapper: &str, lines: &[String]) {
        self.open(wrapper, &[]);
        self.lines(lines);
        self.close(wrapper);
    }

    fn finish(mut self) -> String {
        if self.output.ends_with('\n') {
            self.output.pop();
        }
        self.output
    }
}

/// Serializes one node and its descendants, without a trailing newline.
pub fn serialize_node(node: &Node) -> Result<String, FormatError> {
    let mut writer = XmlWriter::new();
    write_node(&mut writer, node)?;
    Ok(writer.finish())
}

pub fn serialize_preface(preface: &Preface) -> String {
    let mut writer = XmlWriter::new();
    write_preface(&mut writer, preface);
    writer.finish()
}

/// Serializes schedules as a `<components>` element.
pub fn serialize_schedules(
    container: &ScheduleContainer,
    identity: &Identity,
    generation_date: NaiveDate,
) -> Result<String, FormatError> {
    let mut writer = XmlWriter::new();
    write_components(&mut writer, container, identity, generation_date)?;
    Ok(writer.finish())
}

/// Serializes a complete `akomaNtoso` document.
pub fn serialize_document(
    doc: &Document,
    identity: &Identity,
    generation_date: NaiveDate,
) -> Result<String, FormatError> {
    tracing::debug!(
        uri = %identity.frbr_uri,
        schedules = doc.schedules.as_ref().map_or(0, |s| s.schedules.len()),
        "serializing akoma ntoso document"
    );
    let mut writer = XmlWriter::new();
    writer.output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    writer.open("akomaNtoso", &[("xmlns", AKN_NAMESPACE)]);
    writer.open("act", &[("contains", "originalVersion")]);

    writer.open("meta", &[]);
    let alias = doc.preface.as_ref().map(|preface| preface.doc_title.as_str());
    write_identification(&mut writer, identity, generation_date, "main", alias);
    writer.close("meta");

    if let Some(preface) = &doc.preface {
        write_preface(&mut writer, preface);
    }
    write_node(&mut writer, &doc.body)?;
    if let Some(schedules) = &doc.schedules {
        if !schedules.schedules.is_empty() {
            write_components(&mut writer, schedules, identity, generation_date)?;
        }
    }

    writer.close("act");
    writer.close("akomaNtoso");
    Ok(writer.output)
}

fn write_node(writer: &mut XmlWriter, node: &Node) -> Result<(), FormatError> {
    let name = node.kind.element_name();
    let mut attributes: Vec<(&str, &str)> = Vec::new();
    match (&node.id, node.kind) {
        (Some(id), _) => attributes.push(("id", id.as_str())),
        (None, NodeKind::Body | NodeKind::WrapUp(_)) => {}
        (None, _) => return Err(violation(node, "has no id")),
    }
    if let Some(refers_to) = node.kind.refers_to() {
        attributes.push(("refersTo", refers_to));
    }

    if let NodeKind::WrapUp(_) = node.kind {
        let Some(lines) = node.content() else {
            return Err(violation(node, "wrap-up with child units"));
        };
        writer.open(name, &attributes);
        writer.lines(lines);
        writer.close(name);
        return Ok(());
    }

    match &node.contents {
        Contents::Content(_) if node.kind.is_grouping() => {
            return Err(violation(node, "grouping element with flat content"));
        }
        Contents::Nested { children, .. } if children.is_empty() => {
            if node.kind == NodeKind::List {
                return Err(violation(node, "empty list"));
            }
            if !node.kind.is_grouping() {
                return Err(violation(node, "has neither content nor children"));
            }
        }
        _ => {}
    }

    let number = node.display_number();
    if node.kind.is_grouping()
        && node.children().is_empty()
        && number.is_none()
        && node.heading.is_none()
    {
        writer.empty(name, &attributes);
        return Ok(());
    }

    writer.open(name, &attributes);
    if let Some(number) = &number {
        writer.leaf("num", &[], number);
    }
    if let Some(heading) = &node.heading {
        writer.leaf("heading", &[], heading);
    }
    match &node.contents {
        Contents::Content(lines) => writer.wrapped_lines("content", lines),
        Contents::Nested { intro, children } => {
            if !intro.is_empty() {
                writer.wrapped_lines("intro", intro);
            }
            for child in children {
                write_node(writer, child)?;
            }
        }
    }
    writer.close(name);
    Ok(())
}

fn write_preface(writer: &mut XmlWriter, preface: &Preface) {
    writer.open("preface", &[]);
    writer.leaf("docNumber", &[], &preface.doc_number);
    writer.leaf("docType", &[], preface.doc_type.as_str());
    writer.leaf("docDate", &[], &preface.doc_date);
    writer.wrapped_lines("docTitle", std::slice::from_ref(&preface.doc_title));
    writer.close("preface");
}

fn write_components(
    writer: &mut XmlWriter,
    container: &ScheduleContainer,
    identity: &Identity,
    generation_date: NaiveDate,
) -> Result<(), FormatError> {
    if container.schedules.is_empty() {
        writer.empty("components", &[]);
        return Ok(());
    }
    writer.open("components", &[]);
    for schedule in &container.schedules {
        write_schedule(writer, schedule, identity, generation_date)?;
    }
    writer.close("components");
    Ok(())
}

fn write_schedule(
    writer: &mut XmlWriter,
    schedule: &Schedule,
    identity: &Identity,
    generation_date: NaiveDate,
) -> Result<(), FormatError> {
    let Some(id) = &schedule.id else {
        return Err(FormatError::InvariantViolation(format!(
            "schedule '{}' has no id",
            schedule.alias()
        )));
    };
    let component = schedule.component_name();
    let alias = schedule.alias();

    writer.open("component", &[("id", format!("component-{id}").as_str())]);
    writer.open("doc", &[("name", component.as_str())]);
    writer.open("meta", &[]);
    write_identification(writer, identity, generation_date, &component, Some(alias.as_str()));
    writer.close("meta");
    writer.open("mainBody", &[]);
    writer.open("article", &[("id", id.as_str())]);
    if let Some(number) = &schedule.number {
        writer.leaf("num", &[], number);
    }
    if let Some(heading) = &schedule.heading {
        writer.leaf("heading", &[], heading);
    }
    for child in schedule.body.children() {
        write_node(writer, child)?;
    }
    writer.close("article");
    writer.close("mainBody");
    writer.close("doc");
    writer.close("component");
    Ok(())
}

fn write_identification(
    writer: &mut XmlWriter,
    identity: &Identity,
    generation_date: NaiveDate,
    component: &str,
    alias: Option<&str>,
) {
    let work = identity.work_uri();
    let expression = identity.expression_uri();
    let manifestation = identity.manifestation_uri();
    let work_date = identity.work_date.format("%Y-%m-%d").to_string();
    let expression_date = identity.expression_date.format("%Y-%m-%d").to_string();
    let generated = generation_date.format("%Y-%m-%d").to_string();

    writer.open("identification", &[("source", identity.generator.as_str())]);

    writer.open("FRBRWork", &[]);
    writer.empty("FRBRthis", &[("value", format!("{work}/{component}").as_str())]);
    writer.empty("FRBRuri", &[("value", work)]);
    if let Some(alias) = alias {
        writer.empty("FRBRalias", &[("value", alias)]);
    }
    writer.empty("FRBRdate", &[("date", work_date.as_str()), ("name", "Generation")]);
    writer.empty("FRBRauthor", &[("href", identity.author.as_str())]);
    writer.empty("FRBRcountry", &[("value", identity.country.as_str())]);
    writer.close("FRBRWork");

    writer.open("FRBRExpression", &[]);
    writer.empty("FRBRthis", &[("value", format!("{expression}/{component}").as_str())]);
    writer.empty("FRBRuri", &[("value", expression.as_str())]);
    writer.empty("FRBRdate", &[("date", expression_date.as_str()), ("name", "Generation")]);
    writer.empty("FRBRauthor", &[("href", identity.author.as_str())]);
    writer.empty("FRBRlanguage", &[("language", identity.language.as_str())]);
    writer.close("FRBRExpression");

    writer.open("FRBRManifestation", &[]);
    writer.empty(
        "FRBRthis",
        &[("value", format!("{manifestation}/{component}").as_str())],
    );
    writer.empty("FRBRuri", &[("value", manifestation.as_str())]);
    writer.empty("FRBRdate", &[("date", generated.as_str()), ("name", "Generation")]);
    writer.empty("FRBRauthor", &[("href", identity.generator.as_str())]);
    writer.close("FRBRManifestation");

    writer.close("identification");
}

fn violation(node: &Node, problem: &str) -> FormatError {
    FormatError::InvariantViolation(format!(
        "<{}> {}: {problem}",
        node.kind.element_name(),
        node.id.as_deref().unwrap_or("without id"),
    ))
}

/// Escape XML special characters in text content
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape an attribute value; anything outside ASCII becomes a numeric entity.
fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c if c.is_ascii() => escaped.push(c),
            c => escaped.push_str(&format!("&#x{:X};", c as u32)),
        }
    }
    escaped
}
