//! Akoma Ntoso reader
//!
//! Reads AKN XML back into a [Document]. The reader is tolerant: it accepts a full
//! `akomaNtoso` document, a bare `act` or `body`, or a single unit element (which gets wrapped
//! in a body). `paragraph` is read as a subparagraph and trailing `.`/`)` are stripped from
//! numbers, so hand written markup reads the same as our own output.
//!
//! Identifiers in the input are ignored and assigned afresh.

use legis_parser::{
    assign_document, ContainerLevel, Contents, DocType, Document, Node, NodeKind, PointKind,
    Preface, Schedule, ScheduleContainer, SectionLevel, SubsectionLevel, TiretDepth,
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::FormatError;

#[derive(Debug, Default)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Item>,
}

#[derive(Debug)]
enum Item {
    Element(Element),
    Text(String),
}

impl Element {
    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value.as_str())
    }

    fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|item| match item {
            Item::Element(element) => Some(element),
            Item::Text(_) => None,
        })
    }

    fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.name == name)
    }

    fn descendant(&self, name: &str) -> Option<&Element> {
        self.elements()
            .find_map(|element| {
                if element.name == name {
                    Some(element)
                } else {
                    element.descendant(name)
                }
            })
    }

    /// Concatenated text of this element and its descendants.
    fn text(&self) -> String {
        let mut out = String::new();
        for item in &self.children {
            match item {
                Item::Text(text) => out.push_str(text),
                Item::Element(element) => out.push_str(&element.text()),
            }
        }
        out
    }
}

/// Reads an AKN document and assigns identifiers.
pub fn read_document(xml: &str) -> Result<Document, FormatError> {
    let root = parse_tree(xml)?;
    tracing::debug!(root = %root.name, "reading akoma ntoso");
    let document = match root.name.as_str() {
        "akomaNtoso" => {
            let act = root
                .elements()
                .next()
                .ok_or_else(|| FormatError::ParseError("akomaNtoso has no document".into()))?;
            read_act(act)?
        }
        "act" => read_act(&root)?,
        "body" => Document::new(read_node(&root)?),
        _ => Document::new(Node::new(NodeKind::Body).with_children(vec![read_node(&root)?])),
    };
    Ok(assign_document(document, ""))
}

fn parse_tree(xml: &str) -> Result<Element, FormatError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();
    let mut stack = vec![Element::default()];

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => stack.push(element_from(e)?),
            Event::Empty(ref e) => {
                let element = element_from(e)?;
                push_item(&mut stack, Item::Element(element))?;
            }
            Event::End(_) => {
                let element = match stack.pop() {
                    Some(element) if !stack.is_empty() => element,
                    _ => return Err(FormatError::ParseError("unbalanced end tag".into())),
                };
                push_item(&mut stack, Item::Element(element))?;
            }
            Event::Text(ref e) => {
                let text = e.unescape()?.into_owned();
                push_item(&mut stack, Item::Text(text))?;
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                push_item(&mut stack, Item::Text(text))?;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if stack.len() != 1 {
        return Err(FormatError::ParseError("unclosed element".into()));
    }
    stack
        .pop()
        .and_then(|document| {
            document.children.into_iter().find_map(|item| match item {
                Item::Element(element) => Some(element),
                Item::Text(_) => None,
            })
        })
        .ok_or_else(|| FormatError::ParseError("document has no root element".into()))
}

fn push_item(stack: &mut [Element], item: Item) -> Result<(), FormatError> {
    let parent = stack
        .last_mut()
        .ok_or_else(|| FormatError::ParseError("content outside the root element".into()))?;
    parent.children.push(item);
    Ok(())
}

fn element_from(start: &BytesStart<'_>) -> Result<Element, FormatError> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute =
            attribute.map_err(|err| FormatError::ParseError(format!("XML attribute: {err}")))?;
        let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
        let value = attribute.unescape_value()?.into_owned();
        attributes.push((key, value));
    }
    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn read_act(act: &Element) -> Result<Document, FormatError> {
    let mut document = Document::new(Node::new(NodeKind::Body));
    for element in act.elements() {
        match element.name.as_str() {
            "meta" => {}
            "preface" => document.preface = Some(read_preface(element)?),
            "body" => document.body = read_node(element)?,
            "components" => document.schedules = Some(read_components(element)?),
            other => return Err(unsupported(other)),
        }
    }
    Ok(document)
}

fn read_preface(element: &Element) -> Result<Preface, FormatError> {
    let text = |name: &str| element.child(name).map(Element::text).unwrap_or_default();
    let doc_type = DocType::from_name(text("docType").trim()).ok_or_else(|| {
        FormatError::ParseError(format!("unknown docType '{}'", text("docType").trim()))
    })?;
    let doc_title = element
        .child("docTitle")
        .map(|title| paragraphs(title).join(" "))
        .unwrap_or_default();
    Ok(Preface {
        doc_number: text("docNumber"),
        doc_type,
        doc_date: text("docDate"),
        doc_title,
    })
}

fn read_components(element: &Element) -> Result<ScheduleContainer, FormatError> {
    let mut container = ScheduleContainer::default();
    for component in element.elements() {
        let doc = component
            .child("doc")
            .ok_or_else(|| FormatError::ParseError("component without doc".into()))?;
        let article = doc
            .child("mainBody")
            .and_then(|main| main.elements().next())
            .ok_or_else(|| FormatError::ParseError("schedule without mainBody".into()))?;

        let number = article.child("num").map(|num| clean_number(&num.text()));
        let alias = doc
            .descendant("FRBRalias")
            .and_then(|alias| alias.attribute("value"))
            .map(str::to_string);
        let default_alias = Schedule::new(number.clone(), None).alias();
        let title = alias.filter(|alias| !alias.trim().is_empty() && *alias != default_alias);

        let mut schedule = Schedule::new(number, title);
        schedule.heading = article.child("heading").map(|h| h.text().trim().to_string());
        let children = article
            .elements()
            .filter(|child| child.name != "num" && child.name != "heading")
            .map(read_node)
            .collect::<Result<Vec<_>, _>>()?;
        schedule.body = Node::new(NodeKind::Body).with_children(children);
        container.schedules.push(schedule);
    }
    Ok(container)
}

fn read_node(element: &Element) -> Result<Node, FormatError> {
    let kind = node_kind(element)?;
    let mut node = Node::new(kind);
    if let NodeKind::WrapUp(_) = kind {
        return Ok(node.with_content(paragraphs(element)));
    }

    let mut content: Option<Vec<String>> = None;
    let mut intro = Vec::new();
    let mut children = Vec::new();
    for child in element.elements() {
        match child.name.as_str() {
            "num" => node.number = Some(clean_number(&child.text())),
            "heading" => node.heading = Some(child.text().trim().to_string()),
            "content" => content = Some(paragraphs(child)),
            "intro" => intro = paragraphs(child),
            _ => children.push(read_node(child)?),
        }
    }

    node.contents = match content {
        Some(lines) if children.is_empty() && !kind.is_grouping() => Contents::Content(lines),
        Some(lines) => {
            intro.extend(lines);
            Contents::Nested { intro, children }
        }
        None if children.is_empty() && !kind.is_grouping() => Contents::Content(intro),
        None => Contents::Nested { intro, children },
    };
    Ok(node)
}

fn node_kind(element: &Element) -> Result<NodeKind, FormatError> {
    let refers_to = element.attribute("refersTo");
    let kind = match element.name.as_str() {
        "body" => NodeKind::Body,
        "section" => NodeKind::Section(match refers_to {
            Some("ordinance") => SectionLevel::Ordinance,
            _ => SectionLevel::Statute,
        }),
        "subsection" => NodeKind::Subsection(match refers_to {
            Some("code_level1_unit") => SubsectionLevel::Code,
            _ => SubsectionLevel::Noncode,
        }),
        "point" => NodeKind::Point(match refers_to {
            Some("letter_unit") => PointKind::Letter,
            Some(_) => PointKind::Point,
            None => {
                let number = element.child("num").map(Element::text).unwrap_or_default();
                if number.trim_start().starts_with(|c: char| c.is_alphabetic()) {
                    PointKind::Letter
                } else {
                    PointKind::Point
                }
            }
        }),
        "list" => NodeKind::List,
        "indent" => NodeKind::Indent(match refers_to {
            Some("double_tiret") => TiretDepth::Double,
            Some("triple_tiret") => TiretDepth::Triple,
            _ => TiretDepth::Single,
        }),
        "wrapUp" => NodeKind::WrapUp(match refers_to {
            Some("wrap_up_for_letters") => PointKind::Letter,
            _ => PointKind::Point,
        }),
        "subparagraph" | "paragraph" => NodeKind::Subparagraph,
        name => match ContainerLevel::from_name(name) {
            Some(level) => NodeKind::Container(level),
            None => return Err(unsupported(name)),
        },
    };
    Ok(kind)
}

/// Text of the `<p>` children; a block of empty paragraphs reads as empty.
fn paragraphs(element: &Element) -> Vec<String> {
    let lines: Vec<String> = element
        .elements()
        .filter(|child| child.name == "p")
        .map(|p| p.text().trim().to_string())
        .collect();
    if lines.iter().all(String::is_empty) {
        Vec::new()
    } else {
        lines
    }
}

fn clean_number(raw: &str) -> String {
    raw.trim().trim_end_matches(['.', ')']).to_string()
}

fn unsupported(name: &str) -> FormatError {
    FormatError::ParseError(format!("unsupported element <{name}>"))
}
