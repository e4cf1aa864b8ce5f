//! Plain-text serializer
//!
//! Renders a tree back into the input format using the jurisdiction's canonical keywords.
//! Every element becomes a block; blocks are separated by one blank line. The lines of one
//! element stay on consecutive lines, since a blank line inside a unit opens a subparagraph
//! when the text is parsed again. Text that sits at
//! the start of a line goes through the [Escaper], text that follows a numbering token on
//! the same line does not need to.
//!
//! Tirets and wrap-ups get their indentation markers back: a tiret at depth `d` is written
//! as `@@INDENT<d+1>@@` followed by `d` dashes, a wrap-up as `@@INDENT0@@` (closing points of
//! a unit) or `@@INDENT1@@` (closing letters inside a point).

use legis_parser::{
    Contents, Document, Jurisdiction, Node, NodeKind, Preface, ScheduleContainer, SectionLevel,
    SubsectionLevel,
};

use super::escaper::Escaper;

pub struct TextSerializer<'a> {
    jurisdiction: &'a Jurisdiction,
    escaper: Escaper<'a>,
    blocks: Vec<String>,
}

impl<'a> TextSerializer<'a> {
    pub fn new(jurisdiction: &'a Jurisdiction) -> Self {
        Self {
            jurisdiction,
            escaper: Escaper::new(jurisdiction),
            blocks: Vec::new(),
        }
    }

    pub fn serialize_document(mut self, doc: &Document) -> String {
        if let Some(preface) = &doc.preface {
            self.preface(preface);
        }
        self.node(&doc.body, None);
        if let Some(schedules) = &doc.schedules {
            self.schedules(schedules);
        }
        self.finish()
    }

    pub fn serialize_node(mut self, node: &Node) -> String {
        self.node(node, None);
        self.finish()
    }

    fn finish(self) -> String {
        if self.blocks.is_empty() {
            return String::new();
        }
        let mut out = self.blocks.join("\n\n");
        out.push('\n');
        out
    }

    fn escaped(&self, line: &str) -> String {
        self.escaper.escape_line(line).into_owned()
    }

    fn preface(&mut self, preface: &Preface) {
        let keyword = self.jurisdiction.doc_type_keyword(preface.doc_type);
        self.blocks.push(format!(
            "{}{} {}{}",
            preface.doc_number, keyword, preface.doc_date, preface.doc_title
        ));
    }

    fn schedules(&mut self, container: &ScheduleContainer) {
        for schedule in &container.schedules {
            let mut block = self.jurisdiction.schedule_keyword().to_string();
            if let Some(number) = &schedule.number {
                block.push(' ');
                block.push_str(number);
            }
            if let Some(title) = &schedule.title {
                block.push_str(" – ");
                block.push_str(title);
            }
            if let Some(heading) = &schedule.heading {
                block.push('\n');
                block.push_str(&self.escaped(heading));
            }
            self.blocks.push(block);
            for child in schedule.body.children() {
                self.node(child, Some(NodeKind::Body));
            }
        }
    }

    fn node(&mut self, node: &Node, parent: Option<NodeKind>) {
        let number = node.number.as_deref().unwrap_or_default();
        match node.kind {
            NodeKind::Body => {
                for child in node.children() {
                    self.node(child, Some(node.kind));
                }
            }
            NodeKind::Container(level) => {
                let keyword = self.jurisdiction.header_keyword(level);
                let mut block = format!("{keyword} {number}");
                if let Some(heading) = &node.heading {
                    block.push('\n');
                    block.push_str(&self.escaped(heading));
                }
                self.blocks.push(block);
                for child in node.children() {
                    self.node(child, Some(node.kind));
                }
            }
            NodeKind::Section(level) => {
                let keyword = match level {
                    SectionLevel::Statute => self.jurisdiction.statute_keyword(),
                    SectionLevel::Ordinance => self.jurisdiction.paragraph_sign_keyword(),
                };
                let header = format!("{keyword} {number}.");
                let title = node.heading.as_deref().map(|heading| self.escaped(heading));
                self.unit(node, header, title);
            }
            NodeKind::Subsection(SubsectionLevel::Noncode) => {
                self.unit(node, format!("{number}."), None);
            }
            NodeKind::Subsection(SubsectionLevel::Code) => {
                let keyword = self.jurisdiction.paragraph_sign_keyword();
                self.unit(node, format!("{keyword} {number}."), None);
            }
            NodeKind::Point(_) => self.unit(node, format!("{number})"), None),
            NodeKind::List | NodeKind::Indent(_) => {
                let mut lines = Vec::new();
                tiret_lines(node, &mut lines);
                self.blocks.push(lines.join("\n"));
            }
            NodeKind::WrapUp(_) => {
                let marker = match parent {
                    Some(NodeKind::Point(_)) => 1,
                    _ => 0,
                };
                let text = node.content().map(|lines| lines.join(" ")).unwrap_or_default();
                self.blocks.push(format!("@@INDENT{marker}@@{text}"));
            }
            NodeKind::Subparagraph => {
                let lines = match &node.contents {
                    Contents::Content(lines) => lines.as_slice(),
                    Contents::Nested { intro, .. } => intro.as_slice(),
                };
                if !lines.is_empty() {
                    let block = lines
                        .iter()
                        .map(|line| self.escaped(line))
                        .collect::<Vec<_>>()
                        .join("\n");
                    self.blocks.push(block);
                }
            }
        }
    }

    /// Numbered unit: optional title line, numbering line with the first text line, rest.
    fn unit(&mut self, node: &Node, header: String, title: Option<String>) {
        let lines = match &node.contents {
            Contents::Content(lines) => lines.as_slice(),
            Contents::Nested { intro, .. } => intro.as_slice(),
        };
        let mut block = String::new();
        if let Some(title) = title {
            block.push_str(&title);
            block.push('\n');
        }
        block.push_str(&header);
        if let Some((first, rest)) = lines.split_first() {
            block.push(' ');
            block.push_str(first);
            for line in rest {
                block.push('\n');
                block.push_str(&self.escaped(line));
            }
        }
        self.blocks.push(block);
        for child in node.children() {
            self.node(child, Some(node.kind));
        }
    }
}

fn tiret_lines(node: &Node, out: &mut Vec<String>) {
    match node.kind {
        NodeKind::Indent(depth) => {
            let dashes = vec!["–"; depth.depth() as usize].join(" ");
            let marker = depth.depth() + 1;
            let text = node.content().map(|lines| lines.join(" ")).unwrap_or_default();
            if text.is_empty() {
                out.push(format!("@@INDENT{marker}@@{dashes}"));
            } else {
                out.push(format!("@@INDENT{marker}@@{dashes} {text}"));
            }
        }
        NodeKind::List => {
            for child in node.children() {
                tiret_lines(child, out);
            }
        }
        _ => {}
    }
}
