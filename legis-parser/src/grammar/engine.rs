//! Recursive matcher over classified lines.
//!
//!     The matcher keeps a cursor into the line list. Each rule peeks at the next non-blank
//!     line, decides whether it belongs to the element being built, and either consumes it
//!     or returns to its caller. Elements therefore end where a line shows up that only an
//!     enclosing rule accepts.
//!
//!     Whenever a rule stops at a line it records what it would have accepted there. The
//!     record for the furthest line feeds the mismatch report if the input is not fully
//!     consumed.

use serde::Serialize;

use crate::ast::{
    ContainerLevel, Document, Node, NodeKind, PointKind, Preface, Schedule, ScheduleContainer,
    SectionLevel, SubsectionLevel, TiretDepth,
};
use crate::error::ParseError;
use crate::grammar::resolver::guess_section_number_after_title;
use crate::grammar::rules::EntryRule;
use crate::lexing::{tokenize_lines, Jurisdiction, Line, LineType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Whether unit titles precede unit numbers. `None` lets the parser guess from the text.
    pub section_number_after_title: Option<bool>,
}

/// Result of a parse, shaped by the entry rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "fragment", rename_all = "snake_case")]
pub enum Fragment {
    Act(Document),
    Preface(Preface),
    Node(Node),
    Schedules(ScheduleContainer),
}

impl Fragment {
    pub fn into_document(self) -> Option<Document> {
        match self {
            Fragment::Act(document) => Some(document),
            _ => None,
        }
    }

    pub fn into_node(self) -> Option<Node> {
        match self {
            Fragment::Node(node) => Some(node),
            _ => None,
        }
    }
}

pub struct Parser {
    jurisdiction: Jurisdiction,
    options: ParseOptions,
}

impl Parser {
    pub fn new(jurisdiction: Jurisdiction) -> Self {
        Self {
            jurisdiction,
            options: ParseOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn jurisdiction(&self) -> &Jurisdiction {
        &self.jurisdiction
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parses `source` starting from `rule`. The whole input must be consumed.
    pub fn parse(&self, source: &str, rule: EntryRule) -> Result<Fragment, ParseError> {
        self.run(source, rule, |matcher| {
            Ok(match rule {
                EntryRule::Act => Fragment::Act(matcher.act()?),
                EntryRule::Preface => Fragment::Preface(matcher.required_preface()?),
                EntryRule::Body => {
                    matcher.resolve_layout();
                    Fragment::Node(matcher.body())
                }
                EntryRule::Container(level) => Fragment::Node(matcher.entry_container(level)?),
                EntryRule::Section(level) => Fragment::Node(matcher.entry_section(level)?),
                EntryRule::Subsection(level) => Fragment::Node(matcher.entry_subsection(level)?),
                EntryRule::Point(kind) => Fragment::Node(matcher.entry_point(kind)?),
                EntryRule::Tiret(depth) => Fragment::Node(matcher.entry_tiret(depth)?),
                EntryRule::Schedules => Fragment::Schedules(matcher.schedules()?),
            })
        })
    }

    /// Parses a complete act.
    pub fn parse_act(&self, source: &str) -> Result<Document, ParseError> {
        self.run(source, EntryRule::Act, |matcher| matcher.act())
    }

    fn run<T>(
        &self,
        source: &str,
        rule: EntryRule,
        entry: impl FnOnce(&mut Matcher<'_>) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let lines = tokenize_lines(&self.jurisdiction, source);
        tracing::debug!(%rule, lines = lines.len(), "parsing");
        let layout = self.options.section_number_after_title;
        let mut matcher = Matcher::new(&lines, &self.jurisdiction, layout);
        let parsed = entry(&mut matcher)?;
        matcher.finish()?;
        Ok(parsed)
    }
}

/// Body text as the layout resolver sees it: level-0 keywords stripped.
fn resolver_view(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|line| match &line.line_type {
            LineType::Blank => String::new(),
            LineType::StatuteUnit { number, rest } | LineType::ParagraphSign { number, rest } => {
                format!("{number}. {rest}")
            }
            _ => line.text.clone(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Where a unit's children are being collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Section(SectionLevel),
    Subsection,
    Point,
    Letter,
}

impl Scope {
    fn alternatives(self) -> &'static [&'static str] {
        match self {
            Scope::Section(SectionLevel::Statute) => &[
                "noncode level-1 unit",
                "code level-1 unit",
                "point",
                "letter",
                "tiret",
                "wrap-up",
                "subparagraph",
            ],
            Scope::Section(SectionLevel::Ordinance) => &[
                "noncode level-1 unit",
                "point",
                "letter",
                "tiret",
                "wrap-up",
                "subparagraph",
            ],
            Scope::Subsection => &["point", "letter", "tiret", "wrap-up", "subparagraph"],
            Scope::Point => &["letter", "tiret", "wrap-up"],
            Scope::Letter => &["tiret"],
        }
    }

    /// Whether a dash line with `marker` may close an enumeration opened in this scope.
    ///
    /// Level-0 and level-1 units own first-level enumerations; points own second-level
    /// ones. Unmarked dashes close the innermost open enumeration.
    fn accepts_wrap_up(self, marker: Option<u8>) -> bool {
        match self {
            Scope::Section(_) | Scope::Subsection => matches!(marker, None | Some(0) | Some(1)),
            Scope::Point => matches!(marker, None | Some(1)),
            Scope::Letter => false,
        }
    }
}

const CONTAINER_ALTERNATIVES: &[&str] = &[
    "part",
    "book",
    "title",
    "division",
    "chapter",
    "subdivision",
    "statute level-0 unit",
    "ordinance level-0 unit",
    "subparagraph",
];

struct Matcher<'a> {
    lines: &'a [Line],
    jurisdiction: &'a Jurisdiction,
    pos: usize,
    /// Whether unit titles precede numbers; decided lazily when not forced.
    layout: Option<bool>,
    furthest: Option<(usize, Vec<&'static str>)>,
}

impl<'a> Matcher<'a> {
    fn new(lines: &'a [Line], jurisdiction: &'a Jurisdiction, layout: Option<bool>) -> Self {
        Self {
            lines,
            jurisdiction,
            pos: 0,
            layout,
            furthest: None,
        }
    }

    /// Guesses the title layout from the remaining input unless it was forced.
    fn resolve_layout(&mut self) {
        if self.layout.is_none() {
            let view = resolver_view(&self.lines[self.pos..]);
            let title_first = guess_section_number_after_title(&view);
            tracing::debug!(title_first, "guessed unit title layout");
            self.layout = Some(title_first);
        }
    }

    fn peek(&self) -> Option<&'a Line> {
        let lines: &'a [Line] = self.lines;
        lines.get(self.pos)
    }

    fn peek_non_blank(&self) -> Option<(usize, &'a Line)> {
        let lines: &'a [Line] = self.lines;
        lines[self.pos..]
            .iter()
            .enumerate()
            .find(|(_, line)| !line.line_type.is_blank())
            .map(|(skipped, line)| (self.pos + skipped, line))
    }

    fn advance(&mut self) -> Option<&'a Line> {
        let lines: &'a [Line] = self.lines;
        let line = lines.get(self.pos)?;
        self.pos += 1;
        Some(line)
    }

    /// Records that `alternatives` were tried at line `at`.
    fn expected(&mut self, at: usize, alternatives: &[&'static str]) {
        match &mut self.furthest {
            Some((pos, tried)) if *pos == at => {
                for alternative in alternatives {
                    if !tried.contains(alternative) {
                        tried.push(*alternative);
                    }
                }
            }
            Some((pos, _)) if *pos > at => {}
            _ => self.furthest = Some((at, alternatives.to_vec())),
        }
    }

    fn mismatch(&self) -> ParseError {
        let (at, expected) = match &self.furthest {
            Some((at, tried)) => (*at, tried.iter().map(|s| s.to_string()).collect()),
            None => (self.pos, Vec::new()),
        };
        match self.lines.get(at) {
            Some(line) => ParseError::GrammarMismatch {
                line: line.index + 1,
                offset: line.offset,
                expected,
                found: line.text.clone(),
            },
            None => ParseError::GrammarMismatch {
                line: self.lines.len() + 1,
                offset: self.lines.last().map_or(0, |l| l.offset + l.text.len()),
                expected,
                found: "end of input".to_string(),
            },
        }
    }

    /// Fails unless only blank lines remain.
    fn finish(&mut self) -> Result<(), ParseError> {
        match self.peek_non_blank() {
            None => Ok(()),
            Some((at, _)) => {
                self.expected(at, &["end of input"]);
                Err(self.mismatch())
            }
        }
    }

    /// Moves the cursor onto the next non-blank line if `accept` matches it.
    fn seek_line(
        &mut self,
        what: &'static str,
        accept: impl Fn(&LineType) -> bool,
    ) -> Result<(), ParseError> {
        match self.peek_non_blank() {
            Some((at, line)) if accept(&line.line_type) => {
                self.pos = at;
                Ok(())
            }
            Some((at, _)) => {
                self.expected(at, &[what]);
                Err(self.mismatch())
            }
            None => {
                self.expected(self.lines.len(), &[what]);
                Err(self.mismatch())
            }
        }
    }

    /// Consumes consecutive text lines at the cursor.
    fn text_continuation(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = self.peek() {
            let LineType::Text(text) = &line.line_type else {
                break;
            };
            lines.push(text.clone());
            self.pos += 1;
        }
        lines
    }

    /// First text block of a unit: text after the number plus following text lines, or,
    /// when nothing follows the number, the first text block after any blank lines.
    fn first_block(&mut self, rest: &str) -> Vec<String> {
        if !rest.is_empty() {
            let mut lines = vec![rest.to_string()];
            lines.extend(self.text_continuation());
            return lines;
        }
        match self.peek_non_blank() {
            Some((at, line))
                if matches!(line.line_type, LineType::Text(_)) && !self.title_ahead(at) =>
            {
                self.pos = at;
                self.text_continuation()
            }
            _ => Vec::new(),
        }
    }

    /// A block starting at `at` with whatever line is there, followed by text lines.
    fn loose_block(&mut self, at: usize) -> Vec<String> {
        self.pos = at;
        let mut lines = Vec::new();
        if let Some(line) = self.advance() {
            lines.push(line.block_text().to_string());
        }
        lines.extend(self.text_continuation());
        lines
    }

    fn act(&mut self) -> Result<Document, ParseError> {
        let preface = self.optional_preface();
        self.resolve_layout();
        let body = self.body();
        let schedules = match self.peek_non_blank() {
            Some((_, line)) if matches!(line.line_type, LineType::Schedule { .. }) => {
                Some(self.schedules()?)
            }
            _ => None,
        };
        Ok(Document {
            preface,
            body,
            schedules,
        })
    }

    /// Joins the text block at the cursor and tries it as a preface.
    fn preface_at(&self) -> Option<(Preface, usize)> {
        let (at, _) = self.peek_non_blank()?;
        let block: Vec<&str> = self.lines[at..]
            .iter()
            .map_while(|line| match &line.line_type {
                LineType::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        if block.is_empty() {
            return None;
        }
        let preface = self.jurisdiction.parse_preface(&block.join(" "))?;
        Some((preface, at + block.len()))
    }

    fn optional_preface(&mut self) -> Option<Preface> {
        let (preface, end) = self.preface_at()?;
        self.pos = end;
        Some(preface)
    }

    fn required_preface(&mut self) -> Result<Preface, ParseError> {
        match self.preface_at() {
            Some((preface, end)) => {
                self.pos = end;
                Ok(preface)
            }
            None => {
                let at = self.peek_non_blank().map_or(self.lines.len(), |(at, _)| at);
                self.expected(at, &["preface"]);
                Err(self.mismatch())
            }
        }
    }

    fn body(&mut self) -> Node {
        let children = self.container_children(None);
        Node::new(NodeKind::Body).with_children(children)
    }

    /// Children of the body or of a container ranked `rank`.
    ///
    /// Headers of the same or an enclosing rank end the container. Text blocks become
    /// subparagraphs, or unit titles when titles precede numbers.
    fn container_children(&mut self, rank: Option<u8>) -> Vec<Node> {
        let mut children = Vec::new();
        while let Some((at, line)) = self.peek_non_blank() {
            match &line.line_type {
                LineType::Header { level, .. } if rank.map_or(true, |r| level.rank() > r) => {
                    self.pos = at;
                    children.push(self.container(*level));
                }
                LineType::StatuteUnit { .. } => {
                    self.pos = at;
                    children.push(self.section(SectionLevel::Statute, None));
                }
                LineType::ParagraphSign { .. } => {
                    self.pos = at;
                    children.push(self.section(SectionLevel::Ordinance, None));
                }
                LineType::Header { .. } | LineType::Schedule { .. } => {
                    self.expected(at, CONTAINER_ALTERNATIVES);
                    break;
                }
                _ if self.title_ahead(at) => {
                    self.pos = at + 1;
                    let heading = line.block_text().to_string();
                    if let Some(section) = self.section_at(Some(heading)) {
                        children.push(section);
                    }
                }
                _ => {
                    let block = self.loose_block(at);
                    children.push(Node::new(NodeKind::Subparagraph).with_content(block));
                }
            }
        }
        children
    }

    /// In title-first layout, a single text line right before a level-0 unit is its title.
    fn title_ahead(&self, at: usize) -> bool {
        if !self.layout.unwrap_or(false) {
            return false;
        }
        if !matches!(self.lines.get(at).map(|l| &l.line_type), Some(LineType::Text(_))) {
            return false;
        }
        if matches!(self.lines.get(at + 1).map(|l| &l.line_type), Some(LineType::Text(_))) {
            return false;
        }
        self.lines[at + 1..]
            .iter()
            .find(|line| !line.line_type.is_blank())
            .is_some_and(|next| {
                matches!(
                    next.line_type,
                    LineType::StatuteUnit { .. } | LineType::ParagraphSign { .. }
                )
            })
    }

    /// Parses the level-0 unit at the next non-blank line.
    fn section_at(&mut self, heading: Option<String>) -> Option<Node> {
        let (at, line) = self.peek_non_blank()?;
        let level = match line.line_type {
            LineType::StatuteUnit { .. } => SectionLevel::Statute,
            LineType::ParagraphSign { .. } => SectionLevel::Ordinance,
            _ => return None,
        };
        self.pos = at;
        Some(self.section(level, heading))
    }

    fn container(&mut self, level: ContainerLevel) -> Node {
        let Some(line) = self.advance() else {
            return Node::new(NodeKind::Container(level));
        };
        let (number, same_line) = match &line.line_type {
            LineType::Header {
                number, heading, ..
            } => (number.clone(), heading.clone()),
            _ => (line.text.clone(), None),
        };
        let heading = same_line.or_else(|| match self.peek() {
            Some(Line {
                line_type: LineType::Text(text),
                ..
            }) => {
                self.pos += 1;
                Some(text.clone())
            }
            _ => None,
        });
        let children = self.container_children(Some(level.rank()));
        Node::new(NodeKind::Container(level))
            .with_number(number)
            .with_heading(heading)
            .with_children(children)
    }

    fn entry_container(&mut self, level: ContainerLevel) -> Result<Node, ParseError> {
        self.seek_line(level.name(), |line_type| {
            matches!(line_type, LineType::Header { level: found, .. } if *found == level)
        })?;
        Ok(self.container(level))
    }

    fn section(&mut self, level: SectionLevel, heading: Option<String>) -> Node {
        let (number, rest) = self.unit_header();
        let block = self.first_block(&rest);
        let children = self.unit_children(Scope::Section(level));
        Node::new(NodeKind::Section(level))
            .with_number(number)
            .with_heading(heading)
            .with_block(block, children)
    }

    fn subsection(&mut self, level: SubsectionLevel) -> Node {
        let (number, rest) = self.unit_header();
        let block = self.first_block(&rest);
        let children = self.unit_children(Scope::Subsection);
        Node::new(NodeKind::Subsection(level))
            .with_number(number)
            .with_block(block, children)
    }

    fn point(&mut self, kind: PointKind) -> Node {
        let (number, rest) = self.unit_header();
        let block = self.first_block(&rest);
        let scope = match kind {
            PointKind::Point => Scope::Point,
            PointKind::Letter => Scope::Letter,
        };
        let children = self.unit_children(scope);
        Node::new(NodeKind::Point(kind))
            .with_number(number)
            .with_block(block, children)
    }

    /// Consumes the numbered line at the cursor.
    fn unit_header(&mut self) -> (String, String) {
        match self.advance().map(|line| &line.line_type) {
            Some(
                LineType::StatuteUnit { number, rest }
                | LineType::ParagraphSign { number, rest }
                | LineType::Level1 { number, rest }
                | LineType::Point { number, rest }
                | LineType::Letter { number, rest },
            ) => (number.clone(), rest.clone()),
            _ => (String::new(), String::new()),
        }
    }

    /// Children of a numbered unit in `scope`.
    fn unit_children(&mut self, scope: Scope) -> Vec<Node> {
        let mut children = Vec::new();
        let mut open: Option<PointKind> = None;
        while let Some((at, line)) = self.peek_non_blank() {
            match (&line.line_type, scope) {
                (LineType::Level1 { .. }, Scope::Section(_)) => {
                    self.pos = at;
                    children.push(self.subsection(SubsectionLevel::Noncode));
                    open = None;
                }
                (LineType::ParagraphSign { .. }, Scope::Section(SectionLevel::Statute)) => {
                    self.pos = at;
                    children.push(self.subsection(SubsectionLevel::Code));
                    open = None;
                }
                (LineType::Point { .. }, Scope::Section(_) | Scope::Subsection) => {
                    self.pos = at;
                    children.extend(self.enumeration(PointKind::Point));
                    open = Some(PointKind::Point);
                }
                (
                    LineType::Letter { .. },
                    Scope::Section(_) | Scope::Subsection | Scope::Point,
                ) => {
                    self.pos = at;
                    children.extend(self.enumeration(PointKind::Letter));
                    open = Some(PointKind::Letter);
                }
                (LineType::Tiret { depth, .. }, _) => {
                    self.pos = at;
                    children.push(self.tiret_list(*depth));
                    open = None;
                }
                (LineType::Dash { marker, text }, _)
                    if open.is_some() && scope.accepts_wrap_up(*marker) =>
                {
                    self.pos = at + 1;
                    if let Some(kind) = open.take() {
                        let wrap_up = Node::new(NodeKind::WrapUp(kind));
                        children.push(wrap_up.with_content(vec![text.clone()]));
                    }
                }
                (LineType::Text(_), _) if self.title_ahead(at) => {
                    self.expected(at, scope.alternatives());
                    break;
                }
                (
                    LineType::Text(_) | LineType::Dash { .. },
                    Scope::Section(_) | Scope::Subsection,
                ) => {
                    let block = self.loose_block(at);
                    children.push(Node::new(NodeKind::Subparagraph).with_content(block));
                    open = None;
                }
                _ => {
                    self.expected(at, scope.alternatives());
                    break;
                }
            }
        }
        children
    }

    /// Consecutive enumeration items of one kind.
    fn enumeration(&mut self, kind: PointKind) -> Vec<Node> {
        let mut items = Vec::new();
        while let Some((at, line)) = self.peek_non_blank() {
            let same_kind = matches!(
                (kind, &line.line_type),
                (PointKind::Point, LineType::Point { .. })
                    | (PointKind::Letter, LineType::Letter { .. })
            );
            if !same_kind {
                break;
            }
            self.pos = at;
            items.push(self.point(kind));
        }
        items
    }

    /// A list of tirets at `depth`; deeper tirets nest as lists in place.
    fn tiret_list(&mut self, depth: TiretDepth) -> Node {
        let mut children = Vec::new();
        while let Some((at, line)) = self.peek_non_blank() {
            let LineType::Tiret { depth: found, text } = &line.line_type else {
                break;
            };
            if *found == depth {
                self.pos = at + 1;
                let content = if text.is_empty() {
                    Vec::new()
                } else {
                    vec![text.clone()]
                };
                children.push(Node::new(NodeKind::Indent(depth)).with_content(content));
            } else if *found > depth {
                self.pos = at;
                children.push(self.tiret_list(*found));
            } else {
                break;
            }
        }
        Node::new(NodeKind::List).with_children(children)
    }

    fn entry_section(&mut self, level: SectionLevel) -> Result<Node, ParseError> {
        let heading = match self.peek_non_blank() {
            Some((at, line)) if self.title_ahead(at) => {
                self.pos = at + 1;
                Some(line.block_text().to_string())
            }
            _ => None,
        };
        let name = EntryRule::Section(level).name();
        self.seek_line(name, |line_type| match level {
            SectionLevel::Statute => matches!(line_type, LineType::StatuteUnit { .. }),
            SectionLevel::Ordinance => matches!(line_type, LineType::ParagraphSign { .. }),
        })?;
        Ok(self.section(level, heading))
    }

    fn entry_subsection(&mut self, level: SubsectionLevel) -> Result<Node, ParseError> {
        let name = EntryRule::Subsection(level).name();
        self.seek_line(name, |line_type| match level {
            SubsectionLevel::Noncode => matches!(line_type, LineType::Level1 { .. }),
            SubsectionLevel::Code => matches!(line_type, LineType::ParagraphSign { .. }),
        })?;
        Ok(self.subsection(level))
    }

    fn entry_point(&mut self, kind: PointKind) -> Result<Node, ParseError> {
        let name = EntryRule::Point(kind).name();
        self.seek_line(name, |line_type| match kind {
            PointKind::Point => matches!(line_type, LineType::Point { .. }),
            PointKind::Letter => matches!(line_type, LineType::Letter { .. }),
        })?;
        Ok(self.point(kind))
    }

    fn entry_tiret(&mut self, depth: TiretDepth) -> Result<Node, ParseError> {
        let name = EntryRule::Tiret(depth).name();
        self.seek_line(name, |line_type| {
            matches!(line_type, LineType::Tiret { depth: found, .. } if *found == depth)
        })?;
        Ok(self.tiret_list(depth))
    }

    fn schedules(&mut self) -> Result<ScheduleContainer, ParseError> {
        let mut schedules = Vec::new();
        while let Some((at, line)) = self.peek_non_blank() {
            let LineType::Schedule { number, title } = &line.line_type else {
                self.expected(at, &["schedule"]);
                break;
            };
            self.pos = at + 1;
            let mut schedule = Schedule::new(number.clone(), title.clone());
            schedule.heading = match self.peek() {
                Some(Line {
                    line_type: LineType::Text(text),
                    ..
                }) => {
                    self.pos += 1;
                    Some(text.clone())
                }
                _ => None,
            };
            schedule.body = self.body();
            schedules.push(schedule);
        }
        if schedules.is_empty() {
            let at = self.peek_non_blank().map_or(self.lines.len(), |(at, _)| at);
            self.expected(at, &["schedule"]);
            return Err(self.mismatch());
        }
        Ok(ScheduleContainer { schedules })
    }
}
