use serde::Serialize;

/// Grouping levels above the level-0 unit, from outermost to innermost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerLevel {
    Part,
    Book,
    Title,
    Division,
    Chapter,
    Subdivision,
}

impl ContainerLevel {
    pub const ALL: [ContainerLevel; 6] = [
        ContainerLevel::Part,
        ContainerLevel::Book,
        ContainerLevel::Title,
        ContainerLevel::Division,
        ContainerLevel::Chapter,
        ContainerLevel::Subdivision,
    ];

    /// Lower ranks enclose higher ranks.
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            ContainerLevel::Part => "part",
            ContainerLevel::Book => "book",
            ContainerLevel::Title => "title",
            ContainerLevel::Division => "division",
            ContainerLevel::Chapter => "chapter",
            ContainerLevel::Subdivision => "subdivision",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionLevel {
    /// `Art. N.` units of statutes.
    Statute,
    /// `§ N.` units of ordinances.
    Ordinance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubsectionLevel {
    /// `N.` subdivisions.
    Noncode,
    /// `§ N.` subdivisions inside a statute article.
    Code,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointKind {
    /// `N)` enumeration items.
    Point,
    /// `abc)` enumeration items.
    Letter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TiretDepth {
    Single,
    Double,
    Triple,
}

impl TiretDepth {
    /// Maps a 1-based nesting depth, clamping anything deeper than three.
    pub fn from_depth(depth: u8) -> Self {
        match depth {
            0 | 1 => TiretDepth::Single,
            2 => TiretDepth::Double,
            _ => TiretDepth::Triple,
        }
    }

    pub fn depth(self) -> u8 {
        match self {
            TiretDepth::Single => 1,
            TiretDepth::Double => 2,
            TiretDepth::Triple => 3,
        }
    }
}

/// What a [Node] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "level", rename_all = "snake_case")]
pub enum NodeKind {
    Body,
    Container(ContainerLevel),
    Section(SectionLevel),
    Subsection(SubsectionLevel),
    Point(PointKind),
    /// Positional group of tirets; children are [NodeKind::Indent] or nested lists.
    List,
    Indent(TiretDepth),
    /// Closing text of an enumeration, tagged by the kind of items it closes.
    WrapUp(PointKind),
    /// Unnumbered block of text.
    Subparagraph,
}

impl NodeKind {
    /// Element name used in identifiers and in the XML vocabulary.
    pub fn element_name(self) -> &'static str {
        match self {
            NodeKind::Body => "body",
            NodeKind::Container(level) => level.name(),
            NodeKind::Section(_) => "section",
            NodeKind::Subsection(_) => "subsection",
            NodeKind::Point(_) => "point",
            NodeKind::List => "list",
            NodeKind::Indent(_) => "indent",
            NodeKind::WrapUp(_) => "wrapUp",
            NodeKind::Subparagraph => "subparagraph",
        }
    }

    /// Classification tag carried in the `refersTo` attribute.
    pub fn refers_to(self) -> Option<&'static str> {
        match self {
            NodeKind::Section(SectionLevel::Statute) => Some("statute"),
            NodeKind::Section(SectionLevel::Ordinance) => Some("ordinance"),
            NodeKind::Subsection(SubsectionLevel::Noncode) => Some("noncode_level1_unit"),
            NodeKind::Subsection(SubsectionLevel::Code) => Some("code_level1_unit"),
            NodeKind::Point(PointKind::Point) => Some("point_unit"),
            NodeKind::Point(PointKind::Letter) => Some("letter_unit"),
            NodeKind::Indent(TiretDepth::Single) => Some("single_tiret"),
            NodeKind::Indent(TiretDepth::Double) => Some("double_tiret"),
            NodeKind::Indent(TiretDepth::Triple) => Some("triple_tiret"),
            NodeKind::WrapUp(PointKind::Point) => Some("wrap_up_for_points"),
            NodeKind::WrapUp(PointKind::Letter) => Some("wrap_up_for_letters"),
            NodeKind::Body
            | NodeKind::Container(_)
            | NodeKind::List
            | NodeKind::Subparagraph => None,
        }
    }

    /// Grouping elements may be empty and never carry flat content.
    pub fn is_grouping(self) -> bool {
        matches!(
            self,
            NodeKind::Body | NodeKind::Container(_) | NodeKind::List
        )
    }

    /// Elements whose identifier is positional rather than numbered.
    pub fn is_positional(self) -> bool {
        matches!(
            self,
            NodeKind::List | NodeKind::Indent(_) | NodeKind::Subparagraph
        )
    }
}

/// Either flat text, or an intro plus children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Contents {
    Content(Vec<String>),
    Nested {
        intro: Vec<String>,
        children: Vec<Node>,
    },
}

impl Default for Contents {
    fn default() -> Self {
        Contents::Nested {
            intro: Vec::new(),
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    #[serde(flatten)]
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    pub contents: Contents,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            id: None,
            number: None,
            heading: None,
            contents: Contents::default(),
        }
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn with_heading(mut self, heading: Option<String>) -> Self {
        self.heading = heading;
        self
    }

    pub fn with_content(mut self, lines: Vec<String>) -> Self {
        self.contents = Contents::Content(lines);
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        let intro = match self.contents {
            Contents::Nested { intro, .. } => intro,
            Contents::Content(_) => Vec::new(),
        };
        self.contents = Contents::Nested { intro, children };
        self
    }

    /// Builds the contents of a numbered unit from its first text block and children.
    ///
    /// The block becomes the intro when there are children and the content otherwise.
    pub fn with_block(mut self, block: Vec<String>, children: Vec<Node>) -> Self {
        self.contents = if children.is_empty() {
            Contents::Content(block)
        } else {
            Contents::Nested {
                intro: block,
                children,
            }
        };
        self
    }

    pub fn children(&self) -> &[Node] {
        match &self.contents {
            Contents::Nested { children, .. } => children,
            Contents::Content(_) => &[],
        }
    }

    pub fn intro(&self) -> &[String] {
        match &self.contents {
            Contents::Nested { intro, .. } => intro,
            Contents::Content(_) => &[],
        }
    }

    pub fn content(&self) -> Option<&[String]> {
        match &self.contents {
            Contents::Content(lines) => Some(lines),
            Contents::Nested { .. } => None,
        }
    }

    /// Number as displayed in the `num` element; enumeration items keep their parenthesis.
    pub fn display_number(&self) -> Option<String> {
        self.number.as_ref().map(|number| match self.kind {
            NodeKind::Point(_) => format!("{number})"),
            _ => number.clone(),
        })
    }

    /// Depth-first walk over this node and all descendants.
    pub fn walk(&self) -> Vec<&Node> {
        let mut out = vec![self];
        for child in self.children() {
            out.extend(child.walk());
        }
        out
    }
}
