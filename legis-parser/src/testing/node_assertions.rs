use crate::ast::{ContainerLevel, Node, NodeKind, PointKind, SectionLevel, SubsectionLevel};
use crate::testing::matchers::TextMatch;

pub fn assert_node(node: &Node) -> NodeAssertion<'_> {
    NodeAssertion {
        node,
        context: node.kind.element_name().to_string(),
    }
}

pub struct NodeAssertion<'a> {
    node: &'a Node,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn kind(self, expected: NodeKind) -> Self {
        assert_eq!(
            self.node.kind, expected,
            "{}: Expected kind {:?}, found {:?}",
            self.context, expected, self.node.kind
        );
        self
    }

    pub fn section(self) -> Self {
        assert!(
            matches!(self.node.kind, NodeKind::Section(_)),
            "{}: Expected section, found {:?}",
            self.context,
            self.node.kind
        );
        self
    }

    pub fn statute(self) -> Self {
        self.kind(NodeKind::Section(SectionLevel::Statute))
    }

    pub fn ordinance(self) -> Self {
        self.kind(NodeKind::Section(SectionLevel::Ordinance))
    }

    pub fn subsection(self) -> Self {
        assert!(
            matches!(self.node.kind, NodeKind::Subsection(_)),
            "{}: Expected subsection, found {:?}",
            self.context,
            self.node.kind
        );
        self
    }

    pub fn code_subsection(self) -> Self {
        self.kind(NodeKind::Subsection(SubsectionLevel::Code))
    }

    pub fn container(self, level: ContainerLevel) -> Self {
        self.kind(NodeKind::Container(level))
    }

    pub fn point(self) -> Self {
        self.kind(NodeKind::Point(PointKind::Point))
    }

    pub fn letter(self) -> Self {
        self.kind(NodeKind::Point(PointKind::Letter))
    }

    pub fn list(self) -> Self {
        self.kind(NodeKind::List)
    }

    pub fn subparagraph(self) -> Self {
        self.kind(NodeKind::Subparagraph)
    }

    pub fn wrap_up(self, closes: PointKind) -> Self {
        self.kind(NodeKind::WrapUp(closes))
    }

    pub fn number(self, expected: &str) -> Self {
        assert_eq!(
            self.node.number.as_deref(),
            Some(expected),
            "{}: Expected number '{}'",
            self.context,
            expected
        );
        self
    }

    pub fn heading(self, expected: &str) -> Self {
        assert_eq!(
            self.node.heading.as_deref(),
            Some(expected),
            "{}: Expected heading '{}'",
            self.context,
            expected
        );
        self
    }

    pub fn no_heading(self) -> Self {
        assert_eq!(
            self.node.heading, None,
            "{}: Expected no heading",
            self.context
        );
        self
    }

    pub fn id(self, expected: &str) -> Self {
        assert_eq!(
            self.node.id.as_deref(),
            Some(expected),
            "{}: Expected id '{}'",
            self.context,
            expected
        );
        self
    }

    pub fn content(self, expected: &[&str]) -> Self {
        match self.node.content() {
            Some(lines) => assert_eq!(lines, expected, "{}: content differs", self.context),
            None => panic!(
                "{}: Expected flat content, found {} children",
                self.context,
                self.node.children().len()
            ),
        }
        self
    }

    pub fn content_matches(self, line: usize, expected: TextMatch) -> Self {
        let lines = self.node.content().unwrap_or_else(|| {
            panic!("{}: Expected flat content, found children", self.context)
        });
        let actual = lines.get(line).unwrap_or_else(|| {
            panic!(
                "{}: Content line {} out of bounds ({} lines)",
                self.context,
                line,
                lines.len()
            )
        });
        expected.assert(actual, &format!("{}:content[{}]", self.context, line));
        self
    }

    pub fn intro(self, expected: &[&str]) -> Self {
        assert!(
            self.node.content().is_none(),
            "{}: Expected intro and children, found flat content",
            self.context
        );
        assert_eq!(self.node.intro(), expected, "{}: intro differs", self.context);
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.node.children().len();
        assert_eq!(
            actual, expected,
            "{}: Expected {} children, found {}",
            self.context, expected, actual
        );
        self
    }

    pub fn child<F, R>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> R,
    {
        let children = self.node.children();
        let child = children.get(index).unwrap_or_else(|| {
            panic!(
                "{}: Child index {} out of bounds ({} children)",
                self.context,
                index,
                children.len()
            )
        });
        assertion(NodeAssertion {
            node: child,
            context: format!("{}:children[{}]", self.context, index),
        });
        self
    }
}
