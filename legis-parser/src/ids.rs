//! Identifier assignment.
//!
//!     Identifiers are dotted paths of `<element>-<number>` components. Containers and
//!     lower units chain onto their parent's identifier, but two elements restart the
//!     path at the root prefix: books and level-0 units. That keeps `section-54` stable no
//!     matter which chapter or division it sits in.
//!
//!     Unnumbered elements (lists, tirets, subparagraphs) use a 0-based position instead
//!     of a number. Inside a list every entry counts its position among all entries; elsewhere
//!     the count is per element kind. Wrap-ups and the body carry no identifier.

use std::collections::HashMap;

use crate::ast::{ContainerLevel, Contents, Document, Node, NodeKind, ScheduleContainer};
use crate::grammar::Fragment;

/// Assigns identifiers across a whole document, prefixing every root-level path with `root`.
pub fn assign_document(mut document: Document, root: &str) -> Document {
    document.body = assign_node(document.body, root);
    document.schedules = document
        .schedules
        .map(|schedules| assign_schedules(schedules, root));
    document
}

/// Assigns identifiers to a standalone node and its descendants.
///
/// `prefix` is used both as the parent path and as the root path, so a point parsed on its
/// own with prefix `prefix.` ends up as `prefix.point-1`.
pub fn assign_node(node: Node, prefix: &str) -> Node {
    assign(node, prefix, prefix, 0)
}

pub fn assign_fragment(fragment: Fragment, prefix: &str) -> Fragment {
    match fragment {
        Fragment::Act(document) => Fragment::Act(assign_document(document, prefix)),
        Fragment::Node(node) => Fragment::Node(assign_node(node, prefix)),
        Fragment::Schedules(schedules) => Fragment::Schedules(assign_schedules(schedules, prefix)),
        preface @ Fragment::Preface(_) => preface,
    }
}

fn assign_schedules(mut container: ScheduleContainer, root: &str) -> ScheduleContainer {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for (index, schedule) in container.schedules.iter_mut().enumerate() {
        let component = schedule.component_name();
        if let Some(first) = seen.insert(component.clone(), index) {
            tracing::warn!(
                component = %component,
                first = first + 1,
                duplicate = index + 1,
                "schedules share a component name"
            );
        }
        let id = format!("{root}{component}");
        let prefix = format!("{id}.");
        let body = std::mem::replace(&mut schedule.body, Node::new(NodeKind::Body));
        schedule.body = assign(body, &prefix, &prefix, 0);
        schedule.id = Some(id);
    }
    container
}

fn assign(mut node: Node, root: &str, parent: &str, position: usize) -> Node {
    let id = match node.kind {
        NodeKind::Body | NodeKind::WrapUp(_) => None,
        NodeKind::Container(ContainerLevel::Book) | NodeKind::Section(_) => {
            Some(format!("{root}{}", component(&node, position)))
        }
        _ => Some(format!("{parent}{}", component(&node, position))),
    };
    let child_prefix = match &id {
        Some(id) => format!("{id}."),
        None => parent.to_string(),
    };
    let positional = node.kind == NodeKind::List;
    node.contents = match node.contents {
        Contents::Nested { intro, children } => Contents::Nested {
            intro,
            children: assign_children(children, root, &child_prefix, positional),
        },
        content => content,
    };
    node.id = id;
    node
}

fn assign_children(children: Vec<Node>, root: &str, parent: &str, positional: bool) -> Vec<Node> {
    let mut counters: HashMap<&'static str, usize> = HashMap::new();
    children
        .into_iter()
        .enumerate()
        .map(|(index, child)| {
            let position = if positional {
                index
            } else {
                let counter = counters.entry(child.kind.element_name()).or_insert(0);
                *counter += 1;
                *counter - 1
            };
            assign(child, root, parent, position)
        })
        .collect()
}

fn component(node: &Node, position: usize) -> String {
    let name = node.kind.element_name();
    match &node.number {
        Some(number) if !node.kind.is_positional() => format!("{name}-{number}"),
        _ => format!("{name}-{position}"),
    }
}
