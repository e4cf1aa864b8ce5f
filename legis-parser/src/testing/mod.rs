//! Testing utilities
//!
//!     Tree tests go through the fluent assertions in [node_assertions] instead of walking
//!     nodes by hand. Walking code breaks every time the node layout changes and tends to
//!     check only counts; the fluent API checks content and structure in a few lines.
//!
//!     ```rust,ignore
//!     use legis_parser::testing::{assert_node, parse_rule};
//!
//!     let node = parse_rule("Art. 2.\n1. Przepisów:\n1) przychodów", "statute_level0_unit");
//!     assert_node(&node)
//!         .section()
//!         .number("2")
//!         .child(0, |sub| {
//!             sub.subsection().number("1").child(0, |point| point.point().number("1"));
//!         });
//!     ```

mod matchers;
mod node_assertions;

pub use matchers::TextMatch;
pub use node_assertions::{assert_node, NodeAssertion};

use crate::ast::{Document, Node};
use crate::grammar::{EntryRule, Fragment, Parser};
use crate::ids::{assign_document, assign_node};
use crate::lexing::Jurisdiction;

fn polish_parser() -> Parser {
    let jurisdiction = Jurisdiction::polish().expect("built-in rules compile");
    Parser::new(jurisdiction)
}

/// Parses `source` with the Polish rules from `rule` (by name) and assigns ids with no prefix.
///
/// Panics when the source does not parse; meant for tests only.
pub fn parse_rule(source: &str, rule: &str) -> Node {
    let rule: EntryRule = rule.parse().expect("known entry rule");
    match polish_parser().parse(source, rule) {
        Ok(Fragment::Node(node)) => assign_node(node, ""),
        Ok(other) => panic!("{rule}: expected a node, got {other:?}"),
        Err(err) => panic!("{rule}: {err}\n--- source ---\n{source}"),
    }
}

/// Parses a whole act with the Polish rules and assigns ids with no prefix.
pub fn parse_act(source: &str) -> Document {
    match polish_parser().parse_act(source) {
        Ok(document) => assign_document(document, ""),
        Err(err) => panic!("act: {err}\n--- source ---\n{source}"),
    }
}
