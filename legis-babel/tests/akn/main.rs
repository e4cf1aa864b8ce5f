//! Akoma Ntoso format tests
//!
//! Expected XML is written out in full: the element layout is the contract with downstream
//! consumers, so a changed indent or attribute order is a real change.

mod document;
mod preface;
mod reader;

use legis_babel::formats::akn::serialize_node;
use legis_parser::{assign_node, EntryRule, Fragment, Jurisdiction, Node, Parser, Preface};

fn parser() -> Parser {
    Parser::new(Jurisdiction::polish().expect("built-in rules compile"))
}

/// Parses `source` from the named entry rule and assigns ids under `prefix`.
pub fn parse_with_prefix(rule: &str, source: &str, prefix: &str) -> Node {
    let rule: EntryRule = rule.parse().expect("known entry rule");
    match parser().parse(source, rule) {
        Ok(Fragment::Node(node)) => assign_node(node, prefix),
        Ok(other) => panic!("{rule}: expected a node, got {other:?}"),
        Err(err) => panic!("{rule}: {err}"),
    }
}

pub fn parse(rule: &str, source: &str) -> Node {
    parse_with_prefix(rule, source, "")
}

pub fn parse_preface(source: &str) -> Preface {
    match parser().parse(source, EntryRule::Preface) {
        Ok(Fragment::Preface(preface)) => preface,
        Ok(other) => panic!("expected a preface, got {other:?}"),
        Err(err) => panic!("preface: {err}"),
    }
}

pub fn to_xml(node: &Node) -> String {
    serialize_node(node).expect("serializable tree")
}
