//! Plain-text format tests: escaping on the way out, re-parsing on the way back in.

mod registry;
mod unparse;

use legis_parser::{Jurisdiction, Parser};

pub fn polish() -> Jurisdiction {
    Jurisdiction::polish().expect("built-in rules compile")
}

pub fn parser() -> Parser {
    Parser::new(polish())
}
