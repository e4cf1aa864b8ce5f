use legis_babel::unparse;
use legis_parser::testing::assert_node;
use legis_parser::{EntryRule, Fragment, SectionLevel};

use super::{parser, polish};

const SECTION: &str = r#"<section id="section-1">
  <num>1.</num>
  <heading>Section</heading>
  <paragraph id="section-1.paragraph-0">
    <content>
      <p>Chapter 2 ignored</p>
      <p>Part 2 ignored</p>
      <p>Schedule 2 ignored</p>
      <p>BODY ignored</p>
      <p>PREAMBLE ignored</p>
      <p>PREFACE ignored</p>
      <p>2. ignored</p>
      <p>2.1 ignored</p>
      <p>(2) ignored</p>
      <p>(a) ignored</p>
      <p>(2a) ignored</p>
      <p>{| ignored</p>
    </content>
  </paragraph>
</section>"#;

#[test]
fn structural_lines_are_escaped() {
    let text = unparse(SECTION, &polish()).unwrap();
    assert_eq!(
        text,
        r"Section
Art. 1.

\Chapter 2 ignored
\Part 2 ignored
\Schedule 2 ignored
\BODY ignored
\PREAMBLE ignored
\PREFACE ignored
\2. ignored
\2.1 ignored
\(2) ignored
\(a) ignored
\(2a) ignored
\{| ignored
"
    );
}

#[test]
fn jurisdiction_keywords_are_escaped() {
    let xml = r#"<subparagraph>
  <content>
    <p>Art. 5. ignored</p>
    <p>Rozdział 3 ignored</p>
    <p>Załącznik nr 2</p>
    <p>1) ignored</p>
    <p>b) ignored</p>
    <p>– ignored</p>
    <p>zwykły tekst</p>
  </content>
</subparagraph>"#;
    let text = unparse(xml, &polish()).unwrap();
    assert_eq!(
        text,
        r"\Art. 5. ignored
\Rozdział 3 ignored
\Załącznik nr 2
\1) ignored
\b) ignored
\– ignored
zwykły tekst
"
    );
}

#[test]
fn text_after_a_number_is_not_escaped() {
    let xml = r#"<section refersTo="statute"><num>2</num><content><p>Chapter 2 stays</p><p>Chapter 3 moves</p></content></section>"#;
    let text = unparse(xml, &polish()).unwrap();
    assert_eq!(text, "Art. 2. Chapter 2 stays\n\\Chapter 3 moves\n");
}

#[test]
fn lines_of_one_paragraph_stay_in_one_block() {
    let xml = r#"<section refersTo="statute"><num>1</num><content><p>Pierwszy wiersz</p><p>Drugi wiersz</p></content></section>"#;
    let text = unparse(xml, &polish()).unwrap();
    assert_eq!(text, "Art. 1. Pierwszy wiersz\nDrugi wiersz\n");

    let rule = EntryRule::Section(SectionLevel::Statute);
    let Fragment::Node(section) = parser().parse(&text, rule).unwrap() else {
        panic!("section parses to a node");
    };
    assert_node(&section).content(&["Pierwszy wiersz", "Drugi wiersz"]);

    // a blank line between the two would open a subparagraph of its own
    let Fragment::Node(split) = parser()
        .parse("Art. 1. Pierwszy wiersz\n\nDrugi wiersz\n", rule)
        .unwrap()
    else {
        panic!("section parses to a node");
    };
    assert_node(&split)
        .intro(&["Pierwszy wiersz"])
        .child_count(1)
        .child(0, |sub| sub.subparagraph().content(&["Drugi wiersz"]));
}

#[test]
fn tirets_and_wrap_ups_get_markers() {
    let xml = r#"<point refersTo="point_unit">
  <num>1)</num>
  <intro><p>prawo przejazdu:</p></intro>
  <point refersTo="letter_unit"><num>a)</num><content><p>przez rynek,</p></content></point>
  <wrapUp refersTo="wrap_up_for_letters"><p>– w niedziele</p></wrapUp>
</point>"#;
    let text = unparse(xml, &polish()).unwrap();
    assert_eq!(
        text,
        "1) prawo przejazdu:\n\na) przez rynek,\n\n@@INDENT1@@– w niedziele\n"
    );
}

#[test]
fn invalid_xml_is_reported() {
    assert!(unparse("<section><num>1</section>", &polish()).is_err());
}
