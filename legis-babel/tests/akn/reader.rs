//! Reading Akoma Ntoso back into a tree

use legis_babel::formats::akn::{read_document, serialize_document, serialize_node};
use legis_babel::FormatError;
use legis_parser::testing::{assert_node, parse_act};
use legis_parser::NodeKind;

use super::document::{generation_date, identity, SOURCE};
use super::parse;

const HAND_WRITTEN: &str = r#"<section id="section-1">
  <num>1.</num>
  <heading>Section</heading>
  <paragraph id="section-1.paragraph-0">
    <content>
      <p>Chapter 2 ignored</p>
      <p>(a) ignored</p>
    </content>
  </paragraph>
</section>"#;

#[test]
fn hand_written_section_reads_like_our_own_output() {
    let document = read_document(HAND_WRITTEN).unwrap();
    assert_node(&document.body).child_count(1).child(0, |section| {
        section
            .statute()
            .id("section-1")
            .number("1")
            .heading("Section")
            .child(0, |sub| {
                sub.subparagraph()
                    .id("section-1.subparagraph-0")
                    .content(&["Chapter 2 ignored", "(a) ignored"])
            })
    });
}

#[test]
fn whole_document_round_trips() {
    let xml = serialize_document(&parse_act(SOURCE), &identity(), generation_date()).unwrap();
    let document = read_document(&xml).unwrap();

    assert_eq!(document, parse_act(SOURCE));
    assert_eq!(
        serialize_document(&document, &identity(), generation_date()).unwrap(),
        xml
    );
}

#[test]
fn preface_and_components_are_read() {
    let xml = serialize_document(&parse_act(SOURCE), &identity(), generation_date()).unwrap();
    let document = read_document(&xml).unwrap();

    let preface = document.preface.unwrap();
    assert_eq!(preface.doc_number, "");
    assert_eq!(preface.doc_date, "z dnia 1 marca 2020 r. ");
    assert_eq!(preface.doc_title, "o testach");

    let schedules = document.schedules.unwrap().schedules;
    assert_eq!(schedules.len(), 1);
    assert_eq!(schedules[0].number.as_deref(), Some("1"));
    assert_eq!(schedules[0].title.as_deref(), Some("Wzór wniosku"));
    assert_eq!(schedules[0].heading.as_deref(), Some("Wniosek o wpis"));
    assert_eq!(schedules[0].id.as_deref(), Some("schedule1"));
}

#[test]
fn default_alias_does_not_become_a_title() {
    let document = parse_act("Art. 1. Tekst.\n\nZałącznik 2\n\nTreść\n");
    let xml = serialize_document(&document, &identity(), generation_date()).unwrap();
    assert!(xml.contains("<FRBRalias value=\"Schedule 2\"/>"));

    let read = read_document(&xml).unwrap();
    let schedule = &read.schedules.unwrap().schedules[0];
    assert_eq!(schedule.title, None);
    assert_eq!(schedule.number.as_deref(), Some("2"));
}

#[rstest::rstest]
#[case::all_levels(
    "body",
    "CZĘŚĆ WOJSKOWA\nKSIĘGA ÓSMA\nVvv\nTYTUŁ XVI\nXxx\nDział 987\nYyy\nRozdział 654\nZzz\nOddział 321\nŻżż\nArt. 123.\n456. Aaa aaa\n789) Bbb bbb\nabc) Ccc ccc\n@@INDENT2@@– Ddd ddd\n@@INDENT3@@– – Eee eee\n@@INDENT4@@– – – Fff fff\n"
)]
#[case::wrap_ups(
    "statute_level0_unit",
    "Art. 1. The following rights:\n1) right of passage:\na) through the town square,\nb) through the town marketplace\n@@INDENT1@@– assuming it is Sunday\n2) the right to Y\n@@INDENT0@@– shall not be abrogated.\n"
)]
fn nested_units_round_trip(#[case] rule: &str, #[case] source: &str) {
    let xml = serialize_node(&parse(rule, source)).unwrap();
    let document = read_document(&xml).unwrap();
    let read = if rule == "body" {
        serialize_node(&document.body).unwrap()
    } else {
        serialize_node(&document.body.children()[0]).unwrap()
    };
    assert_eq!(read, xml);
}

#[test]
fn points_without_refers_to_use_the_number_shape() {
    let document = read_document(
        r#"<point><num>1)</num><intro><p>Wstęp</p></intro><point><num>a)</num><content><p>x</p></content></point></point>"#,
    )
    .unwrap();
    assert_node(&document.body).child(0, |point| {
        point
            .point()
            .number("1")
            .intro(&["Wstęp"])
            .child(0, |letter| letter.letter().number("a").content(&["x"]))
    });
}

#[test]
fn bare_body_has_no_preface() {
    let document = read_document("<body><subparagraph><content><p>a</p></content></subparagraph></body>").unwrap();
    assert!(document.preface.is_none());
    assert!(document.schedules.is_none());
    assert_eq!(document.body.kind, NodeKind::Body);
    assert_eq!(document.body.children()[0].id.as_deref(), Some("subparagraph-0"));
}

#[test]
fn unknown_document_type_is_rejected() {
    let err = read_document(
        r#"<act><preface><docNumber/><docType>decree</docType><docDate/><docTitle><p>x</p></docTitle></preface><body/></act>"#,
    )
    .unwrap_err();
    assert_eq!(err, FormatError::ParseError("unknown docType 'decree'".into()));
}
