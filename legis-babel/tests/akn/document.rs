//! Whole documents: identification block, preface, body and schedule components

use chrono::NaiveDate;
use legis_babel::formats::akn::{serialize_document, serialize_schedules, AknFormat, Identity};
use legis_babel::{Format, FormatError};
use legis_parser::testing::parse_act;
use legis_parser::{Document, Node, NodeKind};

pub const SOURCE: &str = "USTAWA z dnia 1 marca 2020 r. o testach

Art. 1. Ustawa określa zasady.

Załącznik nr 1 – Wzór wniosku
Wniosek o wpis

Imię i nazwisko
";

pub fn identity() -> Identity {
    let date = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
    Identity {
        frbr_uri: "/pl/act/2020/1".to_string(),
        country: "pl".to_string(),
        language: "pol".to_string(),
        work_date: date,
        expression_date: date,
        author: "#sejm".to_string(),
        generator: "#legis".to_string(),
    }
}

pub fn generation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

#[test]
fn document_with_preface_and_schedule() {
    let document = parse_act(SOURCE);
    let xml = serialize_document(&document, &identity(), generation_date()).unwrap();

    insta::assert_snapshot!(xml.trim_end(), @r##"
<?xml version="1.0" encoding="UTF-8"?>
<akomaNtoso xmlns="http://www.akomantoso.org/2.0">
  <act contains="originalVersion">
    <meta>
      <identification source="#legis">
        <FRBRWork>
          <FRBRthis value="/pl/act/2020/1/main"/>
          <FRBRuri value="/pl/act/2020/1"/>
          <FRBRalias value="o testach"/>
          <FRBRdate date="2020-03-01" name="Generation"/>
          <FRBRauthor href="#sejm"/>
          <FRBRcountry value="pl"/>
        </FRBRWork>
        <FRBRExpression>
          <FRBRthis value="/pl/act/2020/1/pol@/main"/>
          <FRBRuri value="/pl/act/2020/1/pol@"/>
          <FRBRdate date="2020-03-01" name="Generation"/>
          <FRBRauthor href="#sejm"/>
          <FRBRlanguage language="pol"/>
        </FRBRExpression>
        <FRBRManifestation>
          <FRBRthis value="/pl/act/2020/1/pol@/main"/>
          <FRBRuri value="/pl/act/2020/1/pol@"/>
          <FRBRdate date="2026-10-16" name="Generation"/>
          <FRBRauthor href="#legis"/>
        </FRBRManifestation>
      </identification>
    </meta>
    <preface>
      <docNumber/>
      <docType>statute</docType>
      <docDate>z dnia 1 marca 2020 r. </docDate>
      <docTitle>
        <p>o testach</p>
      </docTitle>
    </preface>
    <body>
      <section id="section-1" refersTo="statute">
        <num>1</num>
        <content>
          <p>Ustawa określa zasady.</p>
        </content>
      </section>
    </body>
    <components>
      <component id="component-schedule1">
        <doc name="schedule1">
          <meta>
            <identification source="#legis">
              <FRBRWork>
                <FRBRthis value="/pl/act/2020/1/schedule1"/>
                <FRBRuri value="/pl/act/2020/1"/>
                <FRBRalias value="Wz&#xF3;r wniosku"/>
                <FRBRdate date="2020-03-01" name="Generation"/>
                <FRBRauthor href="#sejm"/>
                <FRBRcountry value="pl"/>
              </FRBRWork>
              <FRBRExpression>
                <FRBRthis value="/pl/act/2020/1/pol@/schedule1"/>
                <FRBRuri value="/pl/act/2020/1/pol@"/>
                <FRBRdate date="2020-03-01" name="Generation"/>
                <FRBRauthor href="#sejm"/>
                <FRBRlanguage language="pol"/>
              </FRBRExpression>
              <FRBRManifestation>
                <FRBRthis value="/pl/act/2020/1/pol@/schedule1"/>
                <FRBRuri value="/pl/act/2020/1/pol@"/>
                <FRBRdate date="2026-10-16" name="Generation"/>
                <FRBRauthor href="#legis"/>
              </FRBRManifestation>
            </identification>
          </meta>
          <mainBody>
            <article id="schedule1">
              <num>1</num>
              <heading>Wniosek o wpis</heading>
              <subparagraph id="schedule1.subparagraph-0">
                <content>
                  <p>Imię i nazwisko</p>
                </content>
              </subparagraph>
            </article>
          </mainBody>
        </doc>
      </component>
    </components>
  </act>
</akomaNtoso>
"##);
}

#[test]
fn generation_date_only_touches_the_manifestation() {
    let document = parse_act("Art. 1. Tekst.\n");
    let first = serialize_document(&document, &identity(), generation_date()).unwrap();
    let later = NaiveDate::from_ymd_opt(2030, 1, 2).unwrap();
    let second = serialize_document(&document, &identity(), later).unwrap();

    assert_ne!(first, second);
    assert_eq!(
        first.replace("2026-10-16", "2030-01-02"),
        second,
        "only the manifestation date differs"
    );
    assert_eq!(
        first,
        serialize_document(&document, &identity(), generation_date()).unwrap(),
        "serialization is deterministic"
    );
}

#[test]
fn document_without_preface_has_no_alias_or_preface() {
    let document = parse_act("Art. 1. Tekst.\n");
    let xml = serialize_document(&document, &identity(), generation_date()).unwrap();

    assert!(!xml.contains("<preface>"));
    assert!(!xml.contains("FRBRalias"));
    assert!(!xml.contains("<components"));
    assert!(xml.contains("<body>\n      <section id=\"section-1\" refersTo=\"statute\">"));
}

#[test]
fn schedules_with_identical_titles_share_an_id() {
    let document = parse_act(
        "Art. 1. Tekst.

Załącznik – Wzór wniosku

Pierwszy

Załącznik – Wzór wniosku

Drugi
",
    );
    let schedules = document.schedules.as_ref().unwrap();
    let xml = serialize_schedules(schedules, &identity(), generation_date()).unwrap();

    assert_eq!(xml.matches("<component id=\"component-wzrwniosku\">").count(), 2);
    assert_eq!(
        xml.matches("<subparagraph id=\"wzrwniosku.subparagraph-0\">").count(),
        2
    );
}

#[test]
fn empty_schedule_container_is_self_closed() {
    let xml = serialize_schedules(&Default::default(), &identity(), generation_date()).unwrap();
    assert_eq!(xml, "<components/>");
}

#[test]
fn format_uses_its_identity() {
    let format = AknFormat::new(identity(), generation_date());
    let xml = format.serialize(&parse_act("Art. 1. Tekst.\n")).unwrap();
    assert!(xml.contains("<FRBRthis value=\"/pl/act/2020/1/main\"/>"));
    assert!(xml.contains("<FRBRdate date=\"2026-10-16\" name=\"Generation\"/>"));
}

#[test]
fn unassigned_tree_is_an_invariant_violation() {
    let section = Node::new(NodeKind::Subparagraph).with_content(vec!["x".to_string()]);
    let document = Document::new(Node::new(NodeKind::Body).with_children(vec![section]));

    let err = AknFormat::default().serialize(&document).unwrap_err();
    assert!(matches!(err, FormatError::InvariantViolation(_)));
}
