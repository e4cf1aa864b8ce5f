//! Preface serialization

use super::parse_preface;
use legis_babel::formats::akn::serialize_preface;

#[test]
fn preface_basic() {
    let preface = parse_preface(
        r#"Dz.U. 2011 Nr 174 poz. 1039 USTAWA z dnia 15 lipca 2011 r. o zawodach pielęgniarki i położnej
"#,
    );
    assert_eq!(
        serialize_preface(&preface),
        r#"<preface>
  <docNumber>Dz.U. 2011 Nr 174 poz. 1039 </docNumber>
  <docType>statute</docType>
  <docDate>z dnia 15 lipca 2011 r. </docDate>
  <docTitle>
    <p>o zawodach pielęgniarki i położnej</p>
  </docTitle>
</preface>"#
    );
}

#[test]
fn preface_with_space_in_journal_number() {
    let preface = parse_preface(
        r#"Dz. U. 2011 Nr 174 poz. 1039 USTAWA z dnia 15 lipca 2011 r. o zawodach pielęgniarki i położnej
"#,
    );
    assert_eq!(
        serialize_preface(&preface),
        r#"<preface>
  <docNumber>Dz. U. 2011 Nr 174 poz. 1039 </docNumber>
  <docType>statute</docType>
  <docDate>z dnia 15 lipca 2011 r. </docDate>
  <docTitle>
    <p>o zawodach pielęgniarki i położnej</p>
  </docTitle>
</preface>"#
    );
}

#[test]
fn preface_without_journal_number() {
    let preface = parse_preface(
        r#"USTAWA z dnia 15 lipca 2011 r. o zawodach pielęgniarki i położnej
"#,
    );
    assert_eq!(
        serialize_preface(&preface),
        r#"<preface>
  <docNumber/>
  <docType>statute</docType>
  <docDate>z dnia 15 lipca 2011 r. </docDate>
  <docTitle>
    <p>o zawodach pielęgniarki i położnej</p>
  </docTitle>
</preface>"#
    );
}
