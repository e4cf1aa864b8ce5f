//! Conversions through the default registry

use legis_babel::{FormatError, FormatRegistry};

const SOURCE: &str = "Art. 1. Ustawa określa:
1) zasady;
2) tryb.
";

#[test]
fn text_to_akn_and_back() {
    let registry = FormatRegistry::default();
    let xml = registry.convert(SOURCE, "text", "akn").unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<akomaNtoso"));
    assert!(xml.contains("<point id=\"section-1.point-2\" refersTo=\"point_unit\">"));

    let text = registry.convert(&xml, "akn", "text").unwrap();
    assert_eq!(text, "Art. 1. Ustawa określa:\n\n1) zasady;\n\n2) tryb.\n");
    assert_eq!(
        registry.convert(&text, "text", "akn").unwrap(),
        xml,
        "re-parsed text yields the same XML"
    );
}

#[test]
fn text_to_json() {
    let json = FormatRegistry::default()
        .convert(SOURCE, "text", "json")
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["body"]["contents"]["nested"]["children"][0]["id"], "section-1");
}

#[test]
fn json_cannot_be_read() {
    let err = FormatRegistry::default()
        .convert("{}", "json", "akn")
        .unwrap_err();
    assert_eq!(
        err,
        FormatError::NotSupported("Format 'json' does not support parsing".into())
    );
}

#[test]
fn unknown_format() {
    let err = FormatRegistry::default()
        .convert(SOURCE, "text", "docx")
        .unwrap_err();
    assert_eq!(err.to_string(), "Format 'docx' not found");
}

#[test]
fn formats_by_extension() {
    let registry = FormatRegistry::default();
    assert_eq!(registry.for_extension("XML").map(|f| f.name()), Some("akn"));
    assert_eq!(registry.for_extension("txt").map(|f| f.name()), Some("text"));
    assert_eq!(registry.for_extension("json").map(|f| f.name()), Some("json"));
    assert!(registry.for_extension("pdf").is_none());
}
