use assert_json_diff::assert_json_eq;
use bisnode_client::error::AppError;
use bisnode_client::model::xml::XmlElement;
use serde_json::json;

const SHORT_REPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<response xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <!-- generated -->
  <company id="10000001" xsi:type="Company">
    <name>Näidis &amp; Partnerid OÜ</name>
    <status>R</status>
    <address/>
    <board><![CDATA[Mari <Maasikas>]]></board>
  </company>
</response>"#;

#[test]
fn parses_tree_with_attributes_and_cdata() {
    let root = XmlElement::parse(SHORT_REPORT).unwrap();
    assert_eq!(root.name, "response");

    let company = root.child("company").unwrap();
    assert_eq!(company.attribute("id"), Some("10000001"));
    assert_eq!(company.attribute("type"), Some("Company"));
    assert_eq!(company.child("name").unwrap().text(), "Näidis & Partnerid OÜ");
    assert_eq!(company.child("board").unwrap().text(), "Mari <Maasikas>");
    assert!(company.child("address").unwrap().is_empty());
    assert_eq!(company.children.len(), 4);
}

#[test]
fn converts_to_json_like_a_generic_xml_encoder() {
    let value = XmlElement::parse(SHORT_REPORT).unwrap().to_value();
    assert_json_eq!(
        value,
        json!({
            "company": {
                "@attributes": {"id": "10000001"},
                "name": "Näidis & Partnerid OÜ",
                "status": "R",
                "address": {},
                "board": "Mari <Maasikas>"
            }
        })
    );
}

#[test]
fn text_keeps_its_whitespace_and_cdata_joins_it() {
    let xml = "<r>\n  <name> Kala  AS </name>\n  <addr>Tartu mnt <![CDATA[1 & 2]]></addr>\n</r>";
    let value = XmlElement::parse(xml).unwrap().to_value();
    assert_json_eq!(
        value,
        json!({"name": " Kala  AS ", "addr": "Tartu mnt 1 & 2"})
    );
}

#[test]
fn repeated_elements_become_arrays() {
    let xml = "<docs><doc>A</doc><doc>B</doc><total>2</total></docs>";
    let root = XmlElement::parse(xml).unwrap();
    assert_eq!(root.children_named("doc").count(), 2);
    assert_json_eq!(root.to_value(), json!({"doc": ["A", "B"], "total": "2"}));
}

#[test]
fn prefixed_children_are_keyed_by_local_name() {
    let xml = r#"<a:root xmlns:a="urn:x"><a:item>1</a:item></a:root>"#;
    let root = XmlElement::parse(xml).unwrap();
    assert_eq!(root.local_name(), "root");
    assert_json_eq!(root.to_value(), json!({"item": "1"}));
}

#[test]
fn empty_root_converts_to_empty_object() {
    let root = XmlElement::parse("<response/>").unwrap();
    assert_eq!(root.to_value(), json!({}));
}

#[test]
fn rejects_malformed_documents() {
    for input in [
        "",
        "{\"id\": 1}",
        "<a><b></a>",
        "<a>",
        "<a/><b/>",
    ] {
        let result = XmlElement::parse(input);
        assert!(result.is_err(), "expected failure for {input:?}");
    }
}

#[test]
fn non_xml_text_is_a_deserialization_error() {
    match XmlElement::parse("plain text") {
        Err(AppError::Deserialization(_)) => (),
        other => panic!("Expected Deserialization error, got {other:?}"),
    }
}
