use super::*;

const PAGE: &str = r##"{
  "document": {
    "id": "page",
    "layout": { "y": 0, "height": 1600 },
    "children": [
      { "id": "hero", "layout": { "y": 0, "height": 800 },
        "children": [ { "id": "h1", "classes": ["title"], "layout": { "y": 100, "height": 80 } } ] },
      { "id": "faq", "layout": { "y": 800, "height": 800 } }
    ]
  },
  "sections": [
    {
      "id": "hero",
      "root": "#hero",
      "trigger": { "start": "top center", "end": "bottom center" },
      "timeline": { "steps": [
        { "Tween": { "target": ".title", "duration": 0.8,
          "props": [ { "prop": "Y", "from": 40, "to": 0 } ] } }
      ] }
    },
    { "id": "faq", "root": "#faq" }
  ],
  "faq_items": 4
}"##;

#[test]
fn parses_and_validates_json() {
    let page = PageSpec::from_json_str(PAGE).unwrap();
    assert_eq!(page.sections.len(), 2);
    assert_eq!(page.nav_order(), vec!["hero", "faq"]);
    assert_eq!(page.faq_items, 4);
    let doc = page.build_document().unwrap();
    assert_eq!(doc.scroll_height(), 1600.0);
}

#[test]
fn rejects_duplicate_sections_and_unknown_nav() {
    let mut page = PageSpec::from_json_str(PAGE).unwrap();
    page.nav = Some(vec!["nope".into()]);
    assert!(page.validate().is_err());

    let mut page = PageSpec::from_json_str(PAGE).unwrap();
    let dup = page.sections[0].clone();
    page.sections.push(dup);
    let err = page.validate().unwrap_err().to_string();
    assert!(err.contains("duplicate section"), "{err}");
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = PageSpec::from_json_str("{").unwrap_err();
    assert!(matches!(err, ScrollreelError::Serde(_)));
}

#[test]
fn json_round_trip_preserves_sections() {
    let page = PageSpec::from_json_str(PAGE).unwrap();
    let json = page.to_json_pretty().unwrap();
    let back = PageSpec::from_json_str(&json).unwrap();
    assert_eq!(back.sections, page.sections);
}
