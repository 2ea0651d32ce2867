//! Integration tests for full-payload document resolution.

use docugraph::{
    BlockType, CollectSink, DiagnosticKind, Document, Error, Response, SelectionStatus,
};

fn geometry_json(left: f64, top: f64, width: f64, height: f64) -> String {
    format!(
        r#"{{"BoundingBox": {{"Width": {width}, "Height": {height}, "Left": {left}, "Top": {top}}},
            "Polygon": [{{"X": {left}, "Y": {top}}}]}}"#
    )
}

fn word_json(id: &str, text: &str, left: f64, top: f64) -> String {
    format!(
        r#"{{"BlockType": "WORD", "Id": "{id}", "Confidence": 99.0, "Text": "{text}",
            "Geometry": {geometry}}}"#,
        geometry = geometry_json(left, top, 0.05, 0.02)
    )
}

/// Two pages: the first carries two lines, a 2x2 table, and a "Total Due"
/// form field; the second carries one line, a selection-valued field, and a
/// keyless field.
fn two_page_payload() -> String {
    let page_geometry = geometry_json(0.0, 0.0, 1.0, 1.0);

    let mut blocks = vec![
        format!(
            r#"{{"BlockType": "PAGE", "Id": "p-1", "Geometry": {page_geometry}}}"#
        ),
        // Lines
        format!(
            r#"{{"BlockType": "LINE", "Id": "l-1", "Confidence": 99.1, "Text": "Acme Invoice",
                "Geometry": {geometry},
                "Relationships": [{{"Type": "CHILD", "Ids": ["w-1", "w-2"]}}]}}"#,
            geometry = geometry_json(0.1, 0.05, 0.3, 0.02)
        ),
        word_json("w-1", "Acme", 0.1, 0.05),
        word_json("w-2", "Invoice", 0.17, 0.05),
        format!(
            r#"{{"BlockType": "LINE", "Id": "l-2", "Confidence": 98.5, "Text": "Second line",
                "Geometry": {geometry},
                "Relationships": [{{"Type": "CHILD", "Ids": ["w-3", "w-4"]}}]}}"#,
            geometry = geometry_json(0.1, 0.08, 0.3, 0.02)
        ),
        word_json("w-3", "Second", 0.1, 0.08),
        word_json("w-4", "line", 0.2, 0.08),
        // Table: 2x2, cells in row-major order
        format!(
            r#"{{"BlockType": "TABLE", "Id": "t-1", "Confidence": 96.0,
                "Geometry": {geometry},
                "Relationships": [{{"Type": "CHILD", "Ids": ["c-11", "c-12", "c-21", "c-22"]}}]}}"#,
            geometry = geometry_json(0.1, 0.3, 0.5, 0.2)
        ),
    ];

    for (id, row, column, word_id, text) in [
        ("c-11", 1, 1, "cw-1", "Item"),
        ("c-12", 1, 2, "cw-2", "Price"),
        ("c-21", 2, 1, "cw-3", "Widget"),
        ("c-22", 2, 2, "cw-4", "9.99"),
    ] {
        blocks.push(word_json(word_id, text, 0.1, 0.3));
        blocks.push(format!(
            r#"{{"BlockType": "CELL", "Id": "{id}", "Confidence": 95.0,
                "RowIndex": {row}, "ColumnIndex": {column}, "RowSpan": 1, "ColumnSpan": 1,
                "Geometry": {geometry},
                "Relationships": [{{"Type": "CHILD", "Ids": ["{word_id}"]}}]}}"#,
            geometry = geometry_json(0.1, 0.3, 0.1, 0.05)
        ));
    }

    // "Total Due" -> "123.45"
    blocks.extend([
        word_json("kw-1", "Total", 0.1, 0.6),
        word_json("kw-2", "Due", 0.17, 0.6),
        word_json("vw-1", "123.45", 0.3, 0.6),
        format!(
            r#"{{"BlockType": "KEY_VALUE_SET", "Id": "kv-k1", "Confidence": 91.0,
                "EntityTypes": ["KEY"], "Geometry": {geometry},
                "Relationships": [
                    {{"Type": "CHILD", "Ids": ["kw-1", "kw-2"]}},
                    {{"Type": "VALUE", "Ids": ["kv-v1"]}}
                ]}}"#,
            geometry = geometry_json(0.1, 0.6, 0.15, 0.02)
        ),
        format!(
            r#"{{"BlockType": "KEY_VALUE_SET", "Id": "kv-v1", "Confidence": 90.0,
                "EntityTypes": ["VALUE"], "Geometry": {geometry},
                "Relationships": [{{"Type": "CHILD", "Ids": ["vw-1"]}}]}}"#,
            geometry = geometry_json(0.3, 0.6, 0.1, 0.02)
        ),
        // Page 2
        format!(
            r#"{{"BlockType": "PAGE", "Id": "p-2", "Geometry": {page_geometry}}}"#
        ),
        format!(
            r#"{{"BlockType": "LINE", "Id": "l-3", "Confidence": 97.0, "Text": "Terms",
                "Geometry": {geometry},
                "Relationships": [{{"Type": "CHILD", "Ids": ["w-5"]}}]}}"#,
            geometry = geometry_json(0.1, 0.05, 0.2, 0.02)
        ),
        word_json("w-5", "Terms", 0.1, 0.05),
        // "Approved" -> selection element
        word_json("kw-3", "Approved", 0.1, 0.4),
        format!(
            r#"{{"BlockType": "SELECTION_ELEMENT", "Id": "sel-1", "Confidence": 88.0,
                "SelectionStatus": "SELECTED", "Geometry": {geometry}}}"#,
            geometry = geometry_json(0.3, 0.4, 0.02, 0.02)
        ),
        format!(
            r#"{{"BlockType": "KEY_VALUE_SET", "Id": "kv-k2", "Confidence": 91.0,
                "EntityTypes": ["KEY"], "Geometry": {geometry},
                "Relationships": [
                    {{"Type": "CHILD", "Ids": ["kw-3"]}},
                    {{"Type": "VALUE", "Ids": ["kv-v2"]}}
                ]}}"#,
            geometry = geometry_json(0.1, 0.4, 0.15, 0.02)
        ),
        format!(
            r#"{{"BlockType": "KEY_VALUE_SET", "Id": "kv-v2", "Confidence": 90.0,
                "EntityTypes": ["VALUE"], "Geometry": {geometry},
                "Relationships": [{{"Type": "CHILD", "Ids": ["sel-1"]}}]}}"#,
            geometry = geometry_json(0.3, 0.4, 0.05, 0.02)
        ),
        // Keyless: KEY-tagged block whose only relationship is VALUE
        format!(
            r#"{{"BlockType": "KEY_VALUE_SET", "Id": "kv-k3", "Confidence": 85.0,
                "EntityTypes": ["KEY"], "Geometry": {geometry},
                "Relationships": [{{"Type": "VALUE", "Ids": ["kv-v3"]}}]}}"#,
            geometry = geometry_json(0.1, 0.5, 0.1, 0.02)
        ),
        format!(
            r#"{{"BlockType": "KEY_VALUE_SET", "Id": "kv-v3", "Confidence": 85.0,
                "EntityTypes": ["VALUE"], "Geometry": {geometry}}}"#,
            geometry = geometry_json(0.3, 0.5, 0.1, 0.02)
        ),
    ]);

    format!(r#"{{"Blocks": [{}]}}"#, blocks.join(",\n"))
}

#[test]
fn test_two_pages_resolved() {
    let doc = docugraph::parse_str(&two_page_payload()).unwrap();

    assert_eq!(doc.page_count(), 2);
    assert_eq!(doc.pages()[0].id(), "p-1");
    assert_eq!(doc.pages()[1].id(), "p-2");
    assert_eq!(doc.pages()[0].text(), "Acme Invoice\nSecond line\n");
    assert_eq!(doc.pages()[1].text(), "Terms\n");
}

#[test]
fn test_page_content_interleaves_in_block_order() {
    let doc = docugraph::parse_str(&two_page_payload()).unwrap();
    let content = doc.pages()[0].content();

    assert_eq!(content.len(), 4);
    assert!(content[0].is_line());
    assert!(content[1].is_line());
    assert!(content[2].is_table());
    assert!(content[3].is_field());
}

#[test]
fn test_table_resolution() {
    let doc = docugraph::parse_str(&two_page_payload()).unwrap();
    let tables = doc.pages()[0].tables();

    assert_eq!(tables.len(), 1);
    let table = &tables[0];
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.rows()[0].cells().len(), 2);
    assert_eq!(table.rows()[0].cells()[1].text(), "Price ");
    assert_eq!(table.rows()[1].cells()[0].text(), "Widget ");
    assert_eq!(table.rows()[1].cells()[1].column_index(), 2);
}

#[test]
fn test_form_key_value_roundtrip() {
    let doc = docugraph::parse_str(&two_page_payload()).unwrap();
    let form = doc.pages()[0].form();

    let field = form.get_field_by_key("Total Due").unwrap();
    assert_eq!(field.key().unwrap().text(), "Total Due");
    assert_eq!(field.value().unwrap().text(), "123.45");

    assert!(form.get_field_by_key("total due").is_none());
    assert_eq!(form.search_fields_by_key("total").len(), 1);
}

#[test]
fn test_selection_valued_field() {
    let doc = docugraph::parse_str(&two_page_payload()).unwrap();
    let form = doc.pages()[1].form();

    let field = form.get_field_by_key("Approved").unwrap();
    assert_eq!(field.value().unwrap().text(), "SELECTED");
    match field.value().unwrap().content() {
        [docugraph::InlineContent::Selection(element)] => {
            assert_eq!(element.selection_status(), SelectionStatus::Selected);
        }
        other => panic!("expected one selection element, got {:?}", other),
    }
}

#[test]
fn test_keyless_field_diagnostic() {
    let response: Response = serde_json::from_str(&two_page_payload()).unwrap();
    let mut sink = CollectSink::new();
    let doc = Document::from_responses_with_sink(vec![response], &mut sink).unwrap();

    // The keyless field is excluded from the form but reported.
    assert_eq!(doc.pages()[1].form().len(), 1);
    assert_eq!(sink.diagnostics().len(), 1);
    assert_eq!(sink.diagnostics()[0].kind, DiagnosticKind::KeylessField);
    assert_eq!(sink.diagnostics()[0].block_id.as_deref(), Some("kv-k3"));
}

#[test]
fn test_get_block_by_id() {
    let doc = docugraph::parse_str(&two_page_payload()).unwrap();

    let block = doc.get_block_by_id("t-1").unwrap();
    assert_eq!(block.block_type, BlockType::Table);
    assert!(doc.get_block_by_id("missing").is_none());
}

#[test]
fn test_construction_is_idempotent() {
    let payload = two_page_payload();
    let first = docugraph::parse_str(&payload).unwrap();
    let second = docugraph::parse_str(&payload).unwrap();

    assert_eq!(first.page_count(), second.page_count());
    for (a, b) in first.pages().iter().zip(second.pages()) {
        assert_eq!(a.text(), b.text());
        assert_eq!(
            a.get_text_in_reading_order(),
            b.get_text_in_reading_order()
        );
    }
}

#[test]
fn test_dangling_reference_aborts_construction() {
    let payload = format!(
        r#"{{"Blocks": [
            {{"BlockType": "PAGE", "Id": "p-1", "Geometry": {geometry}}},
            {{"BlockType": "LINE", "Id": "l-1", "Confidence": 99.0, "Text": "x",
              "Geometry": {geometry},
              "Relationships": [{{"Type": "CHILD", "Ids": ["w-gone"]}}]}}
        ]}}"#,
        geometry = geometry_json(0.0, 0.0, 1.0, 1.0)
    );

    let err = docugraph::parse_str(&payload).unwrap_err();
    assert!(matches!(err, Error::BlockNotFound(id) if id == "w-gone"));
}

#[test]
fn test_missing_confidence_aborts_construction() {
    let payload = format!(
        r#"{{"Blocks": [
            {{"BlockType": "PAGE", "Id": "p-1", "Geometry": {geometry}}},
            {{"BlockType": "LINE", "Id": "l-1", "Text": "x", "Geometry": {geometry}}}
        ]}}"#,
        geometry = geometry_json(0.0, 0.0, 1.0, 1.0)
    );

    let err = docugraph::parse_str(&payload).unwrap_err();
    assert!(matches!(
        err,
        Error::MissingField {
            field: "Confidence",
            ..
        }
    ));
}

#[test]
fn test_document_display() {
    let doc = docugraph::parse_str(&two_page_payload()).unwrap();
    let rendered = doc.to_string();

    assert!(rendered.contains("Document"));
    assert!(rendered.contains("Acme Invoice"));
    assert!(rendered.contains("Key: Total Due"));
    assert!(rendered.contains("Value: 123.45"));
}

#[test]
fn test_serialized_document_contains_resolved_graph() {
    let doc = docugraph::parse_str(&two_page_payload()).unwrap();
    let json = serde_json::to_string_pretty(&doc).unwrap();

    assert!(json.contains("\"Acme Invoice\""));
    assert!(json.contains("\"Total Due\""));
    // Raw responses are not re-serialized.
    assert!(!json.contains("\"Blocks\""));
}
