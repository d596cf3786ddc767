use crate::{Document, ErrorKind, Writer};
use serde_json::json;
use test_log::test;

#[test]
fn written_documents_parse() {
    let mut writer = Writer::new();
    writer.write_bool(Some("flag"), true).unwrap();
    writer.begin_composite(Some("root")).unwrap();
    writer.write_int(Some("a"), -1).unwrap();
    writer.begin_array(Some("b")).unwrap();
    writer.write_float(None, 2.0).unwrap();
    writer.write_str(None, "with , [ ] { } @ inside").unwrap();
    writer.begin_composite(None).unwrap();
    writer.write_binary(Some("c"), b"hello").unwrap();
    writer.end_composite().unwrap();
    writer.begin_array(None).unwrap();
    writer.end_array().unwrap();
    writer.end_array().unwrap();
    writer.end_composite().unwrap();
    writer.write_binary(Some("tail"), b"\r\n@\"").unwrap();
    let bytes = writer.finish().unwrap();

    let doc = Document::parse(&bytes).unwrap();
    let expected = json!({
        "flag": true,
        "root": {
            "a": -1,
            "b": [2.0, "with , [ ] { } @ inside", { "c": [104, 101, 108, 108, 111] }, []],
        },
        "tail": [13, 10, 64, 34],
    });
    assert_eq!(serde_json::to_value(&doc).unwrap(), expected);
    assert_eq!(doc.blob(), Some(&b"hello\r\n@\""[..]));
}

#[test]
fn floats_survive_formatting() {
    let values = [
        0.0,
        -0.5,
        1.0,
        0.1,
        1.0e-7,
        3.402_823_5e38,
        f32::MIN_POSITIVE,
        123_456.79,
    ];

    let mut writer = Writer::new();
    writer.begin_array(Some("floats")).unwrap();
    for &v in &values {
        writer.write_float(None, v).unwrap();
    }
    writer.end_array().unwrap();
    let bytes = writer.finish().unwrap();

    let doc = Document::parse(&bytes).unwrap();
    let actual = doc
        .get("floats")
        .unwrap()
        .children()
        .map(|n| n.as_float().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(actual, values);
}

#[test]
fn extreme_ints() {
    let mut writer = Writer::new();
    writer.write_int(Some("min"), i32::MIN).unwrap();
    writer.write_int(Some("max"), i32::MAX).unwrap();
    let bytes = writer.finish().unwrap();

    let doc = Document::parse(&bytes).unwrap();
    assert_eq!(doc.get("min").unwrap().as_int(), Some(i32::MIN));
    assert_eq!(doc.get("max").unwrap().as_int(), Some(i32::MAX));
}

#[test]
fn names_that_read_back_as_literals_are_rejected() {
    for name in &["t", "f", "1", "-1", "b0-1", "1.5"] {
        let mut writer = Writer::new();
        let err = writer.write_int(Some(*name), 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidName, "{}", name);
        assert!(err.is_serialization());
    }
}

#[test]
fn document_serializes_names_and_values() {
    let doc = Document::parse(b"s \"x\" n [t, f] c { i 1 x 0.25 }").unwrap();
    let actual = serde_json::to_value(&doc).unwrap();
    assert_eq!(
        actual,
        json!({ "s": "x", "n": [true, false], "c": { "i": 1, "x": 0.25 } })
    );
}

#[test]
fn serde_round_trip_through_document() {
    let value = json!({
        "name": "sdsf",
        "version": 1,
        "nested": { "list": [1, [2, 3], { "deep": false }] },
    });

    let bytes = crate::to_vec(&value).unwrap();
    let doc = Document::parse(&bytes).unwrap();
    assert_eq!(serde_json::to_value(&doc).unwrap(), value);

    let back = crate::from_document::<serde_json::Value>(&doc).unwrap();
    assert_eq!(back, value);
}
