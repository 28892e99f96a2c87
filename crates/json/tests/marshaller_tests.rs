//! End-to-end behaviour of the JSON marshaller.

use guest_json::{DecodeError, DecodeMode, EncodeError, JsonCodec};
use guest_vm::{Composite, DynamicValue};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn codec() -> JsonCodec {
    init();
    JsonCodec::default()
}

fn encode_json(value: impl Into<DynamicValue>) -> String {
    let bytes = codec().encode_one(&value.into(), true).unwrap();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn test_permutation_keys_encode_as_array() {
    let map = Composite::new();
    map.set(3, 30).unwrap();
    map.set(1, 10).unwrap();
    map.set(2, 20).unwrap();
    assert_eq!(map.declared_len(), 3);
    assert_eq!(encode_json(map), "[10,20,30]");
}

#[test]
fn test_gap_in_keys_encodes_as_object() {
    let map = Composite::new();
    map.set(1, 10).unwrap();
    map.set(3, 30).unwrap();
    map.set_length_hint(Some(2));
    assert_eq!(encode_json(map), r#"{"1":10,"3":30}"#);
}

#[test]
fn test_string_with_quote_and_tab() {
    let original = b"a\"\tb".to_vec();
    let text = codec()
        .encode_one(&DynamicValue::String(original.clone()), true)
        .unwrap();
    assert_eq!(text, br#""a\"\tb""#);

    let decoded = codec().decode(&text, DecodeMode::STRICT).unwrap();
    assert_eq!(decoded.as_bytes().unwrap(), original.as_slice());
}

#[test]
fn test_empty_composite_both_modes() {
    let empty = DynamicValue::from(Composite::new());
    assert_eq!(codec().encode_one(&empty, true).unwrap(), b"{}");
    assert_eq!(codec().encode_one(&empty, false).unwrap(), b"{}");
}

#[test]
fn test_decode_nested_object() {
    let value = codec()
        .decode(br#"{"x":1,"y":[1,2,3]}"#, DecodeMode::STRICT)
        .unwrap();
    let object = value.as_composite().unwrap();
    assert_eq!(object.entry_count(), 2);
    assert_eq!(object.get(&"x".into()), DynamicValue::from(1));

    let list = object.get(&"y".into());
    let list = list.as_composite().unwrap();
    assert_eq!(list.border(), 3);
    for position in 1..=3 {
        assert_eq!(list.get_index(position), DynamicValue::from(position));
    }
}

#[test]
fn test_unclosed_object_is_malformed() {
    let err = codec().decode(b"{1:2", DecodeMode::LENIENT).unwrap_err();
    assert!(matches!(err, DecodeError::MalformedJson { .. }));
    let err = codec().decode(br#"{"a":2"#, DecodeMode::STRICT).unwrap_err();
    assert!(matches!(err, DecodeError::MalformedJson { .. }));
}

#[test]
fn test_numeric_key_strict_and_lenient() {
    let err = codec().decode(b"{1:2}", DecodeMode::STRICT).unwrap_err();
    assert!(matches!(err, DecodeError::NonStringKey { .. }));

    let value = codec().decode(b"{1:2}", DecodeMode::LENIENT).unwrap();
    let object = value.as_composite().unwrap();
    assert_eq!(object.entry_count(), 1);
    assert_eq!(object.get_index(1), DynamicValue::from(2));
}

#[test]
fn test_indirect_cycle_rejected() {
    let a = Composite::new();
    let b = Composite::new();
    let c = Composite::new();
    a.set("next", b.clone()).unwrap();
    b.set("next", c.clone()).unwrap();
    c.set("next", a.clone()).unwrap();

    let err = codec().encode_one(&a.clone().into(), true).unwrap_err();
    assert_eq!(err, EncodeError::CyclicStructure);

    let err = codec()
        .encode_range(&[DynamicValue::from(1), b.into()], true)
        .unwrap_err();
    assert_eq!(err, EncodeError::CyclicStructure);
}

#[test]
fn test_cycle_through_array_rejected() {
    let list = Composite::from_sequence(vec![1, 2]);
    list.set(2, list.clone()).unwrap();
    let err = codec().encode_one(&list.into(), true).unwrap_err();
    assert_eq!(err, EncodeError::CyclicStructure);
}

#[test]
fn test_plain_form_round_trip_through_lenient_decode() {
    let record = Composite::new();
    record.set("owner", "alice").unwrap();
    record.set("balances", Composite::from_sequence(vec![5, 7])).unwrap();

    let codec = codec();
    let text = codec.encode_one(&record.clone().into(), false).unwrap();
    assert!(codec.decode(&text, DecodeMode::STRICT).is_err());

    let back = codec.decode(&text, DecodeMode::LENIENT).unwrap();
    assert!(back.deep_eq(&record.into()));
}

#[test]
fn test_json_form_output_parses_as_json() {
    let record = Composite::new();
    record.set("name", "line\nbreak \"quoted\"").unwrap();
    record.set("ratio", 0.25).unwrap();
    record.set("tags", Composite::from_sequence(vec!["a", "b"])).unwrap();
    record.set(7, false).unwrap();

    let text = codec().encode_one(&record.into(), true).unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&text).unwrap();
    assert_eq!(parsed["name"], "line\nbreak \"quoted\"");
    assert_eq!(parsed["ratio"], 0.25);
    assert_eq!(parsed["tags"], serde_json::json!(["a", "b"]));
    assert_eq!(parsed["7"], false);
}

#[test]
fn test_nil_inside_array_slot_prints_empty_object() {
    let list = Composite::from_sequence(vec![1, 2, 3]);
    list.set_length_hint(Some(3));
    let text = encode_json(list.clone());
    assert_eq!(text, "[1,2,3]");

    let holes = Composite::new();
    holes.set(1, "a").unwrap();
    holes.set_length_hint(Some(1));
    let outer = Composite::from_sequence(vec![DynamicValue::from(holes), DynamicValue::Nil]);
    assert_eq!(encode_json(outer), r#"[["a"]]"#);
}

#[test]
fn test_print_style_range() {
    let values = [
        DynamicValue::from("total"),
        DynamicValue::from(12),
        DynamicValue::Nil,
    ];
    let text = codec().encode_range(&values, true).unwrap();
    assert_eq!(text, br#"["total",12,{}]"#);
}
