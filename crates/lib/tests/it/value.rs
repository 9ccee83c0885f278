use remap::Value;

#[test]
fn test_keypath_broadcast_over_object_list() {
    let doc = Value::parse(r#"{"items":[{"n":1},{"n":2}]}"#).unwrap();
    assert_eq!(
        doc.get("items.n"),
        Some(Value::Array(vec![Value::from(1.0), Value::from(2.0)]))
    );
}

#[test]
fn test_broadcast_recurses_through_nested_lists() {
    let doc = Value::parse(r#"{"teams":[{"members":[{"name":"a"},{"name":"b"}]},{"members":[{"name":"c"}]}]}"#)
        .unwrap();
    assert_eq!(
        doc.get("teams.members.name"),
        Some(Value::Array(vec![
            Value::Array(vec![Value::from("a"), Value::from("b")]),
            Value::Array(vec![Value::from("c")]),
        ]))
    );
}

#[test]
fn test_deep_write_then_read_round_trip() {
    let mut doc = Value::object();
    doc.set("data.lawsuits.pending", 5.0);
    doc.set("data.uuid", "u1");
    doc.set("name", "Acme");

    let text = doc.to_json_string();
    let parsed = Value::parse(&text).unwrap();
    assert_eq!(parsed, doc);
    assert_eq!(parsed.get("data.lawsuits.pending"), Some(Value::from(5.0)));
}
