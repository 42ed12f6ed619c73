use jce::{
    decode, decode_any, encode, FieldSchema, FieldType, JceError, Record, StructSchema, Value,
};

fn point_schema() -> StructSchema {
    StructSchema::new()
        .field(FieldSchema::required(0, FieldType::Int))
        .field(FieldSchema::required(1, FieldType::Int))
}

fn point(x: i32, y: i32) -> Value {
    Value::Struct(Record::new().with(0, x).with(1, y))
}

#[test]
fn concrete_scenario_layout_and_skip() {
    let schema = StructSchema::new()
        .field(FieldSchema::required(0, FieldType::Text))
        .field(FieldSchema::required(1, FieldType::Int))
        .field(FieldSchema::required(5, FieldType::list(FieldType::Byte)));
    let record = Record::new()
        .with(0, "A")
        .with(1, 0i32)
        .with(5, vec![Value::Byte(1), Value::Byte(2), Value::Byte(3)]);
    let bytes = encode(&schema, &record).unwrap();
    assert_eq!(
        bytes,
        [0x06, 0x01, 0x41, 0x1c, 0x59, 0x00, 0x03, 0x00, 0x01, 0x00, 0x02, 0x00, 0x03]
    );

    let subset = StructSchema::new()
        .field(FieldSchema::required(0, FieldType::Text))
        .field(FieldSchema::required(5, FieldType::list(FieldType::Byte)));
    let decoded = decode(&subset, &bytes).unwrap();
    assert_eq!(decoded.tags().collect::<Vec<_>>(), [0, 5]);
    assert_eq!(decoded.get_str(0).unwrap(), Some("A"));
    assert_eq!(
        decoded.get_list(5).unwrap(),
        Some(&[Value::Byte(1), Value::Byte(2), Value::Byte(3)][..])
    );
}

#[test]
fn list_of_structs_at_0_1_1000() {
    let schema = StructSchema::new().field(FieldSchema::required(
        3,
        FieldType::list(FieldType::structure(point_schema())),
    ));
    for len in [0, 1, 1000] {
        let items: Vec<Value> = (0..len).map(|i| point(i, -i)).collect();
        let record = Record::new().with(3, items);
        let bytes = encode(&schema, &record).unwrap();
        assert_eq!(decode(&schema, &bytes).unwrap(), record, "len {len}");
    }
}

#[test]
fn map_with_0_and_n_entries_keeps_order() {
    let schema = StructSchema::new().field(FieldSchema::required(
        0,
        FieldType::map(FieldType::Long, FieldType::structure(point_schema())),
    ));
    for n in [0i64, 1, 50] {
        let entries: Vec<(Value, Value)> = (0..n)
            .rev()
            .map(|k| (Value::Long(k * 1_000_000_007), point(k as i32, 0)))
            .collect();
        let record = Record::new().with(0, Value::Map(entries.clone()));
        let bytes = encode(&schema, &record).unwrap();
        let decoded = decode(&schema, &bytes).unwrap();
        assert_eq!(decoded.get_map(0).unwrap(), Some(entries.as_slice()), "n {n}");
    }
}

#[test]
fn struct_in_struct_with_list_of_structs() {
    let inner = StructSchema::new()
        .field(FieldSchema::required(0, FieldType::Text))
        .field(FieldSchema::required(
            1,
            FieldType::list(FieldType::structure(point_schema())),
        ));
    let schema = StructSchema::new()
        .field(FieldSchema::required(0, FieldType::structure(inner)))
        .field(FieldSchema::optional(1, FieldType::Bytes))
        .field(FieldSchema::required(2, FieldType::Long));
    let record = Record::new()
        .with(
            0,
            Record::new()
                .with(0, "path")
                .with(1, vec![point(1, 2), point(3, 4), point(0, 0)]),
        )
        .with(2, -5i64);
    let bytes = encode(&schema, &record).unwrap();
    assert_eq!(decode(&schema, &bytes).unwrap(), record);

    // Drop the nested struct from the schema; the trailing required field
    // must still be found.
    let tail = StructSchema::new().field(FieldSchema::required(2, FieldType::Long));
    assert_eq!(
        decode(&tail, &bytes).unwrap(),
        Record::new().with(2, -5i64)
    );
}

#[test]
fn nested_schema_may_lag_behind_the_wire() {
    // Writer knows three point fields, reader only two.
    let writer_point = point_schema().field(FieldSchema::optional(2, FieldType::Text));
    let writer = StructSchema::new()
        .field(FieldSchema::required(0, FieldType::list(FieldType::structure(writer_point))))
        .field(FieldSchema::required(1, FieldType::Int));
    let items = vec![
        Value::Struct(Record::new().with(0, 1i32).with(1, 2i32).with(2, "label")),
        point(5, 6),
    ];
    let bytes = encode(&writer, &Record::new().with(0, items).with(1, 77i32)).unwrap();

    let reader = StructSchema::new()
        .field(FieldSchema::required(0, FieldType::list(FieldType::structure(point_schema()))))
        .field(FieldSchema::required(1, FieldType::Int));
    assert_eq!(
        decode(&reader, &bytes).unwrap(),
        Record::new()
            .with(0, vec![point(1, 2), point(5, 6)])
            .with(1, 77i32)
    );
}

#[test]
fn required_nested_field_missing() {
    let schema = StructSchema::new().field(FieldSchema::required(
        0,
        FieldType::structure(point_schema()),
    ));
    // {0: {0: 1}}
    let bytes = [0x0a, 0x00, 0x01, 0x0b];
    assert_eq!(
        decode(&schema, &bytes),
        Err(JceError::MissingRequiredField(1))
    );
}

#[test]
fn value_kind_must_match_field() {
    let schema = StructSchema::new().field(FieldSchema::required(
        0,
        FieldType::structure(point_schema()),
    ));
    assert_eq!(
        encode(&schema, &Record::new().with(0, vec![Value::Int(1)])),
        Err(JceError::ValueMismatch {
            tag: 0,
            expected: "struct"
        })
    );
    // Element tags are reported as 0.
    let list = StructSchema::new().field(FieldSchema::required(4, FieldType::list(FieldType::Int)));
    assert_eq!(
        encode(&list, &Record::new().with(4, vec![Value::from("no")])),
        Err(JceError::ValueMismatch {
            tag: 0,
            expected: "int"
        })
    );
}

#[test]
fn schemaless_view_of_schema_output() {
    let record = Record::new()
        .with(0, "A")
        .with(1, 0i32)
        .with(5, vec![Value::Byte(1), Value::Byte(2), Value::Byte(3)]);
    let schema = StructSchema::new()
        .field(FieldSchema::required(0, FieldType::Text))
        .field(FieldSchema::required(1, FieldType::Int))
        .field(FieldSchema::required(5, FieldType::list(FieldType::Byte)));
    let bytes = encode(&schema, &record).unwrap();
    assert_eq!(decode_any(&bytes).unwrap(), record);
}
