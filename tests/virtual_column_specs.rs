use rust_virtual_columns::processing::{add_virtual_columns, try_add_virtual_columns, VirtualColumnSpec};
use rust_virtual_columns::types::{DataSet, DataType, Field, Schema, Value};
use rust_virtual_columns::VirtualColumnError;

fn orders() -> DataSet {
    let schema = Schema::new(vec![
        Field::new("unit_price", DataType::Float64),
        Field::new("qty_sold", DataType::Int64),
        Field::new("qty_returned", DataType::Int64),
    ]);
    DataSet::new(
        schema,
        vec![
            vec![Value::Float64(2.0), Value::Int64(5), Value::Int64(1)],
            vec![Value::Float64(10.0), Value::Int64(1), Value::Int64(0)],
        ],
    )
}

#[test]
fn specs_load_from_json_and_apply_in_order() {
    let specs: Vec<VirtualColumnSpec> = serde_json::from_str(
        r#"[
            {"rule": "qty_sold - qty_returned", "new_column": "qty_net"},
            {"rule": "unit_price * qty_net", "new_column": "net_total"}
        ]"#,
    )
    .unwrap();

    let out = try_add_virtual_columns(&orders(), &specs).unwrap();

    assert_eq!(
        out.schema.field_names().collect::<Vec<_>>(),
        vec!["unit_price", "qty_sold", "qty_returned", "qty_net", "net_total"]
    );
    assert_eq!(out.schema.fields[3].data_type, DataType::Int64);
    assert_eq!(out.schema.fields[4].data_type, DataType::Float64);
    assert_eq!(out.column("qty_net"), Some(vec![&Value::Int64(4), &Value::Int64(1)]));
    assert_eq!(
        out.column("net_total"),
        Some(vec![&Value::Float64(8.0), &Value::Float64(10.0)])
    );
}

#[test]
fn specs_serialize_with_field_names() {
    let spec = VirtualColumnSpec::new("a_x + b_x", "c_x");
    let json = serde_json::to_value(&spec).unwrap();
    assert_eq!(json["rule"], "a_x + b_x");
    assert_eq!(json["new_column"], "c_x");
}

#[test]
fn rejected_spec_fails_whole_batch() {
    let specs = vec![
        VirtualColumnSpec::new("qty_sold - qty_returned", "qty_net"),
        VirtualColumnSpec::new("unit_price * qty_net", "nettotal"),
    ];

    assert!(add_virtual_columns(&orders(), &specs).is_empty());
    assert!(matches!(
        try_add_virtual_columns(&orders(), &specs),
        Err(VirtualColumnError::InvalidNewColumnName { .. })
    ));
}
