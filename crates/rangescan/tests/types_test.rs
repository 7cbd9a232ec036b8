//! Tests for the rangescan types module

use rangescan::prelude::*;

#[test]
fn test_value_null_checks() {
    assert!(Value::Null.is_null());
    assert!(!Value::Int32(0).is_null());
    assert!(!Value::String(String::new()).is_null());
}

#[test]
fn test_value_accessors() {
    assert_eq!(Value::Int16(7).as_i64(), Some(7));
    assert_eq!(Value::Int64(7).as_f64(), Some(7.0));
    assert_eq!(Value::Bool(true).as_bool(), Some(true));
    assert_eq!(Value::Int8(1).as_bool(), Some(true));
    assert_eq!(Value::String("x".into()).as_i64(), None);

    assert_eq!(Value::Bytes(vec![1, 2]).as_bytes(), Some(&[1_u8, 2][..]));
    assert_eq!(Value::String("ab".into()).as_bytes(), Some("ab".as_bytes()));

    let uuid: uuid::Uuid = "6dbd9628-97b4-4f9c-9447-f77a56392a9a".parse().unwrap();
    assert_eq!(Value::Uuid(uuid).as_uuid(), Some(uuid));
    assert_eq!(Value::String(uuid.to_string()).as_uuid(), Some(uuid));
}

#[test]
fn test_value_from_host_types() {
    assert!(matches!(Value::from(true), Value::Bool(true)));
    assert!(matches!(Value::from(1_i16), Value::Int16(1)));
    assert!(matches!(Value::from(1.5_f64), Value::Float64(_)));
    assert!(matches!(Value::from("s"), Value::String(_)));
    assert!(matches!(Value::from(vec![1_u8]), Value::Bytes(_)));
    assert!(Value::from(None::<i64>).is_null());
    assert!(matches!(Value::from(Some(2_i64)), Value::Int64(2)));
}

#[test]
fn test_rows_compare_by_name_order_and_values() {
    let a = Row::new(
        vec!["id".into(), "name".into()],
        vec![Value::Int32(1), Value::String("Alice".into())],
    );
    let b = Row::new(
        vec!["id".into(), "name".into()],
        vec![Value::Int32(1), Value::String("Alice".into())],
    );
    let c = Row::new(
        vec!["id".into(), "name".into()],
        vec![Value::Int32(1), Value::String("Bob".into())],
    );

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_row_access() {
    let row = Row::new(
        vec!["id".into(), "name".into()],
        vec![Value::Int32(1), Value::Null],
    );

    assert_eq!(row.len(), 2);
    assert!(!row.is_empty());
    assert_eq!(row.columns(), ["id", "name"]);
    assert_eq!(row.values(), [Value::Int32(1), Value::Null]);
    assert_eq!(row.get(1), Some(&Value::Null));
    assert_eq!(row.get(9), None);
    assert_eq!(row.get_by_name("ID"), Some(&Value::Int32(1)));
    assert_eq!(row.get_by_name("nope"), None);

    let map = row.into_map();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("name"), Some(&Value::Null));
}

#[test]
fn test_table_metadata_key_derivations() {
    let table = TableMetadata::with_columns(
        "orders",
        vec![
            ColumnMetadata::new("shop", "varchar").at(1).primary_key(2),
            ColumnMetadata::new("total", "numeric").at(2),
            ColumnMetadata::new("order_no", "bigint").at(3).primary_key(1),
        ],
    );

    // key order follows key ordinals, not declared order
    assert_eq!(table.primary_key_names(), vec!["order_no", "shop"]);
    // declared order is preserved for the plain column list
    assert_eq!(table.column_names(), vec!["shop", "total", "order_no"]);
    // scan order leads with the key
    let scan: Vec<_> = table
        .columns_key_first()
        .into_iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(scan, vec!["order_no", "shop", "total"]);
}

#[test]
fn test_column_metadata_builders() {
    let col = ColumnMetadata::new("id", "bigint").at(3).primary_key(1);

    assert_eq!(col.ordinal, 3);
    assert!(col.is_primary_key());
    assert!(!col.nullable); // key columns are not nullable

    let col = ColumnMetadata::new("note", "text");
    assert!(!col.is_primary_key());
    assert!(col.nullable);
}

#[test]
fn test_table_column_lookup_is_case_insensitive() {
    let table = TableMetadata::with_columns(
        "t",
        vec![ColumnMetadata::new("Id", "integer").at(1).primary_key(1)],
    );
    assert!(table.column("id").is_some());
    assert!(table.column("ID").is_some());
    assert!(table.column("other").is_none());
}
