//! End-to-end tests: build a query, compile it, and check the wire JSON.

use std::collections::HashMap;

use dynaquery_core::expression::operand::{begins_with, gt};
use dynaquery_core::{Compiler, KeyCondition, QueryBuilder, select_index};
use dynaquery_model::schema::{KeySchema, KeySegment, SecondaryKeySchema};
use dynaquery_model::{
    AttributeValue, Cursor, Item, KeyDefinition, KeyKind, SecondaryIndex, TableOptions, Value,
};

fn table() -> TableOptions {
    TableOptions::new("users", KeyDefinition::new("pk", KeyKind::S))
        .sort_key(KeyDefinition::new("sk", KeyKind::S))
        .global_index(SecondaryIndex {
            name: "gsi0".to_owned(),
            partition_key: KeyDefinition::new("gsi0_pk", KeyKind::S),
            sort_key: Some(KeyDefinition::new("gsi0_sk", KeyKind::S)),
        })
}

#[test]
fn test_should_compile_full_query_to_wire_json() {
    let state = QueryBuilder::new()
        .key(KeyCondition::new("user#1").sort(begins_with("profile#")))
        .filter("age", gt(18))
        .or_filter("NAME", "wan")
        .limit(10)
        .scan_index_forward(false)
        .build();

    let input = Compiler::new(table()).compile(&state).unwrap();
    let json: serde_json::Value = serde_json::to_value(&input).unwrap();

    assert_eq!(json["TableName"], "users");
    assert_eq!(
        json["KeyConditionExpression"],
        "pk = :hashkey and begins_with(sk, :rangekey)"
    );
    assert_eq!(
        json["FilterExpression"],
        "age > :filter_0 or #filter_1 = :filter_1"
    );
    assert_eq!(json["ExpressionAttributeNames"]["#filter_1"], "NAME");
    assert_eq!(json["ExpressionAttributeValues"][":hashkey"]["S"], "user#1");
    assert_eq!(json["ExpressionAttributeValues"][":filter_0"]["N"], "18");
    assert_eq!(json["Limit"], 10);
    assert_eq!(json["ScanIndexForward"], false);
    assert!(json.get("IndexName").is_none());
}

#[test]
fn test_should_resolve_secondary_index_and_compile_its_key() {
    let schema = KeySchema::new(
        vec![KeySegment::text("user"), KeySegment::column("user_id")],
        vec![],
    )
    .secondary_index(SecondaryKeySchema {
        name: "gsi0".to_owned(),
        partition: vec![KeySegment::column("email")],
        sort: vec![KeySegment::text("user"), KeySegment::column("user_id")],
    });

    // Only the secondary's partition column is available.
    let conditions = HashMap::from([("email".to_owned(), Value::from("wan@x.io"))]);
    let resolved = select_index(&schema, &conditions).unwrap();
    assert_eq!(resolved.index_name.as_deref(), Some("gsi0"));

    let mut key = KeyCondition::new(resolved.partition.clone());
    if let Some(sort) = resolved.sort.clone() {
        key = key.sort(sort);
    }
    if let Some(name) = resolved.index_name.clone() {
        key = key.index(name);
    }
    let input = Compiler::new(table())
        .compile(&QueryBuilder::new().key(key).build())
        .unwrap();

    assert_eq!(input.index_name.as_deref(), Some("gsi0"));
    assert_eq!(
        input.key_condition_expression.as_deref(),
        Some("gsi0_pk = :hashkey")
    );
    assert_eq!(
        input.expression_attribute_values[":hashkey"],
        AttributeValue::S("wan@x.io".to_owned())
    );
}

#[test]
fn test_should_decode_returned_items_back_to_native_values() {
    let options = table();
    let stored = Item {
        cursor: Cursor::new("user#1").sort("profile"),
        secondary: vec![Some(Cursor::new("wan@x.io").sort("user#1"))],
        data: HashMap::from([
            ("name".to_owned(), Value::from("wan")),
            ("age".to_owned(), Value::from(20)),
            ("vip".to_owned(), Value::from(true)),
        ]),
    };

    // Through the wire encoding and back, as the store client would see it.
    let attrs = stored.to_attrs(&options);
    let wire = serde_json::to_string(&attrs).unwrap();
    let raw: HashMap<String, AttributeValue> = serde_json::from_str(&wire).unwrap();

    let item = Item::from_attrs(&raw, &options).unwrap();
    assert_eq!(item, stored);
    assert_eq!(item.data["age"], Value::from(20));
}

#[test]
fn test_should_use_pagination_cursor_from_previous_page() {
    let last_evaluated = HashMap::from([
        ("pk".to_owned(), Value::from("user#1")),
        ("sk".to_owned(), Value::from("profile#9")),
    ]);
    let state = QueryBuilder::new()
        .key(KeyCondition::new("user#1"))
        .exclusive_start_key(last_evaluated)
        .build();

    let input = Compiler::new(table()).compile(&state).unwrap();
    let json: serde_json::Value = serde_json::to_value(&input).unwrap();
    assert_eq!(json["ExclusiveStartKey"]["pk"]["S"], "user#1");
    assert_eq!(json["ExclusiveStartKey"]["sk"]["S"], "profile#9");
}
