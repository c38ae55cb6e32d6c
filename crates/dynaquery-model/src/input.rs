//! Wire-level query input parameters.
//!
//! Uses `PascalCase` JSON field naming to match the store's wire protocol.
//! Optional fields are omitted when `None`; empty `HashMap`s are omitted to
//! produce minimal JSON payloads.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::attribute_value::AttributeValue;

/// Fully-resolved parameters for the store's `Query` operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryInput {
    /// The name of the table to query.
    pub table_name: String,

    /// The name of a secondary index to query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,

    /// The condition that specifies the key values for items to be retrieved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_condition_expression: Option<String>,

    /// A string that contains conditions for filtering the query results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_expression: Option<String>,

    /// Substitution tokens for attribute names in an expression.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub expression_attribute_names: HashMap<String, String>,

    /// Substitution tokens for attribute values in an expression.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub expression_attribute_values: HashMap<String, AttributeValue>,

    /// Specifies the order of index traversal. `true` (default) for ascending,
    /// `false` for descending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_index_forward: Option<bool>,

    /// The maximum number of items to evaluate (not necessarily the number of
    /// matching items).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,

    /// The primary key of the first item that this operation will evaluate.
    /// Used for pagination.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub exclusive_start_key: HashMap<String, AttributeValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_omit_empty_fields_from_wire_json() {
        let input = QueryInput {
            table_name: "users".to_owned(),
            ..Default::default()
        };
        let json = serde_json::to_string(&input).unwrap();
        assert_eq!(json, r#"{"TableName":"users"}"#);
    }

    #[test]
    fn test_should_serialize_expressions_in_pascal_case() {
        let input = QueryInput {
            table_name: "users".to_owned(),
            key_condition_expression: Some("pk = :hashkey".to_owned()),
            expression_attribute_values: HashMap::from([(
                ":hashkey".to_owned(),
                AttributeValue::S("user#1".to_owned()),
            )]),
            limit: Some(10),
            scan_index_forward: Some(false),
            ..Default::default()
        };
        let json: serde_json::Value = serde_json::to_value(&input).unwrap();
        assert_eq!(json["KeyConditionExpression"], "pk = :hashkey");
        assert_eq!(json["ExpressionAttributeValues"][":hashkey"]["S"], "user#1");
        assert_eq!(json["Limit"], 10);
        assert_eq!(json["ScanIndexForward"], false);
    }
}
