//! Repository-level index resolution.
//!
//! Given the set of columns a caller supplied in a partial condition object,
//! decide which declared index (primary or a named secondary) can answer the
//! lookup, and assemble the actual key value(s) by joining that index's
//! segments. Selection is pure and deterministic: the same condition columns
//! always pick the same index.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use dynaquery_model::schema::{KeySchema, KeySegment};
use dynaquery_model::Value;

/// Errors raised while resolving an index from condition columns.
#[derive(Debug, Error)]
pub enum IndexError {
    /// No declared index can be satisfied; names the first missing required
    /// column of the primary index.
    #[error("column '{name}' is required")]
    MissingColumn {
        /// The missing column name.
        name: String,
    },
    /// A key segment column holds a value with no text form.
    #[error("column '{name}' is not usable as a key segment: expected a scalar, got {actual}")]
    SegmentTypeMismatch {
        /// The column name.
        name: String,
        /// The runtime type of the offending value.
        actual: &'static str,
    },
}

/// The outcome of index resolution: which index to query and the joined key
/// value(s) to query it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKey {
    /// The selected secondary index name (primary when `None`).
    pub index_name: Option<String>,
    /// The joined partition key value.
    pub partition: String,
    /// The joined sort key value, when every sort column was supplied.
    pub sort: Option<String>,
}

/// Join an index's segments into one key value using the supplied condition
/// columns. Literal segments contribute their text; column segments read the
/// named condition value.
pub fn join_segments(
    segments: &[KeySegment],
    conditions: &HashMap<String, Value>,
    separator: &str,
) -> Result<String, IndexError> {
    let fragments: Vec<String> = segments
        .iter()
        .map(|segment| match segment {
            KeySegment::Text(text) => Ok(text.clone()),
            KeySegment::Column(name) => {
                let value = conditions
                    .get(name)
                    .ok_or_else(|| IndexError::MissingColumn { name: name.clone() })?;
                value
                    .key_fragment()
                    .ok_or_else(|| IndexError::SegmentTypeMismatch {
                        name: name.clone(),
                        actual: value.type_name(),
                    })
            }
        })
        .collect::<Result<_, _>>()?;
    Ok(fragments.join(separator))
}

/// Pick the index that can answer a lookup for the supplied condition
/// columns and assemble its key value(s).
///
/// The primary index wins when all of its partition columns are present;
/// otherwise secondary indexes are scanned in declaration order and the
/// first fully-covered one is selected. The sort key is joined only when
/// every one of its columns is present; otherwise the key is partition-only.
pub fn select_index(
    schema: &KeySchema,
    conditions: &HashMap<String, Value>,
) -> Result<ResolvedKey, IndexError> {
    if covers(&schema.partition, conditions) {
        let resolved = ResolvedKey {
            index_name: None,
            partition: join_segments(&schema.partition, conditions, &schema.separator)?,
            sort: join_sort(&schema.sort, conditions, &schema.separator)?,
        };
        debug!(index = "primary", key = %resolved.partition, "selected index");
        return Ok(resolved);
    }

    for secondary in &schema.secondary {
        if covers(&secondary.partition, conditions) {
            let resolved = ResolvedKey {
                index_name: Some(secondary.name.clone()),
                partition: join_segments(&secondary.partition, conditions, &schema.separator)?,
                sort: join_sort(&secondary.sort, conditions, &schema.separator)?,
            };
            debug!(index = %secondary.name, key = %resolved.partition, "selected index");
            return Ok(resolved);
        }
    }

    let name = first_missing(&schema.partition, conditions)
        .unwrap_or_default()
        .to_owned();
    Err(IndexError::MissingColumn { name })
}

fn covers(segments: &[KeySegment], conditions: &HashMap<String, Value>) -> bool {
    first_missing(segments, conditions).is_none()
}

fn first_missing<'a>(
    segments: &'a [KeySegment],
    conditions: &HashMap<String, Value>,
) -> Option<&'a str> {
    segments
        .iter()
        .filter_map(KeySegment::required_column)
        .find(|column| !conditions.contains_key(*column))
}

fn join_sort(
    segments: &[KeySegment],
    conditions: &HashMap<String, Value>,
    separator: &str,
) -> Result<Option<String>, IndexError> {
    if segments.is_empty() || !covers(segments, conditions) {
        return Ok(None);
    }
    join_segments(segments, conditions, separator).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynaquery_model::schema::SecondaryKeySchema;

    fn schema() -> KeySchema {
        KeySchema::new(
            vec![KeySegment::text("user"), KeySegment::column("user_id")],
            vec![KeySegment::text("profile"), KeySegment::column("profile_id")],
        )
        .secondary_index(SecondaryKeySchema {
            name: "gsi0".to_owned(),
            partition: vec![KeySegment::column("email")],
            sort: vec![],
        })
    }

    #[test]
    fn test_should_join_segments_in_declaration_order() {
        let conditions = HashMap::from([("user_id".to_owned(), Value::from("u1"))]);
        let joined = join_segments(
            &[KeySegment::text("user"), KeySegment::column("user_id")],
            &conditions,
            "#",
        )
        .unwrap();
        assert_eq!(joined, "user#u1");
    }

    #[test]
    fn test_should_select_primary_when_its_columns_are_present() {
        let conditions = HashMap::from([
            ("user_id".to_owned(), Value::from("u1")),
            ("profile_id".to_owned(), Value::from("p1")),
        ]);
        let resolved = select_index(&schema(), &conditions).unwrap();
        assert_eq!(resolved.index_name, None);
        assert_eq!(resolved.partition, "user#u1");
        assert_eq!(resolved.sort.as_deref(), Some("profile#p1"));
    }

    #[test]
    fn test_should_omit_sort_key_when_its_columns_are_missing() {
        let conditions = HashMap::from([("user_id".to_owned(), Value::from("u1"))]);
        let resolved = select_index(&schema(), &conditions).unwrap();
        assert_eq!(resolved.index_name, None);
        assert_eq!(resolved.partition, "user#u1");
        assert_eq!(resolved.sort, None);
    }

    #[test]
    fn test_should_fall_back_to_secondary_index_in_declaration_order() {
        let conditions = HashMap::from([("email".to_owned(), Value::from("a@b.io"))]);
        let resolved = select_index(&schema(), &conditions).unwrap();
        assert_eq!(resolved.index_name.as_deref(), Some("gsi0"));
        assert_eq!(resolved.partition, "a@b.io");
        assert_eq!(resolved.sort, None);
    }

    #[test]
    fn test_should_name_first_missing_primary_column() {
        let conditions = HashMap::from([("other".to_owned(), Value::from("x"))]);
        assert!(matches!(
            select_index(&schema(), &conditions),
            Err(IndexError::MissingColumn { name }) if name == "user_id"
        ));
    }

    #[test]
    fn test_should_reject_non_scalar_segment_values() {
        let conditions = HashMap::from([("user_id".to_owned(), Value::L(vec![]))]);
        assert!(matches!(
            select_index(&schema(), &conditions),
            Err(IndexError::SegmentTypeMismatch { name, actual: "list" }) if name == "user_id"
        ));
    }

    #[test]
    fn test_should_render_numeric_columns_as_text_fragments() {
        let conditions = HashMap::from([
            ("user_id".to_owned(), Value::from(42)),
            ("profile_id".to_owned(), Value::from("p1")),
        ]);
        let resolved = select_index(&schema(), &conditions).unwrap();
        assert_eq!(resolved.partition, "user#42");
    }
}
