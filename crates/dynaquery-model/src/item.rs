//! Stored-item views and their attribute-map transforms.
//!
//! An [`Item`] is the codec-level view of one stored row: its key [`Cursor`]
//! plus the residual data attributes. The transforms here move between that
//! view and the raw encoded attribute map exchanged with the store, copying
//! key values onto their schema-declared attribute names on the way out and
//! stripping them back off on the way in.

use std::collections::HashMap;

use crate::attribute_value::AttributeValue;
use crate::codec::{self, DecodeError};
use crate::schema::TableOptions;
use crate::value::Value;

/// The key coordinates of one item: a partition key value and an optional
/// sort key value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cursor {
    /// Partition key value.
    pub partition: Value,
    /// Sort key value, when the index has a sort key.
    pub sort: Option<Value>,
}

impl Cursor {
    /// Create a partition-only cursor.
    pub fn new(partition: impl Into<Value>) -> Self {
        Self {
            partition: partition.into(),
            sort: None,
        }
    }

    /// Set the sort key value.
    #[must_use]
    pub fn sort(mut self, sort: impl Into<Value>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Encode this cursor as a raw key-attribute map against the table's
    /// primary key definitions.
    #[must_use]
    pub fn to_key(&self, options: &TableOptions) -> HashMap<String, AttributeValue> {
        let mut key = HashMap::new();
        key.insert(
            options.partition_key.name.clone(),
            codec::to_attr(&self.partition),
        );
        if let (Some(def), Some(sort)) = (&options.sort_key, &self.sort) {
            key.insert(def.name.clone(), codec::to_attr(sort));
        }
        key
    }
}

/// One stored item: primary cursor, per-secondary-index cursors (aligned with
/// the table's secondary index declaration order, `None` where the item is
/// not projected into that index), and the residual data attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Item {
    /// Primary key cursor.
    pub cursor: Cursor,
    /// Secondary index cursors in declaration order.
    pub secondary: Vec<Option<Cursor>>,
    /// Non-key data attributes.
    pub data: HashMap<String, Value>,
}

impl Item {
    /// Encode this item as a raw attribute map: primary and secondary key
    /// values land on their declared attribute names, then data attributes.
    #[must_use]
    pub fn to_attrs(&self, options: &TableOptions) -> HashMap<String, AttributeValue> {
        let mut attrs = self.cursor.to_key(options);
        for (gsi, cursor) in options.global_indexes.iter().zip(&self.secondary) {
            let Some(cursor) = cursor else { continue };
            attrs.insert(
                gsi.partition_key.name.clone(),
                codec::to_attr(&cursor.partition),
            );
            if let Some(def) = &gsi.sort_key {
                let sort = cursor.sort.clone().unwrap_or_default();
                attrs.insert(def.name.clone(), codec::to_attr(&sort));
            }
        }
        for (name, value) in &self.data {
            attrs.insert(name.clone(), codec::to_attr(value));
        }
        attrs
    }

    /// Decode a raw attribute map into an item, splitting key attributes off
    /// the data by their schema-declared names.
    pub fn from_attrs(
        attrs: &HashMap<String, AttributeValue>,
        options: &TableOptions,
    ) -> Result<Self, DecodeError> {
        let mut data = codec::from_attr_map(attrs)?;

        let partition = data.remove(&options.partition_key.name).unwrap_or_default();
        let sort = options
            .sort_key
            .as_ref()
            .and_then(|def| data.remove(&def.name));
        let cursor = Cursor { partition, sort };

        let mut secondary = Vec::with_capacity(options.global_indexes.len());
        for gsi in &options.global_indexes {
            let Some(partition) = data.remove(&gsi.partition_key.name) else {
                secondary.push(None);
                continue;
            };
            let sort = gsi.sort_key.as_ref().and_then(|def| data.remove(&def.name));
            secondary.push(Some(Cursor { partition, sort }));
        }

        Ok(Self {
            cursor,
            secondary,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{KeyDefinition, KeyKind, SecondaryIndex};

    fn options() -> TableOptions {
        TableOptions::new("users", KeyDefinition::new("pk", KeyKind::S))
            .sort_key(KeyDefinition::new("sk", KeyKind::S))
            .global_index(SecondaryIndex {
                name: "gsi0".to_owned(),
                partition_key: KeyDefinition::new("gsi0_pk", KeyKind::S),
                sort_key: Some(KeyDefinition::new("gsi0_sk", KeyKind::S)),
            })
    }

    #[test]
    fn test_should_encode_cursor_to_key_map() {
        let key = Cursor::new("user#1").sort("profile").to_key(&options());
        assert_eq!(key["pk"], AttributeValue::S("user#1".to_owned()));
        assert_eq!(key["sk"], AttributeValue::S("profile".to_owned()));
        assert_eq!(key.len(), 2);
    }

    #[test]
    fn test_should_roundtrip_item_through_attrs() {
        let item = Item {
            cursor: Cursor::new("user#1").sort("profile"),
            secondary: vec![Some(Cursor::new("email@x.io").sort("user#1"))],
            data: HashMap::from([
                ("name".to_owned(), Value::from("wan")),
                ("age".to_owned(), Value::from(20)),
            ]),
        };
        let attrs = item.to_attrs(&options());
        assert_eq!(attrs["gsi0_pk"], AttributeValue::S("email@x.io".to_owned()));

        let decoded = Item::from_attrs(&attrs, &options()).unwrap();
        assert_eq!(decoded, item);
        assert!(!decoded.data.contains_key("pk"));
        assert!(!decoded.data.contains_key("gsi0_sk"));
    }

    #[test]
    fn test_should_skip_absent_secondary_cursors() {
        let item = Item {
            cursor: Cursor::new("user#2"),
            secondary: vec![None],
            data: HashMap::new(),
        };
        let attrs = item.to_attrs(&options());
        assert!(!attrs.contains_key("gsi0_pk"));

        let decoded = Item::from_attrs(&attrs, &options()).unwrap();
        assert_eq!(decoded.secondary, vec![None]);
    }
}
