//! Wire-level model types for dynaquery.
//!
//! This crate defines the store's tagged-variant attribute encoding
//! ([`AttributeValue`]), the native value type it converts to and from
//! ([`Value`]), the bidirectional codec between the two, and the table/index
//! schema descriptors the query compiler and index resolver consume.

pub mod attribute_value;
pub mod codec;
pub mod input;
pub mod item;
pub mod schema;
pub mod value;

pub use attribute_value::AttributeValue;
pub use codec::{DecodeError, from_attr, from_attr_map, to_attr, to_attr_map};
pub use input::QueryInput;
pub use item::{Cursor, Item};
pub use schema::{KeyDefinition, KeyKind, KeySchema, KeySegment, SecondaryIndex, TableOptions};
pub use value::Value;
