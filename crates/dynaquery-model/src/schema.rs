//! Table and index schema descriptors.
//!
//! Two layers of schema live here. [`TableOptions`] describes the physical
//! table the compiler targets: its attribute-level partition/sort key
//! definitions and any named secondary indexes. [`KeySchema`] describes how an
//! entity's composite key values are assembled from [`KeySegment`]s before
//! they ever reach the table: an ordered mix of literal text and column
//! reads, joined with a separator.

use crate::value::Value;

/// Scalar type of a key attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// String key.
    S,
    /// Number key.
    N,
    /// Binary key.
    B,
}

impl KeyKind {
    /// Returns the wire type descriptor for this key kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::N => "N",
            Self::B => "B",
        }
    }

    /// Returns `true` if `value`'s runtime type matches this key kind.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::S, Value::S(_)) | (Self::N, Value::N(_)) | (Self::B, Value::B(_))
        )
    }
}

/// A single key attribute definition with its name and scalar kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDefinition {
    /// The attribute name.
    pub name: String,
    /// The scalar kind (S, N, or B).
    pub kind: KeyKind,
}

impl KeyDefinition {
    /// Create a key definition.
    pub fn new(name: impl Into<String>, kind: KeyKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A named secondary (GSI-style) index: an alternate partition/sort key
/// projection over the same item set, queried by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondaryIndex {
    /// The index name.
    pub name: String,
    /// Partition key definition.
    pub partition_key: KeyDefinition,
    /// Optional sort key definition.
    pub sort_key: Option<KeyDefinition>,
}

/// Table configuration consumed by the compiler: the table name, its primary
/// key definitions, and zero or more named secondary indexes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// The table name.
    pub table_name: String,
    /// Primary partition key definition.
    pub partition_key: KeyDefinition,
    /// Optional primary sort key definition.
    pub sort_key: Option<KeyDefinition>,
    /// Named secondary indexes, in declaration order.
    pub global_indexes: Vec<SecondaryIndex>,
}

impl TableOptions {
    /// Create table options with a partition key only.
    pub fn new(table_name: impl Into<String>, partition_key: KeyDefinition) -> Self {
        Self {
            table_name: table_name.into(),
            partition_key,
            sort_key: None,
            global_indexes: Vec::new(),
        }
    }

    /// Set the primary sort key definition.
    #[must_use]
    pub fn sort_key(mut self, sort_key: KeyDefinition) -> Self {
        self.sort_key = Some(sort_key);
        self
    }

    /// Append a named secondary index.
    #[must_use]
    pub fn global_index(mut self, index: SecondaryIndex) -> Self {
        self.global_indexes.push(index);
        self
    }

    /// Look up a secondary index by name.
    #[must_use]
    pub fn find_index(&self, name: &str) -> Option<&SecondaryIndex> {
        self.global_indexes.iter().find(|gsi| gsi.name == name)
    }
}

/// A composite-key contributor: a constant text fragment or a column read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySegment {
    /// A literal text segment.
    Text(String),
    /// A segment read from the named entity column.
    Column(String),
}

impl KeySegment {
    /// A literal text segment.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// A column segment reading the named property.
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(name.into())
    }

    /// Returns the column name this segment requires, if any.
    #[must_use]
    pub fn required_column(&self) -> Option<&str> {
        match self {
            Self::Text(_) => None,
            Self::Column(name) => Some(name),
        }
    }
}

/// Segment-level key declaration for one index: how partition and sort key
/// values are assembled from entity columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    /// Separator joining segment fragments. Segment values are not escaped;
    /// callers must keep the separator out of column values.
    pub separator: String,
    /// Partition key segments, in declaration order.
    pub partition: Vec<KeySegment>,
    /// Sort key segments, in declaration order (empty when the index has no
    /// sort key).
    pub sort: Vec<KeySegment>,
    /// Secondary index declarations, in declaration order.
    pub secondary: Vec<SecondaryKeySchema>,
}

/// Segment-level key declaration for a named secondary index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondaryKeySchema {
    /// The index name, as known to the table.
    pub name: String,
    /// Partition key segments.
    pub partition: Vec<KeySegment>,
    /// Sort key segments.
    pub sort: Vec<KeySegment>,
}

impl KeySchema {
    /// Create a key schema with the default `#` separator.
    #[must_use]
    pub fn new(partition: Vec<KeySegment>, sort: Vec<KeySegment>) -> Self {
        Self {
            separator: "#".to_owned(),
            partition,
            sort,
            secondary: Vec::new(),
        }
    }

    /// Override the segment separator.
    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Append a secondary index declaration.
    #[must_use]
    pub fn secondary_index(mut self, index: SecondaryKeySchema) -> Self {
        self.secondary.push(index);
        self
    }
}
