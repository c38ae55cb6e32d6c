//! Query builder facade.
//!
//! [`QueryBuilder`] accumulates the key condition, filter states, and
//! pagination/ordering parameters of one query and hands them to the
//! compiler as an immutable [`QueryState`]. Filter methods delegate to the
//! embedded [`FilterBuilder`] so key and filter clauses chain fluently.

use std::collections::HashMap;

use dynaquery_model::Value;

use crate::expression::filter::{FilterBuilder, FilterState};
use crate::expression::operand::Operand;

/// A two-slot key condition: the partition operand, an optional sort
/// operand, and an optional secondary index name to resolve them against.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyCondition {
    /// Resolver for the partition key clause.
    pub partition: Operand,
    /// Resolver for the sort key clause, when present.
    pub sort: Option<Operand>,
    /// Name of the secondary index to target (primary when `None`).
    pub index_name: Option<String>,
}

impl KeyCondition {
    /// Key condition on the partition key. A plain value means equality.
    pub fn new(partition: impl Into<Operand>) -> Self {
        Self {
            partition: partition.into(),
            sort: None,
            index_name: None,
        }
    }

    /// Add a sort key condition.
    #[must_use]
    pub fn sort(mut self, sort: impl Into<Operand>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Target a named secondary index.
    #[must_use]
    pub fn index(mut self, name: impl Into<String>) -> Self {
        self.index_name = Some(name.into());
        self
    }
}

/// The complete, immutable input of one compilation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryState {
    /// Optional key condition.
    pub key: Option<KeyCondition>,
    /// Ordered filter states.
    pub filter: Vec<FilterState>,
    /// Result limit.
    pub limit: Option<i32>,
    /// Index traversal direction (`true` ascending).
    pub scan_index_forward: Option<bool>,
    /// Pagination cursor: the raw key map of the last evaluated item.
    pub exclusive_start_key: Option<HashMap<String, Value>>,
}

/// Fluent builder producing a [`QueryState`].
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    state: QueryState,
    filter: FilterBuilder,
}

impl QueryBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key condition.
    #[must_use]
    pub fn key(mut self, key: KeyCondition) -> Self {
        self.state.key = Some(key);
        self
    }

    /// Set the result limit.
    #[must_use]
    pub fn limit(mut self, limit: i32) -> Self {
        self.state.limit = Some(limit);
        self
    }

    /// Set the index traversal direction.
    #[must_use]
    pub fn scan_index_forward(mut self, forward: bool) -> Self {
        self.state.scan_index_forward = Some(forward);
        self
    }

    /// Set the pagination cursor.
    #[must_use]
    pub fn exclusive_start_key(mut self, key: HashMap<String, Value>) -> Self {
        self.state.exclusive_start_key = Some(key);
        self
    }

    /// Append an `and`-joined filter condition.
    #[must_use]
    pub fn filter(mut self, name: impl Into<String>, operand: impl Into<Operand>) -> Self {
        self.filter = self.filter.filter(name, operand);
        self
    }

    /// Append an `and`-joined negated filter condition.
    #[must_use]
    pub fn filter_not(mut self, name: impl Into<String>, operand: impl Into<Operand>) -> Self {
        self.filter = self.filter.filter_not(name, operand);
        self
    }

    /// Append an `or`-joined filter condition.
    #[must_use]
    pub fn or_filter(mut self, name: impl Into<String>, operand: impl Into<Operand>) -> Self {
        self.filter = self.filter.or_filter(name, operand);
        self
    }

    /// Append an `or`-joined negated filter condition.
    #[must_use]
    pub fn or_filter_not(mut self, name: impl Into<String>, operand: impl Into<Operand>) -> Self {
        self.filter = self.filter.or_filter_not(name, operand);
        self
    }

    /// Append an `and`-joined filter condition (alias of
    /// [`QueryBuilder::filter`]).
    #[must_use]
    pub fn and_filter(mut self, name: impl Into<String>, operand: impl Into<Operand>) -> Self {
        self.filter = self.filter.and_filter(name, operand);
        self
    }

    /// Append an `and`-joined negated filter condition (alias of
    /// [`QueryBuilder::filter_not`]).
    #[must_use]
    pub fn and_filter_not(mut self, name: impl Into<String>, operand: impl Into<Operand>) -> Self {
        self.filter = self.filter.and_filter_not(name, operand);
        self
    }

    /// Append an `and`-joined nested filter group.
    #[must_use]
    pub fn filter_group(mut self, handler: impl FnOnce(FilterBuilder) -> FilterBuilder) -> Self {
        self.filter = self.filter.filter_group(handler);
        self
    }

    /// Append an `and`-joined negated nested filter group.
    #[must_use]
    pub fn filter_not_group(
        mut self,
        handler: impl FnOnce(FilterBuilder) -> FilterBuilder,
    ) -> Self {
        self.filter = self.filter.filter_not_group(handler);
        self
    }

    /// Append an `or`-joined nested filter group.
    #[must_use]
    pub fn or_filter_group(
        mut self,
        handler: impl FnOnce(FilterBuilder) -> FilterBuilder,
    ) -> Self {
        self.filter = self.filter.or_filter_group(handler);
        self
    }

    /// Append an `or`-joined negated nested filter group.
    #[must_use]
    pub fn or_filter_not_group(
        mut self,
        handler: impl FnOnce(FilterBuilder) -> FilterBuilder,
    ) -> Self {
        self.filter = self.filter.or_filter_not_group(handler);
        self
    }

    /// Finalize into an immutable query state.
    #[must_use]
    pub fn build(mut self) -> QueryState {
        self.state.filter = self.filter.into_states();
        self.state
    }
}
