//! Filter-condition tree and its builder.
//!
//! A filter is an ordered list of [`FilterState`]s, each pairing a joining
//! [`Logic`] with a [`FilterCondition`]. Conditions are recursive: a single
//! leaf, a negation, or a parenthesized group of nested states. The logic on
//! the first state of any list is accepted but never emitted (it has no
//! predecessor to join with).

use std::fmt;

use super::operand::Operand;

/// Joining logic between adjacent filter states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Logic {
    /// Logical and.
    And,
    /// Logical or.
    Or,
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "and"),
            Self::Or => write!(f, "or"),
        }
    }
}

/// A node in the filter-condition tree.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterCondition {
    /// One leaf condition on a named property.
    Single {
        /// The property name.
        name: String,
        /// The operand resolver for this condition.
        operand: Operand,
    },
    /// Negation of the inner condition.
    Not(Box<FilterCondition>),
    /// A parenthesized group of nested states.
    Group(Vec<FilterState>),
}

/// One entry in a filter list: the condition and the logic joining it to its
/// predecessor.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    /// Joining logic (ignored on the first state).
    pub logic: Logic,
    /// The condition.
    pub condition: FilterCondition,
}

/// Accumulates filter states in call order.
///
/// `filter`/`and_filter` variants join with `and`, `or_filter` variants with
/// `or`; `*_not` variants wrap the condition in a negation, and `*_group`
/// variants build a nested group through a sub-builder closure.
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    states: Vec<FilterState>,
}

impl FilterBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The accumulated states.
    #[must_use]
    pub fn states(&self) -> &[FilterState] {
        &self.states
    }

    /// Consume the builder, returning the accumulated states.
    #[must_use]
    pub fn into_states(self) -> Vec<FilterState> {
        self.states
    }

    fn push(mut self, logic: Logic, not: bool, condition: FilterCondition) -> Self {
        let condition = if not {
            FilterCondition::Not(Box::new(condition))
        } else {
            condition
        };
        self.states.push(FilterState { logic, condition });
        self
    }

    fn single(name: impl Into<String>, operand: impl Into<Operand>) -> FilterCondition {
        FilterCondition::Single {
            name: name.into(),
            operand: operand.into(),
        }
    }

    fn group(handler: impl FnOnce(Self) -> Self) -> FilterCondition {
        FilterCondition::Group(handler(Self::new()).into_states())
    }

    /// Append an `and`-joined condition.
    #[must_use]
    pub fn filter(self, name: impl Into<String>, operand: impl Into<Operand>) -> Self {
        self.push(Logic::And, false, Self::single(name, operand))
    }

    /// Append an `and`-joined negated condition.
    #[must_use]
    pub fn filter_not(self, name: impl Into<String>, operand: impl Into<Operand>) -> Self {
        self.push(Logic::And, true, Self::single(name, operand))
    }

    /// Append an `or`-joined condition.
    #[must_use]
    pub fn or_filter(self, name: impl Into<String>, operand: impl Into<Operand>) -> Self {
        self.push(Logic::Or, false, Self::single(name, operand))
    }

    /// Append an `or`-joined negated condition.
    #[must_use]
    pub fn or_filter_not(self, name: impl Into<String>, operand: impl Into<Operand>) -> Self {
        self.push(Logic::Or, true, Self::single(name, operand))
    }

    /// Append an `and`-joined condition (alias of [`FilterBuilder::filter`]).
    #[must_use]
    pub fn and_filter(self, name: impl Into<String>, operand: impl Into<Operand>) -> Self {
        self.push(Logic::And, false, Self::single(name, operand))
    }

    /// Append an `and`-joined negated condition (alias of
    /// [`FilterBuilder::filter_not`]).
    #[must_use]
    pub fn and_filter_not(self, name: impl Into<String>, operand: impl Into<Operand>) -> Self {
        self.push(Logic::And, true, Self::single(name, operand))
    }

    /// Append an `and`-joined nested group.
    #[must_use]
    pub fn filter_group(self, handler: impl FnOnce(Self) -> Self) -> Self {
        self.push(Logic::And, false, Self::group(handler))
    }

    /// Append an `and`-joined negated nested group.
    #[must_use]
    pub fn filter_not_group(self, handler: impl FnOnce(Self) -> Self) -> Self {
        self.push(Logic::And, true, Self::group(handler))
    }

    /// Append an `or`-joined nested group.
    #[must_use]
    pub fn or_filter_group(self, handler: impl FnOnce(Self) -> Self) -> Self {
        self.push(Logic::Or, false, Self::group(handler))
    }

    /// Append an `or`-joined negated nested group.
    #[must_use]
    pub fn or_filter_not_group(self, handler: impl FnOnce(Self) -> Self) -> Self {
        self.push(Logic::Or, true, Self::group(handler))
    }

    /// Append an `and`-joined nested group (alias of
    /// [`FilterBuilder::filter_group`]).
    #[must_use]
    pub fn and_filter_group(self, handler: impl FnOnce(Self) -> Self) -> Self {
        self.push(Logic::And, false, Self::group(handler))
    }

    /// Append an `and`-joined negated nested group (alias of
    /// [`FilterBuilder::filter_not_group`]).
    #[must_use]
    pub fn and_filter_not_group(self, handler: impl FnOnce(Self) -> Self) -> Self {
        self.push(Logic::And, true, Self::group(handler))
    }
}
