//! Typed query construction for a partition/sort-key addressed store.
//!
//! Callers express key conditions and filter predicates as a composable
//! condition tree through [`QueryBuilder`] and the operand constructors in
//! [`expression::operand`]; the [`expression::compiler::Compiler`] then
//! deterministically lowers that tree into the store's wire-level query
//! parameters with collision-free attribute aliases. [`index`] hosts the
//! repository-level heuristic that picks which declared index can answer a
//! lookup from a partial set of entity columns.

pub mod expression;
pub mod index;
pub mod query;
pub mod reserved_words;

pub use expression::compiler::{CompileError, Compiler};
pub use expression::filter::{FilterBuilder, FilterCondition, FilterState, Logic};
pub use expression::operand::{CompareOp, Expression, Operand};
pub use index::{IndexError, ResolvedKey, select_index};
pub use query::{KeyCondition, QueryBuilder, QueryState};
