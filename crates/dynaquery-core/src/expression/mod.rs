//! Expression construction and compilation.
//!
//! The pipeline mirrors how queries are built and lowered:
//!
//! 1. **Operands**: each leaf comparison or function call is an
//!    [`operand::Operand`] that resolves to an aliased expression fragment.
//! 2. **Filter tree**: [`filter::FilterBuilder`] accumulates an ordered list
//!    of `(logic, condition)` pairs, with nesting and negation.
//! 3. **Compilation**: [`compiler::Compiler`] linearizes the tree and the key
//!    condition into a single set of wire parameters with structurally scoped,
//!    collision-free aliases.

pub mod compiler;
pub mod filter;
pub mod operand;

pub use compiler::{CompileError, Compiler};
pub use filter::{FilterBuilder, FilterCondition, FilterState, Logic};
pub use operand::{CompareOp, Expression, Operand};
