//! Compilation of key conditions and filter trees into wire parameters.
//!
//! Alias scoping is structural: a state's alias is its parent scope plus its
//! position in the list (`filter_0`, `filter_0_1`, ...), and the two key
//! slots use the fixed scopes `hashkey` and `rangekey`. Two compilations of
//! the same tree therefore yield byte-identical output, and aliases from the
//! key and filter namespaces can never collide.

use thiserror::Error;
use tracing::debug;

use dynaquery_model::schema::KeyDefinition;
use dynaquery_model::{QueryInput, TableOptions, to_attr_map};

use super::filter::{FilterCondition, FilterState};
use super::operand::{Expression, Operand};
use crate::query::QueryState;

/// Errors raised while compiling a query. All are fail-fast validation
/// failures surfaced before any wire parameter leaves the process.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The key condition names a secondary index the table does not declare.
    #[error("unknown index name ({name})")]
    UnknownIndex {
        /// The index name that was requested.
        name: String,
    },
    /// A key literal's runtime type does not match the declared key type.
    #[error("key '{name}' expects a {expected} value, but the given is {actual}")]
    KeyTypeMismatch {
        /// The key attribute name.
        name: String,
        /// The declared key type descriptor.
        expected: &'static str,
        /// The runtime type of the offending value.
        actual: &'static str,
    },
}

/// Compiles query state against one table's options.
#[derive(Debug, Clone)]
pub struct Compiler {
    /// The target table's key and index configuration.
    pub options: TableOptions,
}

impl Compiler {
    /// Create a compiler for the given table options.
    #[must_use]
    pub fn new(options: TableOptions) -> Self {
        Self { options }
    }

    /// Compile one condition node within an alias scope. Returns `None` when
    /// the node contributes no expression (an empty group).
    #[must_use]
    pub fn compile_filter_condition(
        &self,
        condition: &FilterCondition,
        alias_name: &str,
    ) -> Option<Expression> {
        match condition {
            FilterCondition::Group(states) => {
                let compiled = self.compile_filter_states(states, alias_name)?;
                Some(Expression {
                    expression: format!("({})", compiled.expression),
                    names: compiled.names,
                    values: compiled.values,
                })
            }
            FilterCondition::Not(inner) => {
                let compiled = self.compile_filter_condition(inner, alias_name)?;
                let expression = if compiled.expression.starts_with('(')
                    && compiled.expression.ends_with(')')
                {
                    format!("not {}", compiled.expression)
                } else {
                    format!("not ({})", compiled.expression)
                };
                Some(Expression {
                    expression,
                    names: compiled.names,
                    values: compiled.values,
                })
            }
            FilterCondition::Single { name, operand } => Some(operand.resolve(name, alias_name)),
        }
    }

    /// Compile an ordered state list within an alias scope.
    ///
    /// Each state gets the scoped alias `<alias_name>_<index>`; states that
    /// compile to nothing are dropped; a single surviving state is returned
    /// unchanged; otherwise expressions are joined in order with each state's
    /// own logic (the first state's logic is never emitted).
    #[must_use]
    pub fn compile_filter_states(
        &self,
        states: &[FilterState],
        alias_name: &str,
    ) -> Option<Expression> {
        let mut compiled_states: Vec<_> = states
            .iter()
            .enumerate()
            .filter_map(|(state_index, state)| {
                self.compile_filter_condition(&state.condition, &format!("{alias_name}_{state_index}"))
                    .map(|compiled| (state.logic, compiled))
            })
            .collect();

        if compiled_states.len() == 1 {
            return Some(compiled_states.remove(0).1);
        }

        let mut result: Option<Expression> = None;
        for (logic, compiled) in compiled_states {
            match result.as_mut() {
                None => result = Some(compiled),
                Some(joined) => {
                    joined.expression.push_str(&format!(" {logic} {}", compiled.expression));
                    joined.absorb(compiled);
                }
            }
        }
        result
    }

    /// Compile the full query state into wire parameters.
    pub fn compile(&self, state: &QueryState) -> Result<QueryInput, CompileError> {
        let mut input = QueryInput {
            table_name: self.options.table_name.clone(),
            ..QueryInput::default()
        };

        if let Some(key) = &state.key {
            let (partition_def, sort_def) = if let Some(index_name) = &key.index_name {
                let gsi = self.options.find_index(index_name).ok_or_else(|| {
                    CompileError::UnknownIndex {
                        name: index_name.clone(),
                    }
                })?;
                input.index_name = Some(gsi.name.clone());
                (&gsi.partition_key, gsi.sort_key.as_ref())
            } else {
                (&self.options.partition_key, self.options.sort_key.as_ref())
            };

            check_key_types(partition_def, &key.partition)?;
            let compiled_pk = key.partition.resolve(&partition_def.name, "hashkey");
            let mut parts = vec![compiled_pk.expression];
            input.expression_attribute_names.extend(compiled_pk.names);
            input.expression_attribute_values.extend(compiled_pk.values);

            if let (Some(def), Some(sort)) = (sort_def, &key.sort) {
                check_key_types(def, sort)?;
                let compiled_sk = sort.resolve(&def.name, "rangekey");
                parts.push(compiled_sk.expression);
                input.expression_attribute_names.extend(compiled_sk.names);
                input.expression_attribute_values.extend(compiled_sk.values);
            }

            input.key_condition_expression = Some(parts.join(" and "));
        }

        if let Some(compiled) = self.compile_filter_states(&state.filter, "filter") {
            input.filter_expression = Some(compiled.expression);
            input.expression_attribute_names.extend(compiled.names);
            input.expression_attribute_values.extend(compiled.values);
        }

        input.limit = state.limit;
        input.scan_index_forward = state.scan_index_forward;
        if let Some(start_key) = &state.exclusive_start_key {
            input.exclusive_start_key = to_attr_map(start_key);
        }

        debug!(
            table = %input.table_name,
            index = input.index_name.as_deref().unwrap_or("primary"),
            key = input.key_condition_expression.as_deref().unwrap_or(""),
            filter = input.filter_expression.as_deref().unwrap_or(""),
            "compiled query"
        );
        Ok(input)
    }
}

/// Check every literal the operand embeds against the declared key type.
fn check_key_types(def: &KeyDefinition, operand: &Operand) -> Result<(), CompileError> {
    for value in operand.literal_values() {
        if !def.kind.matches(value) {
            return Err(CompileError::KeyTypeMismatch {
                name: def.name.clone(),
                expected: def.kind.as_str(),
                actual: value.type_name(),
            });
        }
    }
    Ok(())
}
