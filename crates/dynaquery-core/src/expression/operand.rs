//! Operand resolvers: one leaf comparison or function call each.
//!
//! An [`Operand`] holds the operator and literal value(s) of a single
//! condition; [`Operand::resolve`] pairs it with a property name and an alias
//! scope to produce an [`Expression`] fragment. Every resolver applies the
//! same reserved-word rule: a property whose upper-cased name is reserved is
//! referenced as `#<alias>` with a `names` entry, otherwise verbatim.
//! Literal values are codec-encoded into `values` at resolve time.

use std::collections::HashMap;
use std::fmt;

use dynaquery_model::{AttributeValue, Value, to_attr};

use crate::reserved_words::is_reserved;

/// A compiled expression fragment: the expression string plus the attribute
/// name and value placeholder maps it references.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Expression {
    /// The expression string.
    pub expression: String,
    /// `#<alias>` to property-name substitutions (only for reserved words).
    pub names: HashMap<String, String>,
    /// `:<alias>` to encoded literal value bindings.
    pub values: HashMap<String, AttributeValue>,
}

impl Expression {
    /// Merge another fragment's name/value maps into this one. Aliases are
    /// unique by scoping construction, so entries never collide.
    pub fn absorb(&mut self, other: Expression) {
        self.names.extend(other.names);
        self.values.extend(other.values);
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Equal (`=`).
    Eq,
    /// Not equal (`<>`).
    Ne,
    /// Less than (`<`).
    Lt,
    /// Less than or equal (`<=`).
    Le,
    /// Greater than (`>`).
    Gt,
    /// Greater than or equal (`>=`).
    Ge,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq => write!(f, "="),
            Self::Ne => write!(f, "<>"),
            Self::Lt => write!(f, "<"),
            Self::Le => write!(f, "<="),
            Self::Gt => write!(f, ">"),
            Self::Ge => write!(f, ">="),
        }
    }
}

/// One leaf condition: a comparison, a range test, or a function call.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// `<prop> <op> :<alias>`.
    Compare {
        /// The comparison operator.
        op: CompareOp,
        /// The literal right-hand value.
        value: Value,
    },
    /// `<prop> between :<alias>_from and :<alias>_to`.
    Between {
        /// Lower bound (inclusive).
        from: Value,
        /// Upper bound (inclusive).
        to: Value,
    },
    /// `<func>(<prop>[, :<alias>...])` with zero or more literal arguments.
    Function {
        /// The function name (e.g. `begins_with`).
        name: String,
        /// Literal arguments, each bound to its own placeholder.
        args: Vec<Value>,
    },
}

/// Equality operand (`=`).
pub fn eq(value: impl Into<Value>) -> Operand {
    compare(CompareOp::Eq, value)
}

/// Inequality operand (`<>`).
pub fn ne(value: impl Into<Value>) -> Operand {
    compare(CompareOp::Ne, value)
}

/// Less-than operand (`<`).
pub fn lt(value: impl Into<Value>) -> Operand {
    compare(CompareOp::Lt, value)
}

/// Less-than-or-equal operand (`<=`).
pub fn le(value: impl Into<Value>) -> Operand {
    compare(CompareOp::Le, value)
}

/// Greater-than operand (`>`).
pub fn gt(value: impl Into<Value>) -> Operand {
    compare(CompareOp::Gt, value)
}

/// Greater-than-or-equal operand (`>=`).
pub fn ge(value: impl Into<Value>) -> Operand {
    compare(CompareOp::Ge, value)
}

/// Comparison operand with an explicit operator.
pub fn compare(op: CompareOp, value: impl Into<Value>) -> Operand {
    Operand::Compare {
        op,
        value: value.into(),
    }
}

/// Inclusive range operand.
pub fn between(from: impl Into<Value>, to: impl Into<Value>) -> Operand {
    Operand::Between {
        from: from.into(),
        to: to.into(),
    }
}

/// `begins_with(<prop>, :<alias>)` operand.
pub fn begins_with(prefix: impl Into<Value>) -> Operand {
    func("begins_with", vec![prefix.into()])
}

/// Generic function operand with zero or more literal arguments.
pub fn func(name: impl Into<String>, args: Vec<Value>) -> Operand {
    Operand::Function {
        name: name.into(),
        args,
    }
}

impl Operand {
    /// Resolve this operand against a property name within an alias scope.
    #[must_use]
    pub fn resolve(&self, prop_name: &str, alias_name: &str) -> Expression {
        let mut names = HashMap::new();
        let path = if is_reserved(prop_name) {
            let placeholder = format!("#{alias_name}");
            names.insert(placeholder.clone(), prop_name.to_owned());
            placeholder
        } else {
            prop_name.to_owned()
        };

        match self {
            Self::Compare { op, value } => Expression {
                expression: format!("{path} {op} :{alias_name}"),
                names,
                values: HashMap::from([(format!(":{alias_name}"), to_attr(value))]),
            },
            Self::Between { from, to } => Expression {
                expression: format!("{path} between :{alias_name}_from and :{alias_name}_to"),
                names,
                values: HashMap::from([
                    (format!(":{alias_name}_from"), to_attr(from)),
                    (format!(":{alias_name}_to"), to_attr(to)),
                ]),
            },
            Self::Function { name, args } => {
                let mut args_part = String::new();
                let mut values = HashMap::new();
                if let [arg] = args.as_slice() {
                    args_part = format!(", :{alias_name}");
                    values.insert(format!(":{alias_name}"), to_attr(arg));
                } else {
                    for (arg_index, arg) in args.iter().enumerate() {
                        args_part.push_str(&format!(", :{alias_name}_{arg_index}"));
                        values.insert(format!(":{alias_name}_{arg_index}"), to_attr(arg));
                    }
                }
                Expression {
                    expression: format!("{name}({path}{args_part})"),
                    names,
                    values,
                }
            }
        }
    }

    /// The literal values this operand embeds, for key-type checking.
    #[must_use]
    pub fn literal_values(&self) -> Vec<&Value> {
        match self {
            Self::Compare { value, .. } => vec![value],
            Self::Between { from, to } => vec![from, to],
            Self::Function { args, .. } => args.iter().collect(),
        }
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        eq(value)
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        eq(value)
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        eq(value)
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        eq(value)
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        eq(value)
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        eq(value)
    }
}

impl From<bool> for Operand {
    fn from(value: bool) -> Self {
        eq(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_resolve_comparator_operand() {
        let resolved = gt(18).resolve("age", "filter_0");
        assert_eq!(resolved.expression, "age > :filter_0");
        assert!(resolved.names.is_empty());
        assert_eq!(resolved.values[":filter_0"], AttributeValue::N("18".to_owned()));
    }

    #[test]
    fn test_should_substitute_reserved_property_name() {
        let resolved = eq("wan").resolve("NAME", "filter_0");
        assert_eq!(resolved.expression, "#filter_0 = :filter_0");
        assert_eq!(resolved.names["#filter_0"], "NAME");
        assert_eq!(resolved.values[":filter_0"], AttributeValue::S("wan".to_owned()));
    }

    #[test]
    fn test_should_resolve_between_operand_with_suffixed_placeholders() {
        let resolved = between(10, 20).resolve("age", "filter_1");
        assert_eq!(
            resolved.expression,
            "age between :filter_1_from and :filter_1_to"
        );
        assert_eq!(resolved.values[":filter_1_from"], AttributeValue::N("10".to_owned()));
        assert_eq!(resolved.values[":filter_1_to"], AttributeValue::N("20".to_owned()));
    }

    #[test]
    fn test_should_resolve_begins_with_operand() {
        let resolved = begins_with("p-").resolve("sk", "rangekey");
        assert_eq!(resolved.expression, "begins_with(sk, :rangekey)");
        assert_eq!(resolved.values[":rangekey"], AttributeValue::S("p-".to_owned()));
    }

    #[test]
    fn test_should_resolve_function_operand_without_args() {
        let resolved = func("attribute_exists", vec![]).resolve("age", "filter_0");
        assert_eq!(resolved.expression, "attribute_exists(age)");
        assert!(resolved.values.is_empty());
    }

    #[test]
    fn test_should_suffix_placeholders_for_multi_arg_function() {
        let resolved = func("contains_any", vec![Value::from("a"), Value::from("b")])
            .resolve("tags", "filter_2");
        assert_eq!(
            resolved.expression,
            "contains_any(tags, :filter_2_0, :filter_2_1)"
        );
        assert_eq!(resolved.values[":filter_2_0"], AttributeValue::S("a".to_owned()));
        assert_eq!(resolved.values[":filter_2_1"], AttributeValue::S("b".to_owned()));
    }

    #[test]
    fn test_should_apply_reserved_rule_to_function_operands() {
        let resolved = begins_with("x").resolve("STATUS", "filter_0");
        assert_eq!(resolved.expression, "begins_with(#filter_0, :filter_0)");
        assert_eq!(resolved.names["#filter_0"], "STATUS");
    }
}
