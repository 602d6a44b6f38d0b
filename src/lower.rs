//! Lowering the pre-lowering [`Expr`] tree into a backend-agnostic
//! [`Predicate`], plus the [`BackendAdapter`] trait backends implement
//! to translate a `Predicate` into their own native form.
//!
//! See `spec.md` §4.5 (lowering rules) and §6 (`BackendOp`).

use std::collections::HashMap;

use crate::ast::{Expr, LeafExpr, Op, RawValue};
use crate::error::QueryError;
use crate::value::{coerce_literal_text, Value, VariableKind};
use crate::variable::{Candidate, Schema, Variable};

/// A backend comparison operator, exactly the set `spec.md` §6 lists.
/// Negations that have no direct counterpart here (`!:`) lower as a
/// generic [`Predicate::Not`] wrapping the positive leaf instead of
/// growing this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendOp {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    Contains,
    Icontains,
    In,
}

/// A single lowered comparison: a resolved backend attribute path, an
/// operator, a coerced value, and whether the comparison is
/// case-sensitive (the sibling field that stands in for the `eq`/`ieq`
/// distinction `BackendOp` itself does not carry).
#[derive(Debug, Clone, PartialEq)]
pub struct PredicateLeaf {
    /// The backend attribute path (`Variable::attr_path`).
    pub attr: String,
    /// The comparison operator.
    pub op: BackendOp,
    /// The coerced right-hand side.
    pub value: Value,
    /// Whether string comparison should respect case.
    pub case_sensitive: bool,
}

/// The backend-agnostic predicate tree produced by lowering.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
    Leaf(PredicateLeaf),
    /// The universal predicate (an empty query, or a dropped
    /// decorative-variable leaf).
    True,
}

impl Predicate {
    fn and(mut children: Vec<Predicate>) -> Self {
        children.retain(|c| !matches!(c, Self::True));
        match children.len() {
            0 => Self::True,
            1 => children.into_iter().next().unwrap(),
            _ => Self::And(children),
        }
    }

    fn or(children: Vec<Predicate>) -> Self {
        match children.len() {
            0 => Self::True,
            1 => children.into_iter().next().unwrap(),
            _ => Self::Or(children),
        }
    }
}

/// Translates an advanced-mode [`Expr`] into a [`Predicate`], failing
/// fast on the first error (advanced mode has no per-field error
/// accumulation; see `spec.md` §4.7).
///
/// # Errors
///
/// Returns the first [`QueryError`] encountered walking the tree.
pub fn lower(expr: &Expr, schema: &Schema) -> Result<Predicate, QueryError> {
    match expr {
        Expr::True => Ok(Predicate::True),
        Expr::And(children) => Ok(Predicate::and(
            children
                .iter()
                .map(|c| lower(c, schema))
                .collect::<Result<_, _>>()?,
        )),
        Expr::Or(children) | Expr::FreetextGroup(children) => Ok(Predicate::or(
            children
                .iter()
                .map(|c| lower(c, schema))
                .collect::<Result<_, _>>()?,
        )),
        Expr::Not(inner) => Ok(Predicate::Not(Box::new(lower(inner, schema)?))),
        Expr::Leaf(leaf) => lower_leaf(leaf, schema),
    }
}

/// Lowers a single leaf. Exposed so `crate::simple` can lower one
/// field at a time and accumulate per-field errors instead of failing
/// fast.
///
/// # Errors
///
/// Returns [`QueryError::UnknownVariable`], [`QueryError::UnknownOperator`],
/// [`QueryError::UnknownValue`], [`QueryError::MissingLookupKey`], or a
/// coercion [`QueryError::BadLiteral`].
pub fn lower_leaf(leaf: &LeafExpr, schema: &Schema) -> Result<Predicate, QueryError> {
    let variable = schema
        .get(&leaf.variable)
        .ok_or_else(|| QueryError::UnknownVariable {
            name: leaf.variable.clone(),
        })?;

    if !variable.allows_op(leaf.op) {
        return Err(QueryError::UnknownOperator {
            op: leaf.op.as_str().to_string(),
            variable: leaf.variable.clone(),
        });
    }

    // A decorative variable (no backend attribute) never contributes
    // to the predicate.
    let Some(attr) = variable.attr_path() else {
        return Ok(Predicate::True);
    };

    let value = resolve_rhs(variable, schema, &leaf.value)?;

    // A choice-set submission always lowers to `IN`, regardless of
    // the surface operator (the simple-form compiler only ever emits
    // `=` for it; there is no advanced-query choice-set literal).
    if matches!(value, Value::ChoiceSet(_)) {
        return Ok(Predicate::Leaf(PredicateLeaf {
            attr: attr.to_string(),
            op: BackendOp::In,
            value,
            case_sensitive: variable.is_case_sensitive(),
        }));
    }

    let (op, leaf_predicate) = backend_op_for(leaf.op, variable.is_case_sensitive());
    let predicate = Predicate::Leaf(PredicateLeaf {
        attr: attr.to_string(),
        op,
        value,
        case_sensitive: variable.is_case_sensitive(),
    });

    Ok(if leaf_predicate.negate {
        Predicate::Not(Box::new(predicate))
    } else {
        predicate
    })
}

struct OpTranslation {
    negate: bool,
}

/// Maps an AST [`Op`] to a [`BackendOp`], choosing the case-sensitive
/// or case-insensitive `contains` variant up front since `BackendOp`
/// has no sibling-flag equivalent there the way `Eq` does. `!:` has no
/// direct backend counterpart, so it negates a positive `contains`.
fn backend_op_for(op: Op, case_sensitive: bool) -> (BackendOp, OpTranslation) {
    match op {
        Op::Eq => (BackendOp::Eq, OpTranslation { negate: false }),
        Op::NotEq => (BackendOp::Neq, OpTranslation { negate: false }),
        Op::Contains => (
            if case_sensitive {
                BackendOp::Contains
            } else {
                BackendOp::Icontains
            },
            OpTranslation { negate: false },
        ),
        Op::NotContains => (
            if case_sensitive {
                BackendOp::Contains
            } else {
                BackendOp::Icontains
            },
            OpTranslation { negate: true },
        ),
        Op::Lt => (BackendOp::Lt, OpTranslation { negate: false }),
        Op::Le => (BackendOp::Lte, OpTranslation { negate: false }),
        Op::Gt => (BackendOp::Gt, OpTranslation { negate: false }),
        Op::Ge => (BackendOp::Gte, OpTranslation { negate: false }),
    }
}

fn resolve_rhs(variable: &Variable, schema: &Schema, raw: &RawValue) -> Result<Value, QueryError> {
    // A bare identifier naming another declared variable becomes a
    // self-reference; otherwise it falls through to ordinary
    // per-kind coercion like any other literal (spec.md §4.3).
    if let RawValue::Ident(name) = raw {
        if schema.contains(name) {
            return Ok(Value::FieldRef(name.clone()));
        }
    }

    if matches!(raw, RawValue::Null) {
        return Ok(Value::Null);
    }

    if let RawValue::ChoiceSet(values) = raw {
        return resolve_choice_set(variable, values);
    }

    match variable.kind() {
        VariableKind::Choice | VariableKind::ChoiceSet => resolve_choice_like(variable, raw),
        VariableKind::Reference => resolve_reference(variable, raw),
        _ => coerce_literal_text(variable.kind(), &raw.to_string()),
    }
}

/// Resolves a multi-valued `choice-set` submission, failing fast on
/// the first invalid member. Only reached from the generic lowering
/// path (`lower`/`lower_leaf`), where the `RawValue::ChoiceSet` in
/// play has already been trimmed to known-good members by
/// [`crate::simple::compile`]'s element-by-element validation; a
/// failure here means the caller handed lowering an un-vetted list.
fn resolve_choice_set(variable: &Variable, values: &[String]) -> Result<Value, QueryError> {
    let (valid, mut errors) = resolve_choice_set_members(variable, values);
    if !errors.is_empty() {
        return Err(errors.remove(0));
    }
    Ok(Value::ChoiceSet(valid))
}

/// Resolves a `choice-set` submission element-by-element: each member
/// is checked independently against the declared universe, members
/// that validate are kept, and one error is accumulated per invalid
/// member (`SPEC_FULL.md` §4.4). The caller decides what to do with a
/// partial result — [`crate::simple::compile`] keeps the valid subset
/// and surfaces the rest as field errors.
pub(crate) fn resolve_choice_set_members(
    variable: &Variable,
    values: &[String],
) -> (Vec<String>, Vec<QueryError>) {
    let Some(choices) = variable.choices() else {
        return (
            Vec::new(),
            vec![QueryError::MissingLookupKey {
                message: format!(
                    "variable \"{}\" declares no choices to resolve against; set them or call \
                     .value_lookup_key(\"{}\") if this was meant to look candidates up by a \
                     different attribute",
                    variable.name(),
                    variable.value_lookup_key()
                ),
            }],
        );
    };

    let mut resolved = Vec::with_capacity(values.len());
    let mut errors = Vec::new();
    for value in values {
        if choices.iter().any(|c| c == value) {
            resolved.push(value.clone());
        } else {
            errors.push(QueryError::UnknownValue {
                value: value.clone(),
                variable: variable.name().to_string(),
            });
        }
    }
    (resolved, errors)
}

fn resolve_choice_like(variable: &Variable, raw: &RawValue) -> Result<Value, QueryError> {
    let text = raw.to_string();
    if text.eq_ignore_ascii_case("null") {
        return Ok(Value::Null);
    }

    let Some(choices) = variable.choices() else {
        return Err(QueryError::MissingLookupKey {
            message: format!(
                "variable \"{}\" declares no choices to resolve against; set them or call \
                 .value_lookup_key(\"{}\") if this was meant to look candidates up by a \
                 different attribute",
                variable.name(),
                variable.value_lookup_key()
            ),
        });
    };

    if choices.iter().any(|c| c == &text) {
        Ok(Value::ChoiceRef(text))
    } else {
        Err(QueryError::UnknownValue {
            value: text,
            variable: variable.name().to_string(),
        })
    }
}

/// Resolves a `reference` token by matching `value_lookup_key`'s
/// attribute on each declared candidate (`spec.md` §4.3/§9). Raises
/// `MissingLookupKey` — naming the attributes the candidates actually
/// carry — when none of them have the looked-up attribute at all;
/// raises `UnknownValue` when the attribute exists but no candidate's
/// value matches the token.
fn resolve_reference(variable: &Variable, raw: &RawValue) -> Result<Value, QueryError> {
    let text = raw.to_string();
    if text.eq_ignore_ascii_case("null") {
        return Ok(Value::Null);
    }

    let Some(candidates) = variable.candidates() else {
        return Err(QueryError::MissingLookupKey {
            message: format!(
                "variable \"{}\" declares no candidates to resolve against; set them via \
                 `Variable::reference` or call .value_lookup_key(\"{}\") if this was meant to \
                 look candidates up by a different attribute",
                variable.name(),
                variable.value_lookup_key()
            ),
        });
    };

    let key = variable.value_lookup_key();
    let mut saw_lookup_key = false;
    for candidate in candidates {
        if let Some(value) = candidate.attribute(key) {
            saw_lookup_key = true;
            if value == text {
                return Ok(Value::ChoiceRef(text));
            }
        }
    }

    if saw_lookup_key {
        return Err(QueryError::UnknownValue {
            value: text,
            variable: variable.name().to_string(),
        });
    }

    let mut alternatives: Vec<&str> = candidates
        .iter()
        .flat_map(Candidate::attribute_names)
        .collect();
    alternatives.sort_unstable();
    alternatives.dedup();

    Err(QueryError::MissingLookupKey {
        message: if alternatives.is_empty() {
            format!(
                "variable \"{}\"'s candidates have no attributes at all; cannot look up by \
                 \"{key}\"",
                variable.name()
            )
        } else {
            format!(
                "variable \"{}\"'s candidates have no \"{key}\" attribute. Maybe one of [{}]?",
                variable.name(),
                alternatives.join(", ")
            )
        },
    })
}

/// Implemented by each storage backend to translate a lowered
/// [`Predicate`] into its own native query form (a SQL `WHERE`
/// fragment, an in-memory filter closure, ...). One small trait, one
/// translation entry point, with the rest of the backend's specifics
/// left to the implementor.
pub trait BackendAdapter {
    /// The backend-native representation a predicate translates to.
    type Output;

    /// Translates a predicate into this backend's native form.
    fn translate(&self, predicate: &Predicate) -> Self::Output;
}

/// An in-memory adapter evaluating a predicate against a single row
/// of named values, used by this crate's own tests and suitable as a
/// reference implementation for consumers without a real backend yet.
#[derive(Debug, Default)]
pub struct InMemoryAdapter;

impl InMemoryAdapter {
    /// Evaluates `predicate` against `row`.
    #[must_use]
    pub fn matches(&self, predicate: &Predicate, row: &HashMap<String, Value>) -> bool {
        match predicate {
            Predicate::True => true,
            Predicate::And(children) => children.iter().all(|c| self.matches(c, row)),
            Predicate::Or(children) => children.iter().any(|c| self.matches(c, row)),
            Predicate::Not(inner) => !self.matches(inner, row),
            Predicate::Leaf(leaf) => Self::eval_leaf(leaf, row),
        }
    }

    fn eval_leaf(leaf: &PredicateLeaf, row: &HashMap<String, Value>) -> bool {
        let Some(actual) = row.get(&leaf.attr) else {
            return false;
        };
        match leaf.op {
            BackendOp::Eq => values_eq(actual, &leaf.value, leaf.case_sensitive),
            BackendOp::Neq => !values_eq(actual, &leaf.value, leaf.case_sensitive),
            BackendOp::Contains => string_contains(actual, &leaf.value, true),
            BackendOp::Icontains => string_contains(actual, &leaf.value, false),
            BackendOp::Lt | BackendOp::Lte | BackendOp::Gt | BackendOp::Gte => {
                compare_ordered(actual, &leaf.value, leaf.op)
            }
            BackendOp::In => value_in_set(actual, &leaf.value),
        }
    }
}

fn value_in_set(actual: &Value, set: &Value) -> bool {
    let Value::ChoiceSet(members) = set else {
        return false;
    };
    match actual {
        Value::ChoiceRef(identity) => members.iter().any(|m| m == identity),
        Value::Str { value, .. } => members.iter().any(|m| m == value),
        _ => false,
    }
}

fn values_eq(a: &Value, b: &Value, case_sensitive: bool) -> bool {
    match (a, b) {
        (Value::Str { value: av, .. }, Value::Str { value: bv, .. }) => {
            if case_sensitive {
                av == bv
            } else {
                av.eq_ignore_ascii_case(bv)
            }
        }
        _ => a == b,
    }
}

fn string_contains(actual: &Value, needle: &Value, case_sensitive: bool) -> bool {
    let (Value::Str { value: haystack, .. }, Value::Str { value: needle, .. }) = (actual, needle)
    else {
        return false;
    };
    if case_sensitive {
        haystack.contains(needle.as_str())
    } else {
        haystack
            .to_ascii_lowercase()
            .contains(&needle.to_ascii_lowercase())
    }
}

fn compare_ordered(actual: &Value, other: &Value, op: BackendOp) -> bool {
    use std::cmp::Ordering;

    let ordering = match (actual, other) {
        (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::Decimal(a), Value::Decimal(b)) => a.partial_cmp(b),
        (Value::Date(a), Value::Date(b)) => a.partial_cmp(b),
        (Value::DateTime(a), Value::DateTime(b)) => a.partial_cmp(b),
        (Value::Str { value: a, .. }, Value::Str { value: b, .. }) => a.partial_cmp(b),
        _ => None,
    };

    let Some(ordering) = ordering else {
        return false;
    };

    match op {
        BackendOp::Lt => ordering == Ordering::Less,
        BackendOp::Lte => ordering != Ordering::Greater,
        BackendOp::Gt => ordering == Ordering::Greater,
        BackendOp::Gte => ordering != Ordering::Less,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::RawValue;

    fn schema() -> Schema {
        Schema::from_variables([
            Variable::string("foo_name").freetext(true),
            Variable::case_sensitive_string("bar_name").freetext(true),
            Variable::string("baz_name"),
            Variable::integer("count"),
            Variable::boolean("active"),
            Variable::choice("status", vec!["open".to_string(), "closed".to_string()]),
            Variable::string("decorative").no_attr(),
        ])
    }

    fn row(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_unknown_variable() {
        let leaf = LeafExpr {
            variable: "not_bazaar".to_string(),
            op: Op::Eq,
            value: RawValue::Str("x".to_string()),
        };
        let err = lower_leaf(&leaf, &schema()).unwrap_err();
        assert_eq!(err.to_string(), "Unknown variable \"not_bazaar\"");
    }

    #[test]
    fn test_unknown_operator() {
        let leaf = LeafExpr {
            variable: "active".to_string(),
            op: Op::Lt,
            value: RawValue::Str("x".to_string()),
        };
        let err = lower_leaf(&leaf, &schema()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid operator \"<\" for variable \"active\""
        );
    }

    #[test]
    fn test_decorative_variable_drops_leaf() {
        let leaf = LeafExpr {
            variable: "decorative".to_string(),
            op: Op::Eq,
            value: RawValue::Str("x".to_string()),
        };
        assert_eq!(lower_leaf(&leaf, &schema()).unwrap(), Predicate::True);
    }

    #[test]
    fn test_choice_resolves_known_value() {
        let leaf = LeafExpr {
            variable: "status".to_string(),
            op: Op::Eq,
            value: RawValue::Ident("open".to_string()),
        };
        let predicate = lower_leaf(&leaf, &schema()).unwrap();
        assert_eq!(
            predicate,
            Predicate::Leaf(PredicateLeaf {
                attr: "status".to_string(),
                op: BackendOp::Eq,
                value: Value::ChoiceRef("open".to_string()),
                case_sensitive: false,
            })
        );
    }

    #[test]
    fn test_choice_unknown_value() {
        let leaf = LeafExpr {
            variable: "status".to_string(),
            op: Op::Eq,
            value: RawValue::Str("asd".to_string()),
        };
        let err = lower_leaf(&leaf, &schema()).unwrap_err();
        assert_eq!(err.to_string(), "Unknown value \"asd\" for variable \"status\"");
    }

    #[test]
    fn test_choice_quoted_null_becomes_null() {
        // even a quoted "null" string resolves to Value::Null, per
        // the choice-queryset behavior this is grounded on.
        let leaf = LeafExpr {
            variable: "status".to_string(),
            op: Op::Eq,
            value: RawValue::Str("null".to_string()),
        };
        assert_eq!(
            lower_leaf(&leaf, &schema()).unwrap(),
            Predicate::Leaf(PredicateLeaf {
                attr: "status".to_string(),
                op: BackendOp::Eq,
                value: Value::Null,
                case_sensitive: false,
            })
        );
    }

    #[test]
    fn test_self_reference_field_ref() {
        let leaf = LeafExpr {
            variable: "foo_name".to_string(),
            op: Op::Eq,
            value: RawValue::Ident("bar_name".to_string()),
        };
        assert_eq!(
            lower_leaf(&leaf, &schema()).unwrap(),
            Predicate::Leaf(PredicateLeaf {
                attr: "foo_name".to_string(),
                op: BackendOp::Eq,
                value: Value::FieldRef("bar_name".to_string()),
                case_sensitive: false,
            })
        );
    }

    #[test]
    fn test_not_contains_negates_generic() {
        let leaf = LeafExpr {
            variable: "foo_name".to_string(),
            op: Op::NotContains,
            value: RawValue::Str("x".to_string()),
        };
        let predicate = lower_leaf(&leaf, &schema()).unwrap();
        assert!(matches!(predicate, Predicate::Not(_)));
    }

    #[test]
    fn test_and_or_lowering() {
        let expr = Expr::and(vec![
            Expr::leaf("count", Op::Gt, RawValue::Number("1".to_string())),
            Expr::or(vec![
                Expr::leaf("active", Op::Eq, RawValue::Ident("true".to_string())),
                Expr::leaf("active", Op::Eq, RawValue::Ident("false".to_string())),
            ]),
        ]);
        let predicate = lower(&expr, &schema()).unwrap();
        match predicate {
            Predicate::And(children) => {
                assert_eq!(children.len(), 2);
                assert!(matches!(children[1], Predicate::Or(_)));
            }
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn test_in_memory_adapter_eq() {
        let predicate = lower(
            &Expr::leaf("count", Op::Gte, RawValue::Number("2".to_string())),
            &schema(),
        )
        .unwrap();
        let adapter = InMemoryAdapter;
        assert!(adapter.matches(&predicate, &row(&[("count", Value::Int(3))])));
        assert!(!adapter.matches(&predicate, &row(&[("count", Value::Int(1))])));
    }

    #[test]
    fn test_choice_set_lowers_to_in() {
        let schema = Schema::from_variables([Variable::choice_set(
            "tags",
            vec!["red".to_string(), "blue".to_string()],
        )]);
        let leaf = LeafExpr {
            variable: "tags".to_string(),
            op: Op::Eq,
            value: RawValue::ChoiceSet(vec!["red".to_string(), "blue".to_string()]),
        };
        let predicate = lower_leaf(&leaf, &schema).unwrap();
        match predicate {
            Predicate::Leaf(PredicateLeaf { op, value, .. }) => {
                assert_eq!(op, BackendOp::In);
                assert_eq!(
                    value,
                    Value::ChoiceSet(vec!["red".to_string(), "blue".to_string()])
                );
            }
            other => panic!("expected Leaf, got {other:?}"),
        }
    }

    #[test]
    fn test_choice_set_rejects_unknown_member() {
        let schema = Schema::from_variables([Variable::choice_set(
            "tags",
            vec!["red".to_string()],
        )]);
        let leaf = LeafExpr {
            variable: "tags".to_string(),
            op: Op::Eq,
            value: RawValue::ChoiceSet(vec!["green".to_string()]),
        };
        let err = lower_leaf(&leaf, &schema).unwrap_err();
        assert_eq!(err.to_string(), "Unknown value \"green\" for variable \"tags\"");
    }

    #[test]
    fn test_choice_set_members_keeps_valid_and_reports_invalid() {
        let variable = Variable::choice_set("tags", vec!["red".to_string(), "blue".to_string()]);
        let (valid, errors) = resolve_choice_set_members(
            &variable,
            &["red".to_string(), "green".to_string()],
        );
        assert_eq!(valid, vec!["red".to_string()]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "Unknown value \"green\" for variable \"tags\"");
    }

    #[test]
    fn test_reference_resolves_by_lookup_key() {
        let variable = Variable::reference(
            "owner",
            vec![Candidate::new([(
                "slug".to_string(),
                "alice".to_string(),
            )])],
        )
        .value_lookup_key("slug");
        let leaf = LeafExpr {
            variable: "owner".to_string(),
            op: Op::Eq,
            value: RawValue::Str("alice".to_string()),
        };
        let schema = Schema::from_variables([variable]);
        let predicate = lower_leaf(&leaf, &schema).unwrap();
        match predicate {
            Predicate::Leaf(PredicateLeaf { value, .. }) => {
                assert_eq!(value, Value::ChoiceRef("alice".to_string()));
            }
            other => panic!("expected Leaf, got {other:?}"),
        }
    }

    #[test]
    fn test_reference_missing_lookup_key_names_actual_attributes() {
        let variable = Variable::reference(
            "owner",
            vec![Candidate::new([(
                "slug".to_string(),
                "alice".to_string(),
            )])],
        )
        .value_lookup_key("username");
        let schema = Schema::from_variables([variable]);
        let leaf = LeafExpr {
            variable: "owner".to_string(),
            op: Op::Eq,
            value: RawValue::Str("alice".to_string()),
        };
        let err = lower_leaf(&leaf, &schema).unwrap_err();
        assert!(err.to_string().contains("slug"));
    }

    #[test]
    fn test_in_memory_adapter_case_insensitive_contains() {
        let predicate = lower(
            &Expr::leaf("foo_name", Op::Contains, RawValue::Str("OO".to_string())),
            &schema(),
        )
        .unwrap();
        let adapter = InMemoryAdapter;
        assert!(adapter.matches(&predicate, &row(&[("foo_name", Value::str("foobar"))])));
    }
}
