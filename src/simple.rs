//! Compiles per-field simple-form submissions into both a
//! [`Predicate`] and the [`Expr`] it corresponds to (`spec.md` §4.4).
//!
//! Unlike advanced-mode lowering, this path never fails fast: every
//! field is attempted independently, failures land in
//! [`Errors::fields`], and the remaining valid leaves still compose
//! both trees (`spec.md` §4.7). The parallel `Expr` exists so
//! [`crate::query::BoundQuery::to_query_string`] can reserialize
//! simple-mode state using the same serializer advanced mode uses.

use crate::ast::{Expr, LeafExpr, Op, RawValue};
use crate::error::Errors;
use crate::lower::{lower_leaf, resolve_choice_set_members};
use crate::request::ParamSource;
use crate::value::VariableKind;
use crate::variable::Schema;

/// Builds the simple-mode AST and predicate: an AND of per-field
/// comparisons plus, if a freetext term is present, a
/// [`Expr::FreetextGroup`] over every `freetext = true` variable.
#[must_use]
pub fn compile(params: &dyn ParamSource, schema: &Schema, freetext_key: &str) -> (Expr, Errors) {
    let mut errors = Errors::new();
    let mut exprs = Vec::new();

    for variable in schema.form_variables() {
        if variable.kind() == VariableKind::ChoiceSet {
            let Some(values) = params.get_all(variable.name()).filter(|v| !v.is_empty()) else {
                continue;
            };

            // Each submitted member is validated independently: valid
            // members still contribute to the predicate even if a
            // sibling member is unknown (`spec.md` §4.4).
            let (valid, member_errors) = resolve_choice_set_members(variable, values);
            for err in member_errors {
                errors.add_field(variable.name(), err.to_string());
            }
            if !valid.is_empty() {
                exprs.push(Expr::leaf(
                    variable.name().to_string(),
                    Op::Eq,
                    RawValue::ChoiceSet(valid),
                ));
            }
            continue;
        }

        let leaf = params.get(variable.name()).and_then(|text| {
            (!text.is_empty()).then(|| LeafExpr {
                variable: variable.name().to_string(),
                op: default_op_for_kind(variable.kind()),
                value: RawValue::Str(text.to_string()),
            })
        });

        let Some(leaf) = leaf else { continue };

        // Validate now so a field that fails to coerce contributes
        // neither to the predicate nor to the reserialized string.
        match lower_leaf(&leaf, schema) {
            Ok(_) => exprs.push(Expr::Leaf(leaf)),
            Err(err) => errors.add_field(variable.name(), err.to_string()),
        }
    }

    let per_field = Expr::and(exprs);

    let freetext_group = params
        .get(freetext_key)
        .filter(|term| !term.is_empty())
        .map(|term| build_freetext_group(term, schema))
        .unwrap_or(Expr::True);

    (Expr::and(vec![per_field, freetext_group]), errors)
}

/// `=` for numeric/boolean/date/choice kinds, `contains` (resolved to
/// case-sensitive or case-insensitive during lowering) for string
/// kinds, per `spec.md` §4.4.
fn default_op_for_kind(kind: VariableKind) -> Op {
    if kind.is_string_like() {
        Op::Contains
    } else {
        Op::Eq
    }
}

fn build_freetext_group(term: &str, schema: &Schema) -> Expr {
    let leaves: Vec<Expr> = schema
        .freetext_variables()
        .map(|variable| {
            Expr::leaf(
                variable.name().to_string(),
                Op::Contains,
                RawValue::Str(term.to_string()),
            )
        })
        .collect();
    if leaves.is_empty() {
        Expr::True
    } else {
        Expr::FreetextGroup(leaves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lower::{lower, BackendOp, Predicate, PredicateLeaf};
    use crate::request::RequestParams;
    use crate::value::Value;
    use crate::variable::Variable;

    fn schema() -> Schema {
        Schema::from_variables([
            Variable::string("foo_name").freetext(true),
            Variable::case_sensitive_string("bar_name").freetext(true),
            Variable::string("baz_name"),
            Variable::integer("count"),
        ])
    }

    fn predicate_of(expr: &Expr, schema: &Schema) -> Predicate {
        lower(expr, schema).unwrap()
    }

    #[test]
    fn test_empty_request_is_true() {
        let (expr, errors) = compile(&RequestParams::new(), &schema(), "term");
        assert_eq!(expr, Expr::True);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_string_field_defaults_to_contains() {
        let params = RequestParams::new().query("baz_name", "hello");
        let (expr, errors) = compile(&params, &schema(), "term");
        assert!(errors.is_empty());
        match predicate_of(&expr, &schema()) {
            Predicate::Leaf(PredicateLeaf { op, .. }) => assert_eq!(op, BackendOp::Icontains),
            other => panic!("expected Leaf, got {other:?}"),
        }
    }

    #[test]
    fn test_numeric_field_defaults_to_eq() {
        let params = RequestParams::new().query("count", "3");
        let (expr, errors) = compile(&params, &schema(), "term");
        assert!(errors.is_empty());
        match predicate_of(&expr, &schema()) {
            Predicate::Leaf(PredicateLeaf { op, value, .. }) => {
                assert_eq!(op, BackendOp::Eq);
                assert_eq!(value, Value::Int(3));
            }
            other => panic!("expected Leaf, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_field_value_is_lenient() {
        let params = RequestParams::new().query("count", "not-a-number");
        let (expr, errors) = compile(&params, &schema(), "term");
        assert_eq!(expr, Expr::True);
        assert!(!errors.is_empty());
        assert!(errors.fields.contains_key("count"));
    }

    #[test]
    fn test_freetext_combined_with_field() {
        let params = RequestParams::new()
            .query("baz_name", "exact")
            .query("term", "hello");
        let (expr, errors) = compile(&params, &schema(), "term");
        assert!(errors.is_empty());
        match expr {
            Expr::And(children) => {
                assert_eq!(children.len(), 2);
                assert!(matches!(children[1], Expr::FreetextGroup(_)));
            }
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn test_freetext_alone_is_freetext_group() {
        let params = RequestParams::new().query("term", "hello");
        let (expr, errors) = compile(&params, &schema(), "term");
        assert!(errors.is_empty());
        assert!(matches!(expr, Expr::FreetextGroup(_)));
    }

    #[test]
    fn test_freetext_group_keeps_single_member_unwrapped_form() {
        // Only one freetext variable declared but the group must stay
        // a FreetextGroup, not collapse to a bare Leaf, because it
        // always prints parenthesized.
        let schema = Schema::from_variables([Variable::string("foo_name").freetext(true)]);
        let params = RequestParams::new().query("term", "hi");
        let (expr, _) = compile(&params, &schema, "term");
        assert!(matches!(expr, Expr::FreetextGroup(_)));
    }
}
