//! Orchestration: mode selection, binding a request to a schema, and
//! the public surface (`to_predicate`, `to_query_string`, `parse`) a
//! host application calls (`spec.md` §4.6).

use crate::ast::{Expr, RawValue};
use crate::error::{Errors, QueryError};
use crate::lower::{lower, Predicate};
use crate::parser::Parser;
use crate::request::ParamSource;
use crate::simple;
use crate::value::VariableKind;
use crate::variable::Schema;

/// The reserved parameter name carrying the advanced query text,
/// unless overridden with [`BoundQuery::bind_with_keys`].
pub const DEFAULT_ADVANCED_QUERY_KEY: &str = "query";
/// The reserved parameter name carrying the freetext term, unless
/// overridden with [`BoundQuery::bind_with_keys`].
pub const DEFAULT_FREETEXT_KEY: &str = "term";

/// Parses `text` as an advanced query, independent of any schema or
/// request.
///
/// # Errors
///
/// Returns [`QueryError::SyntaxError`] if `text` is not well-formed.
pub fn parse(text: &str) -> Result<Expr, QueryError> {
    Parser::new(text)
        .parse()
        .map_err(|err| QueryError::SyntaxError {
            position: err.span.start,
        })
}

/// A query bound against a [`Schema`] and a concrete set of request
/// parameters: the result of mode selection, parsing/compiling, and
/// lowering, held together for the caller to inspect or execute.
#[derive(Debug, Clone)]
pub struct BoundQuery {
    expr: Expr,
    predicate: Predicate,
    errors: Errors,
}

impl BoundQuery {
    /// Binds `params` against `schema` using the default reserved
    /// parameter names (`query`, `term`).
    #[must_use]
    pub fn bind(params: &dyn ParamSource, schema: &Schema) -> Self {
        Self::bind_with_keys(params, schema, DEFAULT_ADVANCED_QUERY_KEY, DEFAULT_FREETEXT_KEY)
    }

    /// Binds `params` against `schema`, choosing advanced mode when
    /// `advanced_key` is present and non-empty, else simple mode
    /// (`spec.md` §4.6's mode selection rule).
    #[must_use]
    pub fn bind_with_keys(
        params: &dyn ParamSource,
        schema: &Schema,
        advanced_key: &str,
        freetext_key: &str,
    ) -> Self {
        match params.get(advanced_key) {
            Some(text) if !text.is_empty() => Self::from_advanced_text(text, schema),
            _ => Self::from_simple_request(params, schema, freetext_key),
        }
    }

    /// Binds directly from advanced query-language source text,
    /// bypassing request/mode selection.
    #[must_use]
    pub fn from_advanced_text(text: &str, schema: &Schema) -> Self {
        let mut errors = Errors::new();
        let (expr, predicate) = match parse(text).and_then(|expr| {
            let predicate = lower(&expr, schema)?;
            Ok((expr, predicate))
        }) {
            Ok((expr, predicate)) => (expr, predicate),
            Err(err) => {
                errors.add_global(err.to_string());
                (Expr::True, Predicate::True)
            }
        };
        Self {
            expr,
            predicate,
            errors,
        }
    }

    fn from_simple_request(params: &dyn ParamSource, schema: &Schema, freetext_key: &str) -> Self {
        let (expr, errors) = simple::compile(params, schema, freetext_key);
        // Every leaf `compile` produced already passed `lower_leaf`
        // successfully, so lowering the assembled tree cannot fail.
        let predicate = lower(&expr, schema).unwrap_or(Predicate::True);
        Self {
            expr,
            predicate,
            errors,
        }
    }

    /// The backend-agnostic predicate for this query. `Predicate::True`
    /// when binding failed outright (see [`BoundQuery::errors`]).
    #[must_use]
    pub const fn to_predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Accumulated errors: a single `global` entry for an advanced-mode
    /// failure, or zero or more `fields` entries for simple-mode
    /// per-field coercion failures.
    #[must_use]
    pub const fn errors(&self) -> &Errors {
        &self.errors
    }

    /// Canonical reserialization of the current state into the
    /// advanced-query syntax: quoting string values and escaping `"`
    /// as `\"` (`spec.md` §4.6).
    #[must_use]
    pub fn to_query_string(&self, schema: &Schema) -> String {
        serialize(&self.expr, schema)
    }
}

fn serialize(expr: &Expr, schema: &Schema) -> String {
    match expr {
        Expr::True => String::new(),
        Expr::Leaf(leaf) => format!(
            "{}{}{}",
            leaf.variable,
            leaf.op,
            format_rhs(&leaf.value, &leaf.variable, schema)
        ),
        Expr::Not(inner) => format!("not {}", serialize_not_operand(inner, schema)),
        Expr::And(children) => children
            .iter()
            .map(|c| serialize_and_operand(c, schema))
            .collect::<Vec<_>>()
            .join(" and "),
        Expr::Or(children) => children
            .iter()
            .map(|c| serialize(c, schema))
            .collect::<Vec<_>>()
            .join(" or "),
        Expr::FreetextGroup(children) => format!(
            "({})",
            children
                .iter()
                .map(|c| serialize(c, schema))
                .collect::<Vec<_>>()
                .join(" or ")
        ),
    }
}

/// An `Or`/`FreetextGroup` child of an `And` needs parens: `or` binds
/// looser than `and`, so without them the reparsed meaning would
/// change.
fn serialize_and_operand(expr: &Expr, schema: &Schema) -> String {
    match expr {
        Expr::Or(_) => format!("({})", serialize(expr, schema)),
        _ => serialize(expr, schema),
    }
}

fn serialize_not_operand(expr: &Expr, schema: &Schema) -> String {
    match expr {
        Expr::And(_) | Expr::Or(_) => format!("({})", serialize(expr, schema)),
        _ => serialize(expr, schema),
    }
}

fn format_rhs(value: &RawValue, variable: &str, schema: &Schema) -> String {
    match value {
        RawValue::Null => "null".to_string(),
        RawValue::Number(text) | RawValue::Date(text) => text.clone(),
        RawValue::Ident(text) => {
            if schema.contains(text) {
                text.clone()
            } else {
                format_bare_or_quoted(text, variable, schema)
            }
        }
        RawValue::Str(text) => format!("\"{}\"", escape_quotes(text)),
        RawValue::ChoiceSet(values) => format!("\"{}\"", escape_quotes(&values.join(","))),
    }
}

fn format_bare_or_quoted(text: &str, variable: &str, schema: &Schema) -> String {
    let needs_quotes = schema.get(variable).map_or(true, |v| {
        v.kind().is_string_like() || matches!(v.kind(), VariableKind::Choice)
    });
    if needs_quotes {
        format!("\"{}\"", escape_quotes(text))
    } else {
        text.to_string()
    }
}

fn escape_quotes(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
