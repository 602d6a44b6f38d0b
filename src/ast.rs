//! The predicate AST shared by the parser's output and, after lowering,
//! the backend-facing predicate (see `spec.md` §3 and §6).
//!
//! [`Expr`] is the pre-lowering tree: its leaves hold a variable name
//! and an un-coerced [`RawValue`]. [`crate::lower`] walks it to produce
//! a [`crate::lower::Predicate`], whose leaves hold a resolved backend
//! attribute path and a coerced [`crate::value::Value`].

use std::fmt;

/// A comparison operator, already resolved past the `=<`/`=>` aliases
/// (normalized to `Le`/`Ge` by the parser; see `SPEC_FULL.md` §4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `=`
    Eq,
    /// `!=`
    NotEq,
    /// `:`
    Contains,
    /// `!:`
    NotContains,
    /// `<`
    Lt,
    /// `<=` or `=<`
    Le,
    /// `>`
    Gt,
    /// `>=` or `=>`
    Ge,
}

impl Op {
    /// The canonical source spelling, used in error messages and
    /// `to_query_string` output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Contains => ":",
            Self::NotContains => "!:",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }

    /// Whether this operator is only legal on string-like kinds.
    #[must_use]
    pub const fn is_contains_like(self) -> bool {
        matches!(self, Self::Contains | Self::NotContains)
    }

    /// Whether this operator is an ordering comparison.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(self, Self::Lt | Self::Le | Self::Gt | Self::Ge)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A not-yet-coerced literal, carrying its exact source text so that
/// coercion can be schema-directed rather than syntax-directed (see
/// `DESIGN.md`'s note on `src/lexer/`).
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// A double-quoted string literal, already unescaped.
    Str(String),
    /// A numeric literal's exact source text (covers integer, float,
    /// and decimal target kinds).
    Number(String),
    /// A date or datetime literal's exact source text.
    Date(String),
    /// A bare identifier: either another variable's name (becoming a
    /// `FieldRef`) or, failing that, plain literal text.
    Ident(String),
    /// The `null` keyword.
    Null,
    /// A multi-valued submission against a `choice-set` variable.
    /// Only ever produced by the simple-form compiler: the advanced
    /// grammar has no multi-value literal syntax.
    ChoiceSet(Vec<String>),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) | Self::Number(s) | Self::Date(s) | Self::Ident(s) => write!(f, "{s}"),
            Self::Null => write!(f, "null"),
            Self::ChoiceSet(values) => write!(f, "{}", values.join(",")),
        }
    }
}

/// A single `variable OP value` comparison, pre-lowering.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafExpr {
    /// The variable name referenced on the LHS.
    pub variable: String,
    /// The comparison operator.
    pub op: Op,
    /// The un-coerced RHS.
    pub value: RawValue,
}

/// The predicate AST, shared between parser output and (generically)
/// the lowered backend predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Logical AND of one or more children.
    And(Vec<Expr>),
    /// Logical OR of one or more children.
    Or(Vec<Expr>),
    /// Logical negation.
    Not(Box<Expr>),
    /// A single comparison.
    Leaf(LeafExpr),
    /// The freetext OR-group the simple-form compiler builds from
    /// every `freetext = true` variable. Kept distinct from [`Expr::Or`]
    /// (rather than collapsing through [`Expr::or`]) because `spec.md`
    /// §8 requires it to always print parenthesized in
    /// `to_query_string`, even when it has a single member — the
    /// advanced grammar never produces this node.
    FreetextGroup(Vec<Expr>),
    /// The empty query / universal predicate.
    True,
}

impl Expr {
    /// Builds a leaf node.
    #[must_use]
    pub fn leaf(variable: impl Into<String>, op: Op, value: RawValue) -> Self {
        Self::Leaf(LeafExpr {
            variable: variable.into(),
            op,
            value,
        })
    }

    /// Combines a list of expressions with AND, collapsing per the
    /// normalization invariant in `spec.md` §3: `And([])` is `True`,
    /// and a singleton list is unwrapped.
    #[must_use]
    pub fn and(mut children: Vec<Expr>) -> Self {
        children.retain(|c| !matches!(c, Self::True));
        match children.len() {
            0 => Self::True,
            1 => children.into_iter().next().unwrap(),
            _ => Self::And(children),
        }
    }

    /// Combines a list of expressions with OR, with the same
    /// collapsing rules as [`Expr::and`], except an empty list stays
    /// `True` (there is nothing to disjoin, so it matches everything
    /// vacuously, consistent with an absent freetext group).
    #[must_use]
    pub fn or(children: Vec<Expr>) -> Self {
        match children.len() {
            0 => Self::True,
            1 => children.into_iter().next().unwrap(),
            _ => Self::Or(children),
        }
    }
}
