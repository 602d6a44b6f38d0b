//! Declared query variables and the schema they form together.
//!
//! See `spec.md` §5. A [`Variable`] is an immutable field descriptor;
//! a [`Schema`] is the ordered, named collection a query is bound
//! against.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::ast::Op;
use crate::value::VariableKind;

/// A record a `reference` variable resolves a textual token against,
/// keyed by named attributes. This is the concrete stand-in for
/// `spec.md` §9's `fn(record) -> string` resolver abstraction: rather
/// than reflecting on an arbitrary host type, a `reference` variable
/// carries its own small, explicit universe of these.
#[derive(Debug, Clone, Default)]
pub struct Candidate {
    attributes: HashMap<String, String>,
}

impl Candidate {
    /// Builds a candidate from an attribute name/value list.
    #[must_use]
    pub fn new(attributes: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            attributes: attributes.into_iter().collect(),
        }
    }

    /// A candidate carrying only the default `"name"` attribute —
    /// covers the common case where the reference universe is just a
    /// list of display names.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::new([("name".to_string(), name.into())])
    }

    /// The value of `key` on this candidate, if it has one.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// The attribute names declared on this candidate, for building a
    /// "maybe one of [...]" suggestion when a lookup key is missing.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }
}

/// A declared field a query can reference.
///
/// Built with the same builder-plus-`#[must_use]`-setters shape as
/// `oxide-admin`'s list-view filters: construct with a kind-specific
/// shortcut, then chain setters for anything non-default.
#[derive(Debug, Clone)]
pub struct Variable {
    name: String,
    attr: Option<String>,
    has_attr: bool,
    kind: VariableKind,
    case_sensitive: bool,
    freetext: bool,
    choices: Option<Vec<String>>,
    candidates: Option<Vec<Candidate>>,
    value_lookup_key: Option<String>,
    form_included: bool,
}

impl Variable {
    fn new(name: impl Into<String>, kind: VariableKind) -> Self {
        let case_sensitive = kind.default_case_sensitive();
        Self {
            name: name.into(),
            attr: None,
            has_attr: true,
            kind,
            case_sensitive,
            freetext: false,
            choices: None,
            candidates: None,
            value_lookup_key: None,
            form_included: true,
        }
    }

    /// A case-insensitive string field.
    #[must_use]
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, VariableKind::String)
    }

    /// A string field whose primary operator is expected to be `:`/`!:`.
    #[must_use]
    pub fn substring(name: impl Into<String>) -> Self {
        Self::new(name, VariableKind::Substring)
    }

    /// A case-sensitive string field.
    #[must_use]
    pub fn case_sensitive_string(name: impl Into<String>) -> Self {
        Self::new(name, VariableKind::CaseSensitiveString)
    }

    /// A signed integer field.
    #[must_use]
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, VariableKind::Integer)
    }

    /// A floating point field.
    #[must_use]
    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, VariableKind::Float)
    }

    /// A decimal field.
    #[must_use]
    pub fn decimal(name: impl Into<String>) -> Self {
        Self::new(name, VariableKind::Decimal)
    }

    /// A boolean field.
    #[must_use]
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, VariableKind::Boolean)
    }

    /// A calendar date field.
    #[must_use]
    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, VariableKind::Date)
    }

    /// A calendar date-and-time field.
    #[must_use]
    pub fn datetime(name: impl Into<String>) -> Self {
        Self::new(name, VariableKind::DateTime)
    }

    /// A string field validated to contain `@`.
    #[must_use]
    pub fn email(name: impl Into<String>) -> Self {
        Self::new(name, VariableKind::Email)
    }

    /// A string field validated to contain `://`.
    #[must_use]
    pub fn url(name: impl Into<String>) -> Self {
        Self::new(name, VariableKind::Url)
    }

    /// A field drawing one value from `choices`.
    #[must_use]
    pub fn choice(name: impl Into<String>, choices: Vec<String>) -> Self {
        let mut variable = Self::new(name, VariableKind::Choice);
        variable.choices = Some(choices);
        variable
    }

    /// A field drawing zero or more values from `choices`.
    #[must_use]
    pub fn choice_set(name: impl Into<String>, choices: Vec<String>) -> Self {
        let mut variable = Self::new(name, VariableKind::ChoiceSet);
        variable.choices = Some(choices);
        variable
    }

    /// A field resolved by matching a textual token against
    /// `value_lookup_key`'s attribute on each of `candidates`.
    #[must_use]
    pub fn reference(name: impl Into<String>, candidates: Vec<Candidate>) -> Self {
        let mut variable = Self::new(name, VariableKind::Reference);
        variable.candidates = Some(candidates);
        variable
    }

    /// Overrides the backend attribute path; defaults to the
    /// variable's own name when unset.
    #[must_use]
    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attr = Some(attr.into());
        self
    }

    /// Marks this variable as having no backend attribute at all: it
    /// is decorative and drops its leaf during lowering (see
    /// `original_source`'s `test_none_attr`).
    #[must_use]
    pub const fn no_attr(mut self) -> Self {
        self.attr = None;
        self.has_attr = false;
        self
    }

    /// Declares this `choice`/`choice-set`/`reference` variable with
    /// no known universe yet: lowering any value against it raises
    /// `MissingLookupKey` until the host wires one in with `choice`,
    /// `choice_set`, or `reference`'s constructor, or this is called
    /// again with the real list.
    #[must_use]
    pub fn without_choices(mut self) -> Self {
        self.choices = None;
        self.candidates = None;
        self
    }

    /// Overrides case sensitivity.
    #[must_use]
    pub const fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Marks this variable as part of the freetext OR-group.
    #[must_use]
    pub const fn freetext(mut self, freetext: bool) -> Self {
        self.freetext = freetext;
        self
    }

    /// Sets the attribute name used to look up a candidate's display
    /// identity for `choice`/`reference` resolution. Defaults to
    /// `"name"` (see `spec.md` §4.7 and `MissingLookupKey`).
    #[must_use]
    pub fn value_lookup_key(mut self, key: impl Into<String>) -> Self {
        self.value_lookup_key = Some(key.into());
        self
    }

    /// Excludes this variable from the simple form (it remains
    /// usable from the advanced query language).
    #[must_use]
    pub const fn exclude_from_form(mut self) -> Self {
        self.form_included = false;
        self
    }

    /// The declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The backend attribute path, defaulting to [`Variable::name`].
    /// `None` only when [`Variable::no_attr`] was used.
    #[must_use]
    pub fn attr_path(&self) -> Option<&str> {
        if !self.has_attr {
            return None;
        }
        Some(self.attr.as_deref().unwrap_or(self.name.as_str()))
    }

    /// Whether this variable has no backend attribute and is purely
    /// decorative.
    #[must_use]
    pub const fn is_attrless(&self) -> bool {
        !self.has_attr
    }

    /// The declared kind.
    #[must_use]
    pub const fn kind(&self) -> VariableKind {
        self.kind
    }

    /// Whether comparisons against this variable are case-sensitive.
    #[must_use]
    pub const fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Whether this variable participates in the freetext OR-group.
    #[must_use]
    pub const fn is_freetext(&self) -> bool {
        self.freetext
    }

    /// The declared choice universe, if any.
    #[must_use]
    pub fn choices(&self) -> Option<&[String]> {
        self.choices.as_deref()
    }

    /// The declared `reference` candidate universe, if any.
    #[must_use]
    pub fn candidates(&self) -> Option<&[Candidate]> {
        self.candidates.as_deref()
    }

    /// The attribute used to resolve a candidate's display identity,
    /// defaulting to `"name"`.
    #[must_use]
    pub fn value_lookup_key(&self) -> &str {
        self.value_lookup_key.as_deref().unwrap_or("name")
    }

    /// Whether this variable appears in the simple form.
    #[must_use]
    pub const fn is_form_included(&self) -> bool {
        self.form_included
    }

    /// The operators legal against this variable's kind, per
    /// `spec.md` §3's per-kind operator table.
    #[must_use]
    pub fn allowed_ops(&self) -> &'static [Op] {
        match self.kind {
            VariableKind::String
            | VariableKind::Substring
            | VariableKind::CaseSensitiveString
            | VariableKind::Email
            | VariableKind::Url => {
                &[
                    Op::Eq,
                    Op::NotEq,
                    Op::Contains,
                    Op::NotContains,
                    Op::Lt,
                    Op::Le,
                    Op::Gt,
                    Op::Ge,
                ]
            }
            VariableKind::Integer
            | VariableKind::Float
            | VariableKind::Decimal
            | VariableKind::Date
            | VariableKind::DateTime => {
                &[Op::Eq, Op::NotEq, Op::Lt, Op::Le, Op::Gt, Op::Ge]
            }
            VariableKind::Boolean | VariableKind::Choice | VariableKind::Reference => {
                &[Op::Eq, Op::NotEq]
            }
            VariableKind::ChoiceSet => &[Op::Eq, Op::NotEq],
        }
    }

    /// Whether `op` is legal against this variable.
    #[must_use]
    pub fn allows_op(&self, op: Op) -> bool {
        self.allowed_ops().contains(&op)
    }
}

/// An ordered, named collection of [`Variable`]s a query binds
/// against. Declaration order is preserved (see `spec.md` §5) because
/// it drives the observable field order in `to_query_string`.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    variables: IndexMap<String, Variable>,
}

impl Schema {
    /// An empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schema from an ordered list of variables.
    #[must_use]
    pub fn from_variables(variables: impl IntoIterator<Item = Variable>) -> Self {
        let mut schema = Self::new();
        for variable in variables {
            schema.insert(variable);
        }
        schema
    }

    /// Adds (or replaces) a variable, keeping first-seen insertion
    /// order for names added for the first time.
    pub fn insert(&mut self, variable: Variable) {
        self.variables.insert(variable.name.clone(), variable);
    }

    /// Looks up a variable by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Whether `name` is declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// All variables, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    /// The freetext-eligible variables, in declaration order.
    pub fn freetext_variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values().filter(|v| v.is_freetext())
    }

    /// The variables included in the simple form, in declaration
    /// order.
    pub fn form_variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values().filter(|v| v.is_form_included())
    }

    /// The number of declared variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether the schema declares no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
