//! Typed values and per-kind literal coercion.
//!
//! See `spec.md` §3 (`Value`) and §4.3 (coercion rules).

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::error::QueryError;

/// The date/datetime formats tried, in order, by `coerce_date`/`coerce_datetime`.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// The kind of a declared [`crate::variable::Variable`].
///
/// `String`, `Substring`, and `CaseSensitiveString` are constructor
/// shortcuts over the same underlying string representation; they
/// only differ in the default they set for
/// [`crate::variable::Variable::case_sensitive`] (see `SPEC_FULL.md` §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// Plain string, case-insensitive by default.
    String,
    /// Same representation as `String`; a naming shortcut for fields
    /// whose primary operator is expected to be `:`/`!:`.
    Substring,
    /// Same representation as `String`, case-sensitive by default.
    CaseSensitiveString,
    /// Signed 64-bit integer.
    Integer,
    /// 64-bit floating point.
    Float,
    /// Arbitrary-precision decimal.
    Decimal,
    /// `true`/`false`.
    Boolean,
    /// Calendar date.
    Date,
    /// Calendar date and time.
    DateTime,
    /// String validated to contain `@`.
    Email,
    /// String validated to contain `://`.
    Url,
    /// One value drawn from a finite universe.
    Choice,
    /// Zero or more values drawn from a finite universe.
    ChoiceSet,
    /// A textual token resolved against another record's attribute.
    Reference,
}

impl VariableKind {
    /// Whether this kind is one of the string-like representations.
    #[must_use]
    pub const fn is_string_like(self) -> bool {
        matches!(
            self,
            Self::String | Self::Substring | Self::CaseSensitiveString | Self::Email | Self::Url
        )
    }

    /// The default case-sensitivity for a freshly constructed variable
    /// of this kind.
    #[must_use]
    pub const fn default_case_sensitive(self) -> bool {
        matches!(self, Self::CaseSensitiveString)
    }
}

/// A parsed value, kind-agnostic once coercion has run.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL-ish `NULL`.
    Null,
    /// `true`/`false`.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point.
    Float(f64),
    /// Arbitrary-precision decimal.
    Decimal(Decimal),
    /// A string value. `freetext_ish` records whether this value was
    /// produced by the freetext path, purely for `to_query_string`
    /// round-tripping; it never affects lowering.
    Str {
        /// The textual content.
        value: String,
        /// Whether this string came from the freetext term.
        freetext_ish: bool,
    },
    /// Calendar date.
    Date(NaiveDate),
    /// Calendar date and time.
    DateTime(NaiveDateTime),
    /// A reference to another declared variable (self-reference via
    /// an unquoted identifier on the RHS).
    FieldRef(String),
    /// The identity of a single resolved `choice`/`reference` element.
    ChoiceRef(String),
    /// The identities of a multi-valued `choice-set` submission.
    ChoiceSet(Vec<String>),
}

impl Value {
    /// Convenience constructor for a plain (non-freetext) string value.
    #[must_use]
    pub fn str(value: impl Into<String>) -> Self {
        Self::Str {
            value: value.into(),
            freetext_ish: false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Str { value, .. } => write!(f, "{value}"),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Self::FieldRef(name) => write!(f, "{name}"),
            Self::ChoiceRef(identity) => write!(f, "{identity}"),
            Self::ChoiceSet(values) => write!(f, "{}", values.join(",")),
        }
    }
}

/// Token sets accepted for `boolean` coercion, per `spec.md` §4.3.
const TRUE_TOKENS: &[&str] = &["1", "true", "t", "yes", "y", "on"];
const FALSE_TOKENS: &[&str] = &["0", "false", "f", "no", "n", "off"];

/// Coerces raw literal text into a [`Value`] for a non-choice,
/// non-reference kind. `choice`/`choice-set`/`reference` kinds need
/// access to the variable's choice universe and are coerced by
/// `crate::lower` instead.
///
/// # Errors
///
/// Returns [`QueryError::BadLiteral`] with the exact kind-specific
/// message from `spec.md` §4.3 when `text` does not parse as `kind`.
pub fn coerce_literal_text(kind: VariableKind, text: &str) -> Result<Value, QueryError> {
    if text.eq_ignore_ascii_case("null") {
        return Ok(Value::Null);
    }

    match kind {
        VariableKind::String | VariableKind::Substring | VariableKind::CaseSensitiveString => {
            Ok(Value::str(text))
        }
        VariableKind::Integer => text
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| bad_literal(format!("Invalid literal for Integer: {text}"))),
        VariableKind::Float => text
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| bad_literal(format!("Invalid literal for Float: {text}"))),
        VariableKind::Decimal => text
            .parse::<Decimal>()
            .map(Value::Decimal)
            .map_err(|_| bad_literal(format!("Invalid literal for Decimal: {text}"))),
        VariableKind::Boolean => coerce_boolean(text),
        VariableKind::Date => coerce_date(text),
        VariableKind::DateTime => coerce_datetime(text),
        VariableKind::Email => {
            if text.contains('@') {
                Ok(Value::str(text))
            } else {
                Err(bad_literal("Enter a valid email address."))
            }
        }
        VariableKind::Url => {
            if text.contains("://") {
                Ok(Value::str(text))
            } else {
                Err(bad_literal("Enter a valid URL."))
            }
        }
        VariableKind::Choice | VariableKind::ChoiceSet | VariableKind::Reference => {
            unreachable!(
                "{kind:?} coercion requires the choice universe; handled in crate::lower"
            )
        }
    }
}

fn coerce_boolean(text: &str) -> Result<Value, QueryError> {
    let lower = text.to_ascii_lowercase();
    if TRUE_TOKENS.contains(&lower.as_str()) {
        Ok(Value::Bool(true))
    } else if FALSE_TOKENS.contains(&lower.as_str()) {
        Ok(Value::Bool(false))
    } else {
        Err(bad_literal(format!(
            "Invalid literal for Boolean: {text}"
        )))
    }
}

fn coerce_date(text: &str) -> Result<Value, QueryError> {
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Ok(Value::Date(date));
        }
    }
    Err(time_data_error(text, DATE_FORMATS))
}

fn coerce_datetime(text: &str) -> Result<Value, QueryError> {
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(Value::DateTime(dt));
        }
    }
    // A bare date is also a valid datetime at midnight.
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(Value::DateTime(date.and_hms_opt(0, 0, 0).unwrap()));
    }
    Err(time_data_error(text, DATETIME_FORMATS))
}

fn time_data_error(text: &str, formats: &[&str]) -> QueryError {
    let list = formats
        .iter()
        .map(|f| format!("'{f}'"))
        .collect::<Vec<_>>()
        .join(", ");
    bad_literal(format!(
        "Time data \"{text}\" does not match any of the formats {list}"
    ))
}

fn bad_literal(message: impl Into<String>) -> QueryError {
    QueryError::BadLiteral {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_ok() {
        assert_eq!(
            coerce_literal_text(VariableKind::Integer, "42").unwrap(),
            Value::Int(42)
        );
    }

    #[test]
    fn test_integer_bad() {
        let err = coerce_literal_text(VariableKind::Integer, "abc").unwrap_err();
        assert_eq!(err.to_string(), "Invalid literal for Integer: abc");
    }

    #[test]
    fn test_decimal_ok() {
        let v = coerce_literal_text(VariableKind::Decimal, "3.50").unwrap();
        assert_eq!(v, Value::Decimal("3.50".parse().unwrap()));
    }

    #[test]
    fn test_decimal_bad() {
        let err = coerce_literal_text(VariableKind::Decimal, "x").unwrap_err();
        assert_eq!(err.to_string(), "Invalid literal for Decimal: x");
    }

    #[test]
    fn test_boolean_tokens() {
        for token in ["1", "true", "T", "YES", "y", "On"] {
            assert_eq!(
                coerce_literal_text(VariableKind::Boolean, token).unwrap(),
                Value::Bool(true)
            );
        }
        for token in ["0", "false", "F", "NO", "n", "Off"] {
            assert_eq!(
                coerce_literal_text(VariableKind::Boolean, token).unwrap(),
                Value::Bool(false)
            );
        }
    }

    #[test]
    fn test_date_ok() {
        let v = coerce_literal_text(VariableKind::Date, "2014-03-07").unwrap();
        assert_eq!(v, Value::Date(NaiveDate::from_ymd_opt(2014, 3, 7).unwrap()));
    }

    #[test]
    fn test_date_out_of_range() {
        let err = coerce_literal_text(VariableKind::Date, "2014-03-37").unwrap_err();
        assert!(err.to_string().contains("does not match any of the formats"));
    }

    #[test]
    fn test_email() {
        assert!(coerce_literal_text(VariableKind::Email, "a@b.com").is_ok());
        let err = coerce_literal_text(VariableKind::Email, "nope").unwrap_err();
        assert_eq!(err.to_string(), "Enter a valid email address.");
    }

    #[test]
    fn test_url() {
        assert!(coerce_literal_text(VariableKind::Url, "https://example.com").is_ok());
        let err = coerce_literal_text(VariableKind::Url, "example.com").unwrap_err();
        assert_eq!(err.to_string(), "Enter a valid URL.");
    }

    #[test]
    fn test_null_token_any_kind() {
        assert_eq!(
            coerce_literal_text(VariableKind::Integer, "null").unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_string_kind_never_fails() {
        assert_eq!(
            coerce_literal_text(VariableKind::String, "anything at all").unwrap(),
            Value::str("anything at all")
        );
    }
}
