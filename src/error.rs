//! Error types for the query subsystem.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// A single error produced while parsing or lowering a query.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueryError {
    /// Lexer or parser failure in advanced mode.
    #[error("Invalid syntax for query")]
    SyntaxError {
        /// Byte offset of the offending token.
        position: usize,
    },

    /// Reference to an undeclared variable name.
    #[error("Unknown variable \"{name}\"")]
    UnknownVariable {
        /// The variable name that was referenced.
        name: String,
    },

    /// Operator not permitted for this variable's kind.
    #[error("Invalid operator \"{op}\" for variable \"{variable}\"")]
    UnknownOperator {
        /// The operator's source spelling.
        op: String,
        /// The variable the operator was used with.
        variable: String,
    },

    /// Value coercion failed.
    #[error("{message}")]
    BadLiteral {
        /// The kind-specific message (see `spec.md` §4.3).
        message: String,
    },

    /// `choice`/`reference` value not present in the universe.
    #[error("Unknown value \"{value}\" for variable \"{variable}\"")]
    UnknownValue {
        /// The textual value that failed to resolve.
        value: String,
        /// The variable being resolved against.
        variable: String,
    },

    /// `reference` value-lookup attribute absent on candidate records.
    #[error("{message}")]
    MissingLookupKey {
        /// The fully formatted message, including candidate attributes.
        message: String,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QueryError>;

/// Structured error aggregation: one bucket of messages with no
/// specific field, and one bucket per field.
///
/// Advanced-mode parse failures populate only `global`, with a single
/// entry, and short-circuit lowering. Simple-mode coercion failures
/// populate `fields` and never short-circuit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Errors {
    /// Errors not attributable to a single field.
    pub global: Vec<String>,
    /// Errors keyed by variable name.
    pub fields: HashMap<String, Vec<String>>,
}

impl Errors {
    /// Creates an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether any error was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.fields.is_empty()
    }

    /// Records a global error message.
    pub fn add_global(&mut self, message: impl Into<String>) {
        self.global.push(message.into());
    }

    /// Records an error message for a specific field.
    pub fn add_field(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for message in &self.global {
            writeln!(f, "{message}")?;
        }
        for (field, messages) in &self.fields {
            for message in messages {
                writeln!(f, "{field}: {message}")?;
            }
        }
        Ok(())
    }
}
