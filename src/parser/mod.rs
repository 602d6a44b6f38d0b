//! Recursive-descent parser for the advanced query language.
//!
//! Grammar (`spec.md` §4.2/§6):
//!
//! ```text
//! expr       := or_expr
//! or_expr    := and_expr ('or' and_expr)*
//! and_expr   := not_expr ('and' not_expr)*
//! not_expr   := 'not' not_expr | atom
//! atom       := '(' expr ')' | comparison
//! comparison := IDENT op rhs
//! ```
//!
//! This grammar is fixed and shallow (no arithmetic, no user-defined
//! precedence), so a recursive-descent parser is used rather than a
//! Pratt/binding-power parser.

mod error;
mod parser;

pub use error::ParseError;
pub use parser::Parser;
