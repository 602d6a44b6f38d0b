//! # oxide-query
//!
//! Advanced and simple query parsing, schema-directed value coercion, and
//! backend-agnostic predicate lowering.
//!
//! This crate provides:
//! - A hand-written recursive descent parser for a small boolean query
//!   language (`field op value [and/or ...]`)
//! - Schema-directed coercion of literal text into typed values, so the
//!   same literal parses differently depending on the variable it's
//!   compared against
//! - A backend-agnostic predicate ([`lower::Predicate`]) that a host
//!   application translates into its own storage layer via
//!   [`lower::BackendAdapter`]
//! - A simple form-field mode alongside the advanced query language, both
//!   reserializable through the same canonical syntax
//!
//! ## Advanced mode
//!
//! ```rust
//! use oxide_query::{Schema, Variable};
//! use oxide_query::query::parse;
//!
//! let schema = Schema::from_variables([Variable::string("name")]);
//! let expr = parse(r#"name="admin" and not name:"test""#).unwrap();
//! let predicate = oxide_query::lower::lower(&expr, &schema).unwrap();
//! ```
//!
//! ## Binding a request
//!
//! ```rust
//! use oxide_query::{BoundQuery, RequestParams, Schema, Variable};
//!
//! let schema = Schema::from_variables([Variable::string("name")]);
//! let params = RequestParams::new().query("name", "admin");
//! let bound = BoundQuery::bind(&params, &schema);
//! assert!(bound.errors().is_empty());
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod lower;
pub mod parser;
pub mod query;
pub mod request;
pub mod simple;
pub mod value;
pub mod variable;

pub use ast::{Expr, LeafExpr, Op, RawValue};
pub use error::{Errors, QueryError, Result};
pub use lower::{BackendAdapter, BackendOp, InMemoryAdapter, Predicate, PredicateLeaf};
pub use query::BoundQuery;
pub use request::{Method, ParamSource, RequestParams};
pub use value::{Value, VariableKind};
pub use variable::{Candidate, Schema, Variable};
