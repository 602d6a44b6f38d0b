#![allow(dead_code)]

use oxide_query::{Expr, Predicate, QueryError, Schema};

pub fn parse(text: &str) -> Expr {
    oxide_query::query::parse(text)
        .unwrap_or_else(|e| panic!("Failed to parse: {text}\nError: {e:?}"))
}

pub fn parse_err(text: &str) -> QueryError {
    oxide_query::query::parse(text).expect_err(&format!("Expected parse error for: {text}"))
}

pub fn lower(text: &str, schema: &Schema) -> Predicate {
    let expr = parse(text);
    oxide_query::lower::lower(&expr, schema)
        .unwrap_or_else(|e| panic!("Failed to lower: {text}\nError: {e:?}"))
}

pub fn lower_err(text: &str, schema: &Schema) -> QueryError {
    let expr = parse(text);
    oxide_query::lower::lower(&expr, schema)
        .expect_err(&format!("Expected lowering error for: {text}"))
}
