//! Integration tests for binding simple-mode form submissions.

use oxide_query::{BackendOp, BoundQuery, Predicate, PredicateLeaf, RequestParams, Schema, Value, Variable};

fn schema() -> Schema {
    Schema::from_variables([
        Variable::string("title").freetext(true),
        Variable::case_sensitive_string("slug").freetext(true),
        Variable::integer("views"),
        Variable::boolean("published"),
        Variable::choice_set("tags", vec!["a".to_string(), "b".to_string(), "c".to_string()]),
    ])
}

#[test]
fn empty_request_binds_to_the_universal_predicate() {
    let params = RequestParams::new();
    let bound = BoundQuery::bind(&params, &schema());
    assert!(bound.errors().is_empty());
    assert_eq!(bound.to_predicate(), &Predicate::True);
}

#[test]
fn string_field_defaults_to_a_contains_comparison() {
    let params = RequestParams::new().query("title", "hello");
    let bound = BoundQuery::bind(&params, &schema());
    assert!(bound.errors().is_empty());
    match bound.to_predicate() {
        Predicate::Leaf(PredicateLeaf { op, .. }) => assert_eq!(*op, BackendOp::Icontains),
        other => panic!("expected Leaf, got {other:?}"),
    }
}

#[test]
fn integer_field_defaults_to_equality() {
    let params = RequestParams::new().query("views", "10");
    let bound = BoundQuery::bind(&params, &schema());
    assert!(bound.errors().is_empty());
    match bound.to_predicate() {
        Predicate::Leaf(PredicateLeaf { op, value, .. }) => {
            assert_eq!(*op, BackendOp::Eq);
            assert_eq!(*value, Value::Int(10));
        }
        other => panic!("expected Leaf, got {other:?}"),
    }
}

#[test]
fn invalid_field_value_is_collected_without_blocking_other_fields() {
    let params = RequestParams::new()
        .query("views", "not-a-number")
        .query("published", "true");
    let bound = BoundQuery::bind(&params, &schema());
    assert!(!bound.errors().is_empty());
    assert!(bound.errors().fields.contains_key("views"));
    assert!(!matches!(bound.to_predicate(), Predicate::True));
}

#[test]
fn choice_set_multi_value_submission_lowers_to_in() {
    let params = RequestParams::new().query_multi("tags", ["a".to_string(), "b".to_string()]);
    let bound = BoundQuery::bind(&params, &schema());
    assert!(bound.errors().is_empty());
    match bound.to_predicate() {
        Predicate::Leaf(PredicateLeaf { op, value, .. }) => {
            assert_eq!(*op, BackendOp::In);
            assert_eq!(*value, Value::ChoiceSet(vec!["a".to_string(), "b".to_string()]));
        }
        other => panic!("expected Leaf, got {other:?}"),
    }
}

#[test]
fn choice_set_submission_with_unknown_member_keeps_the_valid_ones() {
    let params = RequestParams::new().query_multi("tags", ["a".to_string(), "zzz".to_string()]);
    let bound = BoundQuery::bind(&params, &schema());
    assert!(bound.errors().fields.contains_key("tags"));
    match bound.to_predicate() {
        Predicate::Leaf(PredicateLeaf { op, value, .. }) => {
            assert_eq!(*op, BackendOp::In);
            assert_eq!(*value, Value::ChoiceSet(vec!["a".to_string()]));
        }
        other => panic!("expected Leaf, got {other:?}"),
    }
}

#[test]
fn freetext_term_matches_every_declared_freetext_field() {
    let params = RequestParams::new().query("term", "needle");
    let bound = BoundQuery::bind(&params, &schema());
    assert!(bound.errors().is_empty());
    match bound.to_predicate() {
        Predicate::Or(children) => assert_eq!(children.len(), 2),
        other => panic!("expected Or, got {other:?}"),
    }
}

#[test]
fn advanced_query_parameter_takes_precedence_over_simple_fields() {
    let params = RequestParams::new()
        .query("views", "10")
        .query("query", "views=99");
    let bound = BoundQuery::bind(&params, &schema());
    assert!(bound.errors().is_empty());
    match bound.to_predicate() {
        Predicate::Leaf(PredicateLeaf { value, .. }) => assert_eq!(*value, Value::Int(99)),
        other => panic!("expected Leaf, got {other:?}"),
    }
}
