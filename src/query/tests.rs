//! Query engine tests

use super::*;
use crate::error::Error;
use crate::normalize::{normalize_all, NormalizedRecord};
use crate::schema::{build_schema, Schema};
use crate::types::{JsonValue, RawRecord, SortDirection};
use pretty_assertions::assert_eq;
use serde_json::json;

fn dataset(value: JsonValue) -> (Schema, Vec<NormalizedRecord>) {
    let raw: Vec<RawRecord> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_object().unwrap().clone())
        .collect();
    let schema = build_schema(&raw).unwrap();
    let rows = normalize_all(&raw, &schema);
    (schema, rows)
}

fn people() -> (Schema, Vec<NormalizedRecord>) {
    dataset(json!([
        {"Name": "Alice", "Age": 30, "Joined": "2021-03-01"},
        {"Name": "Bob", "Age": 17, "Joined": "2022-07-15"},
        {"Name": "Carol", "Age": 18, "Joined": "2020-01-10"},
        {"Name": "Dan", "Age": null, "Joined": "2023-05-05"},
        {"Name": "Eve", "Age": 45, "Joined": "2019-11-30"}
    ]))
}

fn names(rows: &[NormalizedRecord]) -> Vec<String> {
    rows.iter()
        .map(|r| r.raw("name").and_then(JsonValue::as_str).unwrap_or("").to_string())
        .collect()
}

// ============================================================================
// Condition Tests
// ============================================================================

#[test]
fn test_condition_priority_order() {
    let condition: Condition = serde_json::from_value(json!({"lte": 5, "gt": 1, "lt": 3})).unwrap();
    let (cmp, operand) = condition.predicate().unwrap();
    assert_eq!(cmp, Comparison::Gt);
    assert_eq!(operand, &json!(1));
}

#[test]
fn test_condition_explicit_null_is_present() {
    let condition: Condition = serde_json::from_value(json!({"eq": null})).unwrap();
    assert_eq!(condition.predicate(), Some((Comparison::Eq, &JsonValue::Null)));

    let empty: Condition = serde_json::from_value(json!({"unknown": 1})).unwrap();
    assert!(empty.predicate().is_none());
}

#[test]
fn test_comparison_accepts() {
    use std::cmp::Ordering::{Equal, Greater, Less};

    assert!(Comparison::Eq.accepts(Some(Equal)));
    assert!(!Comparison::Eq.accepts(Some(Less)));
    assert!(Comparison::Gte.accepts(Some(Equal)));
    assert!(Comparison::Gte.accepts(Some(Greater)));
    assert!(!Comparison::Lt.accepts(Some(Equal)));
    assert!(Comparison::Lte.accepts(Some(Less)));
    assert!(!Comparison::Gt.accepts(None));
}

#[test]
fn test_query_from_json() {
    let query = Query::from_json(r#"{"age": {"gte": 18}}"#).unwrap();
    assert_eq!(query, Query::new().with("age", Condition::gte(18)));

    let err = Query::from_json(r#"{"age": 18}"#).unwrap_err();
    assert!(matches!(err, Error::InvalidQuery { .. }));
}

// ============================================================================
// Filter Tests
// ============================================================================

#[test]
fn test_filter_without_query_is_identity() {
    let (schema, rows) = people();
    let engine = QueryEngine::new(&schema);

    let filtered = engine.filter(rows.clone(), None).unwrap();
    assert_eq!(filtered, rows);

    let filtered = engine.filter(rows.clone(), Some(&Query::new())).unwrap();
    assert_eq!(filtered, rows);
}

#[test]
fn test_filter_gte_preserves_order() {
    let (schema, rows) = people();
    let query = Query::new().with("age", Condition::gte(18));

    let filtered = QueryEngine::new(&schema).filter(rows, Some(&query)).unwrap();
    assert_eq!(names(&filtered), vec!["Alice", "Carol", "Eve"]);
}

#[test]
fn test_filter_each_operator() {
    let (schema, rows) = people();
    let engine = QueryEngine::new(&schema);
    let run = |condition: Condition| {
        let query = Query::new().with("age", condition);
        names(&engine.filter(rows.clone(), Some(&query)).unwrap())
    };

    assert_eq!(run(Condition::eq(18)), vec!["Carol"]);
    assert_eq!(run(Condition::gt(30)), vec!["Eve"]);
    assert_eq!(run(Condition::lt(18)), vec!["Bob"]);
    assert_eq!(run(Condition::lte(18)), vec!["Bob", "Carol"]);
}

#[test]
fn test_filter_null_never_matches_ordering() {
    let (schema, rows) = people();
    let engine = QueryEngine::new(&schema);

    let query = Query::new().with("age", Condition::lt(1000));
    let filtered = engine.filter(rows.clone(), Some(&query)).unwrap();
    assert!(!names(&filtered).contains(&"Dan".to_string()));

    let query = Query::new().with("age", Condition::eq(JsonValue::Null));
    let filtered = engine.filter(rows, Some(&query)).unwrap();
    assert_eq!(names(&filtered), vec!["Dan"]);
}

#[test]
fn test_filter_and_of_conditions() {
    let (schema, rows) = people();
    let query = Query::new()
        .with("age", Condition::gte(18))
        .with("joined", Condition::lt("2021-01-01"));

    let filtered = QueryEngine::new(&schema).filter(rows, Some(&query)).unwrap();
    assert_eq!(names(&filtered), vec!["Carol", "Eve"]);
}

#[test]
fn test_filter_dates_compare_chronologically() {
    let (schema, rows) = dataset(json!([
        {"when": "2023-01-05T10:00:00Z"},
        {"when": "2023-01-05 09:00:00"},
        {"when": "2022-12-31"}
    ]));
    let query = Query::new().with("when", Condition::gte("2023-01-05T09:30:00Z"));

    let filtered = QueryEngine::new(&schema).filter(rows, Some(&query)).unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].raw("when"), Some(&json!("2023-01-05T10:00:00Z")));
}

#[test]
fn test_filter_text_compares_lexicographically() {
    let (schema, rows) = people();
    let query = Query::new().with("name", Condition::lt("C"));

    let filtered = QueryEngine::new(&schema).filter(rows, Some(&query)).unwrap();
    assert_eq!(names(&filtered), vec!["Alice", "Bob"]);
}

#[test]
fn test_filter_numeric_strings_use_field_type() {
    let (schema, rows) = dataset(json!([
        {"Name": "Alice", "Age": "30"},
        {"Name": "Bob", "Age": "25"}
    ]));
    let query = Query::new().with("age", Condition::gt(26));

    let filtered = QueryEngine::new(&schema).filter(rows, Some(&query)).unwrap();
    assert_eq!(
        serde_json::to_value(&filtered).unwrap(),
        json!([{"name": "Alice", "age": "30"}])
    );
}

#[test]
fn test_filter_incomparable_operand_matches_nothing() {
    let (schema, rows) = people();
    let query = Query::new().with("age", Condition::gt("old"));

    let filtered = QueryEngine::new(&schema).filter(rows, Some(&query)).unwrap();
    assert!(filtered.is_empty());
}

#[test]
fn test_filter_condition_without_operator_is_satisfied() {
    let (schema, rows) = people();
    let query = Query::new().with("age", Condition::default());

    let filtered = QueryEngine::new(&schema).filter(rows.clone(), Some(&query)).unwrap();
    assert_eq!(filtered.len(), rows.len());
}

#[test]
fn test_filter_unknown_field() {
    let (schema, rows) = people();
    let query = Query::new().with("Age", Condition::gt(1));

    let err = QueryEngine::new(&schema).filter(rows, Some(&query)).unwrap_err();
    assert!(matches!(err, Error::UnknownField { field } if field == "Age"));
}

// ============================================================================
// Sort Tests
// ============================================================================

#[test]
fn test_sort_without_field_is_identity() {
    let (schema, rows) = people();
    let sorted = QueryEngine::new(&schema)
        .sort(rows.clone(), None, SortDirection::Desc)
        .unwrap();
    assert_eq!(sorted, rows);
}

#[test]
fn test_sort_ascending_nulls_last() {
    let (schema, rows) = people();
    let sorted = QueryEngine::new(&schema)
        .sort(rows, Some("age"), SortDirection::Asc)
        .unwrap();
    assert_eq!(names(&sorted), vec!["Bob", "Carol", "Alice", "Eve", "Dan"]);
}

#[test]
fn test_sort_descending_nulls_first() {
    let (schema, rows) = people();
    let sorted = QueryEngine::new(&schema)
        .sort(rows, Some("age"), SortDirection::Desc)
        .unwrap();
    assert_eq!(names(&sorted), vec!["Dan", "Eve", "Alice", "Carol", "Bob"]);
}

#[test]
fn test_sort_by_date() {
    let (schema, rows) = people();
    let sorted = QueryEngine::new(&schema)
        .sort(rows, Some("joined"), SortDirection::Asc)
        .unwrap();
    assert_eq!(names(&sorted), vec!["Eve", "Carol", "Alice", "Bob", "Dan"]);
}

#[test]
fn test_sort_is_stable() {
    let (schema, rows) = dataset(json!([
        {"id": "a", "group": 2},
        {"id": "b", "group": 1},
        {"id": "c", "group": 2},
        {"id": "d", "group": 1},
        {"id": "e", "group": 2}
    ]));
    let engine = QueryEngine::new(&schema);
    let ids = |rows: &[NormalizedRecord]| -> Vec<JsonValue> {
        rows.iter().map(|r| r.raw("id").cloned().unwrap()).collect()
    };

    let asc = engine
        .sort(rows.clone(), Some("group"), SortDirection::Asc)
        .unwrap();
    assert_eq!(ids(&asc), vec![json!("b"), json!("d"), json!("a"), json!("c"), json!("e")]);

    let desc = engine.sort(rows, Some("group"), SortDirection::Desc).unwrap();
    assert_eq!(ids(&desc), vec![json!("a"), json!("c"), json!("e"), json!("b"), json!("d")]);
}

#[test]
fn test_sort_unknown_field() {
    let (schema, rows) = people();
    let err = QueryEngine::new(&schema)
        .sort(rows, Some("height"), SortDirection::Asc)
        .unwrap_err();
    assert!(matches!(err, Error::UnknownField { .. }));
}

// ============================================================================
// Pagination Tests
// ============================================================================

#[test]
fn test_paginate_window() {
    let rows = vec![0, 1, 2, 3, 4];
    assert_eq!(paginate(rows, Some(2), Some(1)), vec![1, 2]);
}

#[test]
fn test_paginate_defaults() {
    let rows = vec![0, 1, 2, 3, 4];
    assert_eq!(paginate(rows.clone(), None, None), rows);
    assert_eq!(paginate(rows.clone(), None, Some(3)), vec![3, 4]);
    assert_eq!(paginate(rows, Some(2), None), vec![0, 1]);
}

#[test]
fn test_paginate_clamps_out_of_range() {
    let rows = vec![0, 1, 2];
    assert!(paginate(rows.clone(), Some(5), Some(10)).is_empty());
    assert_eq!(paginate(rows.clone(), Some(100), Some(1)), vec![1, 2]);
    assert!(paginate(rows, Some(0), None).is_empty());
}

#[test]
fn test_engine_paginate_records() {
    let (schema, rows) = people();
    let page = QueryEngine::new(&schema).paginate(rows, Some(2), Some(1));
    assert_eq!(names(&page), vec!["Bob", "Carol"]);
}

// ============================================================================
// Distinct Tests
// ============================================================================

#[test]
fn test_distinct_first_occurrence_without_missing() {
    let (schema, rows) = dataset(json!([
        {"city": "Dublin"},
        {"city": ""},
        {"city": "Cork"},
        {"city": null},
        {"city": "Dublin"},
        {},
        {"city": "Galway"}
    ]));

    let values = QueryEngine::new(&schema).distinct(&rows, "city").unwrap();
    assert_eq!(values, vec![json!("Dublin"), json!("Cork"), json!("Galway")]);
}

#[test]
fn test_distinct_returns_raw_values() {
    let (schema, rows) = dataset(json!([
        {"n": "1"},
        {"n": 1},
        {"n": "1"}
    ]));

    let values = QueryEngine::new(&schema).distinct(&rows, "n").unwrap();
    assert_eq!(values, vec![json!("1"), json!(1)]);
}

#[test]
fn test_distinct_unknown_field() {
    let (schema, rows) = people();
    let err = QueryEngine::new(&schema).distinct(&rows, "nope").unwrap_err();
    assert!(matches!(err, Error::UnknownField { .. }));
}
