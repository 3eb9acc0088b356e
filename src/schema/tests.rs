//! Schema inference tests

use super::*;
use crate::error::Error;
use crate::types::{FieldType, JsonValue, RawRecord};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

fn records(value: JsonValue) -> Vec<RawRecord> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_object().unwrap().clone())
        .collect()
}

// ============================================================================
// Type Inference Tests
// ============================================================================

#[test_case(json!([]), FieldType::Text; "empty column")]
#[test_case(json!([null, ""]), FieldType::Text; "only missing values")]
#[test_case(json!(["1", "2", "3"]), FieldType::Integer; "digit strings")]
#[test_case(json!([1, 2, 3]), FieldType::Integer; "native integers")]
#[test_case(json!(["1.5", "2.0"]), FieldType::Float; "decimal strings")]
#[test_case(json!([1.5, 2, "3.25"]), FieldType::Float; "mixed decimals")]
#[test_case(json!(["true", "false"]), FieldType::Boolean; "boolean strings")]
#[test_case(json!([true, false, "true"]), FieldType::Boolean; "mixed booleans")]
#[test_case(json!(["2023-01-01", "2023-02-01"]), FieldType::Date; "iso dates")]
#[test_case(json!(["2023-01-01T08:00:00Z", "2023-01-01 09:30:00"]), FieldType::Date; "datetimes")]
#[test_case(json!(["12/25/2023 10:00 AM", "12/26/2023 4:15 PM"]), FieldType::Date; "twelve hour datetimes")]
#[test_case(json!(["open", "closed", "open"]), FieldType::Option; "low cardinality")]
#[test_case(json!(["1e3", "2"]), FieldType::Integer; "exponent that is integral")]
fn test_infer_type(values: JsonValue, expected: FieldType) {
    let values = values.as_array().unwrap().clone();
    assert_eq!(infer_type(&values), expected);
}

#[test]
fn test_infer_exponent_with_fraction_is_not_float() {
    // 1.25e1 = 12.5 is numeric but not a plain decimal
    let values = vec![json!("1.25e1"), json!("2.5")];
    assert_eq!(infer_type(&values), FieldType::Option);
}

#[test]
fn test_infer_ignores_absent_values() {
    let a = json!("4");
    let b = json!("");
    let column = vec![None, Some(&a), Some(&b), None];
    assert_eq!(TypeInferrer::new().infer(column), FieldType::Integer);

    let nothing: Vec<Option<&JsonValue>> = vec![None, None];
    assert_eq!(TypeInferrer::new().infer(nothing), FieldType::Text);
}

#[test]
fn test_infer_option_boundary() {
    let ten: Vec<JsonValue> = (0..10).map(|i| json!(format!("station-{i}"))).collect();
    assert_eq!(infer_type(&ten), FieldType::Option);

    let eleven: Vec<JsonValue> = (0..11).map(|i| json!(format!("station-{i}"))).collect();
    assert_eq!(infer_type(&eleven), FieldType::Text);
}

#[test]
fn test_infer_option_counts_distinct_values() {
    let mut values: Vec<JsonValue> = (0..10).map(|i| json!(format!("v{i}"))).collect();
    values.extend((0..10).map(|i| json!(format!("v{i}"))));
    assert_eq!(infer_type(&values), FieldType::Option);
}

#[test]
fn test_infer_priority_prefers_boolean_over_option() {
    let values = vec![json!("true"), json!("true")];
    assert_eq!(infer_type(&values), FieldType::Boolean);
}

#[test]
fn test_infer_booleans_mixed_with_numbers_are_integers() {
    // true and 1 both coerce to integral numbers
    let values = vec![json!(true), json!(1)];
    assert_eq!(infer_type(&values), FieldType::Integer);
}

#[test]
fn test_infer_is_deterministic() {
    let values = vec![json!("a"), json!(3), json!("2023-01-01"), json!(null)];
    let first = infer_type(&values);
    for _ in 0..5 {
        assert_eq!(infer_type(&values), first);
    }
}

#[test]
fn test_inferrer_with_custom_option_limit() {
    let values: Vec<JsonValue> = (0..4).map(|i| json!(format!("x{i}"))).collect();
    let inferrer = TypeInferrer::new().with_max_options(3);
    assert_eq!(inferrer.max_options(), 3);
    assert_eq!(inferrer.infer(values.iter().map(Some)), FieldType::Text);
}

#[test]
fn test_inferrer_without_date_detection() {
    let values = vec![json!("2023-01-01"), json!("2023-02-01")];
    let inferrer = TypeInferrer::new().with_date_detection(false);
    assert_eq!(inferrer.infer(values.iter().map(Some)), FieldType::Option);
}

// ============================================================================
// Schema Builder Tests
// ============================================================================

#[test]
fn test_build_schema_end_to_end_sample() {
    let sample = records(json!([
        {"Name": "Alice", "Age": "30"},
        {"Name": "Bob", "Age": "25"}
    ]));

    let schema = build_schema(&sample).unwrap();

    assert_eq!(
        schema.to_json(),
        json!([
            {"display": "Name", "name": "name", "type": "OPTION", "options": ["Alice", "Bob"]},
            {"display": "Age", "name": "age", "type": "INTEGER"}
        ])
    );
}

#[test]
fn test_build_schema_follows_first_record_key_order() {
    let sample = records(json!([
        {"zeta": 1, "Alpha": "x", "mid_field": true},
        {"Alpha": "y", "zeta": 2, "mid_field": false}
    ]));

    let schema = build_schema(&sample).unwrap();
    assert_eq!(schema.names(), vec!["zeta", "alpha", "midField"]);
}

#[test]
fn test_build_schema_ignores_keys_only_in_later_records() {
    let sample = records(json!([
        {"id": 1},
        {"id": 2, "late": "value"}
    ]));

    let schema = build_schema(&sample).unwrap();
    assert_eq!(schema.len(), 1);
    assert!(schema.get("late").is_none());
}

#[test]
fn test_build_schema_tolerates_missing_keys_in_later_records() {
    let sample = records(json!([
        {"id": 1, "bikes": "5"},
        {"id": 2},
        {"id": 3, "bikes": null}
    ]));

    let schema = build_schema(&sample).unwrap();
    assert_eq!(schema.get("bikes").unwrap().field_type, FieldType::Integer);
}

#[test]
fn test_build_schema_options_skip_missing_values() {
    let sample = records(json!([
        {"status": "OPEN"},
        {"status": ""},
        {"status": null},
        {"status": "CLOSED"},
        {"status": "OPEN"}
    ]));

    let schema = build_schema(&sample).unwrap();
    let status = schema.get("status").unwrap();
    assert_eq!(status.field_type, FieldType::Option);
    assert_eq!(status.options, Some(vec![json!("OPEN"), json!("CLOSED")]));
}

#[test]
fn test_build_schema_options_only_for_option_fields() {
    let sample = records(json!([
        {"count": 1, "label": "a"},
        {"count": 2, "label": "b"}
    ]));

    let schema = build_schema(&sample).unwrap();
    for field in &schema {
        assert_eq!(
            field.options.is_some(),
            field.field_type == FieldType::Option,
            "field {}",
            field.name
        );
    }
}

#[test]
fn test_build_schema_empty_sample() {
    let err = build_schema(&[]).unwrap_err();
    assert!(matches!(err, Error::EmptyDataset));
}

#[test]
fn test_build_schema_rejects_name_collision() {
    let sample = records(json!([
        {"Station ID": 1, "station_id": 2}
    ]));

    let err = build_schema(&sample).unwrap_err();
    match err {
        Error::NameCollision {
            name,
            first,
            second,
        } => {
            assert_eq!(name, "stationId");
            assert_eq!(first, "Station ID");
            assert_eq!(second, "station_id");
        }
        other => panic!("expected NameCollision, got {other:?}"),
    }
}

#[test]
fn test_schema_lookup() {
    let sample = records(json!([{"Last Update": "2023-01-01"}]));
    let schema = build_schema(&sample).unwrap();

    let field = schema.require("lastUpdate").unwrap();
    assert_eq!(field.display, "Last Update");
    assert_eq!(field.field_type, FieldType::Date);

    assert!(matches!(
        schema.require("Last Update"),
        Err(Error::UnknownField { .. })
    ));
}

#[test]
fn test_schema_serde_roundtrip_keeps_order() {
    let sample = records(json!([{"b": 1, "a": "x"}]));
    let schema = build_schema(&sample).unwrap();

    let parsed: Schema = serde_json::from_str(&schema.to_json_pretty()).unwrap();
    assert_eq!(parsed, schema);
    assert_eq!(parsed.names(), vec!["b", "a"]);
}
