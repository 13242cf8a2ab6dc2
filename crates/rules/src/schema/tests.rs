//! Tests for schema types.

use super::*;
use serde_json::json;

const RULE_JSON: &str = r##"
{
  "color": "#ff0000",
  "ruleType": "all",
  "conditions": [
    { "field": "status", "op": "eq", "value": "late" },
    { "field": "hours", "op": "gt", "value": 8 }
  ],
  "label": "ignored"
}
"##;

const RULE_YAML: &str = r##"
color: "#00ff00"
ruleType: any
conditions:
  - field: project
    op: contains
    value: apollo
  - field: date
    op: lte
    value: "2024-12-31"
"##;

#[test]
fn parse_rule_data_from_json() {
    let data: RuleData = serde_json::from_str(RULE_JSON).unwrap();
    assert_eq!(data.color.as_deref(), Some("#ff0000"));
    assert_eq!(data.rule_type.as_deref(), Some("all"));
    assert_eq!(data.conditions.as_ref().map(Vec::len), Some(2));
}

#[test]
fn parse_rule_data_from_yaml() {
    let data: RuleData = serde_yaml::from_str(RULE_YAML).unwrap();
    assert_eq!(data.color.as_deref(), Some("#00ff00"));
    assert_eq!(data.rule_type.as_deref(), Some("any"));
    let conditions = data.conditions.unwrap();
    assert_eq!(conditions[0]["field"], json!("project"));
    assert_eq!(conditions[1]["value"], json!("2024-12-31"));
}

#[test]
fn empty_object_is_all_none() {
    let data: RuleData = serde_json::from_str("{}").unwrap();
    assert_eq!(data, RuleData::default());
    assert_eq!(serde_json::to_value(&data).unwrap(), json!({}));
}

#[test]
fn rule_json_converts_back_to_rule_data() {
    let json = RuleJson {
        color: Some("#abcdef".to_string()),
        rule_type: "any".to_string(),
        conditions: vec![json!({"field": "task", "op": "empty"})],
    };
    let serialized = serde_json::to_value(&json).unwrap();
    assert_eq!(serialized["ruleType"], json!("any"));

    let data = RuleData::from(json);
    assert_eq!(data.color.as_deref(), Some("#abcdef"));
    assert_eq!(data.rule_type.as_deref(), Some("any"));
    assert_eq!(data.conditions.unwrap().len(), 1);
}

#[test]
fn rule_json_omits_missing_color() {
    let json = RuleJson {
        color: None,
        rule_type: "all".to_string(),
        conditions: vec![],
    };
    let serialized = serde_json::to_value(&json).unwrap();
    assert!(serialized.get("color").is_none());
}

#[test]
fn operator_round_trips_through_str() {
    for op in [
        Operator::Eq,
        Operator::Neq,
        Operator::Contains,
        Operator::NotContains,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
        Operator::Empty,
        Operator::NotEmpty,
    ] {
        assert_eq!(op.as_str().parse::<Operator>().unwrap(), op);
    }
    assert!("between".parse::<Operator>().is_err());
}

#[test]
fn blank_descriptors() {
    assert_eq!(Descriptor::parse(&json!({})), Descriptor::Blank);
    assert_eq!(Descriptor::parse(&json!({"field": "  ", "op": "eq"})), Descriptor::Blank);
    assert_eq!(Descriptor::parse(&json!({"field": null, "value": 3})), Descriptor::Blank);
}

#[test]
fn non_object_descriptors_are_invalid() {
    assert!(matches!(Descriptor::parse(&json!("status")), Descriptor::Invalid { .. }));
    assert!(matches!(Descriptor::parse(&json!([1, 2])), Descriptor::Invalid { .. }));
    assert!(matches!(
        Descriptor::parse(&json!({"field": 12, "op": "eq", "value": 1})),
        Descriptor::Invalid { .. }
    ));
}

#[test]
fn op_defaults_to_eq_and_field_is_trimmed() {
    let Descriptor::Active(condition) = Descriptor::parse(&json!({"field": " status ", "value": "late"}))
    else {
        panic!("expected active condition");
    };
    assert_eq!(condition.field(), "status");
    assert!(condition.is_well_formed());
    assert_eq!(
        condition.to_descriptor(),
        json!({"field": "status", "op": "eq", "value": "late"})
    );
}

#[test]
fn operand_shape_is_checked_per_operator() {
    let well_formed = [
        json!({"field": "status", "op": "neq", "value": "late"}),
        json!({"field": "billable", "op": "eq", "value": true}),
        json!({"field": "hours", "op": "gte", "value": 7.5}),
        json!({"field": "date", "op": "lt", "value": "2024-01-31"}),
        json!({"field": "note", "op": "contains", "value": "urgent"}),
        json!({"field": "note", "op": "not_contains", "value": ""}),
        json!({"field": "note", "op": "empty"}),
        json!({"field": "note", "op": "not_empty", "value": "ignored"}),
    ];
    for raw in &well_formed {
        match Descriptor::parse(raw) {
            Descriptor::Active(c) => assert!(c.is_well_formed(), "{raw} should be well-formed"),
            other => panic!("{raw} parsed as {other:?}"),
        }
    }

    let malformed = [
        json!({"field": "status", "op": "between", "value": "late"}),
        json!({"field": "status", "op": 3, "value": "late"}),
        json!({"field": "status", "op": "eq"}),
        json!({"field": "status", "op": "eq", "value": null}),
        json!({"field": "status", "op": "eq", "value": ["late"]}),
        json!({"field": "hours", "op": "gt", "value": "lots"}),
        json!({"field": "note", "op": "contains", "value": 4}),
    ];
    for raw in &malformed {
        match Descriptor::parse(raw) {
            Descriptor::Active(c) => {
                assert!(!c.is_well_formed(), "{raw} should be malformed");
                assert!(c.problem().is_some());
                assert_eq!(&c.to_descriptor(), raw);
            }
            other => panic!("{raw} parsed as {other:?}"),
        }
    }
}

#[test]
fn empty_operator_drops_value_in_canonical_form() {
    let Descriptor::Active(condition) =
        Descriptor::parse(&json!({"field": "note", "op": "empty", "value": "x"}))
    else {
        panic!("expected active condition");
    };
    assert_eq!(condition.to_descriptor(), json!({"field": "note", "op": "empty"}));
}
