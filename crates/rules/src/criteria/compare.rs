//! Single-condition comparison against a timesheet entry field.

use chrono::NaiveDate;
use serde_json::Value;
use tally_core::{FieldValue, TimesheetEntry, DATE_FORMAT};

use crate::schema::{Check, Condition, Operator};

/// Knobs shared by all conditions of one evaluator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Text equality and containment respect letter case.
    pub case_sensitive: bool,
}

/// Evaluate one condition. Malformed conditions never match.
pub(crate) fn condition_matches(
    condition: &Condition,
    entry: &TimesheetEntry,
    options: MatchOptions,
) -> bool {
    let (op, expected) = match condition.check() {
        Check::Compare { op, value } => (*op, value.as_ref()),
        Check::Malformed { .. } => return false,
    };
    let actual = entry.get(condition.field());

    match (op, actual, expected) {
        (Operator::Empty, None, _) => true,
        (Operator::Empty, Some(v), _) => v.is_empty(),
        (Operator::NotEmpty, Some(v), _) => !v.is_empty(),
        // A missing field fails everything else.
        (_, None, _) | (_, _, None) => false,
        (Operator::Eq, Some(a), Some(e)) => equals(a, e, options),
        (Operator::Neq, Some(a), Some(e)) => !equals(a, e, options),
        (Operator::Contains, Some(a), Some(e)) => contains(a, e, options),
        (Operator::NotContains, Some(a), Some(e)) => match text_of(a) {
            Some(_) => !contains(a, e, options),
            None => false,
        },
        (Operator::Gt, Some(a), Some(e)) => ordering(a, e).is_some_and(|o| o.is_gt()),
        (Operator::Gte, Some(a), Some(e)) => ordering(a, e).is_some_and(|o| o.is_ge()),
        (Operator::Lt, Some(a), Some(e)) => ordering(a, e).is_some_and(|o| o.is_lt()),
        (Operator::Lte, Some(a), Some(e)) => ordering(a, e).is_some_and(|o| o.is_le()),
    }
}

fn equals(actual: &FieldValue, expected: &Value, options: MatchOptions) -> bool {
    match expected {
        Value::Number(n) => match (actual.as_f64(), n.as_f64()) {
            (Some(a), Some(e)) => (a - e).abs() <= f64::EPSILON,
            _ => false,
        },
        Value::Bool(e) => match actual {
            FieldValue::Boolean(a) => a == e,
            FieldValue::Text(s) => parse_bool_text(s) == Some(*e),
            _ => false,
        },
        Value::String(e) => match actual {
            FieldValue::Text(a) => text_eq(a, e, options),
            FieldValue::Integer(_) | FieldValue::Float(_) => {
                match (actual.as_f64(), e.trim().parse::<f64>().ok()) {
                    (Some(a), Some(e)) => (a - e).abs() <= f64::EPSILON,
                    _ => false,
                }
            }
            FieldValue::Boolean(a) => parse_bool_text(e) == Some(*a),
            FieldValue::Date(a) => parse_date(e) == Some(*a),
            FieldValue::Null => false,
        },
        _ => false,
    }
}

fn contains(actual: &FieldValue, expected: &Value, options: MatchOptions) -> bool {
    let (Some(haystack), Value::String(needle)) = (text_of(actual), expected) else {
        return false;
    };
    if options.case_sensitive {
        haystack.contains(needle.as_str())
    } else {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Numbers compare numerically, date strings chronologically, anything else not at all.
fn ordering(actual: &FieldValue, expected: &Value) -> Option<std::cmp::Ordering> {
    match expected {
        Value::Number(n) => actual.as_f64()?.partial_cmp(&n.as_f64()?),
        Value::String(s) => Some(actual.as_date()?.cmp(&parse_date(s)?)),
        _ => None,
    }
}

fn text_of(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Text(s) => Some(s.clone()),
        FieldValue::Integer(i) => Some(i.to_string()),
        FieldValue::Float(f) => Some(f.to_string()),
        FieldValue::Boolean(b) => Some(b.to_string()),
        FieldValue::Date(d) => Some(d.format(DATE_FORMAT).to_string()),
        FieldValue::Null => None,
    }
}

fn text_eq(a: &str, b: &str, options: MatchOptions) -> bool {
    if options.case_sensitive {
        a == b
    } else {
        a.to_lowercase() == b.to_lowercase()
    }
}

fn parse_bool_text(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}
