//! Condition descriptors: `{ "field": ..., "op": ..., "value": ... }`.

use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;

use tally_core::DATE_FORMAT;

/// Comparison operators understood by the built-in evaluators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Neq,
    Contains,
    NotContains,
    Gt,
    Gte,
    Lt,
    Lte,
    Empty,
    NotEmpty,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::Contains => "contains",
            Operator::NotContains => "not_contains",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Empty => "empty",
            Operator::NotEmpty => "not_empty",
        }
    }

    /// Whether the operator reads a `value` operand at all.
    pub fn takes_value(&self) -> bool {
        !matches!(self, Operator::Empty | Operator::NotEmpty)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "eq" => Ok(Operator::Eq),
            "neq" => Ok(Operator::Neq),
            "contains" => Ok(Operator::Contains),
            "not_contains" => Ok(Operator::NotContains),
            "gt" => Ok(Operator::Gt),
            "gte" => Ok(Operator::Gte),
            "lt" => Ok(Operator::Lt),
            "lte" => Ok(Operator::Lte),
            "empty" => Ok(Operator::Empty),
            "not_empty" => Ok(Operator::NotEmpty),
            other => Err(format!("unknown operator '{other}'")),
        }
    }
}

/// One active condition: it names a field, so it takes part in matching.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    field: String,
    check: Check,
}

/// What an active condition tests, or why it cannot test anything.
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    /// A usable comparison. `value` is `None` only for operators without operand.
    Compare { op: Operator, value: Option<Value> },
    /// A named field with an unusable operator or operand. Never matches.
    Malformed { raw: Value, reason: String },
}

impl Condition {
    pub fn compare(field: impl Into<String>, op: Operator, value: Option<Value>) -> Self {
        Self {
            field: field.into(),
            check: Check::Compare { op, value },
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn check(&self) -> &Check {
        &self.check
    }

    pub fn is_well_formed(&self) -> bool {
        matches!(self.check, Check::Compare { .. })
    }

    /// Reason this condition is unusable, if any.
    pub fn problem(&self) -> Option<&str> {
        match &self.check {
            Check::Compare { .. } => None,
            Check::Malformed { reason, .. } => Some(reason),
        }
    }

    /// Canonical descriptor. Malformed conditions are returned verbatim.
    pub fn to_descriptor(&self) -> Value {
        match &self.check {
            Check::Compare { op, value: Some(v) } => {
                json!({ "field": self.field, "op": op.as_str(), "value": v })
            }
            Check::Compare { op, value: None } => json!({ "field": self.field, "op": op.as_str() }),
            Check::Malformed { raw, .. } => raw.clone(),
        }
    }
}

/// Outcome of reading one raw descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor {
    /// An object without a field name: an unfinished row, ignored entirely.
    Blank,
    /// Not a condition object at all. Inactive, but makes the criteria invalid.
    Invalid { raw: Value, reason: String },
    /// Names a field, well-formed or not.
    Active(Condition),
}

impl Descriptor {
    pub fn parse(raw: &Value) -> Self {
        let object = match raw {
            Value::Object(map) => map,
            other => {
                return Descriptor::Invalid {
                    raw: other.clone(),
                    reason: "condition must be an object".to_string(),
                }
            }
        };

        let field = match object.get("field") {
            None | Some(Value::Null) => return Descriptor::Blank,
            Some(Value::String(s)) if s.trim().is_empty() => return Descriptor::Blank,
            Some(Value::String(s)) => s.trim().to_string(),
            Some(_) => {
                return Descriptor::Invalid {
                    raw: raw.clone(),
                    reason: "condition field must be a string".to_string(),
                }
            }
        };

        let check = match read_check(object) {
            Ok((op, value)) => Check::Compare { op, value },
            Err(reason) => Check::Malformed {
                raw: raw.clone(),
                reason,
            },
        };
        Descriptor::Active(Condition { field, check })
    }
}

fn read_check(object: &Map<String, Value>) -> Result<(Operator, Option<Value>), String> {
    let op = match object.get("op") {
        None | Some(Value::Null) => Operator::Eq,
        Some(Value::String(s)) => s.trim().parse::<Operator>()?,
        Some(other) => return Err(format!("operator must be a string, got {other}")),
    };

    if !op.takes_value() {
        return Ok((op, None));
    }

    let value = object
        .get("value")
        .filter(|v| !v.is_null())
        .ok_or_else(|| format!("operator '{op}' requires a value"))?;

    let fits = match op {
        Operator::Eq | Operator::Neq => {
            matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
        }
        Operator::Contains | Operator::NotContains => {
            matches!(value, Value::String(_))
        }
        Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte => match value {
            Value::Number(_) => true,
            Value::String(s) => chrono::NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).is_ok(),
            _ => false,
        },
        Operator::Empty | Operator::NotEmpty => true,
    };

    if fits {
        Ok((op, Some(value.clone())))
    } else {
        Err(format!("value {value} does not fit operator '{op}'"))
    }
}
