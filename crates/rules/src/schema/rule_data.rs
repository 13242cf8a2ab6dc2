//! Plain rule configuration shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw rule configuration as supplied by the caller.
///
/// All fields are optional: an empty object is a legal (but invalid) rule.
/// `conditions` is opaque here and only interpreted by the criteria evaluator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Value>>,
}

impl RuleData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn rule_type(mut self, rule_type: impl Into<String>) -> Self {
        self.rule_type = Some(rule_type.into());
        self
    }

    pub fn conditions(mut self, conditions: Vec<Value>) -> Self {
        self.conditions = Some(conditions);
        self
    }
}

/// Serialized rule: color from the raw data, type and conditions in the
/// evaluator's canonical form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub rule_type: String,
    pub conditions: Vec<Value>,
}

impl From<RuleJson> for RuleData {
    fn from(json: RuleJson) -> Self {
        Self {
            color: json.color,
            rule_type: Some(json.rule_type),
            conditions: Some(json.conditions),
        }
    }
}
