//! Rule validation: color format and criteria presence.
//!
//! Produces a [`Validation`] value: a verdict plus field-scoped message keys.
//! Message keys are opaque identifiers for an external localization table.

mod color;

use serde::{Deserialize, Serialize};

use crate::criteria::Criteria;
use crate::errors::Errors;

pub use color::is_valid_color;

/// Message keys produced by rule validation.
pub mod keys {
    pub const RULE_ERROR_COLOR_INVALID: &str = "rule_error_color_invalid";
    pub const CRITERIA_ERROR_CRITERIA_REQUIRED: &str = "criteria_error_criteria_required";
}

// ── Result types ────────────────────────────────────────────────────

/// Outcome of one validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validation {
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

/// A message key recorded against a field (`color`) or the rule as a whole (`base`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl Validation {
    pub(crate) fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    pub(crate) fn error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Message keys in the order they were recorded.
    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }

    pub fn has_message(&self, key: &str) -> bool {
        self.errors.iter().any(|e| e.message == key)
    }
}

// ── Public API ──────────────────────────────────────────────────────

/// Validate a rule's color and its criteria.
///
/// Checks run in a fixed order (color, then criteria presence) so message
/// order is stable. The verdict also requires the evaluator's own validity,
/// which contributes no message of its own.
pub fn validate_rule(color: Option<&str>, criteria: &dyn Criteria) -> Validation {
    let mut result = Validation::new();

    if !is_valid_color(color) {
        result.error("color", keys::RULE_ERROR_COLOR_INVALID);
    }

    if criteria.active_criteria().is_empty() {
        result.error(Errors::BASE, keys::CRITERIA_ERROR_CRITERIA_REQUIRED);
    }

    result.valid = criteria.is_valid() && result.errors.is_empty();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::CriteriaFactory;
    use serde_json::json;

    fn criteria(conditions: serde_json::Value) -> Box<dyn Criteria> {
        let conditions = conditions.as_array().cloned().unwrap_or_default();
        CriteriaFactory::default().build(Some("all"), Some(conditions.as_slice()))
    }

    #[test]
    fn valid_rule_has_no_errors() {
        let c = criteria(json!([{"field": "status", "value": "late"}]));
        let result = validate_rule(Some("#A1b2C3"), c.as_ref());
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn color_checked_before_criteria() {
        let c = criteria(json!([]));
        let result = validate_rule(None, c.as_ref());
        assert!(!result.valid);
        assert_eq!(
            result.messages(),
            vec![
                keys::RULE_ERROR_COLOR_INVALID,
                keys::CRITERIA_ERROR_CRITERIA_REQUIRED
            ]
        );
        assert_eq!(result.errors[0].field, "color");
        assert_eq!(result.errors[1].field, "base");
    }

    #[test]
    fn invalid_criteria_fail_without_a_message() {
        let c = criteria(json!([{"field": "status", "op": "like", "value": "late"}]));
        let result = validate_rule(Some("#ffffff"), c.as_ref());
        assert!(!result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn serializes_for_callers() {
        let c = criteria(json!([]));
        let result = validate_rule(Some("#ffffff"), c.as_ref());
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "valid": false,
                "errors": [{"field": "base", "message": "criteria_error_criteria_required"}]
            })
        );
    }
}
