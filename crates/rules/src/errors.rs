//! Field-scoped error accumulator.
//!
//! Records message keys against field names in insertion order. The declared
//! field list is informational: writes to undeclared keys are accepted, and
//! [`Errors::BASE`] (rule-level failures) is always treated as declared.

use serde::Serialize;
use tracing::trace;

use crate::validation::{FieldError, Validation};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Errors {
    declared: Vec<String>,
    entries: Vec<FieldError>,
}

impl Errors {
    /// Key for failures that belong to the rule rather than one field.
    pub const BASE: &'static str = "base";

    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            declared: fields.into_iter().map(Into::into).collect(),
            entries: Vec::new(),
        }
    }

    pub fn is_declared(&self, field: &str) -> bool {
        field == Self::BASE || self.declared.iter().any(|f| f == field)
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        if !self.is_declared(&field) {
            trace!(field = %field, "recording error under undeclared field");
        }
        self.entries.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Append every error from a validation run.
    pub fn extend_from(&mut self, validation: &Validation) {
        for error in &validation.errors {
            self.add(error.field.clone(), error.message.clone());
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn has_errors(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// All message keys, in insertion order across fields.
    pub fn error_messages(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.message.as_str()).collect()
    }

    /// Message keys recorded against one field.
    pub fn on(&self, field: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order_across_fields() {
        let mut errors = Errors::new(["color"]);
        errors.add("color", "first");
        errors.add(Errors::BASE, "second");
        errors.add("color", "third");

        assert!(errors.has_errors());
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.error_messages(), vec!["first", "second", "third"]);
        assert_eq!(errors.on("color"), vec!["first", "third"]);
        assert_eq!(errors.on(Errors::BASE), vec!["second"]);
    }

    #[test]
    fn accepts_undeclared_fields() {
        let mut errors = Errors::new(["color"]);
        assert!(errors.is_declared("color"));
        assert!(errors.is_declared("base"));
        assert!(!errors.is_declared("label"));

        errors.add("label", "label_error_too_long");
        assert_eq!(errors.on("label"), vec!["label_error_too_long"]);
    }

    #[test]
    fn clear_resets_state() {
        let mut errors = Errors::new(["color"]);
        errors.add("color", "x");
        errors.clear();
        assert!(errors.is_empty());
        assert!(!errors.has_errors());
        assert!(errors.error_messages().is_empty());
        assert!(errors.is_declared("color"));
    }

    #[test]
    fn extend_from_validation() {
        let mut validation = Validation::new();
        validation.error("color", "a");
        validation.error("base", "b");

        let mut errors = Errors::new(["color"]);
        errors.extend_from(&validation);
        assert_eq!(errors.error_messages(), vec!["a", "b"]);
        assert_eq!(errors.iter().next().map(|e| e.field.as_str()), Some("color"));
    }
}
