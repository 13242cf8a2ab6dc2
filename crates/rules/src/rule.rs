//! The rule entity: a row color plus the criteria that decide where it applies.

use tally_core::{IdSource, RandomIds, RuleId, TimesheetEntry};
use tracing::debug;

use crate::criteria::{Criteria, CriteriaFactory};
use crate::errors::Errors;
use crate::schema::{RuleData, RuleJson};
use crate::validation::{validate_rule, Validation};

/// A timesheet styling rule.
///
/// Owns its raw data, a criteria evaluator built from that data, and an error
/// accumulator. The evaluator and accumulator are created once in the
/// constructor and never replaced; the id never changes.
#[derive(Debug)]
pub struct Rule {
    id: RuleId,
    data: RuleData,
    criteria: Box<dyn Criteria>,
    errors: Errors,
    last_valid: Option<bool>,
}

impl Rule {
    /// Build with the built-in criteria types and random ids.
    pub fn new(data: RuleData) -> Self {
        Self::build(data, &CriteriaFactory::default(), &RandomIds)
    }

    /// Build with an explicit factory and id source.
    pub fn build(data: RuleData, factory: &CriteriaFactory, ids: &dyn IdSource) -> Self {
        let criteria = factory.build(data.rule_type.as_deref(), data.conditions.as_deref());
        Self {
            id: ids.next_id(),
            data,
            criteria,
            errors: Errors::new(["color"]),
            last_valid: None,
        }
    }

    pub fn id(&self) -> RuleId {
        self.id
    }

    /// Raw color value, unvalidated.
    pub fn color(&self) -> Option<&str> {
        self.data.color.as_deref()
    }

    pub fn set_color(&mut self, color: Option<String>) {
        self.data.color = color;
    }

    pub fn data(&self) -> &RuleData {
        &self.data
    }

    pub fn criteria(&self) -> &dyn Criteria {
        self.criteria.as_ref()
    }

    pub fn errors(&self) -> &Errors {
        &self.errors
    }

    /// Re-run validation and record the outcome.
    ///
    /// Previous errors are discarded first, so repeated calls on unchanged
    /// data report the same messages exactly once.
    pub fn is_valid(&mut self) -> bool {
        self.errors.clear();
        let validation = self.validate();
        self.errors.extend_from(&validation);
        self.last_valid = Some(validation.valid);
        debug!(
            rule_id = %self.id,
            valid = validation.valid,
            errors = self.errors.len(),
            "validated rule"
        );
        validation.valid
    }

    /// Validation without touching the recorded errors.
    pub fn validate(&self) -> Validation {
        validate_rule(self.color(), self.criteria.as_ref())
    }

    /// Verdict of the last [`is_valid`](Self::is_valid) call, `None` before the first.
    pub fn last_validity(&self) -> Option<bool> {
        self.last_valid
    }

    /// Whether the last [`is_valid`](Self::is_valid) call left errors behind.
    pub fn has_errors(&self) -> bool {
        self.errors.has_errors()
    }

    /// Message keys from the last [`is_valid`](Self::is_valid) call.
    pub fn error_messages(&self) -> Vec<&str> {
        self.errors.error_messages()
    }

    /// Whether `entry` matches this rule's criteria. Validity is not consulted.
    pub fn matches(&self, entry: &TimesheetEntry) -> bool {
        self.criteria.matches(entry)
    }

    /// Serialize with the evaluator's canonical type and conditions.
    pub fn to_json(&self) -> RuleJson {
        RuleJson {
            color: self.data.color.clone(),
            rule_type: self.criteria.rule_type().to_string(),
            conditions: self.criteria.criteria_data(),
        }
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::new(RuleData::default())
    }
}

/// First rule, in slice order, that passed its last validation and matches `entry`.
///
/// Rules that were never validated are skipped.
pub fn first_matching<'a>(rules: &'a [Rule], entry: &TimesheetEntry) -> Option<(usize, &'a Rule)> {
    rules
        .iter()
        .enumerate()
        .find(|(_, rule)| rule.last_validity() == Some(true) && rule.matches(entry))
}

/// Number of rules whose last validation failed.
pub fn invalid_count(rules: &[Rule]) -> usize {
    rules
        .iter()
        .filter(|rule| rule.last_validity() == Some(false))
        .count()
}
