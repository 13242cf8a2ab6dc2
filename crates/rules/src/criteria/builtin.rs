//! Built-in evaluators: `all`, `any`, and the fallback for unknown tags.

use serde_json::Value;
use tally_core::TimesheetEntry;

use crate::schema::Condition;

use super::compare::{condition_matches, MatchOptions};
use super::conditions::ConditionSet;
use super::{Criteria, ALL, ANY};

/// Matches when there is at least one active condition and all of them match.
#[derive(Debug, Clone)]
pub struct MatchAll {
    conditions: ConditionSet,
    options: MatchOptions,
}

impl MatchAll {
    pub fn new(conditions: ConditionSet, options: MatchOptions) -> Self {
        Self { conditions, options }
    }

    pub(crate) fn boxed(conditions: ConditionSet, options: MatchOptions) -> Box<dyn Criteria> {
        Box::new(Self::new(conditions, options))
    }
}

impl Criteria for MatchAll {
    fn rule_type(&self) -> &str {
        ALL
    }

    fn matches(&self, entry: &TimesheetEntry) -> bool {
        let active = self.conditions.active();
        !active.is_empty()
            && active
                .iter()
                .all(|c| condition_matches(c, entry, self.options))
    }

    fn is_valid(&self) -> bool {
        self.conditions.all_well_formed()
    }

    fn active_criteria(&self) -> Vec<&Condition> {
        self.conditions.active()
    }

    fn criteria_data(&self) -> Vec<Value> {
        self.conditions.descriptors()
    }
}

/// Matches when any active condition matches.
#[derive(Debug, Clone)]
pub struct MatchAny {
    conditions: ConditionSet,
    options: MatchOptions,
}

impl MatchAny {
    pub fn new(conditions: ConditionSet, options: MatchOptions) -> Self {
        Self { conditions, options }
    }

    pub(crate) fn boxed(conditions: ConditionSet, options: MatchOptions) -> Box<dyn Criteria> {
        Box::new(Self::new(conditions, options))
    }
}

impl Criteria for MatchAny {
    fn rule_type(&self) -> &str {
        ANY
    }

    fn matches(&self, entry: &TimesheetEntry) -> bool {
        self.conditions
            .active()
            .iter()
            .any(|c| condition_matches(c, entry, self.options))
    }

    fn is_valid(&self) -> bool {
        self.conditions.all_well_formed()
    }

    fn active_criteria(&self) -> Vec<&Condition> {
        self.conditions.active()
    }

    fn criteria_data(&self) -> Vec<Value> {
        self.conditions.descriptors()
    }
}

/// Stand-in for a tag no constructor is registered for.
///
/// Keeps the tag and conditions so the rule still serializes faithfully.
#[derive(Debug, Clone)]
pub struct UnrecognizedCriteria {
    rule_type: String,
    conditions: ConditionSet,
}

impl UnrecognizedCriteria {
    pub fn new(rule_type: impl Into<String>, conditions: ConditionSet) -> Self {
        Self {
            rule_type: rule_type.into(),
            conditions,
        }
    }
}

impl Criteria for UnrecognizedCriteria {
    fn rule_type(&self) -> &str {
        &self.rule_type
    }

    fn matches(&self, _entry: &TimesheetEntry) -> bool {
        false
    }

    fn is_valid(&self) -> bool {
        false
    }

    fn active_criteria(&self) -> Vec<&Condition> {
        self.conditions.active()
    }

    fn criteria_data(&self) -> Vec<Value> {
        self.conditions.descriptors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set() -> ConditionSet {
        ConditionSet::parse(&[
            json!({"field": "status", "op": "eq", "value": "late"}),
            json!({"field": "hours", "op": "gt", "value": 8}),
        ])
    }

    fn entry(status: &str, hours: i64) -> TimesheetEntry {
        TimesheetEntry::new()
            .with_field("status", status)
            .with_field("hours", hours)
    }

    #[test]
    fn all_requires_every_condition() {
        let criteria = MatchAll::new(set(), MatchOptions::default());
        assert!(criteria.matches(&entry("late", 10)));
        assert!(!criteria.matches(&entry("late", 6)));
        assert!(!criteria.matches(&entry("onTime", 10)));
    }

    #[test]
    fn any_requires_one_condition() {
        let criteria = MatchAny::new(set(), MatchOptions::default());
        assert!(criteria.matches(&entry("late", 6)));
        assert!(criteria.matches(&entry("onTime", 10)));
        assert!(!criteria.matches(&entry("onTime", 6)));
    }

    #[test]
    fn no_active_conditions_never_match() {
        let empty = ConditionSet::parse(&[json!({})]);
        assert!(!MatchAll::new(empty.clone(), MatchOptions::default()).matches(&entry("late", 10)));
        assert!(!MatchAny::new(empty, MatchOptions::default()).matches(&entry("late", 10)));
    }

    #[test]
    fn malformed_condition_invalidates_but_does_not_panic() {
        let set = ConditionSet::parse(&[
            json!({"field": "status", "op": "eq", "value": "late"}),
            json!({"field": "hours", "op": "around", "value": 8}),
        ]);
        let all = MatchAll::new(set.clone(), MatchOptions::default());
        let any = MatchAny::new(set, MatchOptions::default());
        assert!(!all.is_valid());
        assert!(!any.is_valid());
        assert!(!all.matches(&entry("late", 8)));
        assert!(any.matches(&entry("late", 8)));
        assert_eq!(all.active_criteria().len(), 2);
    }
}
