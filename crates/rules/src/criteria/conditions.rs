//! Parsed condition list shared by every built-in evaluator.

use serde_json::Value;

use crate::schema::{Condition, Descriptor};

/// Non-blank descriptors in their original order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionSet {
    items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq)]
enum Item {
    Active(Condition),
    Invalid { raw: Value, reason: String },
}

impl ConditionSet {
    /// Parse raw descriptors. Blank rows are dropped.
    pub fn parse(raw: &[Value]) -> Self {
        let items = raw
            .iter()
            .filter_map(|value| match Descriptor::parse(value) {
                Descriptor::Blank => None,
                Descriptor::Invalid { raw, reason } => Some(Item::Invalid { raw, reason }),
                Descriptor::Active(condition) => Some(Item::Active(condition)),
            })
            .collect();
        Self { items }
    }

    pub fn active(&self) -> Vec<&Condition> {
        self.items
            .iter()
            .filter_map(|item| match item {
                Item::Active(c) => Some(c),
                Item::Invalid { .. } => None,
            })
            .collect()
    }

    /// True when no descriptor is invalid and every active condition is well-formed.
    pub fn all_well_formed(&self) -> bool {
        self.items.iter().all(|item| match item {
            Item::Active(c) => c.is_well_formed(),
            Item::Invalid { .. } => false,
        })
    }

    /// Reasons for every unusable descriptor, in order.
    pub fn problems(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| match item {
                Item::Active(c) => c.problem(),
                Item::Invalid { reason, .. } => Some(reason.as_str()),
            })
            .collect()
    }

    /// Canonical descriptors; unusable ones pass through verbatim.
    pub fn descriptors(&self) -> Vec<Value> {
        self.items
            .iter()
            .map(|item| match item {
                Item::Active(c) => c.to_descriptor(),
                Item::Invalid { raw, .. } => raw.clone(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_rows_are_dropped_and_order_is_kept() {
        let set = ConditionSet::parse(&[
            json!({"field": "b", "value": 1}),
            json!({}),
            json!("junk"),
            json!({"field": "a", "op": "nope", "value": 1}),
        ]);

        assert_eq!(set.len(), 3);
        let fields: Vec<&str> = set.active().iter().map(|c| c.field()).collect();
        assert_eq!(fields, vec!["b", "a"]);
        assert!(!set.all_well_formed());
        assert_eq!(set.problems().len(), 2);
        assert_eq!(
            set.descriptors(),
            vec![
                json!({"field": "b", "op": "eq", "value": 1}),
                json!("junk"),
                json!({"field": "a", "op": "nope", "value": 1}),
            ]
        );
    }

    #[test]
    fn canonical_descriptors_reparse_identically() {
        let set = ConditionSet::parse(&[
            json!({"field": " hours ", "op": "gt", "value": 8}),
            json!({"field": "note", "op": "empty", "value": "drop me"}),
            json!(42),
        ]);
        let again = ConditionSet::parse(&set.descriptors());
        assert_eq!(again, set);
        assert_eq!(again.descriptors(), set.descriptors());
    }

    #[test]
    fn empty_set_is_well_formed() {
        let set = ConditionSet::parse(&[json!({}), json!({"field": ""})]);
        assert!(set.is_empty());
        assert!(set.active().is_empty());
        assert!(set.all_well_formed());
    }
}
