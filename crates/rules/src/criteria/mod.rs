//! Criteria evaluators: the matching strategy behind a rule.
//!
//! A rule never looks inside its conditions. It hands `ruleType` and the raw
//! condition descriptors to a [`CriteriaFactory`], which picks a [`Criteria`]
//! implementation by tag:
//! - `all`: every active condition must match
//! - `any`: at least one active condition must match
//!
//! Unknown tags produce an evaluator that is never valid and never matches.

mod builtin;
mod compare;
mod conditions;

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;
use tally_core::{RulesConfig, TimesheetEntry};
use tracing::{debug, warn};

use crate::schema::Condition;

pub use builtin::{MatchAll, MatchAny, UnrecognizedCriteria};
pub use compare::MatchOptions;
pub use conditions::ConditionSet;

// ── Evaluator contract ──────────────────────────────────────────────

/// Matching strategy owned by exactly one rule.
pub trait Criteria: fmt::Debug + Send + Sync {
    /// Canonical rule-type tag.
    fn rule_type(&self) -> &str;

    /// Whether `entry` satisfies this evaluator's conditions.
    fn matches(&self, entry: &TimesheetEntry) -> bool;

    /// True when every condition is well-formed for this type.
    fn is_valid(&self) -> bool;

    /// Conditions that name a field and so take part in matching.
    fn active_criteria(&self) -> Vec<&Condition>;

    /// Canonical condition descriptors, suitable for feeding back into a factory.
    fn criteria_data(&self) -> Vec<Value>;
}

// ── Factory ─────────────────────────────────────────────────────────

/// Constructor registered for one rule-type tag.
pub type CriteriaCtor = fn(ConditionSet, MatchOptions) -> Box<dyn Criteria>;

pub const ALL: &str = "all";
pub const ANY: &str = "any";

/// Builds evaluators keyed by rule-type tag.
#[derive(Clone)]
pub struct CriteriaFactory {
    ctors: HashMap<String, CriteriaCtor>,
    default_type: String,
    options: MatchOptions,
}

impl CriteriaFactory {
    /// Factory with no registered types. Every build yields [`UnrecognizedCriteria`].
    pub fn empty() -> Self {
        Self {
            ctors: HashMap::new(),
            default_type: ALL.to_string(),
            options: MatchOptions::default(),
        }
    }

    /// Built-in types with defaults taken from config.
    pub fn from_config(config: &RulesConfig) -> Self {
        Self::default()
            .with_default_type(&config.default_rule_type)
            .with_options(MatchOptions {
                case_sensitive: config.text_case_sensitive,
            })
    }

    pub fn with_default_type(mut self, tag: &str) -> Self {
        self.default_type = normalize_tag(tag);
        self
    }

    pub fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Register (or replace) the constructor for `tag`.
    pub fn register(&mut self, tag: &str, ctor: CriteriaCtor) -> &mut Self {
        self.ctors.insert(normalize_tag(tag), ctor);
        self
    }

    pub fn is_registered(&self, tag: &str) -> bool {
        self.ctors.contains_key(&normalize_tag(tag))
    }

    pub fn default_type(&self) -> &str {
        &self.default_type
    }

    /// Build an evaluator. Absent or blank `rule_type` falls back to the
    /// default type; absent `conditions` means none.
    pub fn build(&self, rule_type: Option<&str>, conditions: Option<&[Value]>) -> Box<dyn Criteria> {
        let set = ConditionSet::parse(conditions.unwrap_or_default());
        let tag = match rule_type.map(str::trim).filter(|t| !t.is_empty()) {
            Some(t) => t,
            None => self.default_type.as_str(),
        };
        for problem in set.problems() {
            debug!(rule_type = %tag, problem, "unusable condition");
        }

        match self.ctors.get(&normalize_tag(tag)) {
            Some(ctor) => ctor(set, self.options),
            None => {
                warn!(rule_type = %tag, "unknown rule type, rule will never match");
                Box::new(UnrecognizedCriteria::new(tag, set))
            }
        }
    }
}

impl Default for CriteriaFactory {
    fn default() -> Self {
        let mut factory = Self::empty();
        factory.register(ALL, MatchAll::boxed);
        factory.register(ANY, MatchAny::boxed);
        factory
    }
}

impl fmt::Debug for CriteriaFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = self.ctors.keys().map(String::as_str).collect();
        tags.sort_unstable();
        f.debug_struct("CriteriaFactory")
            .field("types", &tags)
            .field("default_type", &self.default_type)
            .field("options", &self.options)
            .finish()
    }
}

fn normalize_tag(tag: &str) -> String {
    tag.trim().to_ascii_lowercase()
}

// ── Tests ───────────────────────────────────────────────────────────
