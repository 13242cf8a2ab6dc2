//! Timesheet row-styling rule engine.
//!
//! This crate provides:
//! - [`Rule`]: a row color bundled with match criteria, self-validating
//! - Criteria evaluators (`all` / `any`) selected by rule type through a factory
//! - A field-scoped error accumulator and a pure validation result
//! - JSON/YAML rule document loading

pub mod criteria;
pub mod errors;
pub mod loader;
pub mod rule;
pub mod schema;
pub mod validation;

pub use errors::Errors;
pub use rule::Rule;
pub use schema::{RuleData, RuleJson};
pub use validation::Validation;
