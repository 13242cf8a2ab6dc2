//! Rule input/output shapes and condition descriptor parsing.
//!
//! - `RuleData`: constructor input, every field optional
//! - `RuleJson`: serialized form produced by `Rule::to_json`
//! - `Condition` / `Operator`: parsed view of one condition descriptor

mod condition;
mod rule_data;

pub use condition::*;
pub use rule_data::*;

#[cfg(test)]
mod tests;
