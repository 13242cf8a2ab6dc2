//! Rule and entry documents read from JSON or YAML.
//!
//! A rules document is either a bare list of rule objects or an object with a
//! `rules` list. Entries are always a JSON array of objects.

mod core;
mod error;


pub use self::core::{load_entries, load_rules, parse_entries, parse_rules, Format};
pub use self::error::{Result, RuleDocumentError};
