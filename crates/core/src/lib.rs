pub mod config;
pub mod entry;
pub mod error;
pub mod id;

pub use config::{Config, LogConfig, RulesConfig};
pub use entry::*;
pub use error::*;
pub use id::*;
