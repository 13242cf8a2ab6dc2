//! Parsing and file loading for rule/entry documents.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tally_core::TimesheetEntry;
use tracing::info;

use crate::schema::RuleData;

use super::error::{Result, RuleDocumentError};

/// Serialization format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Pick the format from a file extension (`.json`, `.yml`, `.yaml`).
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Ok(Format::Json),
            Some("yml") | Some("yaml") => Ok(Format::Yaml),
            _ => Err(RuleDocumentError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Accepted top-level shapes of a rules document.
#[derive(Deserialize)]
#[serde(untagged)]
enum RulesDocument {
    List(Vec<RuleData>),
    Wrapped { rules: Vec<RuleData> },
}

impl RulesDocument {
    fn into_rules(self) -> Vec<RuleData> {
        match self {
            RulesDocument::List(rules) | RulesDocument::Wrapped { rules } => rules,
        }
    }
}

/// Parse a rules document from text.
pub fn parse_rules(text: &str, format: Format) -> Result<Vec<RuleData>> {
    let doc: RulesDocument = match format {
        Format::Json => serde_json::from_str(text)?,
        Format::Yaml => serde_yaml::from_str(text)?,
    };
    Ok(doc.into_rules())
}

/// Read and parse a rules file, choosing the format by extension.
pub fn load_rules(path: &Path) -> Result<Vec<RuleData>> {
    let format = Format::from_path(path)?;
    let text = fs::read_to_string(path)?;
    let rules = parse_rules(&text, format)?;
    info!(path = %path.display(), count = rules.len(), "loaded rules");
    Ok(rules)
}

/// Parse a JSON array of entry objects.
pub fn parse_entries(text: &str) -> Result<Vec<TimesheetEntry>> {
    let values: Vec<Value> = serde_json::from_str(text)?;
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            TimesheetEntry::from_json(value).map_err(|e| RuleDocumentError::InvalidEntry {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Read and parse an entries file (always JSON).
pub fn load_entries(path: &Path) -> Result<Vec<TimesheetEntry>> {
    let text = fs::read_to_string(path)?;
    let entries = parse_entries(&text)?;
    info!(path = %path.display(), count = entries.len(), "loaded entries");
    Ok(entries)
}
