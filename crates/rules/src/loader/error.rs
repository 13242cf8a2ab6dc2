//! Error types for rule document loading.

use std::path::PathBuf;

/// Errors that can occur while reading rule or entry documents.
#[derive(Debug, thiserror::Error)]
pub enum RuleDocumentError {
    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse/deserialization error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parse/deserialization error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File extension is neither JSON nor YAML.
    #[error("Unsupported document format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// An entry in an entries document is not an object.
    #[error("Entry {index} is invalid: {reason}")]
    InvalidEntry { index: usize, reason: String },
}

/// Result alias for document operations.
pub type Result<T> = std::result::Result<T, RuleDocumentError>;
