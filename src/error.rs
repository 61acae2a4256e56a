//! Error types for rs-tagscrape.
//!
//! This module defines the error types returned by config loading and
//! extraction. A page that fails validation is not an error; see
//! [`crate::can_extract`].

use std::path::PathBuf;

use crate::tag::TagDefinition;

/// Error type for config loading and extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required tag definition matched zero elements.
    #[error("No element found in html with {tag}")]
    ElementNotFound {
        /// The definition that matched nothing.
        tag: TagDefinition,
    },

    /// A matched element lacks the attribute selected by `content_type`.
    #[error("Attribute {attribute} not exists in html element")]
    AttributeMissing {
        /// Name of the missing attribute.
        attribute: String,
    },

    /// The configuration document is structurally invalid.
    #[error("Invalid config format: {0}")]
    ConfigFormat(String),

    /// The configuration file could not be read.
    #[error("Failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extraction results could not be serialized.
    #[error("Failed to serialize results: {0}")]
    Serialize(#[source] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigFormat(err.to_string())
    }
}

impl From<serde_yaml_ng::Error> for Error {
    fn from(err: serde_yaml_ng::Error) -> Self {
        Self::ConfigFormat(err.to_string())
    }
}

/// Result type alias for config loading and extraction operations.
pub type Result<T> = std::result::Result<T, Error>;
