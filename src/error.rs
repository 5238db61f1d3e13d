//! Error handling module for kamae
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Every failure in the tool is local and fatal; nothing here is retried.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for kamae
#[derive(Error, Debug)]
pub enum KamaeError {
    /// Manifest missing, unreadable, malformed or failing validation
    #[error("Error loading manifest from {}: {reason}", path.display())]
    ManifestLoad { path: PathBuf, reason: String },

    /// Manifest parsed fine but produced nothing to choose from
    #[error("No applications found in manifest")]
    EmptyCatalog,

    /// Application carries an install mechanism the plan builder cannot place
    #[error("Unknown install mechanism '{mechanism}' for application '{id}'")]
    UnknownMechanism { id: String, mechanism: String },

    /// App Store application without a store identifier
    #[error("Application '{id}' is installed from the App Store but has no mas_id")]
    MissingStoreId { id: String },

    /// Selection index that does not point into the catalog
    #[error("Selection index {index} is out of range for a catalog of {len} items")]
    InvalidSelection { index: usize, len: usize },

    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for kamae operations
pub type Result<T> = std::result::Result<T, KamaeError>;

impl KamaeError {
    /// Create a manifest load error naming the offending path
    pub fn manifest_load(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::ManifestLoad {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create an unknown mechanism error
    pub fn unknown_mechanism(id: impl Into<String>, mechanism: impl Into<String>) -> Self {
        Self::UnknownMechanism {
            id: id.into(),
            mechanism: mechanism.into(),
        }
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }
}
