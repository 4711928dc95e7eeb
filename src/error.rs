//! Error types for nextdrill
//!
//! Centralized error handling using thiserror. The scheduling engine itself never
//! fails; these errors belong to the collaborators around it (storage, catalog
//! loading, result recording).

use std::path::PathBuf;
use thiserror::Error;

/// All error types that can occur in nextdrill
#[derive(Debug, Error)]
pub enum DrillError {
    /// Run not found in storage
    #[error("Run not found: {0}")]
    RunNotFound(String),

    /// Invalid state transition or operation
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Vocab or template catalog could not be loaded
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Storage/persistence error
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog file that is not valid YAML for its shape
    #[error("YAML error in {}: {source}", .path.display())]
    Yaml { path: PathBuf, source: serde_yaml::Error },

    /// Catalog file that is not valid JSON for its shape
    #[error("JSON error in {}: {source}", .path.display())]
    JsonFile { path: PathBuf, source: serde_json::Error },
}

/// Result type alias for nextdrill operations
pub type Result<T> = std::result::Result<T, DrillError>;
