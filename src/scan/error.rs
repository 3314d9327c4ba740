//! Error types for migration scans
//!
//! Only genuine failures live here. Duplicate numbers are a scan outcome and
//! malformed filenames are filtered out, so neither is represented.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning a project tree
#[derive(Debug, Error)]
pub enum ScanError {
    /// The directory walker could not visit part of the tree under `root`
    #[error("Failed to walk {root}: {reason}")]
    Walk { root: PathBuf, reason: String },

    /// A migrations directory was found but could not be listed
    #[error("Failed to read migrations directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The extension is empty or has more than one leading dot
    #[error("Invalid migration extension '{extension}'")]
    InvalidExtension { extension: String },

    /// Guard for the compiled filename regex. Extensions are escaped before
    /// compiling, so this only fires if the pattern template itself is broken.
    #[error("Invalid migration filename pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Writing the report failed
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the JSON report failed
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using ScanError
pub type Result<T> = std::result::Result<T, ScanError>;
