//! Migration discovery and duplicate detection
//!
//! This module walks a project tree for component directories that own a
//! `migrations` subdirectory, classifies the migration files in each one by
//! their leading sequence number, and reports numbers claimed by more than
//! one file.

mod detector;
mod discovery;
mod error;
mod parser;

pub use discovery::ComponentSet;
pub use error::{Result as ScanResult, ScanError};
pub use parser::{DEFAULT_EXTENSION, MigrationPattern};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Name of the subdirectory that marks a component
pub(crate) const MIGRATIONS_DIR: &str = "migrations";

/// Options controlling a scan. None of them change the scan root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Migration file extension, without the leading dot
    pub extension: String,

    /// Skip directories excluded by `.gitignore` / `.ignore` files
    pub respect_gitignore: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            respect_gitignore: false,
        }
    }
}

/// A directory that owns a `migrations` subdirectory
#[derive(Debug, Clone, Serialize)]
pub struct Component {
    /// Base name of the directory (e.g. "accounts")
    pub name: String,

    /// Path to the component directory as discovered
    pub path: PathBuf,

    /// Candidate migration files, sorted by sequence number then filename
    pub migrations: Vec<MigrationFile>,
}

/// A candidate file inside a `migrations` directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationFile {
    pub filename: String,

    /// `None` when the filename does not have the migration shape
    pub number: Option<u32>,
}

/// Several migrations in one component claiming the same sequence number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictEntry {
    pub number: u32,

    /// Always holds two or more filenames, in discovery order
    pub files: Vec<String>,
}

/// Outcome of a scan: component name -> conflicts ordered by number
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub has_conflicts: bool,
    pub conflicts: BTreeMap<String, Vec<ConflictEntry>>,
}

impl ScanReport {
    /// Total number of conflicting sequence numbers across all components
    pub fn conflict_count(&self) -> usize {
        self.conflicts.values().map(Vec::len).sum()
    }
}

/// Discover components under `root` and check them for duplicate numbers
pub fn scan(root: impl AsRef<Path>, config: &ScanConfig) -> ScanResult<ScanReport> {
    let components = ComponentSet::discover_from(root, config)?;
    Ok(components.check_conflicts())
}
