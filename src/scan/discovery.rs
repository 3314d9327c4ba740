//! ComponentSet - every component with a migrations directory under a root

use super::error::{Result, ScanError};
use super::parser::MigrationPattern;
use super::{Component, MIGRATIONS_DIR, MigrationFile, ScanConfig};
use ignore::WalkBuilder;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// All components found by one walk of a project tree
#[derive(Debug, Clone)]
pub struct ComponentSet {
    items: Vec<Component>,
    root: PathBuf,
}

impl ComponentSet {
    /// Discover components below the current directory
    pub fn discover(config: &ScanConfig) -> Result<Self> {
        Self::discover_from(".", config)
    }

    /// Discover components below `root`.
    ///
    /// Any traversal error aborts the scan: a partial walk must never be
    /// reported as clean.
    pub fn discover_from(root: impl AsRef<Path>, config: &ScanConfig) -> Result<Self> {
        let root = root.as_ref();
        let pattern = MigrationPattern::new(&config.extension)?;

        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .sort_by_file_name(|a, b| a.cmp(b));
        if config.respect_gitignore {
            builder
                .git_ignore(true)
                .git_exclude(true)
                .ignore(true)
                .parents(true)
                .require_git(false);
        }

        let mut items = Vec::new();

        for entry in builder.build() {
            let entry = entry.map_err(|e| ScanError::Walk {
                root: root.to_path_buf(),
                reason: e.to_string(),
            })?;

            if !entry.file_type().is_some_and(|t| t.is_dir()) {
                continue;
            }

            let dir = entry.path();
            let migrations_dir = dir.join(MIGRATIONS_DIR);
            if !is_migrations_dir(&migrations_dir)? {
                continue;
            }

            let name = component_name(dir);
            let migrations = list_migrations(&migrations_dir, &pattern)?;
            debug!(
                component = %name,
                path = %dir.display(),
                files = migrations.len(),
                "discovered component"
            );

            items.push(Component {
                name,
                path: dir.to_path_buf(),
                migrations,
            });
        }

        Ok(Self {
            items,
            root: root.to_path_buf(),
        })
    }

    /// Root the walk started from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get all components in walk order
    pub fn all(&self) -> &[Component] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Component> {
        self.items.iter()
    }
}

// ComponentSet is extended in detector.rs with check_conflicts()

/// Base name of a component directory.
///
/// A root given as "." has no file name of its own, so fall back to the
/// canonical path and finally to the path as written.
fn component_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .or_else(|| {
            dir.canonicalize()
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        })
        .unwrap_or_else(|| dir.display().to_string())
}

/// Whether `path` is a directory to scan.
///
/// A missing entry or a dangling symlink is no component. An entry that exists
/// but cannot be resolved (a symlink loop, a permission failure) is an error.
fn is_migrations_dir(path: &Path) -> Result<bool> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.is_dir()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(ScanError::ReadDir {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Candidate migration files directly inside `dir`, sorted by sequence
/// number (unparseable names first) and then by filename
fn list_migrations(dir: &Path, pattern: &MigrationPattern) -> Result<Vec<MigrationFile>> {
    let read_error = |source| ScanError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();

    for entry in fs::read_dir(dir).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;

        let filename = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                debug!(name = ?raw, dir = %dir.display(), "skipping non UTF-8 filename");
                continue;
            }
        };

        if !pattern.is_candidate(&filename) {
            trace!(%filename, "not a migration candidate");
            continue;
        }

        if !entry.path().is_file() {
            trace!(%filename, "not a regular file");
            continue;
        }

        let number = pattern.sequence_number(&filename);
        if number.is_none() {
            trace!(%filename, "no sequence number");
        }
        files.push(MigrationFile { filename, number });
    }

    files.sort_by(|a, b| {
        a.number
            .cmp(&b.number)
            .then_with(|| a.filename.cmp(&b.filename))
    });

    Ok(files)
}
