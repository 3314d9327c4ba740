//! Duplicate sequence number detection for Component and ComponentSet

use super::{Component, ComponentSet, ConflictEntry, ScanReport};
use std::collections::BTreeMap;
use tracing::debug;

impl Component {
    /// Sequence numbers claimed by more than one file, ordered by number.
    ///
    /// Files without a sequence number take no part. Within an entry the
    /// filenames keep their discovery order.
    pub fn conflicts(&self) -> Vec<ConflictEntry> {
        let mut numbers: BTreeMap<u32, Vec<String>> = BTreeMap::new();

        for migration in &self.migrations {
            if let Some(number) = migration.number {
                numbers
                    .entry(number)
                    .or_default()
                    .push(migration.filename.clone());
            }
        }

        numbers
            .into_iter()
            .filter(|(_, files)| files.len() > 1)
            .map(|(number, files)| ConflictEntry { number, files })
            .collect()
    }
}

impl ComponentSet {
    /// Check every component and collect the ones with duplicate numbers.
    ///
    /// Components sharing a base name share a report key; their entries are
    /// merged and kept ordered by number.
    pub fn check_conflicts(&self) -> ScanReport {
        let mut conflicts: BTreeMap<String, Vec<ConflictEntry>> = BTreeMap::new();

        for component in self.iter() {
            let found = component.conflicts();
            if found.is_empty() {
                continue;
            }

            debug!(
                component = %component.name,
                count = found.len(),
                "duplicate migration numbers"
            );

            let entries = conflicts.entry(component.name.clone()).or_default();
            entries.extend(found);
            entries.sort_by_key(|entry| entry.number);
        }

        ScanReport {
            has_conflicts: !conflicts.is_empty(),
            conflicts,
        }
    }
}
