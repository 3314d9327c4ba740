//! Migration filename parsing

use super::error::{Result, ScanError};
use regex::Regex;

/// Extension used by Django-style migration modules
pub const DEFAULT_EXTENSION: &str = "py";

/// Compiled matcher for `<4 digits>_<slug>.<ext>` filenames
#[derive(Debug, Clone)]
pub struct MigrationPattern {
    regex: Regex,
    suffix: String,
}

impl MigrationPattern {
    /// Build a pattern for the given extension. One leading dot is optional,
    /// so "py" and ".py" are the same; an empty extension is rejected.
    pub fn new(extension: &str) -> Result<Self> {
        let extension = extension.strip_prefix('.').unwrap_or(extension);
        if extension.is_empty() || extension.starts_with('.') {
            return Err(ScanError::InvalidExtension {
                extension: extension.to_string(),
            });
        }

        // [0-9] rather than \d: Rust's \d is Unicode-aware
        let regex = Regex::new(&format!(
            r"^([0-9]{{4}})_.*\.{}$",
            regex::escape(extension)
        ))?;

        Ok(Self {
            regex,
            suffix: format!(".{}", extension),
        })
    }

    /// Leading sequence number of a migration filename, or `None` if the name
    /// does not have the migration shape. `0000_*` parses to `Some(0)`.
    pub fn sequence_number(&self, filename: &str) -> Option<u32> {
        let captures = self.regex.captures(filename)?;
        captures.get(1)?.as_str().parse().ok()
    }

    /// Whether a file in a migrations directory is a candidate at all.
    ///
    /// Package markers such as `__init__.py` are never candidates.
    pub fn is_candidate(&self, filename: &str) -> bool {
        filename.ends_with(&self.suffix) && !filename.starts_with("__")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn py() -> MigrationPattern {
        MigrationPattern::new(DEFAULT_EXTENSION).unwrap()
    }

    #[test]
    fn parses_four_digit_prefix() {
        let pattern = py();
        assert_eq!(pattern.sequence_number("0003_add_user_fields.py"), Some(3));
        assert_eq!(pattern.sequence_number("0101_product_pricing.py"), Some(101));
        assert_eq!(pattern.sequence_number("9999_last.py"), Some(9999));
    }

    #[test]
    fn zero_is_a_real_sequence_number() {
        let pattern = py();
        assert_eq!(pattern.sequence_number("0000_initial.py"), Some(0));
    }

    #[test]
    fn rejects_wrong_digit_counts() {
        let pattern = py();
        assert_eq!(pattern.sequence_number("003_short.py"), None);
        assert_eq!(pattern.sequence_number("00003_long.py"), None);
        assert_eq!(pattern.sequence_number("_0003.py"), None);
    }

    #[test]
    fn rejects_missing_underscore_or_extension() {
        let pattern = py();
        assert_eq!(pattern.sequence_number("0003-add.py"), None);
        assert_eq!(pattern.sequence_number("0003_add.pyc"), None);
        assert_eq!(pattern.sequence_number("0003_add.txt"), None);
        assert_eq!(pattern.sequence_number("0003_add"), None);
        assert_eq!(pattern.sequence_number("config.txt"), None);
    }

    #[test]
    fn empty_slug_still_matches() {
        let pattern = py();
        assert_eq!(pattern.sequence_number("0007_.py"), Some(7));
    }

    #[test]
    fn non_ascii_digits_do_not_match() {
        let pattern = py();
        // Arabic-Indic digits
        assert_eq!(pattern.sequence_number("٠٠٠٣_add.py"), None);
    }

    #[test]
    fn extension_is_matched_literally() {
        let pattern = MigrationPattern::new("sql").unwrap();
        assert_eq!(pattern.sequence_number("0012_create_users.sql"), Some(12));
        assert_eq!(pattern.sequence_number("0012_create_users.py"), None);

        // Dots in the extension must not act as wildcards
        let pattern = MigrationPattern::new("up.sql").unwrap();
        assert_eq!(pattern.sequence_number("0001_init.up.sql"), Some(1));
        assert_eq!(pattern.sequence_number("0001_init.upXsql"), None);
    }

    #[test]
    fn leading_dot_is_optional() {
        let pattern = MigrationPattern::new(".py").unwrap();
        assert_eq!(pattern.sequence_number("0003_add.py"), Some(3));
        assert!(pattern.is_candidate("0003_add.py"));
        assert!(!pattern.is_candidate("0003_add.txt"));
    }

    #[test]
    fn empty_extension_is_rejected() {
        for ext in ["", ".", "..py"] {
            assert!(matches!(
                MigrationPattern::new(ext),
                Err(ScanError::InvalidExtension { .. })
            ));
        }
    }

    #[test]
    fn candidates_exclude_dunder_files() {
        let pattern = py();
        assert!(pattern.is_candidate("0001_initial.py"));
        assert!(pattern.is_candidate("helpers.py"));
        assert!(!pattern.is_candidate("__init__.py"));
        assert!(!pattern.is_candidate("__0001_hidden.py"));
        assert!(!pattern.is_candidate("config.txt"));
    }
}
