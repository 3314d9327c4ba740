//! Human-readable and JSON rendering of scan results
//!
//! Every line goes through a [`Reporter`] that owns its output stream, so a
//! scan's report can be written to stdout, a file, or a buffer in tests.

use crate::scan::{ConflictEntry, ScanReport, ScanResult};
use colored::Colorize;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Severity of a report line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

/// Report sink scoped to one scan
pub struct Reporter<W> {
    out: W,
    color: bool,
}

impl<W: Write> Reporter<W> {
    /// Create a reporter that styles lines by level
    pub fn new(out: W) -> Self {
        Self { out, color: true }
    }

    /// Create a reporter that writes unstyled text
    pub fn plain(out: W) -> Self {
        Self { out, color: false }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write one line at the given level
    pub fn emit(&mut self, level: Level, message: &str) -> io::Result<()> {
        if !self.color {
            return writeln!(self.out, "{}", message);
        }

        let styled = match level {
            Level::Info => message.bright_green().bold(),
            Level::Warn => message.yellow(),
            Level::Error => message.bright_red().bold(),
        };
        writeln!(self.out, "{}", styled)
    }

    fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    /// Print the duplicate listing. Writes nothing for an empty mapping.
    pub fn print_conflicts(
        &mut self,
        conflicts: &BTreeMap<String, Vec<ConflictEntry>>,
    ) -> io::Result<()> {
        if conflicts.is_empty() {
            return Ok(());
        }

        self.blank()?;
        self.emit(Level::Warn, "🔴 Duplicate Migration Numbers Found:")?;

        // BTreeMap iteration is already sorted by component name
        for (component, entries) in conflicts {
            self.blank()?;
            self.emit(Level::Warn, &format!("[{}]", component))?;

            let mut entries: Vec<&ConflictEntry> = entries.iter().collect();
            entries.sort_by_key(|entry| entry.number);

            for entry in entries {
                self.emit(Level::Warn, &format!("  Migration #{}:", entry.number))?;
                for file in &entry.files {
                    self.emit(Level::Warn, &format!("    - {}", file))?;
                }
            }
        }

        Ok(())
    }

    /// Print the full outcome of a scan: the listing plus summary, or the
    /// success message when nothing conflicts
    pub fn print_outcome(&mut self, report: &ScanReport) -> io::Result<()> {
        if report.has_conflicts {
            self.print_conflicts(&report.conflicts)?;
            self.blank()?;
            self.emit(Level::Error, "❌ Found conflicting migration numbers!")?;
            self.emit(
                Level::Error,
                "Please renumber your migrations to avoid conflicts.",
            )?;
        } else {
            self.blank()?;
            self.emit(Level::Info, "✅ No duplicate migration numbers found!")?;
        }
        self.out.flush()
    }

    /// Print the report as pretty JSON
    pub fn print_json(&mut self, report: &ScanReport) -> ScanResult<()> {
        let json = serde_json::to_string_pretty(report)?;
        writeln!(self.out, "{}", json)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(number: u32, files: &[&str]) -> ConflictEntry {
        ConflictEntry {
            number,
            files: files.iter().map(|f| f.to_string()).collect(),
        }
    }

    fn render(report: &ScanReport) -> String {
        let mut reporter = Reporter::plain(Vec::new());
        reporter.print_outcome(report).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    fn two_component_report() -> ScanReport {
        let mut conflicts = BTreeMap::new();
        conflicts.insert(
            "products".to_string(),
            vec![entry(
                101,
                &[
                    "0101_add_product_category.py",
                    "0101_product_pricing_fields.py",
                ],
            )],
        );
        conflicts.insert(
            "accounts".to_string(),
            vec![entry(
                3,
                &["0003_add_user_fields.py", "0003_update_user_model.py"],
            )],
        );
        ScanReport {
            has_conflicts: true,
            conflicts,
        }
    }

    #[test]
    fn renders_conflicts_sorted_by_component() {
        let expected = "\n\
            🔴 Duplicate Migration Numbers Found:\n\
            \n\
            [accounts]\n\
            \x20 Migration #3:\n\
            \x20   - 0003_add_user_fields.py\n\
            \x20   - 0003_update_user_model.py\n\
            \n\
            [products]\n\
            \x20 Migration #101:\n\
            \x20   - 0101_add_product_category.py\n\
            \x20   - 0101_product_pricing_fields.py\n\
            \n\
            ❌ Found conflicting migration numbers!\n\
            Please renumber your migrations to avoid conflicts.\n";

        assert_eq!(render(&two_component_report()), expected);
    }

    #[test]
    fn renders_success_message_when_clean() {
        assert_eq!(
            render(&ScanReport::default()),
            "\n✅ No duplicate migration numbers found!\n"
        );
    }

    #[test]
    fn empty_mapping_prints_nothing() {
        let mut reporter = Reporter::plain(Vec::new());
        reporter.print_conflicts(&BTreeMap::new()).unwrap();
        assert!(reporter.into_inner().is_empty());
    }

    #[test]
    fn entries_are_printed_by_number() {
        let mut conflicts = BTreeMap::new();
        conflicts.insert(
            "core".to_string(),
            vec![entry(9, &["0009_a.py", "0009_b.py"]), entry(2, &["0002_a.py", "0002_b.py"])],
        );

        let mut reporter = Reporter::plain(Vec::new());
        reporter.print_conflicts(&conflicts).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();

        let two = text.find("Migration #2:").unwrap();
        let nine = text.find("Migration #9:").unwrap();
        assert!(two < nine);
    }

    #[test]
    fn rendering_is_deterministic() {
        let report = two_component_report();
        assert_eq!(render(&report), render(&report));
    }

    #[test]
    fn json_output_has_stable_shape() {
        let mut reporter = Reporter::plain(Vec::new());
        reporter.print_json(&two_component_report()).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["has_conflicts"], true);
        assert_eq!(value["conflicts"]["accounts"][0]["number"], 3);
        assert_eq!(
            value["conflicts"]["products"][0]["files"][1],
            "0101_product_pricing_fields.py"
        );
    }
}
