//! migclash - Catch duplicate migration numbers before they merge
//!
//! When two branches each add a migration at the same position, both files
//! land in the component's `migrations` directory with the same four-digit
//! prefix. This library finds those collisions so a CI job can block the
//! merge until one side renumbers.
//!
//! # Architecture
//!
//! - **scan** - Component discovery, filename parsing and duplicate detection
//! - **report** - Text and JSON rendering through an explicit output sink
//!
//! # Example
//!
//! ```rust,no_run
//! use migclash::{ComponentSet, Reporter, ScanConfig};
//!
//! // Discover every component below the current directory
//! let components = ComponentSet::discover(&ScanConfig::default()).expect("Failed to scan");
//!
//! // Group by sequence number and keep the collisions
//! let report = components.check_conflicts();
//!
//! let mut reporter = Reporter::new(std::io::stdout());
//! reporter.print_outcome(&report).expect("Failed to write report");
//!
//! if report.has_conflicts {
//!     std::process::exit(1);
//! }
//! ```

pub mod report;
pub mod scan;

pub use report::{Level, Reporter};
pub use scan::*;
