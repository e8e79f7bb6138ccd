#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]

//! # Roster Export
//!
//! Turns a face dataset laid out as one directory per identity
//! (`root/<Person_Name>/<images>`) into the files a classroom attendance app
//! imports: `students.json`, `manifest.json` and a mirrored `images/` tree.
//!
//! The export runs as a straight pipeline:
//!
//! 1. **Scan** the dataset root for identity directories and their images
//! 2. **Filter** by a minimum photo count and an optional cap
//! 3. **Build** one student record per retained identity
//! 4. **Build** a manifest summarizing the selection
//! 5. **Copy** the retained images next to the documents
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use roster_export::{ExportConfig, ExportOutcome, ExportPipeline, NoOpProgressReporter};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = ExportConfig::builder("datasets/lfw_funneled", "exports/lfw")
//!     .min_images(2)
//!     .limit(100)
//!     .build()?;
//!
//! match ExportPipeline::new(config).run(&NoOpProgressReporter)? {
//!     ExportOutcome::Exported(summary) => {
//!         println!("{} students written to {}", summary.persons, summary.students_path.display());
//!     },
//!     ExportOutcome::SourceMissing { path } => eprintln!("no dataset at {}", path.display()),
//!     ExportOutcome::NothingSelected { scanned } => eprintln!("{scanned} identities, none selected"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): the `roster-export` binary, progress bar and tracing setup
//! - `tracing-json`: JSON log lines
//! - `tracing-files`: log to a file instead of stderr
//!
//! The library itself only emits `tracing` events; install a subscriber in the
//! application to see them.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod copier;
pub mod error;
pub mod filter;
pub mod fixtures;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod records;
pub mod scanner;
pub mod services;
#[cfg(feature = "cli")]
pub mod tracing_config;

pub use config::{ExportConfig, ExportConfigBuilder};
pub use copier::{copy_images, CopyStats};
pub use error::{ExportError, Result};
pub use filter::filter;
pub use fixtures::{MockDataset, MockDatasetConfig, MockDatasetSummary, OverlayError};
pub use manifest::{build_manifest, Manifest, ManifestPerson};
pub use output::write_json_document;
pub use pipeline::{ExportOutcome, ExportPipeline, ExportSummary};
pub use records::{build_records, Cohort, StudentRecord};
pub use scanner::{scan, PersonEntry};
pub use services::{ConsoleProgressReporter, ExportStage, NoOpProgressReporter, ProgressReporter};

#[cfg(feature = "cli")]
pub use tracing_config::{
    cli_tracing_config, init_cli_tracing, TracingConfig, TracingFormat, TracingOutput,
};
