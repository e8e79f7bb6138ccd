//! Services separating cross-cutting concerns from the export stages

pub mod progress;

#[cfg(feature = "cli")]
pub use progress::ProgressBarReporter;
pub use progress::{ConsoleProgressReporter, ExportStage, NoOpProgressReporter, ProgressReporter};
