//! Progress reporting service
//!
//! This module separates progress reporting concerns from the copy loop,
//! allowing the CLI to render a progress bar while library callers stay silent.

use crate::copier::CopyStats;
use std::path::Path;

/// Stages of an export run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    /// Walking the dataset root
    Scanning,
    /// Applying threshold and cap
    Filtering,
    /// Writing students.json and manifest.json
    WritingDocuments,
    /// Mirroring images into the output tree
    CopyingImages,
    /// Run finished
    Completed,
}

impl ExportStage {
    /// Get a human-readable description of the stage
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            ExportStage::Scanning => "Scanning dataset",
            ExportStage::Filtering => "Selecting identities",
            ExportStage::WritingDocuments => "Writing student records and manifest",
            ExportStage::CopyingImages => "Copying images",
            ExportStage::Completed => "Export completed",
        }
    }
}

/// Trait for observing an export run
pub trait ProgressReporter {
    /// A new stage started
    fn report_stage(&self, stage: ExportStage);

    /// The copier is about to mirror `total_files` images
    fn report_copy_started(&self, total_files: usize) {
        let _ = total_files;
    }

    /// One image was copied
    fn report_file_copied(&self, destination: &Path);

    /// One image was skipped because the source vanished
    fn report_file_skipped(&self, source: &Path);

    /// Copy finished
    fn report_copy_finished(&self, stats: &CopyStats) {
        let _ = stats;
    }
}

/// No-op progress reporter that discards all progress updates
pub struct NoOpProgressReporter;

impl ProgressReporter for NoOpProgressReporter {
    fn report_stage(&self, _stage: ExportStage) {}

    fn report_file_copied(&self, _destination: &Path) {}

    fn report_file_skipped(&self, _source: &Path) {}
}

/// Console progress reporter that logs through `tracing`
pub struct ConsoleProgressReporter {
    verbose: bool,
}

impl ConsoleProgressReporter {
    /// Create a new console progress reporter
    ///
    /// # Arguments
    /// * `verbose` - Whether to log every copied file
    #[must_use]
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl ProgressReporter for ConsoleProgressReporter {
    fn report_stage(&self, stage: ExportStage) {
        tracing::info!("{}", stage.description());
    }

    fn report_copy_started(&self, total_files: usize) {
        tracing::info!(total_files, "Copying images");
    }

    fn report_file_copied(&self, destination: &Path) {
        if self.verbose {
            tracing::info!(destination = %destination.display(), "Copied");
        }
    }

    fn report_file_skipped(&self, source: &Path) {
        tracing::warn!(source = %source.display(), "Skipped missing image");
    }

    fn report_copy_finished(&self, stats: &CopyStats) {
        tracing::info!(
            copied = stats.copied,
            skipped = stats.skipped,
            directories = stats.directories,
            "Image copy finished"
        );
    }
}

/// Progress bar reporter for interactive terminals
#[cfg(feature = "cli")]
pub struct ProgressBarReporter {
    bar: indicatif::ProgressBar,
}

#[cfg(feature = "cli")]
impl ProgressBarReporter {
    #[must_use]
    pub fn new() -> Self {
        let bar = indicatif::ProgressBar::hidden();
        bar.set_style(default_style());
        Self { bar }
    }
}

#[cfg(feature = "cli")]
impl Default for ProgressBarReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "cli")]
fn default_style() -> indicatif::ProgressStyle {
    match indicatif::ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        Ok(style) => style.progress_chars("#>-"),
        Err(_) => indicatif::ProgressStyle::default_bar(),
    }
}

#[cfg(feature = "cli")]
impl ProgressReporter for ProgressBarReporter {
    fn report_stage(&self, stage: ExportStage) {
        self.bar.set_message(stage.description());
    }

    fn report_copy_started(&self, total_files: usize) {
        self.bar.set_length(total_files as u64);
        self.bar.set_position(0);
        self.bar
            .set_draw_target(indicatif::ProgressDrawTarget::stderr());
    }

    fn report_file_copied(&self, destination: &Path) {
        if let Some(name) = destination.file_name() {
            self.bar.set_message(name.to_string_lossy().into_owned());
        }
        self.bar.inc(1);
    }

    fn report_file_skipped(&self, source: &Path) {
        self.bar
            .println(format!("Skipped missing image: {}", source.display()));
        self.bar.inc(1);
    }

    fn report_copy_finished(&self, stats: &CopyStats) {
        self.bar.finish_with_message(format!(
            "Completed! Copied: {}, Skipped: {}",
            stats.copied, stats.skipped
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    #[derive(Default)]
    struct Recorder {
        stages: RefCell<Vec<ExportStage>>,
        copied: RefCell<Vec<PathBuf>>,
    }

    impl ProgressReporter for Recorder {
        fn report_stage(&self, stage: ExportStage) {
            self.stages.borrow_mut().push(stage);
        }

        fn report_file_copied(&self, destination: &Path) {
            self.copied.borrow_mut().push(destination.to_path_buf());
        }

        fn report_file_skipped(&self, _source: &Path) {}
    }

    #[test]
    fn test_stage_descriptions() {
        assert_eq!(ExportStage::Scanning.description(), "Scanning dataset");
        assert_eq!(ExportStage::Completed.description(), "Export completed");
    }

    #[test]
    fn test_default_methods_are_optional() {
        let recorder = Recorder::default();
        recorder.report_stage(ExportStage::CopyingImages);
        recorder.report_copy_started(3);
        recorder.report_file_copied(Path::new("out/a.jpg"));
        recorder.report_copy_finished(&CopyStats::default());

        assert_eq!(*recorder.stages.borrow(), vec![ExportStage::CopyingImages]);
        assert_eq!(recorder.copied.borrow().len(), 1);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_progress_bar_counts_files() {
        let reporter = ProgressBarReporter::new();
        reporter.report_copy_started(2);
        reporter
            .bar
            .set_draw_target(indicatif::ProgressDrawTarget::hidden());
        reporter.report_file_copied(Path::new("a.jpg"));
        reporter.report_file_skipped(Path::new("b.jpg"));
        assert_eq!(reporter.bar.position(), 2);
    }
}
