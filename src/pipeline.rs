//! Export pipeline
//!
//! Runs Scanner, Filter, the two document builders and the Copier in order
//! against one [`ExportConfig`].

use crate::config::ExportConfig;
use crate::copier::{copy_images, CopyStats};
use crate::error::Result;
use crate::filter::filter;
use crate::manifest::build_manifest;
use crate::output::{ensure_output_dir, write_json_document};
use crate::records::build_records;
use crate::scanner::scan;
use crate::services::progress::{ExportStage, ProgressReporter};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Result of a completed export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Identities found by the scan
    pub scanned: usize,
    /// Identities written to students.json
    pub persons: usize,
    /// Images listed in the manifest
    pub images: usize,
    pub students_path: PathBuf,
    pub manifest_path: PathBuf,
    /// `None` when copying was disabled
    pub copy: Option<CopyStats>,
    pub elapsed: Duration,
}

/// How an export run ended
///
/// Only [`ExportOutcome::Exported`] writes anything. The other two are
/// expected conditions, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Exported(ExportSummary),
    /// The dataset root does not exist
    SourceMissing { path: PathBuf },
    /// No identity passed the threshold
    NothingSelected { scanned: usize },
}

impl ExportOutcome {
    #[must_use]
    pub fn is_exported(&self) -> bool {
        matches!(self, Self::Exported(_))
    }

    #[must_use]
    pub fn summary(&self) -> Option<&ExportSummary> {
        match self {
            Self::Exported(summary) => Some(summary),
            _ => None,
        }
    }
}

pub struct ExportPipeline {
    config: ExportConfig,
}

impl ExportPipeline {
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Run the export
    ///
    /// # Errors
    /// - [`crate::ExportError::Scan`] when the dataset cannot be enumerated
    /// - [`crate::ExportError::Io`] when the output tree cannot be written
    /// - [`crate::ExportError::Serialization`] when a document cannot be rendered
    pub fn run(&self, reporter: &dyn ProgressReporter) -> Result<ExportOutcome> {
        let config = &self.config;
        let span = tracing::info_span!(
            "export",
            source = %config.source_path.display(),
            output = %config.output_path.display()
        );
        let _guard = span.enter();
        let start = Instant::now();

        reporter.report_stage(ExportStage::Scanning);
        let scanned = scan(&config.source_path)?;
        if scanned.is_empty() && !config.source_path.exists() {
            tracing::warn!(
                path = %config.source_path.display(),
                "Dataset not found, nothing exported"
            );
            return Ok(ExportOutcome::SourceMissing {
                path: config.source_path.clone(),
            });
        }
        let scanned_count = scanned.len();

        reporter.report_stage(ExportStage::Filtering);
        let selected = filter(scanned, config.min_images, config.limit);
        tracing::info!(
            scanned = scanned_count,
            selected = selected.len(),
            min_images = config.min_images,
            limit = config.limit,
            "Identities selected"
        );
        if selected.is_empty() {
            tracing::warn!(
                scanned = scanned_count,
                min_images = config.min_images,
                "No identity meets the photo threshold, nothing exported"
            );
            return Ok(ExportOutcome::NothingSelected {
                scanned: scanned_count,
            });
        }

        reporter.report_stage(ExportStage::WritingDocuments);
        ensure_output_dir(&config.output_path)?;

        let records = build_records(&selected, &config.cohort);
        let students_path = config.students_path();
        write_json_document(&students_path, &records)?;

        let manifest = build_manifest(&selected, &config.source_path);
        let manifest_path = config.manifest_path();
        write_json_document(&manifest_path, &manifest)?;

        let copy = if config.skip_copy {
            tracing::info!("Image copy disabled");
            None
        } else {
            reporter.report_stage(ExportStage::CopyingImages);
            Some(copy_images(
                &selected,
                &config.source_path,
                &config.output_path,
                reporter,
            )?)
        };

        reporter.report_stage(ExportStage::Completed);
        let summary = ExportSummary {
            scanned: scanned_count,
            persons: manifest.total_persons,
            images: manifest.total_images,
            students_path,
            manifest_path,
            copy,
            elapsed: start.elapsed(),
        };
        tracing::info!(
            persons = summary.persons,
            images = summary.images,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Export completed"
        );
        Ok(ExportOutcome::Exported(summary))
    }
}
