//! Image mirroring
//!
//! Copies each retained identity's images from `root/<dir>/<file>` to
//! `output/images/<dir>/<file>`. Bytes are streamed file-to-file and the
//! source timestamps are carried over, so a rerun leaves identical files.

use crate::error::{ExportError, Result};
use crate::scanner::PersonEntry;
use crate::services::progress::ProgressReporter;
use std::fs::{self, File, FileTimes};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Name of the image tree below the output directory
pub const IMAGES_DIR_NAME: &str = "images";

/// Counters for one copy pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Images written to the output tree
    pub copied: usize,
    /// Images listed by the scan but missing at copy time
    pub skipped: usize,
    /// Identity directories ensured under `images/`
    pub directories: usize,
}

/// Destination directory for one identity
pub fn person_output_dir(output: &Path, directory_name: &str) -> PathBuf {
    output.join(IMAGES_DIR_NAME).join(directory_name)
}

/// Mirror the images of every entry into `output/images/`
///
/// A source file that disappeared since the scan is skipped and reported; the
/// rest of the batch continues. Any other failure aborts the copy.
///
/// # Errors
/// Returns [`ExportError::Io`] when a directory cannot be created or a file
/// cannot be read, written or re-timed.
pub fn copy_images(
    entries: &[PersonEntry],
    root: &Path,
    output: &Path,
    reporter: &dyn ProgressReporter,
) -> Result<CopyStats> {
    let total_files = entries.iter().map(PersonEntry::image_count).sum();
    reporter.report_copy_started(total_files);

    let mut stats = CopyStats::default();
    for entry in entries {
        let destination_dir = person_output_dir(output, entry.directory_name());
        fs::create_dir_all(&destination_dir).map_err(|e| {
            ExportError::file_io_error("create image directory", &destination_dir, &e)
        })?;
        stats.directories += 1;

        let source_dir = root.join(entry.directory_name());
        for image in entry.images() {
            let source = source_dir.join(image);
            let destination = destination_dir.join(image);

            match copy_preserving_times(&source, &destination) {
                Ok(bytes) => {
                    tracing::debug!(
                        source = %source.display(),
                        destination = %destination.display(),
                        bytes,
                        "Copied image"
                    );
                    stats.copied += 1;
                    reporter.report_file_copied(&destination);
                },
                Err(e) if e.kind() == ErrorKind::NotFound && !source.exists() => {
                    tracing::warn!(
                        source = %source.display(),
                        "Source image vanished since the scan, skipping"
                    );
                    stats.skipped += 1;
                    reporter.report_file_skipped(&source);
                },
                Err(e) => return Err(ExportError::file_io_error("copy image", &source, &e)),
            }
        }
    }

    reporter.report_copy_finished(&stats);
    Ok(stats)
}

/// Stream `source` into `destination`, then apply the source's timestamps
fn copy_preserving_times(source: &Path, destination: &Path) -> std::io::Result<u64> {
    let metadata = fs::metadata(source)?;
    let bytes = fs::copy(source, destination)?;

    let mut times = FileTimes::new().set_modified(metadata.modified()?);
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    open_for_times(destination)?.set_times(times)?;

    Ok(bytes)
}

// Copied files inherit the source permissions, which may be read-only.
// Unix only needs ownership to change timestamps; Windows needs a writable handle.
#[cfg(unix)]
fn open_for_times(path: &Path) -> std::io::Result<File> {
    File::open(path)
}

#[cfg(not(unix))]
fn open_for_times(path: &Path) -> std::io::Result<File> {
    File::options().write(true).open(path)
}
