//! Dataset scanning
//!
//! Discovers identity directories directly below the dataset root and the
//! image files each of them holds. Only names are collected; no file is opened.

use crate::error::{ExportError, Result};
use std::io::ErrorKind;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// File extensions (lowercase, without the dot) recognised as images
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// One identity discovered under the dataset root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonEntry {
    directory_name: String,
    display_name: String,
    images: Vec<String>,
}

impl PersonEntry {
    /// Create an entry from a directory name and its (already sorted) image names
    pub fn new<S: Into<String>>(directory_name: S, images: Vec<String>) -> Self {
        let directory_name = directory_name.into();
        Self {
            display_name: display_name_for(&directory_name),
            directory_name,
            images,
        }
    }

    /// Raw identity folder name
    pub fn directory_name(&self) -> &str {
        &self.directory_name
    }

    /// Folder name with underscores replaced by spaces
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Image file names in lexicographic order
    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// First image, used as the representative photo
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Derive the human-readable name from an identity folder name
pub fn display_name_for(directory_name: &str) -> String {
    directory_name.replace('_', " ")
}

/// Check whether a path carries one of the recognised image extensions
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        })
}

/// Scan the dataset root for identity directories
///
/// A missing root is not an error: it yields an empty list and a warning so
/// the caller can decide whether to continue.
///
/// # Errors
/// Returns [`ExportError::Scan`] when a directory below an existing root
/// cannot be enumerated. Symbolic links pointing nowhere are skipped with a
/// warning instead.
pub fn scan(root: &Path) -> Result<Vec<PersonEntry>> {
    if !root.exists() {
        tracing::warn!(root = %root.display(), "Dataset root does not exist");
        return Ok(Vec::new());
    }

    let mut persons = Vec::new();
    for entry in child_entries(root) {
        let Some(entry) = accept_entry(root, entry)? else {
            continue;
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let Some(directory_name) = entry.file_name().to_str() else {
            tracing::warn!(
                path = %entry.path().display(),
                "Skipping identity directory with a non UTF-8 name"
            );
            continue;
        };

        let images = scan_images(entry.path())?;
        tracing::debug!(
            person = %directory_name,
            images = images.len(),
            "Discovered identity"
        );
        persons.push(PersonEntry::new(directory_name, images));
    }

    tracing::info!(
        root = %root.display(),
        persons = persons.len(),
        "Dataset scan complete"
    );
    Ok(persons)
}

fn scan_images(person_dir: &Path) -> Result<Vec<String>> {
    let mut images = Vec::new();
    for entry in child_entries(person_dir) {
        let Some(entry) = accept_entry(person_dir, entry)? else {
            continue;
        };
        if !entry.file_type().is_file() || !is_image_file(entry.path()) {
            continue;
        }
        match entry.file_name().to_str() {
            Some(name) => images.push(name.to_owned()),
            None => tracing::warn!(
                path = %entry.path().display(),
                "Skipping image with a non UTF-8 file name"
            ),
        }
    }
    Ok(images)
}

/// Pass through a walk result, skipping symbolic links whose target is gone
///
/// Only entries below `dir` are skipped this way. Failing to open `dir`
/// itself, or any other error kind, stays fatal.
fn accept_entry(
    dir: &Path,
    entry: walkdir::Result<DirEntry>,
) -> Result<Option<DirEntry>> {
    match entry {
        Ok(entry) => Ok(Some(entry)),
        Err(e) if is_dangling_link(&e) => {
            if let Some(path) = e.path() {
                tracing::warn!(path = %path.display(), "Skipping dangling symbolic link");
            }
            Ok(None)
        },
        Err(e) => Err(ExportError::scan(dir, e)),
    }
}

fn is_dangling_link(error: &walkdir::Error) -> bool {
    error.depth() > 0
        && error.path().is_some()
        && error
            .io_error()
            .is_some_and(|io| io.kind() == ErrorKind::NotFound)
}

fn child_entries(dir: &Path) -> walkdir::IntoIter {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
}
