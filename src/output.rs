//! JSON document output
//!
//! Documents are rendered completely in memory and written with a single
//! call, so a serialization failure never leaves a truncated file behind.

use crate::error::{ExportError, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

pub const STUDENTS_FILE_NAME: &str = "students.json";
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Render `value` as indented UTF-8 JSON
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Render `value` and write it to `path` in one write
pub fn write_json_document<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let document = render_json(value)?;
    fs::write(path, document.as_bytes())
        .map_err(|e| ExportError::file_io_error("write JSON document", path, &e))?;
    tracing::debug!(path = %path.display(), bytes = document.len(), "Wrote JSON document");
    Ok(())
}

/// Ensure the output directory exists
pub fn ensure_output_dir(path: &Path) -> Result<()> {
    if path.is_file() {
        return Err(ExportError::invalid_config(format!(
            "Output path exists and is a file, not a directory: {}",
            path.display()
        )));
    }
    fs::create_dir_all(path)
        .map_err(|e| ExportError::file_io_error("create output directory", path, &e))
}
