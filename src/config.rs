//! Configuration types for roster export runs

use crate::error::{ExportError, Result};
use crate::records::Cohort;
use std::path::{Path, PathBuf};

/// Configuration for one export run
///
/// There are no default paths here: the dataset root and the output
/// directory are always supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Dataset root holding one directory per identity
    pub source_path: PathBuf,

    /// Directory receiving students.json, manifest.json and images/
    pub output_path: PathBuf,

    /// Minimum number of photos an identity needs to be exported (default: 1)
    pub min_images: usize,

    /// Maximum number of identities to export, 0 for no limit (default: 0)
    pub limit: usize,

    /// Skip mirroring images, only write the JSON documents (default: false)
    pub skip_copy: bool,

    /// Class and grade labels stamped on every record
    pub cohort: Cohort,
}

impl ExportConfig {
    /// Create a new configuration builder for fluent API construction
    ///
    /// # Examples
    ///
    /// ```rust
    /// use roster_export::ExportConfig;
    ///
    /// let config = ExportConfig::builder("datasets/lfw", "exports/lfw")
    ///     .min_images(3)
    ///     .limit(50)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.min_images, 3);
    /// assert!(!config.skip_copy);
    /// ```
    #[must_use]
    pub fn builder<S: Into<PathBuf>, O: Into<PathBuf>>(
        source_path: S,
        output_path: O,
    ) -> ExportConfigBuilder {
        ExportConfigBuilder {
            config: Self {
                source_path: source_path.into(),
                output_path: output_path.into(),
                min_images: 1,
                limit: 0,
                skip_copy: false,
                cohort: Cohort::default(),
            },
        }
    }

    /// Validate all configuration parameters
    ///
    /// # Errors
    /// - Empty source or output path
    /// - Empty class name or grade
    pub fn validate(&self) -> Result<()> {
        if is_empty_path(&self.source_path) {
            return Err(ExportError::invalid_config("source path must not be empty"));
        }
        if is_empty_path(&self.output_path) {
            return Err(ExportError::invalid_config("output path must not be empty"));
        }
        if self.cohort.class_name.trim().is_empty() {
            return Err(ExportError::invalid_config("class name must not be empty"));
        }
        if self.cohort.grade.trim().is_empty() {
            return Err(ExportError::invalid_config("grade must not be empty"));
        }
        Ok(())
    }

    /// Location of students.json
    pub fn students_path(&self) -> PathBuf {
        self.output_path.join(crate::output::STUDENTS_FILE_NAME)
    }

    /// Location of manifest.json
    pub fn manifest_path(&self) -> PathBuf {
        self.output_path.join(crate::output::MANIFEST_FILE_NAME)
    }
}

fn is_empty_path(path: &Path) -> bool {
    path.as_os_str().is_empty()
}

/// Builder for `ExportConfig`
#[derive(Debug)]
pub struct ExportConfigBuilder {
    config: ExportConfig,
}

impl ExportConfigBuilder {
    /// Set the photo-count threshold
    #[must_use]
    pub fn min_images(mut self, min_images: usize) -> Self {
        self.config.min_images = min_images;
        self
    }

    /// Set the identity cap (0 = no limit)
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.config.limit = limit;
        self
    }

    /// Disable image mirroring
    #[must_use]
    pub fn skip_copy(mut self, skip_copy: bool) -> Self {
        self.config.skip_copy = skip_copy;
        self
    }

    /// Set the class label
    #[must_use]
    pub fn class_name<S: Into<String>>(mut self, class_name: S) -> Self {
        self.config.cohort.class_name = class_name.into();
        self
    }

    /// Set the grade label
    #[must_use]
    pub fn grade<S: Into<String>>(mut self, grade: S) -> Self {
        self.config.cohort.grade = grade.into();
        self
    }

    /// Build the configuration with validation
    ///
    /// A threshold of 0 is accepted. Identities without photos then produce
    /// records with no primary image and contribute nothing to the copy.
    pub fn build(self) -> Result<ExportConfig> {
        let config = self.config;
        config.validate()?;
        if config.min_images == 0 {
            tracing::warn!(
                "min_images is 0: identities without photos will be exported without a primary image"
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = ExportConfig::builder("in", "out").build().unwrap();
        assert_eq!(config.source_path, PathBuf::from("in"));
        assert_eq!(config.output_path, PathBuf::from("out"));
        assert_eq!(config.min_images, 1);
        assert_eq!(config.limit, 0);
        assert!(!config.skip_copy);
        assert_eq!(config.cohort, Cohort::default());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ExportConfig::builder("in", "out")
            .min_images(0)
            .limit(5)
            .skip_copy(true)
            .class_name("Class A")
            .grade("Year 2")
            .build()
            .unwrap();
        assert_eq!(config.min_images, 0);
        assert_eq!(config.limit, 5);
        assert!(config.skip_copy);
        assert_eq!(config.cohort.class_name, "Class A");
        assert_eq!(config.cohort.grade, "Year 2");
    }

    #[test]
    fn test_validation_rejects_empty_values() {
        assert!(ExportConfig::builder("", "out").build().is_err());
        assert!(ExportConfig::builder("in", "").build().is_err());
        assert!(ExportConfig::builder("in", "out").class_name("  ").build().is_err());
        assert!(ExportConfig::builder("in", "out").grade("").build().is_err());
    }

    #[test]
    fn test_output_document_paths() {
        let config = ExportConfig::builder("in", "exports").build().unwrap();
        assert_eq!(config.students_path(), Path::new("exports").join("students.json"));
        assert_eq!(config.manifest_path(), Path::new("exports").join("manifest.json"));
    }
}
