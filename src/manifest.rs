//! Export manifest
//!
//! The manifest describes the intended export set. Key names match what the
//! mobile importer deserializes, so they stay snake_case and `dir`.

use crate::scanner::PersonEntry;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestPerson {
    pub name: String,
    #[serde(rename = "dir")]
    pub directory_name: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: u32,
    pub total_persons: usize,
    pub total_images: usize,
    #[serde(rename = "lfw_base_path")]
    pub source_path: Option<String>,
    pub persons: Vec<ManifestPerson>,
}

impl Manifest {
    /// Aggregate the filtered entries, keeping their order
    pub fn from_entries(entries: &[PersonEntry], source_root: &Path) -> Self {
        let persons: Vec<ManifestPerson> = entries
            .iter()
            .map(|entry| ManifestPerson {
                name: entry.display_name().to_owned(),
                directory_name: entry.directory_name().to_owned(),
                images: entry.images().to_vec(),
            })
            .collect();

        Self {
            version: MANIFEST_VERSION,
            total_persons: persons.len(),
            total_images: persons.iter().map(|p| p.images.len()).sum(),
            source_path: Some(source_root.display().to_string()),
            persons,
        }
    }

    /// Whether the stored totals agree with the person list
    pub fn is_consistent(&self) -> bool {
        self.total_persons == self.persons.len()
            && self.total_images == self.persons.iter().map(|p| p.images.len()).sum::<usize>()
    }
}

pub fn build_manifest(entries: &[PersonEntry], source_root: &Path) -> Manifest {
    Manifest::from_entries(entries, source_root)
}
