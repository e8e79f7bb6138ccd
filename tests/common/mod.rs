//! Shared helpers for building identity/image datasets on disk

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary dataset root plus a sibling output directory
pub struct TestDataset {
    dir: TempDir,
}

impl TestDataset {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir_all(dir.path().join("lfw")).expect("Failed to create dataset root");
        Self { dir }
    }

    /// Dataset from `(name, photo count)` pairs
    pub fn with_people(people: &[(&str, usize)]) -> Self {
        let dataset = Self::new();
        for (name, count) in people {
            dataset.add_person(name, *count);
        }
        dataset
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().join("lfw")
    }

    pub fn output(&self) -> PathBuf {
        self.dir.path().join("export")
    }

    /// Add `<name>/<name>_000k.jpg` files whose bytes identify the image
    pub fn add_person(&self, name: &str, count: usize) {
        let person = self.root().join(name);
        fs::create_dir_all(&person).expect("Failed to create person directory");
        for k in 1..=count {
            let file = format!("{name}_{k:04}.jpg");
            fs::write(person.join(&file), file.as_bytes()).expect("Failed to write image");
        }
    }

    pub fn image_path(&self, name: &str, k: usize) -> PathBuf {
        self.root().join(name).join(format!("{name}_{k:04}.jpg"))
    }
}

pub fn read_json(path: &Path) -> serde_json::Value {
    let text = fs::read_to_string(path).expect("Failed to read JSON document");
    serde_json::from_str(&text).expect("Invalid JSON document")
}
