// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture helper for creating temporary directories with input documents
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            root_path,
        }
    }

    /// Create an input document (any extension) with given content
    pub fn create_document<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    /// Create an input document from raw bytes, e.g. invalid UTF-8
    pub fn create_raw_document<P: AsRef<Path>>(&self, relative_path: P, bytes: &[u8]) -> PathBuf {
        let file_path = self.root_path.join(relative_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file_path, bytes).expect("Failed to write test file");
        file_path
    }

    /// Output path inside the fixture, in a directory that does not exist yet
    pub fn output_path(&self) -> PathBuf {
        self.root_path.join("output").join("abbr.json")
    }

    /// Read and parse a JSON file
    pub fn read_json<P: AsRef<Path>>(&self, path: P) -> serde_json::Value {
        let content = fs::read_to_string(path).expect("Failed to read JSON output");
        serde_json::from_str(&content).expect("Failed to parse JSON output")
    }
}

/// Short forms of an exported document, in document order
pub fn exported_shorts(document: &serde_json::Value) -> Vec<String> {
    document["abbreviations"]
        .as_array()
        .expect("abbreviations should be an array")
        .iter()
        .map(|record| record["short"].as_str().expect("short is a string").to_string())
        .collect()
}
