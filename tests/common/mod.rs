//! Shared test utilities.

#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;

pub const SCENARIO_ARGS: &str = r#"
[[arg]]
option = "verbose"
default = false

[[arg]]
option = "out"
default = "a.txt"
"#;

/// Write `content` to `name` inside a fresh temp dir.
pub fn temp_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write temp file");
    (temp_dir, path)
}

/// Write an extra file into an existing temp dir.
pub fn write_into(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write temp file");
    path
}
