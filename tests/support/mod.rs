//! Test support utilities for envweave integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with an isolated temp directory.
///
/// Child processes use `.current_dir()` and an explicit environment, so
/// tests can safely run in parallel.
pub struct Test {
    /// Temporary project directory holding config and snapshot
    pub dir: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Create a test environment with `envweave.toml` and `snapshot.json`.
    pub fn with_files(config: &str, snapshot: &str) -> Self {
        let t = Self::new();
        t.write_config(config);
        t.write_snapshot(snapshot);
        t
    }

    /// Write `envweave.toml`.
    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.path("envweave.toml"), contents).expect("failed to write config");
    }

    /// Write `snapshot.json`.
    pub fn write_snapshot(&self, contents: &str) {
        std::fs::write(self.path("snapshot.json"), contents).expect("failed to write snapshot");
    }

    /// Path of a file inside the test directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
