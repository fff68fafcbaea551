//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for grading throwaway projects with the grader CLI.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::PredicateBooleanExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Returns a Command configured to run the grader binary
pub fn grader_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("grader"));
    cmd.env_remove("GRADER_CONFIG").env_remove("GRADER_LOG");
    cmd
}

/// A student project plus a grading configuration, each in its own temp dir.
pub struct Project {
    root: TempDir,
    config_dir: TempDir,
}

#[allow(dead_code)]
impl Project {
    pub fn empty() -> Self {
        Self {
            root: TempDir::new().unwrap(),
            config_dir: TempDir::new().unwrap(),
        }
    }

    /// Add a file to the project, creating parent directories.
    pub fn file(self, path: &str, content: &str) -> Self {
        let full = self.root.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, content).unwrap();
        self
    }

    /// Add a file next to the configuration.
    pub fn config_file(self, name: &str, content: &str) -> Self {
        std::fs::write(self.config_dir.path().join(name), content).unwrap();
        self
    }

    /// Write `config.json` with the given contents.
    pub fn config(self, json: &serde_json::Value) -> Self {
        let content = serde_json::to_string_pretty(json).unwrap();
        self.config_file("config.json", &content)
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.path().join("config.json")
    }

    /// `grader grade <root> -c <config>` with a private artifacts dir.
    pub fn grade(&self) -> Command {
        let mut cmd = grader_cmd();
        cmd.arg("grade")
            .arg(self.root())
            .arg("-c")
            .arg(self.config_path())
            .arg("--artifacts-dir")
            .arg(self.config_dir.path().join("artifacts"));
        cmd
    }
}
