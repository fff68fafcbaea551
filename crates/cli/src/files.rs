// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project file discovery.
//!
//! Walks the project without gitignore filtering: submissions are graded on
//! what is on disk, not on what the student chose to commit.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::environment::STALE_SANDBOX_DIRS;
use crate::error::CheckFailure;

/// Candidate test directory names, in priority order.
pub const TEST_DIRS: &[&str] = &["tests", "test", "tst"];

/// First existing tests directory under `root`.
pub fn tests_directory(root: &Path) -> Option<PathBuf> {
    TEST_DIRS
        .iter()
        .map(|dir| root.join(dir))
        .find(|path| path.is_dir())
}

/// All Python files under `root`, skipping sandbox directories.
pub fn python_files(root: &Path) -> Result<Vec<PathBuf>, CheckFailure> {
    let mut builder = walker(root);
    builder.filter_entry(|entry| {
        !entry.file_type().map(|t| t.is_dir()).unwrap_or(false)
            || !entry
                .file_name()
                .to_str()
                .map(|name| STALE_SANDBOX_DIRS.contains(&name))
                .unwrap_or(false)
    });

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry.map_err(|e| CheckFailure::new(format!("cannot list project files: {e}")))?;
        let is_file = entry.file_type().is_some_and(|t| t.is_file());
        if is_file && entry.path().extension().is_some_and(|ext| ext == "py") {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Python files outside the tests directory.
pub fn source_files(root: &Path) -> Result<Vec<PathBuf>, CheckFailure> {
    let tests = tests_directory(root);
    let mut files = python_files(root)?;
    if let Some(tests) = tests {
        files.retain(|file| !file.starts_with(&tests));
    }
    Ok(files)
}

/// Every file and directory under `root`, relative to it.
pub fn project_entries(root: &Path) -> Result<Vec<PathBuf>, CheckFailure> {
    let mut entries = Vec::new();
    for entry in walker(root).build() {
        let entry = entry.map_err(|e| CheckFailure::new(format!("cannot list project files: {e}")))?;
        if entry.depth() == 0 {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(root) {
            entries.push(relative.to_path_buf());
        }
    }
    Ok(entries)
}

fn walker(root: &Path) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b));
    builder
}

#[cfg(test)]
#[path = "files_tests.rs"]
mod tests;
