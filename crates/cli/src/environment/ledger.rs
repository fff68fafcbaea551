// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Compensating cleanup actions.
//!
//! Used for sandbox teardown and for the per-run scratch files tools leave
//! behind.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Cleanup {
    RemoveDir(PathBuf),
    RemoveFile(PathBuf),
}

/// Stack of cleanup actions, replayed in reverse registration order.
///
/// Unwinding drains the stack, so repeated calls are no-ops.
#[derive(Debug)]
pub struct CleanupLedger {
    actions: Vec<Cleanup>,
    keep: bool,
}

impl CleanupLedger {
    /// `keep` retains everything instead of deleting it.
    pub fn new(keep: bool) -> Self {
        Self {
            actions: Vec::new(),
            keep,
        }
    }

    /// Register removal of a directory created by a later step.
    pub fn remove_dir(&mut self, path: &Path) {
        tracing::trace!("registered cleanup of {}", path.display());
        self.actions.push(Cleanup::RemoveDir(path.to_path_buf()));
    }

    /// Register removal of a single file.
    pub fn remove_file(&mut self, path: &Path) {
        tracing::trace!("registered cleanup of {}", path.display());
        self.actions.push(Cleanup::RemoveFile(path.to_path_buf()));
    }

    /// Run every pending action. All actions are attempted; the first error
    /// is returned.
    pub fn unwind(&mut self) -> Result<()> {
        let mut first_error = None;

        while let Some(action) = self.actions.pop() {
            let (path, is_dir) = match action {
                Cleanup::RemoveDir(path) => (path, true),
                Cleanup::RemoveFile(path) => (path, false),
            };
            if self.keep {
                tracing::info!("keeping {}", path.display());
                continue;
            }
            if !path.exists() {
                continue;
            }

            tracing::debug!("removing {}", path.display());
            let removed = if is_dir {
                std::fs::remove_dir_all(&path)
            } else {
                std::fs::remove_file(&path)
            };
            if let Err(source) = removed {
                tracing::warn!("failed to remove {}: {source}", path.display());
                first_error.get_or_insert(Error::Io { path, source });
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
