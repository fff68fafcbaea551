// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Isolated dependency environment.
//!
//! An [`IsolatedEnvironment`] is a disposable Python virtual environment
//! rooted at `<project>/.venv`. Acquiring one:
//!
//! 1. removes stale sandboxes left by earlier runs (`venv`, `.venv`)
//! 2. creates a fresh sandbox
//! 3. installs the project (package metadata) or its `requirements.txt`
//! 4. installs the grader's own tool packages
//!
//! The value itself is the proof that the sandbox is ready; checks receive a
//! reference to it through their context. Teardown runs on `release()` or on
//! drop, including when a later acquisition step fails.

mod ledger;
mod pip;

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

pub use ledger::CleanupLedger;
pub use pip::{DEFAULT_PYTHON, PipProvisioner};

use crate::error::{Error, Result};

/// Sandbox directory name under the project root.
pub const SANDBOX_DIR: &str = ".venv";

/// Locations checked for stale sandboxes before creating a new one.
pub const STALE_SANDBOX_DIRS: &[&str] = &["venv", ".venv"];

/// Flat dependency manifest.
pub const REQUIREMENTS_FILE: &str = "requirements.txt";

/// Files marking a project as an installable package.
pub const PACKAGE_MARKERS: &[&str] = &["pyproject.toml", "setup.py"];

/// Tools installed into every sandbox for the isolated checks.
pub const DEFAULT_TOOL_PACKAGES: &[&str] = &["pylint", "mypy", "pytest", "coverage"];

/// Executable directory inside a sandbox.
pub fn bin_dir(sandbox: &Path) -> PathBuf {
    if cfg!(windows) {
        sandbox.join("Scripts")
    } else {
        sandbox.join("bin")
    }
}

/// Creates sandboxes and installs packages into them.
pub trait Provisioner: Send + Sync {
    /// Create an empty sandbox at `sandbox`.
    fn create(&self, sandbox: &Path) -> Result<()>;

    /// Install the project itself as a package.
    fn install_project(&self, sandbox: &Path, project_root: &Path) -> Result<()>;

    /// Install from a requirements file.
    fn install_requirements(&self, sandbox: &Path, requirements: &Path) -> Result<()>;

    /// Install named packages.
    fn install_packages(&self, sandbox: &Path, packages: &[String]) -> Result<()>;
}

/// Options controlling acquisition and release.
#[derive(Debug, Clone)]
pub struct EnvironmentOptions {
    /// Keep the sandbox on disk after release.
    pub keep: bool,
    /// Tool packages installed after the project's dependencies.
    pub tool_packages: Vec<String>,
}

impl Default for EnvironmentOptions {
    fn default() -> Self {
        Self {
            keep: false,
            tool_packages: DEFAULT_TOOL_PACKAGES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// A live sandbox scoped to one project and one run.
#[derive(Debug)]
pub struct IsolatedEnvironment {
    path: PathBuf,
    ledger: CleanupLedger,
}

impl IsolatedEnvironment {
    /// Deterministic sandbox location for a project.
    pub fn sandbox_path(project_root: &Path) -> PathBuf {
        project_root.join(SANDBOX_DIR)
    }

    /// Provision a fresh sandbox for `project_root`.
    ///
    /// On failure, anything already created is torn down before returning.
    pub fn acquire(
        project_root: &Path,
        options: &EnvironmentOptions,
        provisioner: &dyn Provisioner,
    ) -> Result<Self> {
        remove_stale_sandboxes(project_root)?;

        let path = Self::sandbox_path(project_root);
        let mut env = IsolatedEnvironment {
            path,
            ledger: CleanupLedger::new(options.keep),
        };

        // Registered before creation: a half-built sandbox is still removed.
        env.ledger.remove_dir(&env.path);

        tracing::info!("creating isolated environment at {}", env.path.display());
        provisioner.create(&env.path)?;

        install_project_dependencies(&env.path, project_root, provisioner)?;

        if !options.tool_packages.is_empty() {
            tracing::info!("installing grader tool packages");
            provisioner.install_packages(&env.path, &options.tool_packages)?;
        }

        Ok(env)
    }

    /// Sandbox root directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the sandbox's executables.
    pub fn bin_dir(&self) -> PathBuf {
        bin_dir(&self.path)
    }

    /// Path of a tool installed in the sandbox.
    pub fn executable(&self, name: &str) -> PathBuf {
        self.bin_dir()
            .join(format!("{name}{}", std::env::consts::EXE_SUFFIX))
    }

    /// Search path with the sandbox's executables first.
    pub fn search_path(
        &self,
        inherited: Option<&OsStr>,
    ) -> std::result::Result<OsString, std::env::JoinPathsError> {
        let rest: Vec<PathBuf> = inherited
            .map(|p| std::env::split_paths(p).collect())
            .unwrap_or_default();
        std::env::join_paths(std::iter::once(self.bin_dir()).chain(rest))
    }

    /// Tear the sandbox down, reporting cleanup errors.
    pub fn release(mut self) -> Result<()> {
        tracing::info!("releasing isolated environment");
        self.ledger.unwind()
    }
}

impl Drop for IsolatedEnvironment {
    fn drop(&mut self) {
        if let Err(e) = self.ledger.unwind() {
            tracing::warn!("environment cleanup failed: {e}");
        }
    }
}

fn remove_stale_sandboxes(project_root: &Path) -> Result<()> {
    for dir in STALE_SANDBOX_DIRS {
        let stale = project_root.join(dir);
        if stale.exists() {
            tracing::info!("removing existing environment at {}", stale.display());
            std::fs::remove_dir_all(&stale).map_err(|e| {
                Error::environment(format!("cannot remove {}: {e}", stale.display()))
            })?;
        }
    }
    Ok(())
}

fn install_project_dependencies(
    sandbox: &Path,
    project_root: &Path,
    provisioner: &dyn Provisioner,
) -> Result<()> {
    if PACKAGE_MARKERS
        .iter()
        .any(|marker| project_root.join(marker).is_file())
    {
        tracing::info!("installing project package");
        return provisioner.install_project(sandbox, project_root);
    }

    let requirements = project_root.join(REQUIREMENTS_FILE);
    if requirements.is_file() {
        tracing::info!("installing {}", REQUIREMENTS_FILE);
        return provisioner.install_requirements(sandbox, &requirements);
    }

    tracing::warn!("no {} found in the project directory", REQUIREMENTS_FILE);
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
