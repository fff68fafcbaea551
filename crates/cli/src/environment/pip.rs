// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Virtual environments via `python -m venv` and pip.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::{Provisioner, bin_dir};
use crate::error::{Error, Result};
use crate::process;

/// Default interpreter used to create sandboxes.
pub const DEFAULT_PYTHON: &str = if cfg!(windows) { "python.exe" } else { "python3" };

/// Provisioner backed by the standard `venv` module and pip.
///
/// Installs run without a time limit.
#[derive(Debug, Clone)]
pub struct PipProvisioner {
    python: OsString,
}

impl Default for PipProvisioner {
    fn default() -> Self {
        Self::new(DEFAULT_PYTHON)
    }
}

impl PipProvisioner {
    pub fn new(python: impl Into<OsString>) -> Self {
        Self {
            python: python.into(),
        }
    }

    fn pip(sandbox: &Path) -> PathBuf {
        bin_dir(sandbox).join(format!("pip{}", std::env::consts::EXE_SUFFIX))
    }

    fn pip_install(&self, sandbox: &Path, args: &[&std::ffi::OsStr], what: &str) -> Result<()> {
        let mut cmd = Command::new(Self::pip(sandbox));
        cmd.arg("install").args(args);
        self.run(cmd, &format!("failed to install {what}"))
    }

    fn run(&self, cmd: Command, context: &str) -> Result<()> {
        let output = process::run(cmd, None)
            .map_err(|e| Error::environment(format!("{context}: {e}")))?;
        if output.success() {
            Ok(())
        } else {
            let stderr: String = output.stderr.lines().take(5).collect::<Vec<_>>().join("\n");
            Err(Error::environment(format!("{context}\n{stderr}")))
        }
    }
}

impl Provisioner for PipProvisioner {
    fn create(&self, sandbox: &Path) -> Result<()> {
        let mut cmd = Command::new(&self.python);
        cmd.args(["-m", "venv"]).arg(sandbox);
        self.run(cmd, "failed to create virtual environment")
    }

    fn install_project(&self, sandbox: &Path, project_root: &Path) -> Result<()> {
        self.pip_install(sandbox, &[project_root.as_os_str()], "project package")
    }

    fn install_requirements(&self, sandbox: &Path, requirements: &Path) -> Result<()> {
        self.pip_install(
            sandbox,
            &["-r".as_ref(), requirements.as_os_str()],
            &format!("requirements from {}", requirements.display()),
        )
    }

    fn install_packages(&self, sandbox: &Path, packages: &[String]) -> Result<()> {
        let args: Vec<&std::ffi::OsStr> = packages.iter().map(|p| p.as_ref()).collect();
        self.pip_install(sandbox, &args, &packages.join(", "))
    }
}
