// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared unit test utilities.
//!
//! Provides common helpers for unit tests in the grader crate.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use crate::environment::{EnvironmentOptions, IsolatedEnvironment, Provisioner, bin_dir};
use crate::error::{Error, Result};

/// Creates a directory tree from a list of (path, content) pairs.
///
/// Parent directories are created automatically.
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}

/// Provisioning step recorded by [`FakeProvisioner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionStep {
    Create,
    Project,
    Requirements,
    Tools,
}

/// Provisioner that only touches the filesystem.
///
/// `create` makes the sandbox directory; installs are recorded. A configured
/// step fails after doing its work.
#[derive(Default)]
pub struct FakeProvisioner {
    fail_at: Option<ProvisionStep>,
    steps: Mutex<Vec<ProvisionStep>>,
}

impl FakeProvisioner {
    pub fn failing_at(step: ProvisionStep) -> Self {
        Self {
            fail_at: Some(step),
            steps: Mutex::new(Vec::new()),
        }
    }

    pub fn steps(&self) -> Vec<ProvisionStep> {
        self.steps.lock().unwrap().clone()
    }

    fn record(&self, step: ProvisionStep) -> Result<()> {
        self.steps.lock().unwrap().push(step);
        if self.fail_at == Some(step) {
            return Err(Error::environment(format!("{step:?} failed")));
        }
        Ok(())
    }
}

impl Provisioner for FakeProvisioner {
    fn create(&self, sandbox: &Path) -> Result<()> {
        fs::create_dir_all(bin_dir(sandbox)).unwrap();
        self.record(ProvisionStep::Create)
    }

    fn install_project(&self, _sandbox: &Path, _project_root: &Path) -> Result<()> {
        self.record(ProvisionStep::Project)
    }

    fn install_requirements(&self, _sandbox: &Path, _requirements: &Path) -> Result<()> {
        self.record(ProvisionStep::Requirements)
    }

    fn install_packages(&self, _sandbox: &Path, _packages: &[String]) -> Result<()> {
        self.record(ProvisionStep::Tools)
    }
}

/// Sandbox provisioned by a [`FakeProvisioner`], removed on drop.
pub fn fake_sandbox(root: &Path) -> IsolatedEnvironment {
    IsolatedEnvironment::acquire(
        root,
        &EnvironmentOptions::default(),
        &FakeProvisioner::default(),
    )
    .unwrap()
}

/// Install a shell script as a sandbox tool.
#[cfg(unix)]
pub fn install_fake_tool(env: &IsolatedEnvironment, name: &str, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    let path = env.executable(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
}
