// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check abstraction and result types.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use serde::Serialize;

use crate::environment::IsolatedEnvironment;
use crate::error::CheckFailure;
use crate::process::{self, ToolOutput};

/// Context passed to a check for one execution.
pub struct CheckContext<'a> {
    /// Live isolated environment, present only while isolated checks run.
    ///
    /// Holding this reference is the proof that the sandbox is ready.
    pub environment: Option<&'a IsolatedEnvironment>,
    /// Shared scratch directory for tool reports, cleared after the run.
    pub artifacts: &'a Path,
}

/// Declared result variant of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    /// Numeric score in `[0, max_score]`.
    Scored { max_score: u32 },
    /// Boolean pass/fail. `fatal` marks failures that should stop
    /// downstream processing; the runner only reports it.
    NonScored { fatal: bool },
}

/// Fields shared by every check instance.
#[derive(Debug, Clone)]
pub struct CheckBase {
    /// Unique name, used as the result key.
    pub name: String,
    /// Project being graded.
    pub project_root: PathBuf,
    /// Whether the check must run inside the isolated environment.
    pub requires_isolation: bool,
    /// Resolved environment for tool invocations (empty = inherit).
    pub env: BTreeMap<String, String>,
    /// Time limit for each tool invocation.
    pub timeout: Option<Duration>,
}

impl CheckBase {
    pub fn new(name: impl Into<String>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            project_root: project_root.into(),
            requires_isolation: false,
            env: BTreeMap::new(),
            timeout: None,
        }
    }

    pub fn isolated(mut self, requires_isolation: bool) -> Self {
        self.requires_isolation = requires_isolation;
        self
    }

    /// Build a tool command scoped to the project root.
    ///
    /// When the context carries an isolated environment, the sandbox is
    /// activated for the child process.
    pub fn command(
        &self,
        program: impl AsRef<OsStr>,
        ctx: &CheckContext,
    ) -> Result<Command, CheckFailure> {
        let mut cmd = Command::new(program);
        cmd.current_dir(&self.project_root);

        if !self.env.is_empty() {
            cmd.env_clear();
            cmd.envs(&self.env);
        }

        if let Some(sandbox) = ctx.environment {
            let inherited: Option<OsString> = match self.env.get("PATH") {
                Some(path) => Some(path.into()),
                None if self.env.is_empty() => std::env::var_os("PATH"),
                None => None,
            };
            let path = sandbox
                .search_path(inherited.as_deref())
                .map_err(|e| CheckFailure::new(format!("cannot build PATH: {e}")))?;
            cmd.env("PATH", path);
            cmd.env("VIRTUAL_ENV", sandbox.path());
        }

        Ok(cmd)
    }

    /// Run a tool command under this check's time limit.
    pub fn run(&self, cmd: Command) -> Result<ToolOutput, CheckFailure> {
        Ok(process::run(cmd, self.timeout)?)
    }
}

/// A single unit of project evaluation.
///
/// Object-safe to allow dynamic dispatch via `Box<dyn Check>`.
pub trait Check: Send + Sync {
    /// Shared fields.
    fn base(&self) -> &CheckBase;

    /// Result variant this check produces.
    fn kind(&self) -> CheckKind;

    /// Run the check.
    ///
    /// Any internal problem is reported as a [`CheckFailure`].
    fn execute(&self, ctx: &CheckContext) -> Result<CheckResult, CheckFailure>;

    fn name(&self) -> &str {
        &self.base().name
    }

    fn requires_isolated_environment(&self) -> bool {
        self.base().requires_isolation
    }

    /// Precondition checked before `execute`.
    fn pre_execute(&self, ctx: &CheckContext) -> Result<(), CheckFailure> {
        if self.requires_isolated_environment() && ctx.environment.is_none() {
            return Err(CheckFailure::new(
                "isolated environment is required for this check",
            ));
        }
        tracing::debug!("running {}", self.name());
        Ok(())
    }
}

/// Outcome of a scored check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResult {
    name: String,
    score: f64,
    max_score: u32,
    #[serde(skip_serializing_if = "String::is_empty")]
    info: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    error: String,
}

impl ScoredResult {
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn max_score(&self) -> u32 {
        self.max_score
    }
}

/// Outcome of a pass/fail check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NonScoredResult {
    name: String,
    #[serde(rename = "result")]
    passed: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    info: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    error: String,
}

impl NonScoredResult {
    pub fn passed(&self) -> bool {
        self.passed
    }
}

/// Result of running a single check. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CheckResult {
    Scored(ScoredResult),
    NonScored(NonScoredResult),
}

impl CheckResult {
    /// Create a scored result.
    pub fn scored(name: impl Into<String>, score: f64, max_score: u32) -> Self {
        CheckResult::Scored(ScoredResult {
            name: name.into(),
            score,
            max_score,
            info: String::new(),
            error: String::new(),
        })
    }

    /// Create a pass/fail result.
    pub fn non_scored(name: impl Into<String>, passed: bool) -> Self {
        CheckResult::NonScored(NonScoredResult {
            name: name.into(),
            passed,
            info: String::new(),
            error: String::new(),
        })
    }

    /// Create the zero result substituted for a failed check.
    pub fn degraded(name: impl Into<String>, kind: CheckKind, error: impl Into<String>) -> Self {
        let error = error.into();
        match kind {
            CheckKind::Scored { max_score } => CheckResult::Scored(ScoredResult {
                name: name.into(),
                score: 0.0,
                max_score,
                info: String::new(),
                error,
            }),
            CheckKind::NonScored { .. } => CheckResult::NonScored(NonScoredResult {
                name: name.into(),
                passed: false,
                info: String::new(),
                error,
            }),
        }
    }

    /// Attach diagnostic detail.
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        match &mut self {
            CheckResult::Scored(r) => r.info = info.into(),
            CheckResult::NonScored(r) => r.info = info.into(),
        }
        self
    }

    pub fn name(&self) -> &str {
        match self {
            CheckResult::Scored(r) => &r.name,
            CheckResult::NonScored(r) => &r.name,
        }
    }

    pub fn info(&self) -> &str {
        match self {
            CheckResult::Scored(r) => &r.info,
            CheckResult::NonScored(r) => &r.info,
        }
    }

    pub fn error(&self) -> &str {
        match self {
            CheckResult::Scored(r) => &r.error,
            CheckResult::NonScored(r) => &r.error,
        }
    }

    /// True if this result was substituted after a failure.
    pub fn is_degraded(&self) -> bool {
        !self.error().is_empty()
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
