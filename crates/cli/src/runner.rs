// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sequential check orchestration with failure isolation.
//!
//! Checks run one at a time in configuration order: non-isolated checks
//! first, then, inside one freshly acquired isolated environment, the
//! isolated ones. A failing or panicking check yields a degraded result and
//! never stops the others. Only configuration and environment setup errors
//! abort a run.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::check::{Check, CheckContext, CheckKind, CheckResult};
use crate::checks::CheckRegistry;
use crate::config::Config;
use crate::environment::{
    CleanupLedger, EnvironmentOptions, IsolatedEnvironment, PipProvisioner, Provisioner,
};
use crate::error::{Error, Result};
use crate::files;

/// Coverage data file written into the project root.
pub const COVERAGE_DATA: &str = ".coverage";

/// Pytest cache directory written into the project root.
pub const PYTEST_CACHE: &str = ".pytest_cache";

/// Configuration for one grading run.
#[derive(Debug, Clone, Default)]
pub struct RunnerConfig {
    /// Skip the isolated environment and every check that needs it.
    pub skip_isolation: bool,
    /// Keep the sandbox on disk after the run.
    pub keep_environment: bool,
    /// Directory holding the per-run `grader-<pid>` scratch directory for
    /// tool reports (None = the system temp dir).
    pub artifacts_dir: Option<PathBuf>,
    /// Submission identifier, for logs.
    pub student_id: Option<String>,
}

impl RunnerConfig {
    /// Absolute base for the scratch directory. Tools run from the project
    /// root, not the caller's working directory.
    fn artifacts_base(&self) -> Result<PathBuf> {
        let base = self
            .artifacts_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir);
        std::path::absolute(&base).map_err(|source| Error::Io { path: base, source })
    }
}

/// Grades one project against one configuration.
pub struct Grader {
    config: RunnerConfig,
    registry: CheckRegistry,
    provisioner: Arc<dyn Provisioner>,
}

impl Grader {
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            config,
            registry: CheckRegistry::default(),
            provisioner: Arc::new(PipProvisioner::default()),
        }
    }

    pub fn with_registry(mut self, registry: CheckRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_provisioner(mut self, provisioner: Arc<dyn Provisioner>) -> Self {
        self.provisioner = provisioner;
        self
    }

    /// Run every configured check against `project_root`.
    ///
    /// Returns one result per executed check, non-isolated results first,
    /// each group in configuration order. An environment setup failure
    /// discards the results gathered so far and returns the error.
    pub fn grade(&self, config: &Config, project_root: &Path) -> Result<Vec<CheckResult>> {
        if !project_root.is_dir() {
            return Err(Error::ProjectRoot {
                path: project_root.to_path_buf(),
            });
        }

        if let Some(id) = &self.config.student_id {
            tracing::info!("grading submission {id}");
        }
        if files::tests_directory(project_root).is_none() {
            tracing::warn!("no tests directory found in {}", project_root.display());
        }

        let checks = self.registry.build(config, project_root)?;
        tracing::info!(
            "running {} checks ({} isolated)",
            checks.len(),
            checks.isolated.len()
        );

        let base = self.config.artifacts_base()?;
        let artifacts = base.join(format!("grader-{}", std::process::id()));
        let _scratch = ScratchGuard::new(&base, &artifacts, project_root);
        std::fs::create_dir_all(&artifacts).map_err(|source| Error::Io {
            path: artifacts.clone(),
            source,
        })?;

        let ctx = CheckContext {
            environment: None,
            artifacts: &artifacts,
        };
        let mut results = run_checks(&checks.non_isolated, &ctx);

        if checks.isolated.is_empty() {
            return Ok(results);
        }
        if self.config.skip_isolation {
            tracing::warn!(
                "skipping {} checks that require the isolated environment",
                checks.isolated.len()
            );
            return Ok(results);
        }

        let options = EnvironmentOptions {
            keep: self.config.keep_environment,
            tool_packages: config
                .environment
                .tool_packages
                .clone()
                .unwrap_or_else(|| EnvironmentOptions::default().tool_packages),
        };
        let env = IsolatedEnvironment::acquire(project_root, &options, self.provisioner.as_ref())?;

        let ctx = CheckContext {
            environment: Some(&env),
            artifacts: &artifacts,
        };
        results.extend(run_checks(&checks.isolated, &ctx));

        if let Err(e) = env.release() {
            tracing::warn!("failed to release isolated environment: {e}");
        }
        Ok(results)
    }
}

/// Run checks in order, one result per check.
pub fn run_checks(checks: &[Box<dyn Check>], ctx: &CheckContext) -> Vec<CheckResult> {
    checks
        .iter()
        .map(|check| run_check(check.as_ref(), ctx))
        .collect()
}

/// Run one check, converting any failure into a degraded result.
pub fn run_check(check: &dyn Check, ctx: &CheckContext) -> CheckResult {
    let start = Instant::now();

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        check.pre_execute(ctx)?;
        check.execute(ctx)
    }));

    let result = match outcome {
        Ok(Ok(result)) => match validate(check, &result) {
            Ok(()) => result,
            Err(message) => degrade(check, &message),
        },
        Ok(Err(failure)) => degrade(check, failure.message()),
        Err(_) => degrade(check, "internal error: check panicked"),
    };

    tracing::debug!("{} finished in {:?}", check.name(), start.elapsed());
    result
}

fn degrade(check: &dyn Check, message: &str) -> CheckResult {
    tracing::error!("check {} failed: {message}", check.name());
    CheckResult::degraded(check.name(), check.kind(), message)
}

/// A result must match the declared variant and stay within bounds.
fn validate(check: &dyn Check, result: &CheckResult) -> std::result::Result<(), String> {
    match (check.kind(), result) {
        (CheckKind::Scored { max_score }, CheckResult::Scored(r)) => {
            let score = r.score();
            if r.max_score() != max_score || !(0.0..=f64::from(max_score)).contains(&score) {
                return Err(format!(
                    "internal error: score {score}/{} outside declared maximum {max_score}",
                    r.max_score()
                ));
            }
            Ok(())
        }
        (CheckKind::NonScored { .. }, CheckResult::NonScored(_)) => Ok(()),
        _ => Err("internal error: result does not match the declared check kind".to_string()),
    }
}

/// Removes per-run scratch files however `grade` exits.
///
/// Only paths the run creates are removed: the artifacts base goes too when
/// it did not exist beforehand, otherwise its contents are left alone.
struct ScratchGuard {
    ledger: CleanupLedger,
}

impl ScratchGuard {
    fn new(base: &Path, artifacts: &Path, project_root: &Path) -> Self {
        let mut ledger = CleanupLedger::new(false);
        if !base.exists() {
            ledger.remove_dir(base);
        }
        ledger.remove_dir(artifacts);
        ledger.remove_file(&project_root.join(COVERAGE_DATA));
        ledger.remove_dir(&project_root.join(PYTEST_CACHE));
        Self { ledger }
    }
}

impl Drop for ScratchGuard {
    fn drop(&mut self) {
        if let Err(e) = self.ledger.unwind() {
            tracing::warn!("failed to clean up temporary files: {e}");
        }
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
