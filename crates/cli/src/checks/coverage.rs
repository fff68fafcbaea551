// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Coverage check: statement coverage of the project's own test suite.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::check::{Check, CheckBase, CheckContext, CheckKind, CheckResult};
use crate::error::{self, CheckFailure};
use crate::files;
use crate::process::ToolOutput;
use crate::score::translate_score;

/// Coverage is reported as a percentage.
pub const COVERAGE_SCALE: f64 = 100.0;

#[derive(Deserialize)]
struct Params {
    max_points: i64,
}

pub fn build(base: CheckBase, entry: &Map<String, Value>) -> error::Result<Box<dyn Check>> {
    let params: Params = super::parameters(&base, entry)?;
    let max_points = super::max_points(&base, params.max_points)?;
    Ok(Box::new(CoverageCheck { base, max_points }))
}

pub struct CoverageCheck {
    base: CheckBase,
    max_points: u32,
}

impl CoverageCheck {
    fn coverage_run(&self, ctx: &CheckContext) -> Result<(), CheckFailure> {
        let mut cmd = self.base.command(super::tool("coverage", ctx), ctx)?;
        cmd.args(["run", "-m", "pytest"]).arg(&self.base.project_root);

        let output = self.base.run(cmd)?;
        // 0: all passed, 1: some tests failed; both leave usable data
        match output.code() {
            Some(0 | 1) => Ok(()),
            code => Err(failure("coverage run", code, &output)),
        }
    }

    fn coverage_report(&self, ctx: &CheckContext) -> Result<f64, CheckFailure> {
        let sources = files::source_files(&self.base.project_root)?;

        let mut cmd = self.base.command(super::tool("coverage", ctx), ctx)?;
        cmd.args(["report", "--format=total"]).args(&sources);

        let output = self.base.run(cmd)?;
        if !output.success() {
            return Err(failure("coverage report", output.code(), &output));
        }
        parse_total(&output.stdout)
    }
}

fn failure(step: &str, code: Option<i32>, output: &ToolOutput) -> CheckFailure {
    let detail = if output.stderr.trim().is_empty() {
        &output.stdout
    } else {
        &output.stderr
    };
    CheckFailure::new(format!(
        "{step} exited with {code:?}: {}",
        super::output_tail(detail)
    ))
}

/// Parse the output of `coverage report --format=total`.
pub fn parse_total(stdout: &str) -> Result<f64, CheckFailure> {
    let text = stdout.trim();
    text.parse()
        .map_err(|_| CheckFailure::new(format!("unexpected coverage total `{text}`")))
}

impl Check for CoverageCheck {
    fn base(&self) -> &CheckBase {
        &self.base
    }

    fn kind(&self) -> CheckKind {
        CheckKind::Scored {
            max_score: self.max_points,
        }
    }

    fn execute(&self, ctx: &CheckContext) -> Result<CheckResult, CheckFailure> {
        self.coverage_run(ctx)?;
        let total = self.coverage_report(ctx)?;
        tracing::debug!("coverage total: {total}%");

        let score = translate_score(total, COVERAGE_SCALE, i64::from(self.max_points))?;
        Ok(CheckResult::scored(self.name(), f64::from(score), self.max_points)
            .with_info(format!("coverage {total}%")))
    }
}

#[cfg(test)]
#[path = "coverage_tests.rs"]
mod tests;
