// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Type hints check: share of annotated lines, from mypy's line-count report.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::check::{Check, CheckBase, CheckContext, CheckKind, CheckResult};
use crate::error::{self, CheckFailure};
use crate::files;
use crate::score::translate_score;

/// The metric is a ratio.
pub const TYPE_HINTS_SCALE: f64 = 1.0;

/// File written by `mypy --linecount-report`.
pub const LINECOUNT_REPORT: &str = "linecount.txt";

#[derive(Deserialize)]
struct Params {
    max_points: i64,
    #[serde(default)]
    config_file: Option<PathBuf>,
}

pub fn build(base: CheckBase, entry: &Map<String, Value>) -> error::Result<Box<dyn Check>> {
    let params: Params = super::parameters(&base, entry)?;
    let max_points = super::max_points(&base, params.max_points)?;
    Ok(Box::new(TypeHintsCheck {
        base,
        max_points,
        config_file: params.config_file,
    }))
}

pub struct TypeHintsCheck {
    base: CheckBase,
    max_points: u32,
    config_file: Option<PathBuf>,
}

/// Totals from the first line of a line-count report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCount {
    pub annotated: u64,
    pub total: u64,
}

/// Parse the summary line of a mypy line-count report.
///
/// The line ends with `<annotated> <total> total`; leading columns vary by
/// mypy version and are ignored.
pub fn parse_linecount(report: &str) -> Result<LineCount, CheckFailure> {
    let invalid = || CheckFailure::new("malformed mypy linecount report");

    let first = report.lines().next().ok_or_else(invalid)?;
    let fields: Vec<&str> = first.split_whitespace().collect();
    let [.., annotated, total, _] = fields.as_slice() else {
        return Err(invalid());
    };

    Ok(LineCount {
        annotated: annotated.parse().map_err(|_| invalid())?,
        total: total.parse().map_err(|_| invalid())?,
    })
}

impl TypeHintsCheck {
    fn run_mypy(&self, ctx: &CheckContext, report_dir: &Path) -> Result<(), CheckFailure> {
        let sources = files::source_files(&self.base.project_root)?;

        let mut cmd = self.base.command(super::tool("mypy", ctx), ctx)?;
        if let Some(config) = &self.config_file {
            cmd.arg("--config-file").arg(config);
        }
        cmd.arg("--linecount-report").arg(report_dir).args(&sources);

        // Type errors are expected; only the report matters.
        let output = self.base.run(cmd)?;
        tracing::debug!("mypy exited with {:?}", output.code());
        Ok(())
    }
}

impl Check for TypeHintsCheck {
    fn base(&self) -> &CheckBase {
        &self.base
    }

    fn kind(&self) -> CheckKind {
        CheckKind::Scored {
            max_score: self.max_points,
        }
    }

    fn execute(&self, ctx: &CheckContext) -> Result<CheckResult, CheckFailure> {
        let report_dir = ctx.artifacts.join(self.name());
        std::fs::create_dir_all(&report_dir).map_err(|e| {
            CheckFailure::new(format!("cannot create {}: {e}", report_dir.display()))
        })?;

        self.run_mypy(ctx, &report_dir)?;

        let report = std::fs::read_to_string(report_dir.join(LINECOUNT_REPORT))
            .map_err(|_| CheckFailure::new("mypy linecount report not found"))?;
        let counts = parse_linecount(&report)?;
        let info = format!("{}/{} lines annotated", counts.annotated, counts.total);

        if counts.total == 0 {
            tracing::warn!("{}: no lines to measure", self.name());
            return Ok(CheckResult::scored(self.name(), 0.0, self.max_points).with_info(info));
        }

        let ratio = counts.annotated as f64 / counts.total as f64;
        let score = translate_score(ratio, TYPE_HINTS_SCALE, i64::from(self.max_points))?;
        Ok(CheckResult::scored(self.name(), f64::from(score), self.max_points).with_info(info))
    }
}

#[cfg(test)]
#[path = "type_hints_tests.rs"]
mod tests;
