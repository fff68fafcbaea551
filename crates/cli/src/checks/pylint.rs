// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pylint check: the pylint rating mapped onto the point budget.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::check::{Check, CheckBase, CheckContext, CheckKind, CheckResult};
use crate::error::{self, CheckFailure};
use crate::files;
use crate::score::translate_score;

/// Pylint ratings are out of ten.
pub const PYLINT_SCALE: f64 = 10.0;

const RATING_MARKER: &str = "Your code has been rated at";

#[allow(clippy::expect_used)]
static RATING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"rated at (-?\d+(?:\.\d+)?)/10").expect("valid regex"));

#[derive(Deserialize)]
struct Params {
    max_points: i64,
    #[serde(default)]
    pylintrc: Option<PathBuf>,
}

pub fn build(base: CheckBase, entry: &Map<String, Value>) -> error::Result<Box<dyn Check>> {
    let params: Params = super::parameters(&base, entry)?;
    let max_points = super::max_points(&base, params.max_points)?;
    Ok(Box::new(PylintCheck {
        base,
        max_points,
        pylintrc: params.pylintrc,
    }))
}

pub struct PylintCheck {
    base: CheckBase,
    max_points: u32,
    pylintrc: Option<PathBuf>,
}

impl Check for PylintCheck {
    fn base(&self) -> &CheckBase {
        &self.base
    }

    fn kind(&self) -> CheckKind {
        CheckKind::Scored {
            max_score: self.max_points,
        }
    }

    fn execute(&self, ctx: &CheckContext) -> Result<CheckResult, CheckFailure> {
        let sources = files::python_files(&self.base.project_root)?;
        if sources.is_empty() {
            return Err(CheckFailure::new("no Python files to lint"));
        }
        tracing::debug!("running pylint on {} files", sources.len());

        let mut cmd = self.base.command(super::tool("pylint", ctx), ctx)?;
        cmd.args(&sources).arg("--fail-under=0");
        if let Some(rc) = &self.pylintrc {
            cmd.arg("--rcfile").arg(rc);
        }

        let output = self.base.run(cmd)?;
        if !output.success() {
            return Err(CheckFailure::new(format!(
                "pylint exited with {:?}: {}",
                output.code(),
                super::output_tail(&output.stderr)
            )));
        }

        let rating = parse_rating(&output.stdout)?;
        tracing::debug!("pylint rating: {rating}");
        // Ratings go below zero for heavily penalized code; that still scores 0.
        let score = translate_score(rating.max(0.0), PYLINT_SCALE, i64::from(self.max_points))?;

        Ok(CheckResult::scored(self.name(), f64::from(score), self.max_points)
            .with_info(format!("rated at {rating}/10")))
    }
}

/// Extract the rating from pylint's report.
pub fn parse_rating(stdout: &str) -> Result<f64, CheckFailure> {
    stdout
        .lines()
        .filter(|line| line.contains(RATING_MARKER))
        .find_map(|line| RATING_RE.captures(line))
        .and_then(|caps| caps[1].parse().ok())
        .ok_or_else(|| CheckFailure::new("pylint score not found"))
}

#[cfg(test)]
#[path = "pylint_tests.rs"]
mod tests;
