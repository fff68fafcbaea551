// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Requirements check: the project declares its dependencies.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::check::{Check, CheckBase, CheckContext, CheckKind, CheckResult};
use crate::environment::REQUIREMENTS_FILE;
use crate::error::{self, CheckFailure};

#[derive(Deserialize)]
struct Params {
    max_points: i64,
}

pub fn build(base: CheckBase, entry: &Map<String, Value>) -> error::Result<Box<dyn Check>> {
    let params: Params = super::parameters(&base, entry)?;
    let max_points = super::max_points(&base, params.max_points)?;
    Ok(Box::new(RequirementsCheck { base, max_points }))
}

/// Full points when `requirements.txt` exists at the project root, else zero.
pub struct RequirementsCheck {
    base: CheckBase,
    max_points: u32,
}

impl Check for RequirementsCheck {
    fn base(&self) -> &CheckBase {
        &self.base
    }

    fn kind(&self) -> CheckKind {
        CheckKind::Scored {
            max_score: self.max_points,
        }
    }

    fn execute(&self, _ctx: &CheckContext) -> Result<CheckResult, CheckFailure> {
        let found = self.base.project_root.join(REQUIREMENTS_FILE).is_file();
        let score = if found { self.max_points } else { 0 };

        let info = if found {
            format!("{REQUIREMENTS_FILE} found")
        } else {
            format!("{REQUIREMENTS_FILE} not found")
        };
        Ok(CheckResult::scored(self.name(), f64::from(score), self.max_points).with_info(info))
    }
}

#[cfg(test)]
#[path = "requirements_tests.rs"]
mod tests;
