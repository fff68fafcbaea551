// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Structure check: required files and directories are present.
//!
//! The structure file is a JSON object of elements:
//!
//! ```json
//! {
//!   "sources": {"name": "sources", "required": true, "patterns": ["src/**/*.py"]},
//!   "readme": {"name": "readme", "required": false, "patterns": ["README*"]}
//! }
//! ```
//!
//! An element is satisfied when every one of its patterns matches at least
//! one path under the project root. Only required elements affect the result.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::check::{Check, CheckBase, CheckContext, CheckKind, CheckResult};
use crate::error::{self, CheckFailure};
use crate::files;

#[derive(Deserialize)]
struct Params {
    structure_file: PathBuf,
    #[serde(default)]
    is_fatal: bool,
}

pub fn build(base: CheckBase, entry: &Map<String, Value>) -> error::Result<Box<dyn Check>> {
    let params: Params = super::parameters(&base, entry)?;
    Ok(Box::new(StructureCheck {
        base,
        structure_file: params.structure_file,
        fatal: params.is_fatal,
    }))
}

pub struct StructureCheck {
    base: CheckBase,
    structure_file: PathBuf,
    fatal: bool,
}

/// One entry of a structure file.
#[derive(Debug, Clone, Deserialize)]
pub struct StructureElement {
    pub name: String,
    pub required: bool,
    pub patterns: Vec<String>,
}

impl StructureElement {
    /// True if every pattern matches at least one of `paths`.
    pub fn is_satisfied(&self, paths: &[PathBuf]) -> Result<bool, CheckFailure> {
        for pattern in &self.patterns {
            let matcher = compile(pattern)?;
            if !paths.iter().any(|p| matcher.is_match(p)) {
                tracing::debug!("{}: no match for `{pattern}`", self.name);
                return Ok(false);
            }
        }
        Ok(true)
    }
}

fn compile(pattern: &str) -> Result<GlobMatcher, CheckFailure> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| CheckFailure::new(format!("invalid structure pattern `{pattern}`: {e}")))
}

/// Read a structure file.
pub fn load_structure(path: &Path) -> Result<Vec<StructureElement>, CheckFailure> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CheckFailure::new(format!("cannot read structure file: {e}")))?;
    let elements: BTreeMap<String, StructureElement> = serde_json::from_str(&content)
        .map_err(|e| CheckFailure::new(format!("invalid structure file: {e}")))?;
    Ok(elements.into_values().collect())
}

impl Check for StructureCheck {
    fn base(&self) -> &CheckBase {
        &self.base
    }

    fn kind(&self) -> CheckKind {
        CheckKind::NonScored { fatal: self.fatal }
    }

    fn execute(&self, _ctx: &CheckContext) -> Result<CheckResult, CheckFailure> {
        let elements = load_structure(&self.structure_file)?;
        let paths = files::project_entries(&self.base.project_root)?;

        let mut missing = Vec::new();
        for element in &elements {
            let satisfied = element.is_satisfied(&paths)?;
            tracing::debug!("structure element {}: valid = {satisfied}", element.name);
            if element.required && !satisfied {
                missing.push(element.name.as_str());
            }
        }

        let result = CheckResult::non_scored(self.name(), missing.is_empty());
        Ok(if missing.is_empty() {
            result
        } else {
            result.with_info(format!("missing required: {}", missing.join(", ")))
        })
    }
}

#[cfg(test)]
#[path = "structure_tests.rs"]
mod tests;
