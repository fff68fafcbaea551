// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check registry.
//!
//! Built-in checks are registered here:
//! - requirements: `requirements.txt` is present (scored)
//! - structure: required files and directories exist (pass/fail)
//! - pylint: pylint rating (scored, isolated)
//! - coverage: statement coverage of the test suite (scored, isolated)
//! - type-hints: share of annotated lines reported by mypy (scored, isolated)
//! - tests: weighted pytest results (scored, isolated)
//!
//! Whether a check runs in the isolated environment is decided by the
//! configuration entry, not by the check type.

pub mod coverage;
pub mod pylint;
pub mod requirements;
pub mod structure;
pub mod type_hints;

use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::check::{Check, CheckBase, CheckContext};
use crate::config::{Config, parse_duration};
use crate::error::{Error, Result};

/// Entry key naming the check type.
pub const NAME_KEY: &str = "name";

/// Entry key declaring the isolation requirement.
pub const ISOLATION_KEY: &str = "is_venv_required";

/// Builds a check from its shared fields and the verbatim config entry.
pub type Constructor = fn(CheckBase, &Map<String, Value>) -> Result<Box<dyn Check>>;

/// Built-in check types in canonical order.
pub const BUILTIN_CHECKS: &[(&str, Constructor)] = &[
    ("requirements", requirements::build),
    ("structure", structure::build),
    ("pylint", pylint::build),
    ("coverage", coverage::build),
    ("type-hints", type_hints::build),
    ("tests", run_tests::build),
];

/// Checks produced from one configuration, split by isolation requirement.
///
/// Each list keeps configuration order.
#[derive(Default)]
pub struct BuiltChecks {
    pub non_isolated: Vec<Box<dyn Check>>,
    pub isolated: Vec<Box<dyn Check>>,
}

impl BuiltChecks {
    pub fn len(&self) -> usize {
        self.non_isolated.len() + self.isolated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Maps check-type names to constructors.
#[derive(Clone)]
pub struct CheckRegistry {
    constructors: Vec<(String, Constructor)>,
}

impl Default for CheckRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for (name, constructor) in BUILTIN_CHECKS {
            registry.register(*name, *constructor);
        }
        registry
    }
}

impl CheckRegistry {
    /// Registry with no check types.
    pub fn empty() -> Self {
        Self {
            constructors: Vec::new(),
        }
    }

    /// Register a check type, replacing any constructor under the same name.
    pub fn register(&mut self, name: impl Into<String>, constructor: Constructor) {
        let name = name.into();
        match self.constructors.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = constructor,
            None => self.constructors.push((name, constructor)),
        }
    }

    /// Registered check-type names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constructors.iter().map(|(n, _)| n.as_str())
    }

    pub fn get(&self, name: &str) -> Option<Constructor> {
        self.constructors
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| *c)
    }

    /// Build every configured check for `project_root`.
    ///
    /// Validation is all-or-nothing: any malformed entry rejects the whole
    /// configuration before a single check exists.
    pub fn build(&self, config: &Config, project_root: &Path) -> Result<BuiltChecks> {
        self.build_with_env(config, project_root, process_environment())
    }

    /// Like [`build`](Self::build), with an explicit base environment.
    pub fn build_with_env(
        &self,
        config: &Config,
        project_root: &Path,
        process_env: BTreeMap<String, String>,
    ) -> Result<BuiltChecks> {
        let entries = config
            .checks
            .as_ref()
            .ok_or_else(|| Error::config("missing `checks` list"))?;

        let mut built = BuiltChecks::default();
        let mut seen = BTreeSet::new();

        for (index, entry) in entries.iter().enumerate() {
            let Value::Object(entry) = entry else {
                return Err(Error::config(format!("check #{} must be an object", index + 1)));
            };
            let header = EntryHeader::parse(index, entry)?;

            let constructor = self.get(&header.name).ok_or_else(|| Error::UnknownCheck {
                name: header.name.clone(),
            })?;

            if !seen.insert(header.name.clone()) {
                return Err(Error::config(format!(
                    "check `{}` is declared more than once",
                    header.name
                )));
            }

            let mut base = CheckBase::new(&header.name, project_root).isolated(header.isolated);
            base.env = resolve_environment(
                process_env.clone(),
                &config.environment.variables,
                &header.variables,
            );
            base.timeout = header.timeout.or(config.timeout);

            let check = constructor(base, entry)?;
            tracing::debug!(
                "registered check {} (isolated: {})",
                check.name(),
                check.requires_isolated_environment()
            );

            if check.requires_isolated_environment() {
                built.isolated.push(check);
            } else {
                built.non_isolated.push(check);
            }
        }

        Ok(built)
    }
}

/// Merge environment variables; later layers win on collision.
pub fn resolve_environment(
    process: BTreeMap<String, String>,
    global: &BTreeMap<String, String>,
    check: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut env = process;
    env.extend(global.iter().map(|(k, v)| (k.clone(), v.clone())));
    env.extend(check.iter().map(|(k, v)| (k.clone(), v.clone())));
    env
}

/// Current process environment, skipping entries that are not UTF-8.
fn process_environment() -> BTreeMap<String, String> {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}

/// Fields every check entry shares.
struct EntryHeader {
    name: String,
    isolated: bool,
    variables: BTreeMap<String, String>,
    timeout: Option<std::time::Duration>,
}

impl EntryHeader {
    fn parse(index: usize, entry: &Map<String, Value>) -> Result<Self> {
        let position = index + 1;

        let name = match entry.get(NAME_KEY) {
            Some(Value::String(name)) => name.clone(),
            Some(_) => {
                return Err(Error::config(format!(
                    "check #{position}: `{NAME_KEY}` must be a string"
                )));
            }
            None => {
                return Err(Error::config(format!(
                    "check #{position} is missing `{NAME_KEY}`"
                )));
            }
        };

        let isolated = match entry.get(ISOLATION_KEY) {
            Some(Value::Bool(flag)) => *flag,
            Some(_) => {
                return Err(Error::config(format!(
                    "check `{name}`: `{ISOLATION_KEY}` must be a boolean"
                )));
            }
            None => {
                return Err(Error::config(format!(
                    "check `{name}` is missing `{ISOLATION_KEY}`"
                )));
            }
        };

        #[derive(Deserialize)]
        struct EntryEnvironment {
            #[serde(default)]
            variables: BTreeMap<String, String>,
        }

        let variables = match entry.get("environment") {
            Some(value) => {
                serde_json::from_value::<EntryEnvironment>(value.clone())
                    .map_err(|e| {
                        Error::config(format!("check `{name}`: invalid `environment`: {e}"))
                    })?
                    .variables
            }
            None => BTreeMap::new(),
        };

        let timeout = match entry.get("timeout") {
            Some(Value::String(s)) => Some(
                parse_duration(s)
                    .map_err(|e| Error::config(format!("check `{name}`: {e}")))?,
            ),
            Some(_) => {
                return Err(Error::config(format!(
                    "check `{name}`: `timeout` must be a duration string"
                )));
            }
            None => None,
        };

        Ok(Self {
            name,
            isolated,
            variables,
            timeout,
        })
    }
}

/// Deserialize check-specific parameters from the verbatim entry.
pub(crate) fn parameters<T: DeserializeOwned>(base: &CheckBase, entry: &Map<String, Value>) -> Result<T> {
    serde_json::from_value(Value::Object(entry.clone())).map_err(|e| {
        Error::config(format!("check `{}`: invalid parameters: {e}", base.name))
    })
}

/// Validate a configured point budget.
pub(crate) fn max_points(base: &CheckBase, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        Error::config(format!(
            "check `{}`: `max_points` must be a non-negative integer, got {value}",
            base.name
        ))
    })
}

/// Program to invoke for a Python tool: the sandbox copy when isolated.
pub(crate) fn tool(name: &str, ctx: &CheckContext) -> OsString {
    match ctx.environment {
        Some(env) => env.executable(name).into_os_string(),
        None => OsString::from(name),
    }
}

/// Last lines of tool output, for failure messages.
pub(crate) fn output_tail(text: &str) -> String {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(5);
    lines[start..].join("\n")
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
