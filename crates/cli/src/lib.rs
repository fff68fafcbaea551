// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check orchestration and isolated environments for grading Python projects.

pub mod check;
pub mod checks;
pub mod cli;
pub mod color;
pub mod config;
pub mod environment;
pub mod error;
pub mod files;
pub mod output;
pub mod process;
pub mod runner;
pub mod score;

pub use check::{Check, CheckBase, CheckContext, CheckKind, CheckResult};
pub use checks::{BuiltChecks, CheckRegistry};
pub use cli::{Cli, Command, GradeArgs, OutputFormat};
pub use config::Config;
pub use environment::{IsolatedEnvironment, PipProvisioner, Provisioner};
pub use error::{CheckFailure, Error, ExitCode, Result};
pub use runner::{Grader, RunnerConfig};
pub use score::translate_score;

#[cfg(test)]
pub mod test_utils;
