// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Automated grader for student Python projects
#[derive(Parser)]
#[command(name = "grader")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Grade a project
    Grade(GradeArgs),
    /// List available check types
    Checks,
}

#[derive(clap::Args)]
pub struct GradeArgs {
    /// Project directory to grade
    #[arg(value_name = "PROJECT_ROOT")]
    pub project_root: PathBuf,

    /// Grading configuration (JSON, or TOML with a .toml extension)
    #[arg(short = 'c', long = "config", env = "GRADER_CONFIG")]
    pub config: PathBuf,

    /// Submission identifier included in the report
    #[arg(long, value_name = "ID")]
    pub student_id: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Skip the isolated environment and the checks that need it
    #[arg(long)]
    pub skip_venv_creation: bool,

    /// Keep the isolated environment after grading
    #[arg(long)]
    pub keep_venv: bool,

    /// Directory under which per-run tool reports are written
    #[arg(long, value_name = "DIR")]
    pub artifacts_dir: Option<PathBuf>,

    /// Force color output
    #[arg(long, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable color output
    #[arg(long)]
    pub no_color: bool,
}

impl GradeArgs {
    /// Color override from flags, if any.
    pub fn color_override(&self) -> Option<bool> {
        match (self.color, self.no_color) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
