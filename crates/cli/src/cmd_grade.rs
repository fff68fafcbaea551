// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Grade command implementation.

use std::io::Write;
use std::sync::Arc;

use termcolor::StandardStream;

use grader::cli::{Cli, GradeArgs, OutputFormat};
use grader::color::resolve_color;
use grader::config;
use grader::environment::{DEFAULT_PYTHON, PipProvisioner};
use grader::error::ExitCode;
use grader::output::Report;
use grader::output::csv::CsvFormatter;
use grader::output::json::JsonFormatter;
use grader::output::text::TextFormatter;
use grader::runner::{Grader, RunnerConfig};

/// Run the grade command.
pub fn run(cli: &Cli, args: &GradeArgs) -> anyhow::Result<ExitCode> {
    tracing::debug!("loading config from {}", args.config.display());
    let config = config::load(&args.config)?;

    let python = config
        .environment
        .python
        .clone()
        .unwrap_or_else(|| DEFAULT_PYTHON.to_string());

    let runner = RunnerConfig {
        skip_isolation: args.skip_venv_creation,
        keep_environment: args.keep_venv,
        artifacts_dir: args.artifacts_dir.clone(),
        student_id: args.student_id.clone(),
    };
    let grader = Grader::new(runner).with_provisioner(Arc::new(PipProvisioner::new(python)));

    let results = grader.grade(&config, &args.project_root)?;
    let report = Report::new(&results, args.student_id.as_deref());

    match args.output {
        OutputFormat::Text => {
            let stdout = StandardStream::stdout(resolve_color(args.color_override()));
            let mut formatter = TextFormatter::new(stdout.lock(), cli.verbose > 0);
            formatter.write(&report)?;
        }
        OutputFormat::Json => {
            let mut stdout = std::io::stdout().lock();
            JsonFormatter::new(&mut stdout).write(&report)?;
            stdout.flush()?;
        }
        OutputFormat::Csv => {
            let mut stdout = std::io::stdout().lock();
            CsvFormatter::new(&mut stdout).write(&report)?;
            stdout.flush()?;
        }
    }

    Ok(ExitCode::Success)
}
