// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text output formatter.
//!
//! ```text
//! Check: requirements, Score: 1/1
//! Check: structure, Result: PASS
//! Check: pylint, Score: 0/4
//!   error: pylint score not found
//!
//! Total: 1/5
//! ```

use std::io::Write;

use termcolor::{ColorSpec, WriteColor};

use super::Report;
use crate::check::CheckResult;
use crate::color::scheme;

/// Text output formatter with color support.
pub struct TextFormatter<W: WriteColor> {
    writer: W,
    verbose: bool,
}

impl<W: WriteColor> TextFormatter<W> {
    /// `verbose` adds each check's info line.
    pub fn new(writer: W, verbose: bool) -> Self {
        Self { writer, verbose }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write every result followed by the total.
    pub fn write(&mut self, report: &Report) -> std::io::Result<()> {
        if let Some(id) = report.student_id {
            writeln!(self.writer, "Student: {id}")?;
        }
        for result in report.results {
            self.write_check(result)?;
        }
        self.write_summary(report)
    }

    /// Write a single check result.
    pub fn write_check(&mut self, result: &CheckResult) -> std::io::Result<()> {
        write!(self.writer, "Check: ")?;
        self.colored(&scheme::check_name(), result.name())?;

        match result {
            CheckResult::Scored(r) => {
                write!(self.writer, ", Score: ")?;
                let spec = if r.score() <= 0.0 {
                    scheme::fail()
                } else if r.score() >= f64::from(r.max_score()) {
                    scheme::pass()
                } else {
                    scheme::partial()
                };
                self.colored(&spec, &format!("{}/{}", r.score(), r.max_score()))?;
            }
            CheckResult::NonScored(r) => {
                write!(self.writer, ", Result: ")?;
                if r.passed() {
                    self.colored(&scheme::pass(), "PASS")?;
                } else {
                    self.colored(&scheme::fail(), "FAIL")?;
                }
            }
        }
        writeln!(self.writer)?;

        if self.verbose && !result.info().is_empty() {
            self.colored(&scheme::info(), &format!("  {}", result.info()))?;
            writeln!(self.writer)?;
        }
        if result.is_degraded() {
            self.colored(&scheme::error(), &format!("  error: {}", result.error()))?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_summary(&mut self, report: &Report) -> std::io::Result<()> {
        let (score, max) = report.totals();
        writeln!(self.writer)?;
        write!(self.writer, "Total: ")?;
        self.colored(&scheme::check_name(), &format!("{score}/{max}"))?;
        writeln!(self.writer)
    }

    fn colored(&mut self, spec: &ColorSpec, text: &str) -> std::io::Result<()> {
        self.writer.set_color(spec)?;
        write!(self.writer, "{text}")?;
        self.writer.reset()
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
