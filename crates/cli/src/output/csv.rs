// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CSV output formatter.
//!
//! ```text
//! Check,Score,Max Score
//! requirements,1,1
//! structure,true,NaN
//! ```
//!
//! Pass/fail checks put their result in the score column and `NaN` in the
//! maximum column.

use std::borrow::Cow;
use std::io::Write;

use super::Report;
use crate::check::CheckResult;

pub const HEADER: &str = "Check,Score,Max Score";

/// CSV output formatter.
pub struct CsvFormatter<W: Write> {
    writer: W,
}

impl<W: Write> CsvFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write the header and one row per result, in run order.
    pub fn write(&mut self, report: &Report) -> std::io::Result<()> {
        writeln!(self.writer, "{HEADER}")?;
        for result in report.results {
            let name = escape(result.name());
            match result {
                CheckResult::Scored(r) => {
                    writeln!(self.writer, "{name},{},{}", r.score(), r.max_score())?
                }
                CheckResult::NonScored(r) => writeln!(self.writer, "{name},{},NaN", r.passed())?,
            }
        }
        Ok(())
    }
}

/// Quote a field if it contains a delimiter, quote, or line break.
fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[cfg(test)]
#[path = "csv_tests.rs"]
mod tests;
