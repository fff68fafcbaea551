// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output formatter.
//!
//! JSON is buffered and written at the end (not streamed).

use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::Report;
use crate::check::{NonScoredResult, ScoredResult};

/// Serialized shape of a report.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<&'a str>,
    pub total_score: f64,
    pub max_score: u64,
    pub scored_checks: Vec<&'a ScoredResult>,
    pub non_scored_checks: Vec<&'a NonScoredResult>,
}

impl<'a> JsonReport<'a> {
    pub fn new(report: &Report<'a>, timestamp: DateTime<Utc>) -> Self {
        let (total_score, max_score) = report.totals();
        Self {
            timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            student_id: report.student_id,
            total_score,
            max_score,
            scored_checks: report.scored().collect(),
            non_scored_checks: report.non_scored().collect(),
        }
    }
}

/// JSON output formatter.
pub struct JsonFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write the complete report, stamped with the current time.
    pub fn write(&mut self, report: &Report) -> std::io::Result<()> {
        self.write_at(report, Utc::now())
    }

    /// Write the complete report with an explicit timestamp.
    pub fn write_at(&mut self, report: &Report, timestamp: DateTime<Utc>) -> std::io::Result<()> {
        let output = JsonReport::new(report, timestamp);
        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{json}")
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
