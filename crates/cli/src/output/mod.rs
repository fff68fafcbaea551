// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report formatting for check results.

pub mod csv;
pub mod json;
pub mod text;

use crate::check::{CheckResult, NonScoredResult, ScoredResult};

/// Results of one run, split by variant.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub results: &'a [CheckResult],
    pub student_id: Option<&'a str>,
}

impl<'a> Report<'a> {
    pub fn new(results: &'a [CheckResult], student_id: Option<&'a str>) -> Self {
        Self {
            results,
            student_id,
        }
    }

    pub fn scored(&self) -> impl Iterator<Item = &'a ScoredResult> + 'a {
        self.results.iter().filter_map(|r| match r {
            CheckResult::Scored(s) => Some(s),
            CheckResult::NonScored(_) => None,
        })
    }

    pub fn non_scored(&self) -> impl Iterator<Item = &'a NonScoredResult> + 'a {
        self.results.iter().filter_map(|r| match r {
            CheckResult::NonScored(n) => Some(n),
            CheckResult::Scored(_) => None,
        })
    }

    /// Sum of scores and of maxima over scored checks.
    pub fn totals(&self) -> (f64, u64) {
        self.scored().fold((0.0, 0), |(score, max), r| {
            (score + r.score(), max + u64::from(r.max_score()))
        })
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
