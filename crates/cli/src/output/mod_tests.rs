// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::check::CheckKind;

pub(super) fn sample_results() -> Vec<CheckResult> {
    vec![
        CheckResult::scored("requirements", 1.0, 1),
        CheckResult::non_scored("structure", true),
        CheckResult::scored("tests", 2.5, 5).with_info("passed 3/4 tests"),
        CheckResult::degraded("pylint", CheckKind::Scored { max_score: 4 }, "pylint score not found"),
        CheckResult::non_scored("layout", false),
    ]
}

#[test]
fn splits_results_by_variant() {
    let results = sample_results();
    let report = Report::new(&results, None);

    let scored: Vec<_> = report.scored().map(|r| r.max_score()).collect();
    assert_eq!(scored, vec![1, 5, 4]);
    assert_eq!(report.non_scored().count(), 2);
}

#[test]
fn totals_sum_scored_checks() {
    let results = sample_results();
    assert_eq!(Report::new(&results, None).totals(), (3.5, 10));
}

#[test]
fn empty_report_totals_zero() {
    assert_eq!(Report::new(&[], None).totals(), (0.0, 0));
}
