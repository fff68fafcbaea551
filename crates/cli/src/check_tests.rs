// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

struct NoopCheck {
    base: CheckBase,
}

impl Check for NoopCheck {
    fn base(&self) -> &CheckBase {
        &self.base
    }

    fn kind(&self) -> CheckKind {
        CheckKind::NonScored { fatal: false }
    }

    fn execute(&self, _ctx: &CheckContext) -> Result<CheckResult, CheckFailure> {
        Ok(CheckResult::non_scored(self.name(), true))
    }
}

#[test]
fn scored_result_fields() {
    let result = CheckResult::scored("pylint", 7.0, 10).with_info("rated 7.5/10");
    let CheckResult::Scored(scored) = &result else {
        panic!("expected scored result");
    };
    assert_eq!(scored.score(), 7.0);
    assert_eq!(scored.max_score(), 10);
    assert_eq!(result.name(), "pylint");
    assert_eq!(result.info(), "rated 7.5/10");
    assert!(!result.is_degraded());
}

#[test]
fn degraded_scored_keeps_max_score() {
    let result = CheckResult::degraded("coverage", CheckKind::Scored { max_score: 5 }, "boom");
    match result {
        CheckResult::Scored(ref r) => {
            assert_eq!(r.score(), 0.0);
            assert_eq!(r.max_score(), 5);
        }
        CheckResult::NonScored(_) => panic!("variant changed"),
    }
    assert_eq!(result.error(), "boom");
    assert!(result.is_degraded());
}

#[test]
fn degraded_non_scored_fails() {
    let result = CheckResult::degraded("structure", CheckKind::NonScored { fatal: true }, "bad");
    match result {
        CheckResult::NonScored(ref r) => assert!(!r.passed()),
        CheckResult::Scored(_) => panic!("variant changed"),
    }
    assert!(result.is_degraded());
}

#[test]
fn scored_result_serializes_without_empty_fields() {
    let json = serde_json::to_value(CheckResult::scored("pylint", 3.0, 4)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"name": "pylint", "score": 3.0, "max_score": 4})
    );
}

#[test]
fn non_scored_result_serializes_result_key() {
    let json = serde_json::to_value(CheckResult::degraded(
        "structure",
        CheckKind::NonScored { fatal: false },
        "missing file",
    ))
    .unwrap();
    assert_eq!(
        json,
        serde_json::json!({"name": "structure", "result": false, "error": "missing file"})
    );
}

#[test]
fn pre_execute_requires_environment_for_isolated_check() {
    let check = NoopCheck {
        base: CheckBase::new("tests", "/tmp/project").isolated(true),
    };
    let artifacts = std::env::temp_dir();
    let ctx = CheckContext {
        environment: None,
        artifacts: &artifacts,
    };
    let err = check.pre_execute(&ctx).unwrap_err();
    assert!(err.message().contains("isolated environment"));
}

#[test]
fn pre_execute_allows_plain_check() {
    let check = NoopCheck {
        base: CheckBase::new("requirements", "/tmp/project"),
    };
    let artifacts = std::env::temp_dir();
    let ctx = CheckContext {
        environment: None,
        artifacts: &artifacts,
    };
    assert!(check.pre_execute(&ctx).is_ok());
}

#[test]
fn command_runs_in_project_root_with_resolved_env() {
    let mut base = CheckBase::new("pylint", "/tmp/project");
    base.env.insert("GRADER_TEST".into(), "1".into());
    let artifacts = std::env::temp_dir();
    let ctx = CheckContext {
        environment: None,
        artifacts: &artifacts,
    };

    let cmd = base.command("pylint", &ctx).unwrap();

    assert_eq!(cmd.get_current_dir(), Some(Path::new("/tmp/project")));
    let envs: Vec<_> = cmd.get_envs().collect();
    assert!(envs.contains(&(OsStr::new("GRADER_TEST"), Some(OsStr::new("1")))));
}
