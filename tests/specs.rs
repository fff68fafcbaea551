//! Behavioral specifications for the grader CLI.
//!
//! These tests are black-box: they invoke the CLI binary and verify
//! stdout, stderr, and exit codes. None of them needs Python installed.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

use prelude::*;
use serde_json::json;

fn requirements_and_structure() -> Project {
    Project::empty()
        .file("requirements.txt", "requests\n")
        .file("src/app.py", "print('hi')\n")
        .file("tests/test_app.py", "def test_ok():\n    pass\n")
        .config_file(
            "structure.json",
            r#"{"sources": {"name": "sources", "required": true, "patterns": ["src/*.py"]}}"#,
        )
        .config(&json!({
            "checks": [
                {"name": "requirements", "is_venv_required": false, "max_points": 5},
                {
                    "name": "structure",
                    "is_venv_required": false,
                    "structure_file": "${{config_dir}}/structure.json"
                }
            ]
        }))
}

// =============================================================================
// COMMAND SPECS
// =============================================================================

/// > grader (bare invocation) shows help
#[test]
fn bare_invocation_shows_help() {
    grader_cmd()
        .assert()
        .success()
        .stdout(predicates::str::contains("Usage:"));
}

/// > Exit code 0 when invoked with --help
#[test]
fn help_exits_successfully() {
    grader_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("grade"));
}

#[test]
fn version_exits_successfully() {
    grader_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicates::str::contains(env!("CARGO_PKG_VERSION")));
}

/// > grader checks lists the registered check types
#[test]
fn checks_command_lists_builtin_checks() {
    grader_cmd()
        .arg("checks")
        .assert()
        .success()
        .stdout("requirements\nstructure\npylint\ncoverage\ntype-hints\ntests\n");
}

/// > Exit code 2 for unknown commands
#[test]
fn unknown_command_fails() {
    grader_cmd()
        .arg("unknown")
        .assert()
        .code(2)
        .stderr(predicates::str::is_match(r"(?i)(unrecognized|unknown)").unwrap());
}

#[test]
fn grade_requires_config() {
    let project = Project::empty();
    grader_cmd()
        .arg("grade")
        .arg(project.root())
        .assert()
        .code(2)
        .stderr(predicates::str::contains("--config"));
}

#[test]
fn color_flags_conflict() {
    requirements_and_structure()
        .grade()
        .args(["--color", "--no-color"])
        .assert()
        .code(2);
}

// =============================================================================
// RUN-LEVEL ERROR SPECS
// =============================================================================

/// > A missing project root is rejected before any check runs
#[test]
fn missing_project_root_exits_2() {
    let project = requirements_and_structure();
    grader_cmd()
        .arg("grade")
        .arg(project.root().join("missing"))
        .arg("-c")
        .arg(project.config_path())
        .assert()
        .code(2)
        .stderr(predicates::str::contains("project root"));
}

#[test]
fn missing_config_file_exits_2() {
    Project::empty()
        .grade()
        .assert()
        .code(2)
        .stdout(predicates::str::is_empty());
}

/// > An unregistered check name rejects the whole configuration
#[test]
fn unknown_check_exits_2() {
    Project::empty()
        .config(&json!({
            "checks": [
                {"name": "requirements", "is_venv_required": false, "max_points": 1},
                {"name": "no-such-check", "is_venv_required": false}
            ]
        }))
        .grade()
        .assert()
        .code(2)
        .stderr(predicates::str::contains("no-such-check"))
        .stdout(predicates::str::is_empty());
}

#[test]
fn entry_without_isolation_flag_exits_2() {
    Project::empty()
        .config(&json!({"checks": [{"name": "requirements", "max_points": 1}]}))
        .grade()
        .assert()
        .code(2)
        .stderr(predicates::str::contains("is_venv_required"));
}

#[test]
fn config_from_environment_variable() {
    let project = requirements_and_structure();
    grader_cmd()
        .arg("grade")
        .arg(project.root())
        .arg("--artifacts-dir")
        .arg(project.config_path().with_file_name("artifacts"))
        .env("GRADER_CONFIG", project.config_path())
        .assert()
        .success()
        .stdout(predicates::str::contains("Total: 5/5"));
}

#[test]
fn toml_config_is_accepted() {
    let project = Project::empty()
        .file("requirements.txt", "")
        .config_file(
            "grading.toml",
            r#"
[[checks]]
name = "requirements"
is_venv_required = false
max_points = 3
"#,
        );
    let config = project.config_path().with_file_name("grading.toml");

    grader_cmd()
        .arg("grade")
        .arg(project.root())
        .arg("-c")
        .arg(config)
        .assert()
        .success()
        .stdout(predicates::str::contains("Check: requirements, Score: 3/3"));
}

// =============================================================================
// OUTPUT SPECS
// =============================================================================

#[test]
fn text_output_lists_each_check_and_total() {
    requirements_and_structure()
        .grade()
        .args(["--student-id", "s123", "--no-color"])
        .assert()
        .success()
        .stdout(
            "Student: s123\n\
             Check: requirements, Score: 5/5\n\
             Check: structure, Result: PASS\n\
             \n\
             Total: 5/5\n",
        );
}

#[test]
fn verbose_text_output_includes_info() {
    requirements_and_structure()
        .grade()
        .args(["-v", "--no-color"])
        .assert()
        .success()
        .stdout(predicates::str::contains("  requirements.txt found"));
}

#[test]
fn no_color_output_has_no_ansi_codes() {
    requirements_and_structure()
        .grade()
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicates::str::contains("\x1b[").not());
}

#[test]
fn json_output_splits_scored_and_non_scored() {
    let output = requirements_and_structure()
        .grade()
        .args(["-o", "json", "--student-id", "s123"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("output should be valid JSON");
    assert_eq!(report["student_id"], "s123");
    assert_eq!(report["total_score"], 5.0);
    assert_eq!(report["max_score"], 5);
    assert_eq!(report["scored_checks"][0]["name"], "requirements");
    assert_eq!(report["non_scored_checks"][0]["name"], "structure");
    assert_eq!(report["non_scored_checks"][0]["result"], true);
    assert!(report["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn csv_output_has_header_and_rows() {
    requirements_and_structure()
        .grade()
        .args(["-o", "csv"])
        .assert()
        .success()
        .stdout("Check,Score,Max Score\nrequirements,5,5\nstructure,true,NaN\n");
}

#[test]
fn failed_structure_reports_missing_elements() {
    let project = requirements_and_structure();
    std::fs::remove_dir_all(project.root().join("src")).unwrap();

    project
        .grade()
        .args(["-v", "--no-color"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Check: structure, Result: FAIL"))
        .stdout(predicates::str::contains("missing required: sources"));
}

// =============================================================================
// ISOLATION SPECS
// =============================================================================

/// > --skip-venv-creation drops checks that need the isolated environment
#[test]
fn skip_venv_creation_drops_isolated_checks() {
    let project = Project::empty()
        .file("requirements.txt", "")
        .config(&json!({
            "checks": [
                {"name": "pylint", "is_venv_required": true, "max_points": 10},
                {"name": "requirements", "is_venv_required": false, "max_points": 2}
            ]
        }));

    project
        .grade()
        .args(["--skip-venv-creation", "-o", "csv"])
        .assert()
        .success()
        .stdout("Check,Score,Max Score\nrequirements,2,2\n");

    assert!(!project.root().join(".venv").exists());
    assert!(!project.root().join("venv").exists());
}

#[test]
fn scratch_files_are_removed_after_grading() {
    let project = requirements_and_structure().file(".coverage", "stale");

    project.grade().assert().success();

    assert!(!project.root().join(".coverage").exists());
}
