// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use termcolor::Color;
use yare::parameterized;

fn env(no_color: bool, color: bool, tty: bool, ci: bool) -> ColorEnv {
    ColorEnv {
        no_color,
        color,
        tty,
        ci,
    }
}

#[parameterized(
    flag_forces_color = { Some(true), env(true, false, false, true), ColorChoice::Always },
    flag_disables_color = { Some(false), env(false, true, true, false), ColorChoice::Never },
    no_color_wins_over_color = { None, env(true, true, true, false), ColorChoice::Never },
    color_without_tty = { None, env(false, true, false, false), ColorChoice::Always },
    not_a_tty = { None, env(false, false, false, false), ColorChoice::Never },
    ci = { None, env(false, false, true, true), ColorChoice::Never },
    interactive = { None, env(false, false, true, false), ColorChoice::Auto },
)]
fn color_decision(force: Option<bool>, env: ColorEnv, expected: ColorChoice) {
    assert_eq!(choose(force, env), expected);
}

#[test]
fn scheme_check_name_is_bold() {
    assert!(scheme::check_name().bold());
}

#[test]
fn scheme_fail_is_red_bold() {
    let spec = scheme::fail();
    assert_eq!(spec.fg(), Some(&Color::Red));
    assert!(spec.bold());
}

#[test]
fn scheme_pass_is_green_bold() {
    let spec = scheme::pass();
    assert_eq!(spec.fg(), Some(&Color::Green));
    assert!(spec.bold());
}

#[test]
fn scheme_partial_is_yellow() {
    assert_eq!(scheme::partial().fg(), Some(&Color::Yellow));
}

#[test]
fn scheme_info_has_no_color() {
    let spec = scheme::info();
    assert!(spec.fg().is_none());
    assert!(!spec.bold());
}
