// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Color detection and terminal styling.
//!
//! Detection order:
//! 1. `--no-color` / `--color` flags
//! 2. NO_COLOR env var → no color
//! 3. COLOR env var → use color
//! 4. default:
//!    - If not stdout.is_tty() → no color
//!    - If CI env var set → no color
//!    - Else → auto

use std::io::IsTerminal;
use termcolor::ColorChoice;

/// Inputs to color detection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorEnv {
    pub no_color: bool,
    pub color: bool,
    pub tty: bool,
    pub ci: bool,
}

impl ColorEnv {
    /// Read the process environment.
    pub fn detect() -> Self {
        Self {
            no_color: std::env::var_os("NO_COLOR").is_some(),
            color: std::env::var_os("COLOR").is_some(),
            tty: std::io::stdout().is_terminal(),
            ci: std::env::var_os("CI").is_some(),
        }
    }
}

/// Resolve color choice; `force` comes from the command line.
pub fn resolve_color(force: Option<bool>) -> ColorChoice {
    choose(force, ColorEnv::detect())
}

/// Pure color decision.
pub fn choose(force: Option<bool>, env: ColorEnv) -> ColorChoice {
    match force {
        Some(true) => return ColorChoice::Always,
        Some(false) => return ColorChoice::Never,
        None => {}
    }
    // no-color.org: any value (including empty) disables color
    if env.no_color {
        return ColorChoice::Never;
    }
    if env.color {
        return ColorChoice::Always;
    }
    if !env.tty || env.ci {
        return ColorChoice::Never;
    }
    ColorChoice::Auto
}

/// Color scheme for reports.
pub mod scheme {
    use termcolor::{Color, ColorSpec};

    /// Bold check name.
    pub fn check_name() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        spec
    }

    /// Green "PASS" or full marks.
    pub fn pass() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Green)).set_bold(true);
        spec
    }

    /// Red "FAIL" or zero.
    pub fn fail() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red)).set_bold(true);
        spec
    }

    /// Yellow partial score.
    pub fn partial() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Yellow)).set_bold(true);
        spec
    }

    /// Red error detail of a degraded check.
    pub fn error() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red));
        spec
    }

    /// Default (no color) for info lines.
    pub fn info() -> ColorSpec {
        ColorSpec::new()
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
