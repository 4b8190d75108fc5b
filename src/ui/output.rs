//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Results go to stdout so they can be captured by build scripts.
//! Diagnostics (debug traces, warnings, errors) go to stderr and respect
//! the quiet and debug flags.

use std::fmt::Display;

use crate::core::types::{RepoPath, StatusCode};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a command result (always shown, even in quiet mode).
pub fn result(message: impl Display) {
    println!("{}", message);
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Format a changed path the way `git status --short` does.
///
/// Paths that are not valid UTF-8 are shown with replacement characters.
pub fn format_status_line(code: StatusCode, path: &RepoPath) -> String {
    format!("{} {}", code.as_char(), path)
}
