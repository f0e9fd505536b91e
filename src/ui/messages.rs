//! User-facing status lines (stdout, errors on stderr).

use crate::utils::colors::{BLUE, BOLD, CYAN, GREEN, RED, RESET, YELLOW};
use std::fmt;

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";
const ICON_STEP: &str = "▶";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", BLUE, BOLD, ICON_INFO, RESET, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", GREEN, BOLD, ICON_OK, RESET, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", YELLOW, BOLD, ICON_WARN, RESET, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}{}{} {}{}", RED, BOLD, ICON_ERR, RESET, msg);
}

/// A long-running step is about to begin.
pub fn step<T: fmt::Display>(msg: T) {
    println!("{}{} {}…{}", CYAN, ICON_STEP, msg, RESET);
}

/// Section header
pub fn header<T: fmt::Display>(msg: T) {
    println!("\n{}{}=== {} ==={}", BLUE, BOLD, msg, RESET);
}
