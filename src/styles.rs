//! Terminal text styling utilities.
//!
//! Provides clean abstractions for ANSI terminal styling, keeping escape codes
//! isolated from application code.

use std::sync::atomic::{AtomicBool, Ordering};

/// ANSI escape code for bold text.
pub const BOLD: &str = "\x1b[1m";

/// ANSI escape code for dim text.
pub const DIM: &str = "\x1b[2m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// ANSI escape code to reset all styling.
pub const RESET: &str = "\x1b[0m";

static COLORS_DISABLED: AtomicBool = AtomicBool::new(false);

/// Force colors off for the rest of the process (`--no-color`).
pub fn disable_colors() {
    COLORS_DISABLED.store(true, Ordering::Relaxed);
    console::set_colors_enabled(false);
    console::set_colors_enabled_stderr(false);
}

/// Whether stdout should receive ANSI styling.
/// Honors `--no-color`, `NO_COLOR`, and tty detection (via `console`).
pub fn colors_enabled() -> bool {
    !COLORS_DISABLED.load(Ordering::Relaxed) && console::colors_enabled()
}

/// Whether stderr should receive ANSI styling.
pub fn colors_enabled_stderr() -> bool {
    !COLORS_DISABLED.load(Ordering::Relaxed) && console::colors_enabled_stderr()
}

fn paint(code: &str, text: &str) -> String {
    if colors_enabled() {
        format!("{code}{text}{RESET}")
    } else {
        text.to_string()
    }
}

pub fn bold(text: &str) -> String {
    paint(BOLD, text)
}

pub fn dim(text: &str) -> String {
    paint(DIM, text)
}

pub fn red(text: &str) -> String {
    paint(RED, text)
}

pub fn green(text: &str) -> String {
    paint(GREEN, text)
}

pub fn yellow(text: &str) -> String {
    paint(YELLOW, text)
}

pub fn cyan(text: &str) -> String {
    paint(CYAN, text)
}
