//! Verbosity-gated diagnostics.
//!
//! Commands probe and filter repositories before any [`crate::output`] sink
//! exists; these helpers cover that startup window. Everything louder than
//! debug goes through the `Output` trait instead.

use crate::styles;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn init_logging(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn verbose_enabled() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Print a dimmed `debug:` line, only when verbose mode is on.
pub fn debug(message: &str) {
    if verbose_enabled() {
        println!("{}", styles::dim(&format!("debug: {message}")));
    }
}
