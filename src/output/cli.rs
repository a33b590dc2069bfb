//! CLI output implementation.

use super::{Output, OutputConfig};
use crate::styles;

/// Writes directly to stdout/stderr with git-like lowercase prefixes for
/// warnings and errors.
#[derive(Debug, Default)]
pub struct CliOutput {
    config: OutputConfig,
}

impl CliOutput {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }
}

impl Output for CliOutput {
    fn info(&mut self, msg: &str) {
        if !self.config.quiet {
            println!("{msg}");
        }
    }

    fn success(&mut self, msg: &str) {
        if !self.config.quiet {
            println!("{}", styles::green(msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        if styles::colors_enabled_stderr() {
            eprintln!("{}warning:{} {msg}", styles::YELLOW, styles::RESET);
        } else {
            eprintln!("warning: {msg}");
        }
    }

    fn error(&mut self, msg: &str) {
        if styles::colors_enabled_stderr() {
            eprintln!("{}error:{} {msg}", styles::RED, styles::RESET);
        } else {
            eprintln!("error: {msg}");
        }
    }

    fn debug(&mut self, msg: &str) {
        if self.config.verbose {
            println!("{}", styles::dim(&format!("debug: {msg}")));
        }
    }

    fn is_verbose(&self) -> bool {
        self.config.verbose
    }
}
