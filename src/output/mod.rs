//! Output abstraction layer for separating IO from business logic.
//!
//! Orchestration and reporting code accepts `&mut dyn Output` instead of
//! calling `println!` directly, so tests can capture per-repository progress
//! lines as structured data. The concurrent batch loop reuses the capturing
//! implementation as a per-worker buffer to keep repository output
//! contiguous.

mod cli;
mod test;

pub use cli::CliOutput;
pub use test::{OutputEntry, TestOutput};

/// Configuration for output behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Suppress most output when true.
    pub quiet: bool,
    /// Enable debug/verbose output when true.
    pub verbose: bool,
}

impl OutputConfig {
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self { quiet, verbose }
    }
}

/// Trait for abstracting output operations.
///
/// Implementors should respect `quiet` and `verbose` modes where appropriate.
pub trait Output {
    /// Informational message. Respects quiet mode.
    fn info(&mut self, msg: &str);

    /// Success message. Respects quiet mode.
    fn success(&mut self, msg: &str);

    /// Warning to stderr. Always shown.
    fn warning(&mut self, msg: &str);

    /// Error to stderr. Always shown.
    fn error(&mut self, msg: &str);

    /// Debug message. Only shown in verbose mode.
    fn debug(&mut self, msg: &str);

    fn is_verbose(&self) -> bool;
}
