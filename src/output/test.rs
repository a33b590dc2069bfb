//! Test output implementation for verifying command output in tests.
//!
//! Captures all output as structured data for easy assertions.

use super::{Output, OutputConfig};

/// A single output entry captured during testing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEntry {
    Info(String),
    Success(String),
    Warning(String),
    Error(String),
    Debug(String),
}

/// Captures all output for assertions.
#[derive(Debug, Default)]
pub struct TestOutput {
    config: OutputConfig,
    entries: Vec<OutputEntry>,
}

impl TestOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: OutputConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[OutputEntry] {
        &self.entries
    }

    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e, OutputEntry::Error(_)))
    }

    pub fn has_warnings(&self) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e, OutputEntry::Warning(_)))
    }

    /// Whether any info line contains the given fragment.
    pub fn has_info(&self, fragment: &str) -> bool {
        self.entries.iter().any(|e| match e {
            OutputEntry::Info(msg) => msg.contains(fragment),
            _ => false,
        })
    }
}

impl Output for TestOutput {
    fn info(&mut self, msg: &str) {
        self.entries.push(OutputEntry::Info(msg.to_string()));
    }

    fn success(&mut self, msg: &str) {
        self.entries.push(OutputEntry::Success(msg.to_string()));
    }

    fn warning(&mut self, msg: &str) {
        self.entries.push(OutputEntry::Warning(msg.to_string()));
    }

    fn error(&mut self, msg: &str) {
        self.entries.push(OutputEntry::Error(msg.to_string()));
    }

    fn debug(&mut self, msg: &str) {
        self.entries.push(OutputEntry::Debug(msg.to_string()));
    }

    fn is_verbose(&self) -> bool {
        self.config.verbose
    }
}
