//! Git subprocess invocation.
//!
//! Every Git interaction goes through [`GitRunner`], which invokes the `git`
//! executable with an explicit argument vector against one repository's
//! working directory. There is no shell anywhere in the call path, so branch
//! names and paths are never re-interpreted as shell syntax.

mod probe;

pub use probe::BranchInventory;

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;

/// Failure modes of a single Git invocation.
///
/// A spawn failure (git missing, permission denied) is a different animal
/// from git itself exiting non-zero, and callers treat them differently:
/// the former is environmental, the latter operational.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("Failed to launch git {args}: {source}")]
    LaunchFailed {
        args: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {args} failed: {stderr}")]
    CommandFailed { args: String, stderr: String },
}

/// Where a child process's output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Capture stdout/stderr; stdout is returned trimmed. Used for probes.
    Captured,
    /// Stream output to the parent's stdout/stderr. Used for visible
    /// operations like checkout and pull.
    Inherited,
}

/// Runs Git subcommands inside one repository's working directory.
#[derive(Debug, Clone)]
pub struct GitRunner {
    repo_path: PathBuf,
}

impl GitRunner {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Run `git <args>` in the repository. Returns trimmed stdout in
    /// [`OutputMode::Captured`]; an empty string in
    /// [`OutputMode::Inherited`].
    pub fn run(&self, args: &[&str], mode: OutputMode) -> Result<String, GitError> {
        match mode {
            OutputMode::Captured => self.run_captured(args),
            OutputMode::Inherited => self.run_inherited(args),
        }
    }

    fn run_captured(&self, args: &[&str]) -> Result<String, GitError> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .map_err(|source| GitError::LaunchFailed {
                args: args.join(" "),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                args: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn run_inherited(&self, args: &[&str]) -> Result<String, GitError> {
        let status = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| GitError::LaunchFailed {
                args: args.join(" "),
                source,
            })?;

        if !status.success() {
            // Output already went to the terminal; nothing to attach.
            return Err(GitError::CommandFailed {
                args: args.join(" "),
                stderr: String::new(),
            });
        }

        Ok(String::new())
    }

    /// Run a probe whose exit code *is* the answer: exit 0 maps to `true`,
    /// any non-zero exit to `false`. Only a spawn failure is an error.
    pub fn run_check(&self, args: &[&str]) -> Result<bool, GitError> {
        let status = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| GitError::LaunchFailed {
                args: args.join(" "),
                source,
            })?;

        Ok(status.success())
    }

    // ── Mutations ────────────────────────────────────────────────────────

    /// Checkout an existing branch, streaming git's output.
    pub fn checkout(&self, branch: &str) -> Result<(), GitError> {
        self.run(&["checkout", branch], OutputMode::Inherited)?;
        Ok(())
    }

    /// Create a local branch at HEAD and switch to it.
    pub fn checkout_new_branch(&self, branch: &str) -> Result<(), GitError> {
        self.run(&["checkout", "-b", branch], OutputMode::Inherited)?;
        Ok(())
    }

    /// Discard all tracked modifications.
    pub fn reset_hard(&self) -> Result<(), GitError> {
        self.run(&["reset", "--hard"], OutputMode::Inherited)?;
        Ok(())
    }

    /// Remove untracked files and directories.
    pub fn clean_force(&self) -> Result<(), GitError> {
        self.run(&["clean", "-fd"], OutputMode::Inherited)?;
        Ok(())
    }

    /// Read-only pull: refuses anything that is not a trivial fast-forward,
    /// so no merge commit and no history rewrite can ever be produced.
    pub fn pull_ff_only(&self) -> Result<(), GitError> {
        self.run(&["pull", "--ff-only"], OutputMode::Inherited)?;
        Ok(())
    }
}
