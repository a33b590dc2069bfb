use anyhow::Result;
use which::which;

pub mod commands;
pub mod discovery;
pub mod git;
pub mod logging;
pub mod output;
pub mod pattern;
pub mod report;
pub mod styles;
pub mod switcher;

/// Version with dev branch/hash suffix, for `git-up --version`.
pub const VERSION_DISPLAY: &str = env!("GIT_UP_VERSION_DISPLAY");

pub fn check_dependencies() -> Result<()> {
    if which("git").is_err() {
        anyhow::bail!("Missing required dependency: git");
    }
    Ok(())
}
