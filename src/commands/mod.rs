pub mod list;
pub mod search;
pub mod status;
pub mod switch;

use crate::discovery::{self, RepoRef};
use crate::pattern::NamePattern;
use anyhow::Result;
use std::path::Path;

/// Resolve the `--match` flag and discover the repository set for a command.
fn discover_repos(directory: &Path, match_pattern: Option<&str>) -> Result<Vec<RepoRef>> {
    let pattern = match_pattern.map(NamePattern::new).transpose()?;
    discovery::discover(directory, pattern.as_ref())
}
