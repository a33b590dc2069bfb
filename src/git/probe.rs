//! Read-only repository state probes.
//!
//! All probes are captured-output Git calls; none of them mutates anything.

use super::{GitError, GitRunner, OutputMode};
use std::collections::BTreeSet;

/// Local and remote branch names of one repository, deduplicated and sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchInventory {
    pub local: BTreeSet<String>,
    pub remote: BTreeSet<String>,
}

impl BranchInventory {
    /// Union of local and remote names, still sorted.
    pub fn all(&self) -> BTreeSet<String> {
        self.local.union(&self.remote).cloned().collect()
    }
}

impl GitRunner {
    /// Name of the currently checked-out branch. Empty string means
    /// detached HEAD.
    pub fn current_branch(&self) -> Result<String, GitError> {
        self.run(&["branch", "--show-current"], OutputMode::Captured)
    }

    /// Whether the working tree has no uncommitted modifications.
    ///
    /// `diff-index` exits non-zero for a dirty tree; that is the answer,
    /// not a failure.
    pub fn is_clean(&self) -> Result<bool, GitError> {
        self.run_check(&["diff-index", "--quiet", "HEAD", "--"])
    }

    /// Whether `refs/heads/<branch>` exists locally.
    pub fn local_branch_exists(&self, branch: &str) -> Result<bool, GitError> {
        let git_ref = format!("refs/heads/{branch}");
        self.run_check(&["show-ref", "--verify", "--quiet", &git_ref])
    }

    /// Full branch inventory: local names plus remote names with the
    /// `origin/` prefix stripped.
    pub fn list_branches(&self) -> Result<BranchInventory, GitError> {
        let local_raw = self.run(&["branch", "--list"], OutputMode::Captured)?;
        let remote_raw = self.run(&["branch", "-r", "--list"], OutputMode::Captured)?;

        Ok(BranchInventory {
            local: parse_local_branches(&local_raw),
            remote: parse_remote_branches(&remote_raw),
        })
    }
}

/// Parse `git branch --list` output. Lines carry a two-column marker prefix:
/// `* ` for the current branch, `+ ` for branches checked out in another
/// worktree, spaces otherwise.
fn parse_local_branches(raw: &str) -> BTreeSet<String> {
    raw.lines()
        .map(|line| line.trim_start_matches(['*', '+', ' ']).trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse `git branch -r --list` output. Entries containing `->` are symbolic
/// HEAD pointers (e.g. `origin/HEAD -> origin/main`), not real branches.
fn parse_remote_branches(raw: &str) -> BTreeSet<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.contains("->"))
        .map(|line| line.strip_prefix("origin/").unwrap_or(line).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local_strips_current_marker() {
        let raw = "  develop\n* main\n  feature/login\n";
        let branches = parse_local_branches(raw);
        assert_eq!(
            branches.into_iter().collect::<Vec<_>>(),
            ["develop", "feature/login", "main"]
        );
    }

    #[test]
    fn test_parse_local_strips_worktree_marker() {
        let raw = "+ linked-worktree\n* main\n";
        let branches = parse_local_branches(raw);
        assert!(branches.contains("linked-worktree"));
        assert!(branches.contains("main"));
    }

    #[test]
    fn test_parse_remote_strips_origin_and_symbolic_head() {
        let raw = "  origin/HEAD -> origin/main\n  origin/develop\n  origin/main\n";
        let branches = parse_remote_branches(raw);
        assert_eq!(
            branches.into_iter().collect::<Vec<_>>(),
            ["develop", "main"]
        );
    }

    #[test]
    fn test_parse_remote_keeps_other_remotes_verbatim() {
        let raw = "  upstream/main\n";
        let branches = parse_remote_branches(raw);
        assert_eq!(branches.into_iter().collect::<Vec<_>>(), ["upstream/main"]);
    }

    #[test]
    fn test_inventory_union_is_deduplicated_and_sorted() {
        let inventory = BranchInventory {
            local: ["main", "develop"].map(String::from).into(),
            remote: ["main", "release/1.0"].map(String::from).into(),
        };
        assert_eq!(
            inventory.all().into_iter().collect::<Vec<_>>(),
            ["develop", "main", "release/1.0"]
        );
    }

    #[test]
    fn test_empty_output_yields_empty_sets() {
        assert!(parse_local_branches("").is_empty());
        assert!(parse_remote_branches("").is_empty());
    }
}
