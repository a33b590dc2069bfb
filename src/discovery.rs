//! Repository discovery.
//!
//! Scans exactly one level below a root directory for Git working copies.
//! Recursion is intentionally absent: the expected layout is a flat parent
//! directory ("packages") with one checkout per child.

use crate::pattern::NamePattern;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// One discovered Git working copy. Identity is the path; `name` is the
/// directory basename used for filtering and display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub name: String,
    pub path: PathBuf,
}

/// List the Git repositories directly under `directory`, optionally keeping
/// only those whose directory name matches `pattern`.
///
/// Entries are returned in filesystem enumeration order, which is not stable
/// across platforms; callers may rely on it for display only. Files, dotfile
/// directories, and directories without a `.git` entry are skipped silently.
pub fn discover(directory: &Path, pattern: Option<&NamePattern>) -> Result<Vec<RepoRef>> {
    if !directory.is_dir() {
        anyhow::bail!("Directory not found: {}", directory.display());
    }

    let entries = fs::read_dir(directory)
        .with_context(|| format!("Failed to read directory: {}", directory.display()))?;

    let mut repos = Vec::new();

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            // An entry that vanished mid-scan is not our problem.
            Err(_) => continue,
        };

        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if name.starts_with('.') {
            continue;
        }

        if let Some(pattern) = pattern {
            if !pattern.is_empty() && !pattern.matches(name) {
                continue;
            }
        }

        if is_git_repo(&path) {
            repos.push(RepoRef {
                name: name.to_string(),
                path,
            });
        }
    }

    Ok(repos)
}

/// A working copy has a `.git` entry: a directory for plain checkouts, a
/// file for worktrees and submodules. Both count.
pub fn is_git_repo(path: &Path) -> bool {
    path.join(".git").exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn mkrepo(root: &Path, name: &str) {
        let dir = root.join(name);
        fs::create_dir_all(dir.join(".git")).unwrap();
    }

    #[test]
    fn test_discover_finds_only_git_directories() {
        let root = tempdir().unwrap();
        mkrepo(root.path(), "service-a");
        mkrepo(root.path(), "service-b");
        fs::create_dir(root.path().join("not-a-repo")).unwrap();
        fs::write(root.path().join("README.md"), "hi").unwrap();

        let mut names: Vec<String> = discover(root.path(), None)
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        names.sort();

        assert_eq!(names, ["service-a", "service-b"]);
    }

    #[test]
    fn test_discover_accepts_git_file_pointers() {
        let root = tempdir().unwrap();
        let wt = root.path().join("worktree-checkout");
        fs::create_dir(&wt).unwrap();
        fs::write(wt.join(".git"), "gitdir: /elsewhere/.git/worktrees/x").unwrap();

        let repos = discover(root.path(), None).unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].name, "worktree-checkout");
    }

    #[test]
    fn test_discover_applies_substring_pattern() {
        let root = tempdir().unwrap();
        mkrepo(root.path(), "service-a");
        mkrepo(root.path(), "service-b");
        mkrepo(root.path(), "frontend");

        let pattern = NamePattern::new("service").unwrap();
        let repos = discover(root.path(), Some(&pattern)).unwrap();
        assert_eq!(repos.len(), 2);
        assert!(repos.iter().all(|r| r.name.starts_with("service")));
    }

    #[test]
    fn test_discover_skips_dotfile_directories() {
        let root = tempdir().unwrap();
        mkrepo(root.path(), ".hidden-repo");
        mkrepo(root.path(), "visible");

        let repos = discover(root.path(), None).unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].name, "visible");
    }

    #[test]
    fn test_discover_does_not_recurse() {
        let root = tempdir().unwrap();
        let nested = root.path().join("group");
        fs::create_dir(&nested).unwrap();
        mkrepo(&nested, "deep-repo");

        let repos = discover(root.path(), None).unwrap();
        assert!(repos.is_empty());
    }

    #[test]
    fn test_discover_missing_directory_is_an_error() {
        let root = tempdir().unwrap();
        let missing = root.path().join("nope");
        let err = discover(&missing, None).unwrap_err();
        assert!(err.to_string().contains("Directory not found"));
    }
}
