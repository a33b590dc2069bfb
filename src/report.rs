//! Status reporting over a repository set.
//!
//! All functions here are read-only: they probe each repository and fold the
//! results into display-ready structures. A probe failure in one repository
//! never poisons the report for the others.

use crate::discovery::RepoRef;
use crate::git::GitRunner;
use crate::pattern::NamePattern;
use serde::Serialize;

/// Placeholder branch label for a detached HEAD (empty `--show-current`).
pub const DETACHED: &str = "(detached)";

/// One repository's row in the `list` report. `branch`/`clean` are `None`
/// when the probe failed; the row is still rendered, as an error marker.
#[derive(Debug, Clone, Serialize)]
pub struct StatusRow {
    pub name: String,
    pub branch: Option<String>,
    pub clean: Option<bool>,
}

impl StatusRow {
    pub fn is_error(&self) -> bool {
        self.branch.is_none()
    }
}

/// The `list` report: per-repo rows plus clean/dirty totals.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub rows: Vec<StatusRow>,
    pub clean_count: usize,
    pub dirty_count: usize,
}

/// Probe every repository's current branch and dirtiness.
pub fn status_rows(repos: &[RepoRef]) -> StatusReport {
    let mut rows = Vec::with_capacity(repos.len());
    let mut clean_count = 0;
    let mut dirty_count = 0;

    for repo in repos {
        let git = GitRunner::new(&repo.path);
        let probed = git
            .current_branch()
            .and_then(|branch| git.is_clean().map(|clean| (branch, clean)));

        let row = match probed {
            Ok((branch, clean)) => {
                if clean {
                    clean_count += 1;
                } else {
                    dirty_count += 1;
                }
                let branch = if branch.is_empty() {
                    DETACHED.to_string()
                } else {
                    branch
                };
                StatusRow {
                    name: repo.name.clone(),
                    branch: Some(branch),
                    clean: Some(clean),
                }
            }
            Err(_) => StatusRow {
                name: repo.name.clone(),
                branch: None,
                clean: None,
            },
        };
        rows.push(row);
    }

    StatusReport {
        rows,
        clean_count,
        dirty_count,
    }
}

/// Group repositories by their current branch, preserving the order in
/// which each branch was first seen. Repositories whose probe fails are
/// excluded silently.
pub fn branch_overview(repos: &[RepoRef]) -> Vec<(String, Vec<String>)> {
    let probed = repos.iter().filter_map(|repo| {
        let branch = GitRunner::new(&repo.path).current_branch().ok()?;
        let branch = if branch.is_empty() {
            DETACHED.to_string()
        } else {
            branch
        };
        Some((repo.name.clone(), branch))
    });
    group_by_branch(probed)
}

/// First-seen insertion order, one entry per distinct branch.
fn group_by_branch(probed: impl Iterator<Item = (String, String)>) -> Vec<(String, Vec<String>)> {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for (repo_name, branch) in probed {
        match groups.iter_mut().find(|(b, _)| *b == branch) {
            Some((_, names)) => names.push(repo_name),
            None => groups.push((branch, vec![repo_name])),
        }
    }
    groups
}

/// Per-repository branch names (local and remote, sorted) containing the
/// search substring.
#[derive(Debug, Clone, Serialize)]
pub struct BranchMatches {
    pub name: String,
    pub branches: Vec<String>,
}

/// Search every repository's branch inventory for names containing
/// `pattern`. Repositories with no match, or whose probe fails, are omitted.
pub fn search_branches(repos: &[RepoRef], pattern: &NamePattern) -> Vec<BranchMatches> {
    repos
        .iter()
        .filter_map(|repo| {
            let inventory = GitRunner::new(&repo.path).list_branches().ok()?;
            let branches: Vec<String> = inventory
                .all()
                .into_iter()
                .filter(|b| pattern.matches(b))
                .collect();
            if branches.is_empty() {
                None
            } else {
                Some(BranchMatches {
                    name: repo.name.clone(),
                    branches,
                })
            }
        })
        .collect()
}
