//! Branch switch orchestration.
//!
//! Runs the per-repository switch protocol (probe, create or switch,
//! optional force reset, optional read-only pull) and drives it over a whole
//! repository set with per-repository failure isolation: one broken checkout
//! never aborts the rest of the batch.

use crate::discovery::RepoRef;
use crate::git::{GitError, GitRunner};
use crate::output::{Output, OutputEntry, TestOutput};
use crate::pattern::NamePattern;
use crate::styles;
use anyhow::Result;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

/// Options for a switch run, resolved once at the CLI boundary.
#[derive(Debug, Clone, Default)]
pub struct SwitchOptions {
    /// Create the branch locally where it does not exist.
    pub create: bool,
    /// Run `git pull --ff-only` after a successful switch.
    pub pull: bool,
    /// Discard local changes before switching.
    pub force: bool,
    /// On a missing branch, list the repo's branches containing this
    /// substring as a hint.
    pub search: Option<NamePattern>,
    /// Worker count for the batch; 0 and 1 both mean sequential.
    pub jobs: usize,
}

/// Why a repository ended up with its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeReason {
    /// Switched (or created) cleanly.
    Ok,
    /// Branch absent and `--create` not given; nothing was mutated.
    BranchNotExists,
    /// Switch succeeded but the follow-up pull did not fast-forward.
    PullFailed,
    /// A git step failed or could not be launched.
    Error,
}

/// Definitive result for one repository in one run.
#[derive(Debug, Clone)]
pub struct RepoOutcome {
    pub repo: RepoRef,
    pub success: bool,
    pub reason: OutcomeReason,
    /// Stderr or error text for failures, for the audit trail.
    pub detail: Option<String>,
}

/// Aggregate counters for one orchestration run. Constructed fresh per run
/// and returned by value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl RunStats {
    fn tally(total: usize, outcomes: &[RepoOutcome]) -> Self {
        let mut stats = Self {
            total,
            ..Self::default()
        };
        for outcome in outcomes {
            match outcome.reason {
                OutcomeReason::Ok | OutcomeReason::PullFailed => stats.success += 1,
                OutcomeReason::BranchNotExists => stats.skipped += 1,
                OutcomeReason::Error => stats.failed += 1,
            }
        }
        // Repositories never started (interrupt) count as skipped, so the
        // counters always sum to the repository-set size.
        stats.skipped += total - outcomes.len();
        stats
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0 && self.skipped == 0
    }
}

/// Cooperative cancellation flag shared between the batch loop and a signal
/// handler.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Branch names are restricted to a conservative character set before any
/// repository is touched.
pub fn validate_branch_name(branch: &str) -> Result<()> {
    if branch.is_empty() {
        anyhow::bail!("Branch name cannot be empty");
    }

    if let Some(c) = branch
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '.' | '-')))
    {
        anyhow::bail!("Branch name contains invalid character '{c}'");
    }

    Ok(())
}

/// Switch every repository in `repos` to `branch`, isolating failures.
///
/// Returns the run statistics and one outcome per processed repository, in
/// repository order regardless of worker scheduling. Exactly one of the
/// counters is incremented per repository.
pub fn switch_all(
    repos: &[RepoRef],
    branch: &str,
    options: &SwitchOptions,
    cancel: &CancelToken,
    output: &mut dyn Output,
) -> (RunStats, Vec<RepoOutcome>) {
    let jobs = options.jobs.clamp(1, repos.len().max(1));

    let outcomes = if jobs == 1 {
        switch_sequential(repos, branch, options, cancel, output)
    } else {
        switch_concurrent(repos, branch, options, cancel, output, jobs)
    };

    (RunStats::tally(repos.len(), &outcomes), outcomes)
}

fn switch_sequential(
    repos: &[RepoRef],
    branch: &str,
    options: &SwitchOptions,
    cancel: &CancelToken,
    output: &mut dyn Output,
) -> Vec<RepoOutcome> {
    let mut outcomes = Vec::with_capacity(repos.len());
    for repo in repos {
        if cancel.is_cancelled() {
            output.warning("interrupted; remaining repositories not processed");
            break;
        }
        outcomes.push(switch_repo(repo, branch, options, cancel, output));
    }
    outcomes
}

/// Bounded worker pool over an index queue. Workers buffer their progress
/// lines and send them with the outcome; the calling thread owns the real
/// output and replays each repository's lines as it completes.
fn switch_concurrent(
    repos: &[RepoRef],
    branch: &str,
    options: &SwitchOptions,
    cancel: &CancelToken,
    output: &mut dyn Output,
    jobs: usize,
) -> Vec<RepoOutcome> {
    let next = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<(usize, TestOutput, RepoOutcome)>();
    let mut slots: Vec<Option<RepoOutcome>> = repos.iter().map(|_| None).collect();

    thread::scope(|scope| {
        for _ in 0..jobs {
            let tx = tx.clone();
            let next = &next;
            scope.spawn(move || loop {
                if cancel.is_cancelled() {
                    break;
                }
                let index = next.fetch_add(1, Ordering::SeqCst);
                if index >= repos.len() {
                    break;
                }
                let mut buffer = TestOutput::new();
                let outcome = switch_repo(&repos[index], branch, options, cancel, &mut buffer);
                if tx.send((index, buffer, outcome)).is_err() {
                    break;
                }
            });
        }
        drop(tx);

        for (index, buffer, outcome) in rx {
            replay(&buffer, output);
            // Each repository writes exactly one slot, so aggregation is
            // deterministic whatever the completion order.
            slots[index] = Some(outcome);
        }
    });

    if cancel.is_cancelled() {
        output.warning("interrupted; remaining repositories not processed");
    }

    slots.into_iter().flatten().collect()
}

fn replay(buffer: &TestOutput, output: &mut dyn Output) {
    for entry in buffer.entries() {
        match entry {
            OutputEntry::Info(msg) => output.info(msg),
            OutputEntry::Success(msg) => output.success(msg),
            OutputEntry::Warning(msg) => output.warning(msg),
            OutputEntry::Error(msg) => output.error(msg),
            OutputEntry::Debug(msg) => output.debug(msg),
        }
    }
}

/// Run the switch protocol for one repository. All git failures are caught
/// here and converted into an outcome; this function never propagates them.
pub fn switch_repo(
    repo: &RepoRef,
    branch: &str,
    options: &SwitchOptions,
    cancel: &CancelToken,
    output: &mut dyn Output,
) -> RepoOutcome {
    let git = GitRunner::new(&repo.path);

    match run_protocol(&git, repo, branch, options, cancel, output) {
        Ok(outcome) => outcome,
        Err(err) => {
            output.error(&format!("{}: {err}", repo.name));
            RepoOutcome {
                repo: repo.clone(),
                success: false,
                reason: OutcomeReason::Error,
                detail: Some(err.to_string()),
            }
        }
    }
}

fn run_protocol(
    git: &GitRunner,
    repo: &RepoRef,
    branch: &str,
    options: &SwitchOptions,
    cancel: &CancelToken,
    output: &mut dyn Output,
) -> Result<RepoOutcome, GitError> {
    let name = &repo.name;
    let current = git.current_branch()?;

    if !git.local_branch_exists(branch)? {
        if !options.create {
            output.info(&format!(
                "{} {name}: local branch {} does not exist",
                tag("skip", styles::YELLOW),
                styles::cyan(branch)
            ));
            if let Some(search) = &options.search {
                print_branch_hint(git, name, search, output);
            }
            return Ok(RepoOutcome {
                repo: repo.clone(),
                success: false,
                reason: OutcomeReason::BranchNotExists,
                detail: None,
            });
        }

        output.info(&format!(
            "{} {name}: creating local branch {}",
            tag("create", styles::CYAN),
            styles::cyan(branch)
        ));
        git.checkout_new_branch(branch)?;
    } else {
        if options.force && !git.is_clean()? {
            // Clear the tree before checkout so the switch itself can
            // never fail on local modifications.
            output.info(&format!(
                "{} {name}: discarding local changes",
                tag("force", styles::YELLOW)
            ));
            git.reset_hard()?;
            git.clean_force()?;
        }

        let from = if current.is_empty() {
            "(detached)".to_string()
        } else {
            current
        };
        output.info(&format!(
            "{} {name}: {from} -> {}",
            tag("switch", styles::GREEN),
            styles::cyan(branch)
        ));
        git.checkout(branch)?;
    }

    if cancel.is_cancelled() {
        return Ok(RepoOutcome {
            repo: repo.clone(),
            success: false,
            reason: OutcomeReason::Error,
            detail: Some("interrupted".to_string()),
        });
    }

    if options.pull {
        // Best-effort convenience step: a non-fast-forward or network
        // failure is a warning, never a failed switch.
        match git.pull_ff_only() {
            Ok(()) => {
                output.info(&format!("{} {name}: fast-forwarded", tag("pull", styles::CYAN)));
            }
            Err(err) => {
                output.warning(&format!("{name}: pull failed or needs manual attention"));
                return Ok(RepoOutcome {
                    repo: repo.clone(),
                    success: true,
                    reason: OutcomeReason::PullFailed,
                    detail: Some(err.to_string()),
                });
            }
        }
    }

    Ok(RepoOutcome {
        repo: repo.clone(),
        success: true,
        reason: OutcomeReason::Ok,
        detail: None,
    })
}

fn print_branch_hint(git: &GitRunner, name: &str, search: &NamePattern, output: &mut dyn Output) {
    let Ok(inventory) = git.list_branches() else {
        return;
    };
    let matches: Vec<String> = inventory
        .all()
        .into_iter()
        .filter(|b| search.matches(b))
        .collect();
    if matches.is_empty() {
        output.info(&format!(
            "        {name}: no branches containing '{search}'"
        ));
    } else {
        output.info(&format!(
            "        {name}: branches containing '{search}': {}",
            matches.join(", ")
        ));
    }
}

fn tag(label: &str, color: &str) -> String {
    if styles::colors_enabled() {
        format!("[{color}{label}{}]", styles::RESET)
    } else {
        format!("[{label}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn outcome(name: &str, reason: OutcomeReason) -> RepoOutcome {
        RepoOutcome {
            repo: RepoRef {
                name: name.to_string(),
                path: PathBuf::from(name),
            },
            success: matches!(reason, OutcomeReason::Ok | OutcomeReason::PullFailed),
            reason,
            detail: None,
        }
    }

    #[test]
    fn test_validate_branch_name() {
        assert!(validate_branch_name("main").is_ok());
        assert!(validate_branch_name("feature/login-2.0").is_ok());
        assert!(validate_branch_name("release_1.0").is_ok());
        assert!(validate_branch_name("").is_err());
        assert!(validate_branch_name("bad branch").is_err());
        assert!(validate_branch_name("bad;rm -rf").is_err());
        assert!(validate_branch_name("bad$(cmd)").is_err());
        assert!(validate_branch_name("bad`cmd`").is_err());
    }

    #[test]
    fn test_stats_counters_sum_to_total() {
        let outcomes = vec![
            outcome("a", OutcomeReason::Ok),
            outcome("b", OutcomeReason::PullFailed),
            outcome("c", OutcomeReason::BranchNotExists),
            outcome("d", OutcomeReason::Error),
        ];
        let stats = RunStats::tally(4, &outcomes);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.success, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.total, stats.success + stats.failed + stats.skipped);
    }

    #[test]
    fn test_stats_count_unprocessed_repos_as_skipped() {
        let outcomes = vec![outcome("a", OutcomeReason::Ok)];
        let stats = RunStats::tally(3, &outcomes);
        assert_eq!(stats.success, 1);
        assert_eq!(stats.skipped, 2);
        assert!(!stats.all_succeeded());
    }

    #[test]
    fn test_pull_failure_still_counts_as_success() {
        let stats = RunStats::tally(1, &[outcome("a", OutcomeReason::PullFailed)]);
        assert_eq!(stats.success, 1);
        assert_eq!(stats.failed, 0);
        assert!(stats.all_succeeded());
    }

    #[test]
    fn test_cancel_token() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }
}
