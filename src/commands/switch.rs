//! `git-up switch` - Switch every repository under a directory to a branch.

use crate::logging::init_logging;
use crate::output::{CliOutput, Output, OutputConfig};
use crate::pattern::NamePattern;
use crate::styles;
use crate::switcher::{self, CancelToken, RunStats, SwitchOptions};
use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use std::path::PathBuf;

#[derive(Debug, ClapArgs)]
#[command(long_about = r#"
Switches every Git repository directly under the target directory to the
given branch, skipping directories that are not Git working copies.

Safety principles:
  - never creates or deletes remote branches
  - never pushes anything
  - the only remote contact is `git pull --ff-only` (with --pull), which
    git itself refuses unless the update is a trivial fast-forward

Examples:
  git-up switch develop                  switch all repos to develop
  git-up sw feature/login -c             create the branch where missing
  git-up switch main -p                  switch and fast-forward pull
  git-up switch hotfix -f                discard local changes first
  git-up switch 9.5.0 -s dev             on a miss, list branches containing "dev"
  git-up sw develop -m service-          only repos whose name contains "service-"
"#)]
pub struct Args {
    /// Branch to switch to
    pub branch: String,

    #[arg(
        short,
        long,
        default_value = "./packages",
        help = "Directory containing the Git repositories"
    )]
    pub directory: PathBuf,

    #[arg(short, long, help = "Create the branch locally where it does not exist")]
    pub create: bool,

    #[arg(short, long, help = "Fast-forward pull after switching (read-only)")]
    pub pull: bool,

    #[arg(short, long, help = "Discard local changes before switching")]
    pub force: bool,

    #[arg(
        short,
        long = "match",
        value_name = "PATTERN",
        help = "Only process repositories whose name contains PATTERN"
    )]
    pub match_pattern: Option<String>,

    #[arg(
        short,
        long,
        value_name = "PATTERN",
        help = "On a missing branch, list branches containing PATTERN"
    )]
    pub search: Option<String>,

    #[arg(
        short,
        long,
        default_value_t = 1,
        value_name = "N",
        help = "Process up to N repositories concurrently"
    )]
    pub jobs: usize,

    #[arg(short, long, help = "Be verbose; show detailed progress")]
    pub verbose: bool,

    #[arg(short, long, help = "Suppress non-error output")]
    pub quiet: bool,
}

pub fn run(args: &Args) -> Result<()> {
    init_logging(args.verbose);

    // Everything is validated before any repository is touched.
    switcher::validate_branch_name(&args.branch)?;
    let search = args.search.as_deref().map(NamePattern::new).transpose()?;
    let repos = super::discover_repos(&args.directory, args.match_pattern.as_deref())?;

    let mut output = CliOutput::new(OutputConfig::new(args.quiet, args.verbose));

    if repos.is_empty() {
        output.warning(&format!(
            "no Git repositories found in {}",
            args.directory.display()
        ));
        return Ok(());
    }

    print_header(args, repos.len(), &mut output);

    let options = SwitchOptions {
        create: args.create,
        pull: args.pull,
        force: args.force,
        search,
        jobs: args.jobs,
    };

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || handler_token.cancel())
        .context("Failed to install interrupt handler")?;

    let (stats, _outcomes) = switcher::switch_all(&repos, &args.branch, &options, &cancel, &mut output);

    print_tally(&stats, &mut output);
    // Per-repo failures are reported above, not escalated to the exit code.
    Ok(())
}

fn print_header(args: &Args, repo_count: usize, output: &mut dyn Output) {
    output.info(&format!(
        "Switching {} repositories in {} to {}",
        repo_count,
        styles::cyan(&args.directory.display().to_string()),
        styles::bold(&args.branch)
    ));
    if args.create {
        output.info(&format!("{} create missing local branches", styles::dim("mode:")));
    }
    if args.pull {
        output.info(&format!("{} read-only fast-forward pull", styles::dim("mode:")));
    }
    if args.force {
        output.info(&format!("{} discard local changes", styles::dim("mode:")));
    }
    if let Some(pattern) = &args.match_pattern {
        output.info(&format!("{} {pattern}", styles::dim("filter:")));
    }
    output.info(&styles::dim(&"─".repeat(50)));
}

fn print_tally(stats: &RunStats, output: &mut dyn Output) {
    output.info(&styles::dim(&"─".repeat(50)));
    if stats.all_succeeded() {
        output.success(&format!("Done! {}/{} switched", stats.success, stats.total));
    } else {
        output.info(&format!(
            "Done: {}/{} switched, {} skipped, {} failed",
            stats.success, stats.total, stats.skipped, stats.failed
        ));
    }
}
