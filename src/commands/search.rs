//! `git-up search` - Find branches by substring across all repositories.

use crate::logging::init_logging;
use crate::pattern::NamePattern;
use crate::report;
use crate::styles;
use anyhow::Result;
use clap::Args as ClapArgs;
use std::path::PathBuf;

#[derive(Debug, ClapArgs)]
#[command(long_about = r#"
Searches the branch inventory (local and remote) of every repository under
the target directory for branch names containing the given substring.

The pattern is a plain substring, not a regular expression.
"#)]
pub struct Args {
    /// Substring to look for in branch names
    pub pattern: String,

    #[arg(
        short,
        long,
        default_value = "./packages",
        help = "Directory containing the Git repositories"
    )]
    pub directory: PathBuf,

    #[arg(
        short,
        long = "match",
        value_name = "PATTERN",
        help = "Only search repositories whose name contains PATTERN"
    )]
    pub match_pattern: Option<String>,

    #[arg(short, long, help = "Be verbose; show detailed progress")]
    pub verbose: bool,
}

pub fn run(args: &Args) -> Result<()> {
    init_logging(args.verbose);

    let pattern = NamePattern::new(&args.pattern)?;
    let repos = super::discover_repos(&args.directory, args.match_pattern.as_deref())?;
    crate::logging::debug(&format!("discovered {} repositories", repos.len()));

    let matches = report::search_branches(&repos, &pattern);

    if matches.is_empty() {
        println!(
            "{}",
            styles::yellow(&format!("No branches containing '{}' found", args.pattern))
        );
        return Ok(());
    }

    for repo in &matches {
        println!("{}:", styles::cyan(&repo.name));
        for branch in &repo.branches {
            println!("  {branch}");
        }
    }

    println!("{}", styles::dim(&"─".repeat(50)));
    println!(
        "{} matching repositories",
        matches.len()
    );
    Ok(())
}
