//! `git-up status` - Repository overview grouped by current branch.

use crate::logging::init_logging;
use crate::report;
use crate::styles;
use anyhow::Result;
use clap::Args as ClapArgs;
use std::path::PathBuf;

#[derive(Debug, ClapArgs)]
#[command(long_about = r#"
Groups the repositories under the target directory by the branch they are
currently on, in the order each branch is first seen. Repositories whose
state cannot be probed are left out of the overview.
"#)]
pub struct Args {
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
        help = "Only include repositories whose name contains PATTERN"
    )]
    pub match_pattern: Option<String>,

    #[arg(long, help = "Output in JSON format")]
    pub json: bool,

    #[arg(short, long, help = "Be verbose; show detailed progress")]
    pub verbose: bool,
}

pub fn run(args: &Args) -> Result<()> {
    init_logging(args.verbose);

    let repos = super::discover_repos(&args.directory, args.match_pattern.as_deref())?;
    let overview = report::branch_overview(&repos);

    if args.json {
        let entries: Vec<serde_json::Value> = overview
            .iter()
            .map(|(branch, names)| {
                serde_json::json!({
                    "branch": branch,
                    "repos": names,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if overview.is_empty() {
        println!(
            "{}",
            styles::yellow(&format!(
                "No Git repositories found in {}",
                args.directory.display()
            ))
        );
        return Ok(());
    }

    for (branch, names) in &overview {
        println!(
            "\n{} ({} {}):",
            styles::cyan(branch),
            names.len(),
            if names.len() == 1 { "repo" } else { "repos" }
        );
        println!("  {}", names.join(", "));
    }

    println!("\n{}", styles::dim(&"─".repeat(50)));
    println!("{} distinct branches", overview.len());
    Ok(())
}
