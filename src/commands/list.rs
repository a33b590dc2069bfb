//! `git-up list` - Per-repository branch and working-tree state.

use crate::logging::init_logging;
use crate::report::{self, StatusReport};
use crate::styles;
use anyhow::Result;
use clap::Args as ClapArgs;
use std::path::PathBuf;
use tabled::{
    builder::Builder,
    settings::Style,
};

#[derive(Debug, ClapArgs)]
#[command(long_about = r#"
Lists every Git repository directly under the target directory with its
current branch and whether the working tree is clean, followed by
clean/dirty totals.

A repository whose state cannot be probed is shown with an error marker;
it does not affect the other rows.

Use --json for machine-readable output suitable for scripting.
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
        help = "Only list repositories whose name contains PATTERN"
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
    crate::logging::debug(&format!("discovered {} repositories", repos.len()));
    let report = report::status_rows(&repos);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.rows.is_empty() {
        println!(
            "{}",
            styles::yellow(&format!(
                "No Git repositories found in {}",
                args.directory.display()
            ))
        );
        return Ok(());
    }

    print_table(&report);
    Ok(())
}

fn print_table(report: &StatusReport) {
    let mut builder = Builder::new();
    builder.push_record(["", "Repository", "Branch", "State"].map(|h| styles::dim(h)));

    for row in &report.rows {
        let (marker, branch, state) = match (&row.branch, row.clean) {
            (Some(branch), Some(true)) => (styles::green("●"), branch.clone(), "clean".to_string()),
            (Some(branch), _) => (styles::red("✎"), branch.clone(), styles::red("dirty")),
            _ => (styles::red("○"), styles::dim("-"), styles::red("error")),
        };
        builder.push_record([marker, styles::cyan(&row.name), branch, state]);
    }

    let mut table = builder.build();
    table.with(Style::blank());
    println!("{table}");

    println!("{}", styles::dim(&"─".repeat(50)));
    println!(
        "Total: {} repositories | clean: {} | dirty: {}",
        report.rows.len(),
        report.clean_count,
        report.dirty_count
    );
}
