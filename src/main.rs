/// git-up - Safe batch branch switching for a directory of Git checkouts.
///
/// Operates on every Git repository directly under one parent directory,
/// switching, creating, and force-resetting local branches without ever
/// writing to a remote.
use anyhow::Result;
use clap::{Parser, Subcommand};
use git_up::{commands, styles, VERSION_DISPLAY};

#[derive(Parser)]
#[command(name = "git-up")]
#[command(version = VERSION_DISPLAY)]
#[command(about = "Safe batch branch switching across a directory of independent Git checkouts")]
struct Cli {
    #[arg(long, global = true, help = "Disable colored output")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Switch every repository to a branch
    #[command(visible_alias = "sw")]
    Switch(commands::switch::Args),

    /// Search branch names across repositories
    #[command(visible_alias = "s")]
    Search(commands::search::Args),

    /// List each repository's branch and working-tree state
    #[command(visible_alias = "ls")]
    List(commands::list::Args),

    /// Overview of repositories grouped by current branch
    #[command(visible_alias = "st")]
    Status(commands::status::Args),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        styles::disable_colors();
    }

    git_up::check_dependencies()?;

    match cli.command {
        Commands::Switch(args) => commands::switch::run(&args),
        Commands::Search(args) => commands::search::run(&args),
        Commands::List(args) => commands::list::run(&args),
        Commands::Status(args) => commands::status::run(&args),
    }
}
