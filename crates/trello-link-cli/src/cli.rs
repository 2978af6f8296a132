//! Command line arguments

use std::path::PathBuf;

use clap::Parser;

/// Inject Trello card links into a pull request description
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "trello-link")]
#[command(bin_name = "trello-link")]
#[command(about = "Inject Trello card links into a pull request description")]
#[command(
    long_about = "Collects Trello short codes from the pull request title and commit messages \
and rewrites the templated region of the pull request description with one link per card.\n\n\
Inputs are read from INPUT_* environment variables as set by GitHub Actions."
)]
#[command(version)]
pub struct Cli {
    /// TOML file with action inputs; environment inputs take precedence
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Compute the new description without updating the pull request
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Minimize output
    #[arg(short, long)]
    pub quiet: bool,
}
