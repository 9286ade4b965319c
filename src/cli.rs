//! Command-line interface definition.
use std::path::PathBuf;

use clap::Parser;

/// Link the dotfiles repository into the home directory.
///
/// Removes every symlink that points into the repository, creates the links
/// declared in each directory's `.links` file, then runs the `setup` script
/// of each directory holding an `.exec` marker.
#[derive(Parser, Debug)]
#[command(name = "dotfiles", version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Preview changes without applying
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Override dotfiles root directory
    #[arg(long)]
    pub root: Option<PathBuf>,
}
