//! CLI module for Masonry.
//!
//! The command line drives the layout engine offline: it computes layouts
//! for item files, runs full engine simulations against a recording
//! animation driver, and manages the configuration file.

mod commands;
pub mod output;

use clap::Parser;
pub use commands::Cli;

use crate::error::MasonryResult;

/// Runs the CLI.
///
/// Parses command-line arguments and executes the appropriate command.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> MasonryResult<()> {
    let cli = Cli::parse();
    cli.execute()
}
