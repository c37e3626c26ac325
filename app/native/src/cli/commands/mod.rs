//! CLI command definitions using Clap.
//!
//! - `layout` - Pack an item file into columns and print the slots
//! - `simulate` - Run the engine end to end against a recording driver
//! - `categories` - List the category filters of an item file
//! - `config` - Create and locate the configuration file
//! - `schema` / `completions` - Tooling output

use std::io;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::error::{MasonryError, MasonryResult};
use crate::{config, schema};

pub mod config_cmd;
pub mod input;
pub mod layout;
pub mod simulate;

pub use config_cmd::ConfigCommands;
pub use layout::{CategoriesArgs, LayoutArgs};
pub use simulate::SimulateArgs;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Masonry - column-packing grid layout with staged animations.
#[derive(Parser, Debug)]
#[command(name = "masonry")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Compute a layout for an item file.
    ///
    /// Prints every item's column and rectangle plus the container height.
    #[command(after_long_help = r#"Examples:
  masonry layout --items demos/blog.jsonc
  masonry layout --items demos/blog.jsonc --columns 2 --width 600
  masonry layout --items demos/blog.jsonc --category Design --json"#)]
    Layout(LayoutArgs),

    /// Run the engine against a recording animation driver.
    ///
    /// Mounts, lays out and animates the items, then prints every tween
    /// command issued and each item's sampled frame at `--at` seconds.
    #[command(after_long_help = r#"Examples:
  masonry simulate --items demos/blog.jsonc
  masonry simulate --items demos/blog.jsonc --at 0.5 --hover 3
  masonry simulate --items demos/blog.jsonc --scroll -400 --json"#)]
    Simulate(SimulateArgs),

    /// List the category filters of an item file with item counts.
    Categories(CategoriesArgs),

    /// Configuration file management commands.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Output the configuration JSON Schema.
    ///
    /// Can be redirected to a file for editors that support JSON Schema
    /// validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Usage:
    ///   eval "$(masonry completions --shell zsh)"
    ///   masonry completions --shell fish > ~/.config/fish/completions/masonry.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Returns the custom config path if specified via --config, with `~` expanded.
    #[must_use]
    pub fn config_path(&self) -> Option<std::path::PathBuf> {
        self.config.as_deref().map(input::expand_path)
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> MasonryResult<()> {
        if let Some(path) = self.config_path() {
            if !path.exists() {
                return Err(MasonryError::ConfigError(format!(
                    "configuration file not found: {}",
                    path.display()
                )));
            }
            config::set_custom_config_path(path);
        }

        match &self.command {
            Commands::Layout(args) => layout::execute(args, config::get_config()),
            Commands::Simulate(args) => simulate::execute(args, config::get_config()),
            Commands::Categories(args) => layout::execute_categories(args),
            Commands::Config(cmd) => config_cmd::execute(cmd),
            Commands::Schema => {
                println!("{}", schema::generate_schema_json());
                Ok(())
            }
            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "masonry", &mut io::stdout());
    }
}
