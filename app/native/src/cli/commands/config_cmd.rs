//! Config CLI commands.
//!
//! Commands for creating and locating the Masonry configuration file.

use std::path::PathBuf;

use clap::Subcommand;
use colored::Colorize;

use crate::config::template::{create_config_file, generate_config_template};
use crate::config::{config_paths, get_config, get_config_path};
use crate::error::{MasonryError, MasonryResult};

/// Config management commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum ConfigCommands {
    /// Create a configuration file with every option documented.
    ///
    /// All options are commented out, so the new file behaves exactly like
    /// the defaults until you uncomment something.
    #[command(
        name = "init",
        after_long_help = r#"Examples:
  masonry config init              # Create config at default location
  masonry config init --force      # Overwrite existing config
  masonry config init --path ~/grid.jsonc
  masonry config init --stdout     # Print template to stdout"#
    )]
    Init {
        /// Overwrite an existing configuration file.
        #[arg(long, short)]
        force: bool,

        /// Where to write the file. Defaults to the first search path.
        #[arg(long, short, value_name = "PATH")]
        path: Option<PathBuf>,

        /// Print the template instead of writing a file.
        #[arg(long)]
        stdout: bool,
    },

    /// Show the configuration search paths and which one is active.
    Path,

    /// Print the effective configuration as JSON.
    Show,
}

/// Executes a config subcommand.
///
/// # Errors
///
/// Returns an error if the configuration file cannot be written.
pub fn execute(cmd: &ConfigCommands) -> MasonryResult<()> {
    match cmd {
        ConfigCommands::Init { stdout: true, .. } => {
            println!("{}", generate_config_template());
            Ok(())
        }
        ConfigCommands::Init { force, path, .. } => init_config(*force, path.clone()),
        ConfigCommands::Path => {
            show_config_path();
            Ok(())
        }
        ConfigCommands::Show => {
            crate::cli::output::print_json(get_config());
            Ok(())
        }
    }
}

fn init_config(force: bool, custom_path: Option<PathBuf>) -> MasonryResult<()> {
    let config_path = custom_path
        .map(|path| crate::cli::commands::input::expand_path(&path.to_string_lossy()))
        .or_else(|| config_paths().into_iter().next())
        .unwrap_or_else(|| PathBuf::from("config.jsonc"));

    if config_path.exists() && !force {
        return Err(MasonryError::ConfigError(format!(
            "configuration file already exists at {}; use --force to overwrite",
            config_path.display()
        )));
    }

    create_config_file(&config_path).map_err(|err| {
        MasonryError::ConfigError(format!("cannot create {}: {err}", config_path.display()))
    })?;

    tracing::info!(path = %config_path.display(), "masonry: wrote configuration template");
    println!("Configuration file created at: {}", config_path.display());
    println!("\nAll options are commented out; uncomment the ones you want to change.");
    Ok(())
}

fn show_config_path() {
    println!("Configuration file search paths (in priority order):\n");

    // loading the configuration records which file is active
    get_config();
    let active = get_config_path();
    for (i, path) in config_paths().iter().enumerate() {
        let marker = if active == Some(path) {
            " (active)".green().to_string()
        } else if path.exists() {
            " (exists)".to_string()
        } else {
            String::new()
        };
        println!("  {}. {}{marker}", i + 1, path.display());
    }

    if let Some(custom) = crate::config::custom_config_path() {
        println!("\nOverridden by --config: {}", custom.display());
    } else if active.is_none() {
        println!("\nNo configuration file found; defaults are in effect.");
        println!("Run 'masonry config init' to create one.");
    }
}
