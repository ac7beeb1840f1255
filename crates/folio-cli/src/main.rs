//! Command line interface for keeping a folio of documents.
//!
//! This crate provides the `folio` tool, a thin front-end over the [`folio`] library. It supports:
//! - Writing a configuration and creating the library folder
//! - Adding documents from local YAML files or publisher URLs
//! - Bulk importing records from a multi-document YAML file
//! - Exporting the library as YAML or JSON
//! - Checking documents for missing metadata and files
//!
//! # Usage
//!
//! ```bash
//! # Set up a library
//! folio init --library ~/papers
//!
//! # Add a paper from the ACM digital library
//! folio add https://dl.acm.org/doi/abs/10.1145/3456.7891
//!
//! # Import many records at once
//! folio import exported.yaml
//!
//! # Export everything matching a query
//! folio export neural --format json --out neural.json
//!
//! # Make sure every document has a title and an author
//! folio check --keys title,author
//! ```
//!
//! Confirmations can be skipped with the hidden `--accept-defaults` flag and logging is made more
//! detailed with repeated `-v` flags.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  fs,
  path::{Path, PathBuf},
};

use clap::{builder::ArgAction, Args, Parser, Subcommand, ValueEnum};
use console::style;
use folio::{
  bulk,
  check::{check, CheckReport},
  document::Document,
  error::FolioError,
  importer::{HttpSession, ImportContext, Importers},
  prelude::*,
  yaml::{self, Strictness},
};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;
pub mod interaction;

use crate::{commands::*, error::*, interaction::*};

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Keep a folio of documents with plain-text metadata")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to the configuration file. If not specified, uses the default platform-specific
  /// configuration directory.
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,

  /// Skip all prompts and accept defaults (mostly for testing)
  #[arg(long, hide = true, global = true)]
  accept_defaults: bool,
}

/// Configures the logging system based on the verbosity level
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
///
/// A `RUST_LOG` filter in the environment takes precedence. Logs go to stderr so that exported
/// data on stdout stays clean.
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_target(true)
    .init();
}

/// Entry point for the folio CLI application
///
/// Parses the command line, sets up logging, loads the configuration (except for `init`, which
/// writes it) and runs the requested command.
///
/// # Errors
///
/// Returns a [`FolioCliError`] for failures including:
/// - Unreadable or malformed metadata and configuration files
/// - Network failures while importing
/// - Inputs no importer recognizes
/// - Documents failing `check`
fn main() -> Result<()> {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
  let terminal = Terminal::new(cli.accept_defaults);
  trace!("Using configuration at {}", config_path.display());

  match cli.command {
    Commands::Init(args) => init(&terminal, &config_path, args),
    Commands::Add(args) => add(&terminal, &load_config(&config_path)?, args),
    Commands::Import(args) => import(&terminal, &load_config(&config_path)?, args),
    Commands::Export(args) => export(&terminal, &load_config(&config_path)?, args),
    Commands::Check(args) => run_checks(&terminal, &load_config(&config_path)?, args),
  }
}

/// Loads the configuration, falling back to defaults when the file does not exist.
fn load_config(path: &Path) -> Result<Config> {
  let config = Config::load_or_default(path)?;
  debug!("Library at {}", config.library_path.display());
  Ok(config)
}
