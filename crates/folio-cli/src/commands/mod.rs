use super::*;

pub mod add;
pub mod check;
pub mod export;
pub mod import;
pub mod init;

pub use add::{add, AddArgs};
pub use check::{run_checks, CheckArgs};
pub use export::{export, ExportArgs, ExportFormat};
pub use import::{import, ImportArgs};
pub use init::{init, InitArgs};

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Write a configuration file and create the library folder
  Init(InitArgs),

  /// Add a document from a local YAML file or a supported URL
  Add(AddArgs),

  /// Add every record of a multi-document YAML file
  Import(ImportArgs),

  /// Write the metadata of matching documents to stdout or a file
  Export(ExportArgs),

  /// Check matching documents for missing keys and files
  Check(CheckArgs),
}
