//! Error types for the folio command line tool.

use thiserror::Error;

use super::*;

/// Errors that end a `folio` invocation with a non-zero exit status.
#[derive(Error, Debug)]
pub enum FolioCliError {
  /// Failure inside the library
  #[error(transparent)]
  Folio(#[from] FolioError),

  /// Failure while prompting the user
  #[error(transparent)]
  Dialoguer(#[from] dialoguer::Error),

  /// File system failure in the CLI itself
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// JSON export failure
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// No registered importer recognizes the input
  #[error("No importer recognizes '{0}'")]
  NoImporter(String),

  /// This many documents failed `check`
  #[error("{0} document(s) failed the checks")]
  ChecksFailed(usize),
}

/// Result alias for the CLI.
pub type Result<T> = core::result::Result<T, FolioCliError>;
