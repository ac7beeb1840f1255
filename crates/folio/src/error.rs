//! Error types for the folio library.
//!
//! Failures fall in two broad groups that callers treat differently:
//! - [`FolioError::Format`]: malformed YAML. Reading functions take a
//!   [`Strictness`](crate::yaml::Strictness) so callers choose between raising this error and
//!   degrading to an empty result.
//! - Everything else (file system, network, configuration): always propagated.
//!
//! A fetch that legitimately finds nothing is not an error at all; it is reported as absent data
//! in an [`ImportContext`](crate::importer::ImportContext).
//!
//! # Examples
//!
//! ```
//! use folio::{
//!   error::FolioError,
//!   yaml::{self, Strictness},
//! };
//!
//! match yaml::from_str("title: [unbalanced", Strictness::Strict) {
//!   Err(FolioError::Format(message)) => println!("Malformed YAML: {message}"),
//!   Err(e) => println!("Other error: {e}"),
//!   Ok(_) => unreachable!(),
//! }
//! ```

use std::fmt::Display;

use thiserror::Error;

/// Error type alias used for the [`folio`](crate) crate.
pub type Result<T> = core::result::Result<T, FolioError>;

/// Errors that can occur when working with a folio library.
#[derive(Error, Debug)]
pub enum FolioError {
  /// The input is not well-formed structured text.
  ///
  /// This covers YAML syntax errors as well as documents that parse but do not have the shape
  /// of a metadata record, e.g. a top-level sequence, a duplicate key or a stream holding more
  /// than one document where exactly one was expected.
  #[error("Malformed YAML: {0}")]
  Format(String),

  /// A file system operation failed.
  ///
  /// This occurs when:
  /// - A metadata file cannot be opened for reading or writing
  /// - A document folder cannot be created
  /// - Permission errors occur
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// A network request failed before a response was received.
  ///
  /// This can occur when:
  /// - The network is unavailable
  /// - The server is unreachable
  /// - The request times out
  /// - TLS errors occur
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The configuration file could not be parsed.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// The configuration could not be rendered as TOML.
  #[error(transparent)]
  TomlSer(#[from] toml::ser::Error),

  /// A glob pattern built from the library path was invalid.
  #[error(transparent)]
  Glob(#[from] glob::PatternError),

  /// A path matched while scanning the library could not be read.
  #[error(transparent)]
  GlobWalk(#[from] glob::GlobError),

  /// A JSON conversion failed.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// Catch-all for invalid configuration values.
  #[error("{0}")]
  Config(String),
}

impl FolioError {
  /// Convenience constructor for [`FolioError::Format`].
  pub(crate) fn format(message: impl Display) -> Self { Self::Format(message.to_string()) }
}
