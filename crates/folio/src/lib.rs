//! Document library management with plain-text metadata.
//!
//! `folio` keeps a library of documents (papers, books, notes) as ordinary folders on disk. Every
//! document folder holds an `info.yaml` metadata file next to its files, which makes the library
//! easy to inspect, edit by hand and keep under version control. This crate provides:
//!
//! - [`record`]: the in-memory metadata record of a single document
//! - [`yaml`]: reading and writing records as YAML, one or many documents per stream
//! - [`importer`]: recognizing and fetching documents from local files and publisher websites
//! - [`bulk`]: loading many records from a single multi-document YAML file
//! - [`library`] and [`document`]: the on-disk folder layout
//! - [`check`]: metadata completeness checks
//! - [`config`]: user configuration
//!
//! # Getting Started
//!
//! ```no_run
//! use folio::{
//!   importer::{HttpSession, Importers},
//!   prelude::*,
//!   yaml::{self, Strictness, YamlOptions},
//! };
//!
//! fn main() -> Result<(), FolioError> {
//!   // Find the importer that claims this input and fetch its data
//!   let importers = Importers::default();
//!   let uri = "https://dl.acm.org/doi/abs/10.1145/3456.7891";
//!   if let Some(importer) = importers.matching(uri) {
//!     let ctx = importer.fetch(&HttpSession::new()?)?;
//!     if let Some(record) = ctx.data {
//!       yaml::write(&record, "info.yaml", &YamlOptions::default())?;
//!     }
//!   }
//!
//!   // Read it back, failing loudly on malformed YAML
//!   let record = yaml::read("info.yaml", Strictness::Strict)?;
//!   println!("{:?}", record.get("doi"));
//!   Ok(())
//! }
//! ```
//!
//! # Design Philosophy
//!
//! - Metadata stays human-editable text, one folder per document
//! - Parsing failures are either fatal or degrade to empty results, chosen per call
//! - Importers only claim inputs by cheap pattern checks and fetch on request

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  collections::{BTreeMap, BTreeSet},
  path::{Path, PathBuf},
};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, trace, warn};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod bulk;
pub mod check;
pub mod config;
pub mod document;
pub mod error;
pub mod format;
pub mod importer;
pub mod library;
pub mod record;
pub mod yaml;

use crate::{error::*, record::*};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use folio::prelude::*;
///
/// fn example(mut record: Record) -> Result<(), FolioError> {
///   record.set("title", "Café déjà vu");
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{
    config::Config,
    error::FolioError,
    importer::{Importer, Session},
    record::{Record, Value},
    yaml::Backend,
  };
}
