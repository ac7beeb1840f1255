//! Loading many records from a single YAML stream.
//!
//! A bulk file is a multi-document YAML stream, one document per record, as written by
//! [`yaml::exporter`]:
//!
//! ```yaml
//! ---
//! title: First paper
//! year: 2020
//! ---
//! title: Second paper
//! ```
//!
//! Deciding what to do with the records (skipping duplicates, confirming with the user, adding
//! them to a library) is left to the caller.

use super::*;
use crate::yaml::{self, Strictness};

/// Reads every record in the file at `path`, in stream order.
pub fn load(path: impl AsRef<Path>, strictness: Strictness) -> Result<Vec<Record>> {
  let path = path.as_ref();
  info!("Reading {}", path.display());
  let records = yaml::read_all(path, strictness)?;
  info!("Found {} documents in {}", records.len(), path.display());
  Ok(records)
}

/// Reads every record in `text`, in stream order.
pub fn load_str(text: &str, strictness: Strictness) -> Result<Vec<Record>> {
  let records = yaml::from_str_all(text, strictness)?;
  info!("Found {} documents", records.len());
  Ok(records)
}
