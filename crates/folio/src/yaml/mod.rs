//! YAML reading and writing of metadata records.
//!
//! Every document folder holds one metadata file with a single YAML document, and exports or bulk
//! imports use a stream of many documents separated by `---` markers. This module reads and
//! writes both forms.
//!
//! Reading takes an explicit [`Strictness`]. Tools working on one document use
//! [`Strictness::Strict`] and get a [`FolioError::Format`] for malformed text; batch tools use
//! [`Strictness::Lenient`], which logs the problem and hands back an empty result so the batch
//! can carry on. File system errors are never degraded.
//!
//! Parsing goes through a [`Backend`]. The `libyaml` cargo feature (on by default) selects a
//! backend built on `serde_yaml`; without it the [`native`] backend on `yaml-rust2` is used. Both
//! produce the same values for the same text. Output is always written by `serde_yaml`.
//!
//! # Examples
//!
//! ```
//! use folio::{
//!   record::Record,
//!   yaml::{self, Strictness, YamlOptions},
//! };
//!
//! let mut record = Record::new();
//! record.set("title", "Café déjà vu");
//! let text = yaml::to_string(&record, &YamlOptions::default()).unwrap();
//! assert_eq!(text, "title: Café déjà vu\n");
//! assert_eq!(yaml::from_str(&text, Strictness::Strict).unwrap(), record);
//!
//! // Batch tools skip bad input instead of failing
//! assert!(yaml::from_str("title: [oops", Strictness::Lenient).unwrap().is_empty());
//! ```

use std::{fs, sync::OnceLock};

use super::*;

mod emitter;
pub mod libyaml;
pub mod native;
mod resolve;

use resolve::resolve_plain;

/// What to do with malformed YAML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
  /// Return a [`FolioError::Format`].
  Strict,
  /// Log the error and return an empty result.
  Lenient,
}

/// Options for writing YAML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YamlOptions {
  /// Write non-ASCII characters as they are instead of escaping them.
  pub allow_unicode: bool,
}

impl Default for YamlOptions {
  fn default() -> Self { Self { allow_unicode: true } }
}

/// A YAML parser producing one [`Value`] per document of a stream.
pub trait Backend: Send + Sync {
  /// Short name used in logs.
  fn name(&self) -> &'static str;

  /// Parses every document of `text`, in stream order.
  fn parse_all(&self, text: &str) -> Result<Vec<Value>>;
}

/// The parsing backend this build uses.
pub fn backend() -> &'static dyn Backend {
  static BACKEND: OnceLock<&'static dyn Backend> = OnceLock::new();
  *BACKEND.get_or_init(|| {
    #[cfg(feature = "libyaml")]
    let backend: &'static dyn Backend = &libyaml::Libyaml;
    #[cfg(not(feature = "libyaml"))]
    let backend: &'static dyn Backend = &native::Native;
    debug!("Using the {} YAML backend", backend.name());
    backend
  })
}

/// Renders one record as a single YAML document.
pub fn to_string(record: &Record, options: &YamlOptions) -> Result<String> {
  emitter::document(record, options)
}

/// Renders records as a multi-document stream, each document starting with `---`.
pub fn to_string_all<'r>(
  records: impl IntoIterator<Item = &'r Record>,
  options: &YamlOptions,
) -> Result<String> {
  let mut out = String::new();
  for record in records {
    out.push_str("---\n");
    out.push_str(&emitter::document(record, options)?);
  }
  Ok(out)
}

/// Parses text holding exactly one mapping document.
pub fn from_str(text: &str, strictness: Strictness) -> Result<Record> {
  degrade(strictness, || {
    let mut documents = backend().parse_all(text)?;
    match documents.len() {
      1 => into_record(documents.remove(0)),
      0 => Err(FolioError::format("expected a document, found an empty stream")),
      n => Err(FolioError::format(format!("expected a single document, found {n}"))),
    }
  })
}

/// Parses a multi-document stream; every document must be a mapping.
pub fn from_str_all(text: &str, strictness: Strictness) -> Result<Vec<Record>> {
  degrade(strictness, || backend().parse_all(text)?.into_iter().map(into_record).collect())
}

/// Writes one record to `path`, replacing the file.
pub fn write(record: &Record, path: impl AsRef<Path>, options: &YamlOptions) -> Result<()> {
  let path = path.as_ref();
  trace!("Writing {}", path.display());
  fs::write(path, to_string(record, options)?)?;
  Ok(())
}

/// Reads a file holding exactly one mapping document.
pub fn read(path: impl AsRef<Path>, strictness: Strictness) -> Result<Record> {
  let path = path.as_ref();
  trace!("Reading {}", path.display());
  let text = fs::read_to_string(path)?;
  from_str(&text, strictness)
}

/// Reads a multi-document file.
pub fn read_all(path: impl AsRef<Path>, strictness: Strictness) -> Result<Vec<Record>> {
  let path = path.as_ref();
  trace!("Reading {}", path.display());
  let text = fs::read_to_string(path)?;
  from_str_all(&text, strictness)
}

/// Writes records to `path` as a multi-document stream, in order.
pub fn serialize_many(records: &[Record], path: impl AsRef<Path>, options: &YamlOptions) -> Result<()> {
  fs::write(path, to_string_all(records, options)?)?;
  Ok(())
}

/// Multi-document text for exporting records. Unicode is always written as is.
pub fn exporter(records: &[Record]) -> Result<String> {
  to_string_all(records, &YamlOptions { allow_unicode: true })
}

fn into_record(value: Value) -> Result<Record> {
  match value {
    Value::Mapping(map) => Ok(Record::from(map)),
    other => Err(FolioError::format(format!("expected a mapping document, found a {}", other.kind()))),
  }
}

/// Applies `strictness` to the format errors of `parse`.
fn degrade<T: Default>(strictness: Strictness, parse: impl FnOnce() -> Result<T>) -> Result<T> {
  match (parse(), strictness) {
    (Err(FolioError::Format(message)), Strictness::Lenient) => {
      error!("YAML syntax error. {message}");
      Ok(T::default())
    },
    (result, _) => result,
  }
}
