//! Importing the metadata file of a document from disk.

use std::ffi::OsStr;

use super::*;
use crate::{
  document::listed_files,
  yaml::{self as codec, Strictness},
};

/// Imports a local `.yaml` or `.yml` metadata file.
///
/// Files listed in the record's `files` field that exist next to the YAML file are picked up as
/// artifacts, so importing the metadata of a document folder brings its documents along.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YamlFile {
  uri:  String,
  path: PathBuf,
}

impl YamlFile {
  /// Path of the file to import.
  pub fn path(&self) -> &Path { &self.path }
}

impl Importer for YamlFile {
  fn matches(uri: &str) -> Option<Self> {
    let path = Path::new(uri);
    let is_yaml = path
      .extension()
      .and_then(OsStr::to_str)
      .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    (is_yaml && path.is_file()).then(|| Self { uri: uri.to_owned(), path: path.to_path_buf() })
  }

  fn name(&self) -> &'static str { "yaml" }

  fn uri(&self) -> &str { &self.uri }

  fn fetch(&self, _session: &dyn Session) -> Result<ImportContext> {
    let mut ctx = ImportContext::new();
    let record = codec::read(&self.path, Strictness::Strict)?;
    if record.is_empty() {
      ctx.log(format!("'{}' holds no metadata", self.path.display()));
      return Ok(ctx);
    }
    debug!("Successfully read file: '{}'", self.path.display());

    let folder = self.path.parent().unwrap_or(Path::new("."));
    for name in listed_files(&record) {
      let file = folder.join(name);
      if file.is_file() {
        ctx.files.push(file);
      } else {
        ctx.log(format!("Listed file '{}' was not found", file.display()));
      }
    }
    ctx.data = Some(record);
    Ok(ctx)
  }
}
