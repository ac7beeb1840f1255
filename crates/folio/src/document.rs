//! A document folder and its metadata.
//!
//! Every document in a library is a folder holding a metadata file (by default `info.yaml`) and
//! the files listed in its `files` field:
//!
//! ```text
//! turing-on-computable-numbers/
//! ├── info.yaml
//! └── paper.pdf
//! ```

use super::*;
use crate::yaml::{self, Strictness, YamlOptions};

/// A document folder with its metadata loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
  /// Folder holding the document
  pub folder:    PathBuf,
  /// File name of the metadata file inside the folder
  pub info_name: String,
  /// The metadata
  pub data:      Record,
}

impl Document {
  /// Creates a document for `folder` without touching the file system.
  pub fn new(folder: impl AsRef<Path>, info_name: impl Into<String>, data: Record) -> Self {
    Self { folder: folder.as_ref().to_path_buf(), info_name: info_name.into(), data }
  }

  /// Loads the document in `folder`.
  ///
  /// # Errors
  ///
  /// Fails with [`FolioError::Io`] when the metadata file cannot be read. Malformed metadata is
  /// an error with [`Strictness::Strict`] and an empty record with [`Strictness::Lenient`].
  pub fn from_folder(
    folder: impl AsRef<Path>,
    info_name: impl Into<String>,
    strictness: Strictness,
  ) -> Result<Self> {
    let mut document = Self::new(folder, info_name, Record::new());
    document.data = yaml::read(document.info_path(), strictness)?;
    Ok(document)
  }

  /// Path of the metadata file.
  pub fn info_path(&self) -> PathBuf { self.folder.join(&self.info_name) }

  /// The `files` field resolved against the document folder.
  pub fn files(&self) -> Vec<PathBuf> {
    listed_files(&self.data).into_iter().map(|name| self.folder.join(name)).collect()
  }

  /// Listed files that do not exist.
  pub fn missing_files(&self) -> Vec<PathBuf> {
    self.files().into_iter().filter(|path| !path.exists()).collect()
  }

  /// Writes the metadata file.
  pub fn save(&self, options: &YamlOptions) -> Result<()> { yaml::write(&self.data, self.info_path(), options) }

  /// The title, falling back to the folder name.
  pub fn title(&self) -> String {
    match self.data.get_str("title") {
      Some(title) => title.to_owned(),
      None => self.folder.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default(),
    }
  }
}

/// Entries of a record's `files` field, which may be a single name or a list of names.
pub(crate) fn listed_files(record: &Record) -> Vec<&str> {
  match record.get("files") {
    Some(Value::String(name)) => vec![name.as_str()],
    Some(Value::Sequence(items)) => items.iter().filter_map(Value::as_str).collect(),
    _ => Vec::new(),
  }
}
