//! A folder of document folders.
//!
//! The library is nothing more than a directory tree: any folder below the root holding a
//! metadata file is a document. There is no index to keep in sync, so documents can be edited,
//! moved or deleted with ordinary file tools.
//!
//! # Examples
//!
//! ```no_run
//! use folio::{
//!   library::Library,
//!   record::Record,
//!   yaml::YamlOptions,
//! };
//!
//! # fn main() -> folio::error::Result<()> {
//! let library = Library::new("/home/ada/papers", "info.yaml");
//! let record: Record = [("title", "On Computable Numbers")].into_iter().collect();
//! let document = library.add(record, &[], &YamlOptions::default())?;
//! println!("Added {}", document.folder.display());
//!
//! for document in library.search("computable")? {
//!   println!("{}", document.title());
//! }
//! # Ok(())
//! # }
//! ```

use std::fs;

use chrono::Local;

use super::*;
use crate::{
  document::Document,
  format::{format_title, MAX_NAME_LEN},
  yaml::{Strictness, YamlOptions},
};

/// Format of the `time-added` field.
pub const TIME_ADDED_FORMAT: &str = "%Y-%m-%d-%H:%M:%S";

/// A document library rooted at a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
  /// Root directory
  pub root:      PathBuf,
  /// File name of the metadata file in each document folder
  pub info_name: String,
}

impl Library {
  /// Creates a handle to the library at `root`. Nothing is read or created yet.
  pub fn new(root: impl AsRef<Path>, info_name: impl Into<String>) -> Self {
    Self { root: root.as_ref().to_path_buf(), info_name: info_name.into() }
  }

  /// Every document in the library, sorted by folder.
  ///
  /// Metadata files are read leniently: a malformed file is logged and shows up as a document
  /// with empty metadata instead of aborting the scan. Unreadable files are still errors.
  pub fn documents(&self) -> Result<Vec<Document>> {
    let root = self
      .root
      .to_str()
      .ok_or_else(|| FolioError::Config(format!("Library path {} is not valid UTF-8", self.root.display())))?;
    let pattern = format!("{}/**/{}", glob::Pattern::escape(root), glob::Pattern::escape(&self.info_name));
    trace!("Scanning library with pattern {pattern}");

    let mut documents = Vec::new();
    for entry in glob::glob(&pattern)? {
      let info_path = entry?;
      let Some(folder) = info_path.parent() else { continue };
      documents.push(Document::from_folder(folder, self.info_name.clone(), Strictness::Lenient)?);
    }
    documents.sort_by(|a, b| a.folder.cmp(&b.folder));
    debug!("Found {} documents in {}", documents.len(), self.root.display());
    Ok(documents)
  }

  /// Documents matching `query`, see [`matches_query`].
  pub fn search(&self, query: &str) -> Result<Vec<Document>> {
    Ok(self.documents()?.into_iter().filter(|document| matches_query(document, query)).collect())
  }

  /// Adds a new document.
  ///
  /// A folder named after the record's title is created (with a numeric suffix if the name is
  /// taken) and `files` are copied into it. When files are given, the record's `files` field
  /// lists their names in the new folder. A `time-added` field is stamped unless the record
  /// already has one.
  pub fn add(&self, mut record: Record, files: &[PathBuf], options: &YamlOptions) -> Result<Document> {
    fs::create_dir_all(&self.root)?;
    let name = format_title(record.get_str("title").unwrap_or_default(), MAX_NAME_LEN);
    let folder = unique_path(&self.root, &name, None);
    fs::create_dir(&folder)?;

    let populate = || -> Result<Document> {
      let mut names = Vec::new();
      for file in files {
        let stem = file.file_stem().map_or("file".into(), |s| s.to_string_lossy());
        let extension = file.extension().map(|e| e.to_string_lossy());
        let target = unique_path(&folder, &stem, extension.as_deref());
        fs::copy(file, &target)?;
        trace!("Copied {} to {}", file.display(), target.display());
        if let Some(name) = target.file_name() {
          names.push(Value::from(name.to_string_lossy().into_owned()));
        }
      }
      if !names.is_empty() {
        record.set("files", names);
      }
      if !record.contains_key("time-added") {
        record.set("time-added", Local::now().format(TIME_ADDED_FORMAT).to_string());
      }

      let document = Document::new(folder.clone(), self.info_name.clone(), record);
      document.save(options)?;
      Ok(document)
    };

    match populate() {
      Ok(document) => {
        info!("Added '{}' at {}", document.title(), document.folder.display());
        Ok(document)
      },
      Err(error) => {
        warn!("Adding a document failed, removing {}", folder.display());
        if let Err(cleanup) = fs::remove_dir_all(&folder) {
          warn!("Could not remove {}: {cleanup}", folder.display());
        }
        Err(error)
      },
    }
  }
}

/// Case-insensitive substring match against the folder name and the string fields.
///
/// An empty query or `.` matches everything.
pub fn matches_query(document: &Document, query: &str) -> bool {
  let query = query.trim();
  if query.is_empty() || query == "." {
    return true;
  }
  let query = query.to_lowercase();
  let folder = document.folder.file_name().map(|name| name.to_string_lossy().to_lowercase());
  folder.is_some_and(|name| name.contains(&query))
    || document.data.iter().any(|(_, value)| value_contains(value, &query))
}

fn value_contains(value: &Value, query: &str) -> bool {
  match value {
    Value::String(s) => s.to_lowercase().contains(query),
    Value::Sequence(items) => items.iter().any(|item| value_contains(item, query)),
    Value::Mapping(map) => map.values().any(|item| value_contains(item, query)),
    _ => false,
  }
}

/// `dir/stem.ext`, or `dir/stem-N.ext` with the first free `N`.
fn unique_path(dir: &Path, stem: &str, extension: Option<&str>) -> PathBuf {
  let file_name = |suffix: String| match extension {
    Some(extension) => format!("{stem}{suffix}.{extension}"),
    None => format!("{stem}{suffix}"),
  };
  let mut path = dir.join(file_name(String::new()));
  let mut n = 1;
  while path.exists() {
    path = dir.join(file_name(format!("-{n}")));
    n += 1;
  }
  path
}
