//! Validation of document metadata.

use std::fmt;

use super::*;
use crate::document::Document;

/// Something wrong with a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
  /// A required key is absent.
  MissingKey(String),
  /// A file listed in `files` does not exist.
  MissingFile(PathBuf),
}

impl fmt::Display for Problem {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Problem::MissingKey(key) => write!(f, "{key} not found"),
      Problem::MissingFile(path) => write!(f, "{} not found in folder", path.display()),
    }
  }
}

/// The problems found in one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
  /// Folder of the checked document
  pub folder:   PathBuf,
  /// Everything wrong with it, keys first
  pub problems: Vec<Problem>,
}

impl CheckReport {
  /// Whether no problems were found.
  pub fn is_ok(&self) -> bool { self.problems.is_empty() }
}

/// Checks that `document` has every key in `keys` and that its listed files exist.
pub fn check<S: AsRef<str>>(document: &Document, keys: &[S]) -> CheckReport {
  let present = document.data.keys();
  let mut problems: Vec<Problem> = keys
    .iter()
    .map(|key| key.as_ref())
    .filter(|key| !present.contains(key))
    .map(|key| Problem::MissingKey(key.to_owned()))
    .collect();
  problems.extend(document.missing_files().into_iter().map(Problem::MissingFile));

  for problem in &problems {
    debug!("{}: {problem}", document.folder.display());
  }
  CheckReport { folder: document.folder.clone(), problems }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;

  #[test]
  fn test_complete_document_passes() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("paper.pdf"), b"%PDF").unwrap();
    let data: Record = [("title", Value::from("T")), ("files", Value::from(vec![Value::from("paper.pdf")]))]
      .into_iter()
      .collect();
    let report = check(&Document::new(dir.path(), "info.yaml", data), &["title", "files"]);
    assert!(report.is_ok());
  }

  #[test]
  fn test_reports_missing_keys_and_files() {
    let dir = tempdir().unwrap();
    let data: Record = [("files", "gone.pdf")].into_iter().collect();
    let report = check(&Document::new(dir.path(), "info.yaml", data), &["title".to_owned(), "files".to_owned()]);

    assert_eq!(report.problems, vec![
      Problem::MissingKey("title".to_owned()),
      Problem::MissingFile(dir.path().join("gone.pdf"))
    ]);
    assert_eq!(report.problems[0].to_string(), "title not found");
    assert!(report.problems[1].to_string().ends_with("gone.pdf not found in folder"));
  }
}
