use std::{cell::RefCell, error::Error, fs, path::PathBuf};

use folio::{
  bulk,
  check::{check, Problem},
  config::Config,
  importer::{Acm, Downloader, ImportContext, Importers, Response},
  prelude::*,
  yaml::{self, Strictness, YamlOptions},
};
use tempfile::{tempdir, TempDir};
use tracing_test::traced_test;

mod workflows;

pub type TestResult<T> = Result<T, Box<dyn Error>>;

/// A session replaying canned responses, keyed by URL.
#[derive(Default)]
pub struct MockSession {
  responses: Vec<(String, Response)>,
  requests:  RefCell<Vec<String>>,
}

impl MockSession {
  pub fn with(mut self, url: &str, status: u16, body: &[u8]) -> Self {
    self.responses.push((url.to_owned(), Response { status, body: body.to_vec() }));
    self
  }

  pub fn requests(&self) -> Vec<String> { self.requests.borrow().clone() }
}

impl Session for MockSession {
  fn get(&self, url: &str, _cookies: &[(&str, &str)]) -> folio::error::Result<Response> {
    self.requests.borrow_mut().push(url.to_owned());
    Ok(self
      .responses
      .iter()
      .find(|(known, _)| known == url)
      .map(|(_, response)| response.clone())
      .unwrap_or(Response { status: 404, body: Vec::new() }))
  }
}

/// A configuration pointing at a fresh library in a temporary directory.
pub fn test_config() -> (Config, TempDir) {
  let dir = tempdir().unwrap();
  let config = Config::default().with_library_path(dir.path().join("papers"));
  (config, dir)
}
