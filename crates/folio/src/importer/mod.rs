//! Recognizing input sources and fetching document metadata from them.
//!
//! An [`Importer`] handles one kind of input: a local YAML file, a publisher's web page, and so
//! on. Importing is split into two steps:
//!
//! 1. **Matching.** Each importer type has an associated [`Importer::matches`] function that looks
//!    at a URI and decides whether the importer can handle it. Matching is cheap and never
//!    fetches anything.
//! 2. **Fetching.** [`Importer::fetch`] reads the source and returns a fresh [`ImportContext`]
//!    holding the metadata (if any was found), downloaded files and diagnostics.
//!
//! The [`Importers`] registry tries every registered importer in order and the first one that
//! matches claims the URI.
//!
//! All network access goes through a [`Session`], so importers can be exercised without a
//! network by handing them a different session.
//!
//! # Examples
//!
//! ```no_run
//! use folio::importer::{HttpSession, Importers};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let importers = Importers::default();
//! if let Some(importer) = importers.matching("https://dl.acm.org/doi/abs/10.1145/3456.7891") {
//!   let ctx = importer.fetch(&HttpSession::new()?)?;
//!   println!("{:?} with {} file(s)", ctx.data, ctx.files.len());
//! }
//! # Ok(())
//! # }
//! ```

use std::{
  fmt::{self, Debug},
  fs, io,
};

use super::*;

mod acm;
mod downloader;
mod yaml;

pub use acm::Acm;
pub use downloader::{guess_extension, Downloader};
pub use yaml::YamlFile;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

/// The outcome of one fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportContext {
  /// Metadata found by the fetch. `None` when the source had nothing to offer.
  pub data:      Option<Record>,
  /// Files produced by the fetch, such as a downloaded PDF.
  pub files:     Vec<PathBuf>,
  /// Human readable notes about what happened.
  pub logs:      Vec<String>,
  /// The entries of `files` this fetch created as temporary files.
  pub downloads: Vec<PathBuf>,
}

impl ImportContext {
  /// Creates an empty context.
  pub fn new() -> Self { Self::default() }

  /// Records a diagnostic, also sending it to the log.
  pub fn log(&mut self, message: impl Into<String>) {
    let message = message.into();
    debug!("{message}");
    self.logs.push(message);
  }

  /// Adds a temporary file created by the fetch. It is listed in `files` like any other file.
  pub fn add_download(&mut self, path: PathBuf) {
    self.files.push(path.clone());
    self.downloads.push(path);
  }

  /// Deletes the temporary files of the fetch.
  ///
  /// Call this once the files have been copied into a library, or when the import is abandoned.
  /// Files the fetch only pointed at are left alone.
  pub fn remove_downloads(&mut self) -> Result<()> {
    while let Some(path) = self.downloads.last() {
      trace!("Removing temporary file {}", path.display());
      if let Err(e) = fs::remove_file(path) {
        if e.kind() != io::ErrorKind::NotFound {
          return Err(e.into());
        }
      }
      self.files.retain(|file| file != path);
      self.downloads.pop();
    }
    Ok(())
  }

  /// Whether the fetch produced neither data nor files.
  pub fn is_empty(&self) -> bool { self.data.is_none() && self.files.is_empty() }
}

/// A response to an HTTP request.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
  /// HTTP status code
  pub status: u16,
  /// Response body
  pub body:   Vec<u8>,
}

impl Response {
  /// Whether the status is in the 2xx range.
  pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }
}

/// The network as seen by importers.
pub trait Session {
  /// Performs a GET request sending the given cookies.
  ///
  /// # Errors
  ///
  /// Transport failures (no connection, TLS errors, timeouts) are errors. A response with a
  /// non-success status is not an error; callers inspect [`Response::status`].
  fn get(&self, url: &str, cookies: &[(&str, &str)]) -> Result<Response>;
}

/// A [`Session`] backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpSession {
  client: reqwest::blocking::Client,
}

impl HttpSession {
  /// Builds an HTTP client identifying itself with [`USER_AGENT`].
  pub fn new() -> Result<Self> {
    let client = reqwest::blocking::Client::builder().user_agent(USER_AGENT).build()?;
    Ok(Self { client })
  }
}

impl Session for HttpSession {
  fn get(&self, url: &str, cookies: &[(&str, &str)]) -> Result<Response> {
    let mut request = self.client.get(url);
    if !cookies.is_empty() {
      let cookie =
        cookies.iter().map(|(name, value)| format!("{name}={value}")).collect::<Vec<_>>().join("; ");
      request = request.header(reqwest::header::COOKIE, cookie);
    }
    let response = request.send()?;
    let status = response.status().as_u16();
    let body = response.bytes()?.to_vec();
    trace!("GET {url} answered {status} with {} bytes", body.len());
    Ok(Response { status, body })
  }
}

/// A source of document metadata.
pub trait Importer: Debug {
  /// Checks whether this importer can handle `uri`, without fetching anything.
  ///
  /// Returns an importer ready to [`fetch`](Importer::fetch) on a match.
  fn matches(uri: &str) -> Option<Self>
  where Self: Sized;

  /// Short name of the importer, e.g. `"acm"`.
  fn name(&self) -> &'static str;

  /// The URI this importer was matched against.
  fn uri(&self) -> &str;

  /// Reads the source.
  ///
  /// A source that has nothing to offer is not an error: the returned context has no data and a
  /// log entry saying why. I/O and transport failures are returned as errors.
  fn fetch(&self, session: &dyn Session) -> Result<ImportContext>;
}

/// Matches a URI against one importer type.
pub type Matcher = fn(&str) -> Option<Box<dyn Importer>>;

fn matcher<I: Importer + 'static>(uri: &str) -> Option<Box<dyn Importer>> {
  I::matches(uri).map(|importer| Box::new(importer) as Box<dyn Importer>)
}

/// An ordered list of importers tried one after the other.
///
/// The default registry knows the YAML file importer and the ACM downloader, in that order.
#[derive(Clone)]
pub struct Importers {
  entries: Vec<(&'static str, Matcher)>,
}

impl Importers {
  /// Creates a registry with no importers.
  pub fn new() -> Self { Self { entries: Vec::new() } }

  /// Appends an importer type under `name`. Earlier entries take priority.
  pub fn register<I: Importer + 'static>(mut self, name: &'static str) -> Self {
    self.entries.push((name, matcher::<I>));
    self
  }

  /// Returns the first importer that matches `uri`.
  pub fn matching(&self, uri: &str) -> Option<Box<dyn Importer>> {
    for (name, matcher) in &self.entries {
      if let Some(importer) = matcher(uri) {
        debug!("'{uri}' matched the {name} importer");
        return Some(importer);
      }
    }
    debug!("No importer matched '{uri}'");
    None
  }

  /// Names of the registered importers, in priority order.
  pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
    self.entries.iter().map(|(name, _)| *name)
  }
}

impl Debug for Importers {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.debug_list().entries(self.names()).finish() }
}

impl Default for Importers {
  fn default() -> Self { Self::new().register::<YamlFile>("yaml").register::<Acm>("acm") }
}
