//! Downloader for the ACM Digital Library.

use url::Url;

use super::*;

lazy_static! {
  /// Everything after `/doi/` up to the query string, e.g. `abs/10.1145/3456.7891`.
  static ref DOI_PATH: Regex = Regex::new(r"^.*/doi/(.*/[^?&%^$]*).*$").unwrap();
}

/// Cookie accepting the site's privacy notice; without it the site serves a consent page.
const GDPR_COOKIE: (&str, &str) = ("gdpr", "true");

/// Imports papers from `dl.acm.org` and other `acm.org` hosts.
///
/// ```
/// use folio::importer::{Acm, Downloader, Importer};
///
/// let acm = Acm::matches("https://dl.acm.org/doi/abs/10.1145/3456.7891?x=1").unwrap();
/// assert_eq!(acm.doi().as_deref(), Some("10.1145/3456.7891"));
/// assert_eq!(
///   acm.document_url().as_deref(),
///   Some("https://dl.acm.org/doi/pdf/10.1145/3456.7891")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acm {
  uri: String,
}

impl Importer for Acm {
  fn matches(uri: &str) -> Option<Self> {
    let url = Url::parse(uri).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
      return None;
    }
    let host = url.host_str()?;
    (host == "acm.org" || host.ends_with(".acm.org")).then(|| Self { uri: uri.to_owned() })
  }

  fn name(&self) -> &'static str { "acm" }

  fn uri(&self) -> &str { &self.uri }

  fn fetch(&self, session: &dyn Session) -> Result<ImportContext> { self.fetch_document(session) }
}

impl Downloader for Acm {
  fn cookies(&self) -> &[(&'static str, &'static str)] { &[GDPR_COOKIE] }

  fn expected_extension(&self) -> Option<&'static str> { Some("pdf") }

  fn doi(&self) -> Option<String> {
    trace!("Parsing DOI from '{}'", self.uri);
    let captures = DOI_PATH.captures(&self.uri)?;
    Some(captures[1].replace("abs/", "").replace("full/", ""))
  }

  fn document_url(&self) -> Option<String> {
    self.doi().map(|doi| format!("https://dl.acm.org/doi/pdf/{doi}"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_matches_acm_hosts_only() {
    assert!(Acm::matches("https://dl.acm.org/doi/10.1145/3456.7891").is_some());
    assert!(Acm::matches("http://acm.org/anything").is_some());
    assert!(Acm::matches("https://example.com/acm.org/doi/10.1/x").is_none());
    assert!(Acm::matches("https://notacm.org/doi/10.1/x").is_none());
    assert!(Acm::matches("ftp://dl.acm.org/doi/10.1/x").is_none());
    assert!(Acm::matches("dl.acm.org/doi/10.1/x").is_none());
  }

  #[test]
  fn test_doi_extraction() {
    let doi = |uri: &str| Acm::matches(uri).and_then(|acm| acm.doi());
    assert_eq!(doi("https://dl.acm.org/doi/abs/10.1145/3456.7891?x=1").as_deref(), Some("10.1145/3456.7891"));
    assert_eq!(doi("https://dl.acm.org/doi/full/10.1145/3456.7891").as_deref(), Some("10.1145/3456.7891"));
    assert_eq!(doi("https://dl.acm.org/doi/10.1145/3456.7891").as_deref(), Some("10.1145/3456.7891"));
    assert_eq!(doi("https://dl.acm.org/profile/12345"), None);
  }

  #[test]
  fn test_no_doi_means_no_document() {
    let acm = Acm::matches("https://dl.acm.org/conference/icse").unwrap();
    assert_eq!(acm.document_url(), None);
    assert_eq!(acm.cookies(), &[("gdpr", "true")]);
  }
}
