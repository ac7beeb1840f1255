//! Shared behaviour of importers that download a document from a website.

use std::io::Write;

use super::*;

/// An importer that scrapes a DOI from a web address and downloads the document behind it.
///
/// Implementors describe where things are; [`Downloader::fetch_document`] does the fetching:
///
/// 1. If [`doi`](Downloader::doi) finds a DOI, the metadata gets `doi` and `url` fields.
/// 2. The [`document_url`](Downloader::document_url) is downloaded with the downloader's
///    [`cookies`](Downloader::cookies).
/// 3. The payload is checked against the [`expected_extension`](Downloader::expected_extension)
///    by its leading bytes and kept in a temporary file that becomes an artifact of the import.
pub trait Downloader: Importer {
  /// Cookies to send with the document request.
  fn cookies(&self) -> &[(&'static str, &'static str)] { &[] }

  /// File type the document must have, e.g. `"pdf"`.
  fn expected_extension(&self) -> Option<&'static str> { None }

  /// DOI derived from the URI, if there is one.
  fn doi(&self) -> Option<String>;

  /// Address of the document file.
  fn document_url(&self) -> Option<String>;

  /// Fetches metadata and the document.
  fn fetch_document(&self, session: &dyn Session) -> Result<ImportContext> {
    let mut ctx = ImportContext::new();

    match self.doi() {
      Some(doi) => {
        let mut data = Record::new();
        data.set("doi", doi);
        data.set("url", self.uri());
        ctx.data = Some(data);
      },
      None => ctx.log(format!("No DOI found in '{}'", self.uri())),
    }

    let Some(url) = self.document_url() else {
      ctx.log(format!("No document to download for '{}'", self.uri()));
      return Ok(ctx);
    };

    debug!("[{}] Downloading document from '{url}'", self.name());
    let response = session.get(&url, self.cookies())?;
    if !response.is_success() {
      warn!("Could not download document from '{url}' (HTTP {})", response.status);
      ctx.log(format!("Downloading '{url}' failed with HTTP status {}", response.status));
      return Ok(ctx);
    }

    let kind = guess_extension(&response.body);
    if let Some(expected) = self.expected_extension() {
      if kind != Some(expected) {
        warn!("Downloaded document from '{url}' is not a '{expected}' file");
        ctx.log(format!(
          "Downloaded document does not look like a '{expected}' file ({})",
          kind.unwrap_or("unknown type")
        ));
        return Ok(ctx);
      }
    }

    let path = save_temp(&response.body, kind.unwrap_or("data"))?;
    info!("Saved document from '{url}' to {}", path.display());
    ctx.add_download(path);
    Ok(ctx)
  }
}

/// Recognizes common document formats by their leading bytes.
pub fn guess_extension(data: &[u8]) -> Option<&'static str> {
  if data.starts_with(b"%PDF") {
    Some("pdf")
  } else if data.starts_with(b"AT&TFORM") {
    Some("djvu")
  } else if data.starts_with(b"%!PS") {
    Some("ps")
  } else if data.starts_with(b"PK\x03\x04")
    && data.get(30..).is_some_and(|rest| rest.starts_with(b"mimetypeapplication/epub+zip"))
  {
    Some("epub")
  } else {
    None
  }
}

/// Writes `data` to a temporary file that outlives this process.
fn save_temp(data: &[u8], extension: &str) -> Result<PathBuf> {
  let mut file =
    tempfile::Builder::new().prefix("folio-").suffix(&format!(".{extension}")).tempfile()?;
  file.write_all(data)?;
  let (_, path) = file.keep().map_err(|e| e.error)?;
  Ok(path)
}
