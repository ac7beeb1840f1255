//! Folder names for new documents.

use super::*;

lazy_static! {
  /// Runs of characters that do not belong in a folder name.
  static ref SEPARATORS: Regex = Regex::new(r"[^\p{Alphabetic}\p{Nd}]+").unwrap();
}

/// Maximum length of a generated folder name.
pub const MAX_NAME_LEN: usize = 50;

/// Turns a title into a lowercase, dash separated folder name of at most `max_len` characters.
///
/// Titles without any usable characters come out as `document`.
///
/// ```
/// use folio::format::format_title;
///
/// assert_eq!(format_title("On Computable Numbers, with an Application", 50), "on-computable-numbers-with-an-application");
/// assert_eq!(format_title("Café: déjà vu?", 50), "café-déjà-vu");
/// assert_eq!(format_title("A Very Long Title Indeed", 10), "a-very-lon");
/// ```
pub fn format_title(title: &str, max_len: usize) -> String {
  let slug = SEPARATORS.replace_all(&title.to_lowercase(), "-").trim_matches('-').to_owned();
  let truncated: String = slug.chars().take(max_len).collect();
  let name = truncated.trim_end_matches('-');
  if name.is_empty() {
    "document".to_owned()
  } else {
    name.to_owned()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_separators_collapse() {
    assert_eq!(format_title("  Deep   Learning -- a survey!! ", MAX_NAME_LEN), "deep-learning-a-survey");
    assert_eq!(format_title("x/y\\z", MAX_NAME_LEN), "x-y-z");
  }

  #[test]
  fn test_truncation_does_not_end_with_dash() {
    assert_eq!(format_title("abcd efgh", 5), "abcd");
    assert_eq!(format_title("a".repeat(80).as_str(), MAX_NAME_LEN).len(), MAX_NAME_LEN);
  }

  #[test]
  fn test_empty_titles() {
    assert_eq!(format_title("", MAX_NAME_LEN), "document");
    assert_eq!(format_title("???", MAX_NAME_LEN), "document");
  }
}
