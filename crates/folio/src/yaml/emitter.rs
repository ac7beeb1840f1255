//! Block-style YAML output through `serde_yaml`.
//!
//! Output looks like what people write by hand in metadata files:
//!
//! ```yaml
//! author: Turing, Alan
//! files:
//! - paper.pdf
//! title: 'On Computable Numbers: With an Application'
//! year: 1936
//! ```
//!
//! `serde_yaml` always writes Unicode as is. When [`YamlOptions::allow_unicode`] is off, every
//! string holding non-ASCII text is serialized as an ASCII stand-in, and the stand-ins are then
//! swapped for double-quoted scalars with `\u` escapes.

use std::{borrow::Cow, cell::RefCell, fmt::Write};

use serde::Serializer;

use super::*;

/// Start of every stand-in. Strings containing it are escaped too, so in the serialized text it
/// only ever appears as part of a stand-in.
const STAND_IN: &str = "__folio_escaped_";

/// Renders one record as the body of a document.
pub(super) fn document(record: &Record, options: &YamlOptions) -> Result<String> {
  if options.allow_unicode {
    return serde_yaml::to_string(record).map_err(FolioError::format);
  }
  let escaper = Escaper::default();
  let text = serde_yaml::to_string(&Ascii { inner: record, escaper: &escaper })
    .map_err(FolioError::format)?;
  Ok(escaper.substitute(&text))
}

/// Collects the strings replaced by stand-ins.
#[derive(Default)]
struct Escaper {
  originals: RefCell<Vec<String>>,
}

impl Escaper {
  fn text<'s>(&self, s: &'s str) -> Cow<'s, str> {
    if s.is_ascii() && !s.contains(STAND_IN) {
      return Cow::Borrowed(s);
    }
    let mut originals = self.originals.borrow_mut();
    originals.push(s.to_owned());
    Cow::Owned(format!("{STAND_IN}{}__", originals.len() - 1))
  }

  /// Replaces every stand-in of `text` in a single pass.
  fn substitute(&self, text: &str) -> String {
    let originals = self.originals.borrow();
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(STAND_IN) {
      out.push_str(&rest[..start]);
      let after = &rest[start + STAND_IN.len()..];
      let digits = after.bytes().take_while(u8::is_ascii_digit).count();
      let original = after[digits..]
        .starts_with("__")
        .then(|| after[..digits].parse::<usize>().ok())
        .flatten()
        .and_then(|index| originals.get(index));
      match original {
        Some(original) => {
          out.push_str(&double_quoted(original));
          rest = &after[digits + 2..];
        },
        None => {
          out.push_str(STAND_IN);
          rest = after;
        },
      }
    }
    out.push_str(rest);
    out
  }
}

/// Serializes `inner` with every non-ASCII string swapped for a stand-in.
struct Ascii<'a, T> {
  inner:   &'a T,
  escaper: &'a Escaper,
}

impl<'a, T> Ascii<'a, T> {
  fn wrap<U>(&self, inner: &'a U) -> Ascii<'a, U> { Ascii { inner, escaper: self.escaper } }
}

impl Serialize for Ascii<'_, Record> {
  fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
    serializer.collect_map(self.inner.iter().map(|(key, value)| (self.escaper.text(key), self.wrap(value))))
  }
}

impl Serialize for Ascii<'_, Value> {
  fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
    match self.inner {
      Value::String(s) => serializer.serialize_str(&self.escaper.text(s)),
      Value::Sequence(items) => serializer.collect_seq(items.iter().map(|item| self.wrap(item))),
      Value::Mapping(map) => serializer
        .collect_map(map.iter().map(|(key, value)| (self.escaper.text(key), self.wrap(value)))),
      scalar => scalar.serialize(serializer),
    }
  }
}

/// A double-quoted scalar holding only ASCII.
fn double_quoted(s: &str) -> String {
  let mut out = String::with_capacity(s.len() + 2);
  out.push('"');
  for c in s.chars() {
    match c {
      '"' => out.push_str("\\\""),
      '\\' => out.push_str("\\\\"),
      '\n' => out.push_str("\\n"),
      '\t' => out.push_str("\\t"),
      '\r' => out.push_str("\\r"),
      '\0' => out.push_str("\\0"),
      c if c.is_ascii_control() => {
        let _ = write!(out, "\\x{:02X}", c as u32);
      },
      c if c.is_ascii() => out.push(c),
      c if (c as u32) <= 0xFFFF => {
        let _ = write!(out, "\\u{:04X}", c as u32);
      },
      c => {
        let _ = write!(out, "\\U{:08X}", c as u32);
      },
    }
  }
  out.push('"');
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  fn emit(record: &Record, allow_unicode: bool) -> String {
    document(record, &YamlOptions { allow_unicode }).unwrap()
  }

  fn read_back(text: &str) -> Record { from_str(text, Strictness::Strict).unwrap() }

  #[test]
  fn test_block_layout() {
    let mut record = Record::new();
    record.set("title", "On Computable Numbers");
    record.set("files", vec![Value::from("paper.pdf")]);
    record.set("year", 1936);

    assert_eq!(emit(&record, true), "files:\n- paper.pdf\ntitle: On Computable Numbers\nyear: 1936\n");
  }

  #[test]
  fn test_ambiguous_strings_keep_their_type() {
    let mut record = Record::new();
    for (key, text) in [("a", "007"), ("b", "1936"), ("c", "true"), ("d", "~"), ("e", ""), ("f", "a: b")] {
      record.set(key, text);
    }
    record.set("g", "- item\n# not a comment\n");
    assert_eq!(read_back(&emit(&record, true)), record);
    assert_eq!(read_back(&emit(&record, false)), record);
  }

  #[test]
  fn test_unicode_escaping_follows_option() {
    let mut record = Record::new();
    record.set("title", "Café déjà vu");
    assert_eq!(emit(&record, true), "title: Café déjà vu\n");
    assert_eq!(emit(&record, false), "title: \"Caf\\u00E9 d\\u00E9j\\u00E0 vu\"\n");

    let mut record = Record::new();
    record.set("note", "\u{1F4C4}");
    assert_eq!(emit(&record, false), "note: \"\\U0001F4C4\"\n");
  }

  #[test]
  fn test_escaped_output_is_ascii_everywhere() {
    let mut nested = BTreeMap::new();
    nested.insert("clé".to_owned(), Value::from("größe"));
    let mut record = Record::new();
    record.set("émoji", vec![Value::from("\u{1F4C4} paper"), Value::Mapping(nested)]);
    record.set("multi", "première ligne\ndeuxième \"ligne\"\n");

    let text = emit(&record, false);
    assert!(text.is_ascii(), "{text}");
    assert!(!text.contains(STAND_IN));
    assert_eq!(read_back(&text), record);
  }

  #[test]
  fn test_text_that_looks_like_a_stand_in_survives() {
    let mut record = Record::new();
    record.set("a", format!("{STAND_IN}1__"));
    record.set("b", "é");
    record.set("c", format!("{STAND_IN}x"));
    assert_eq!(read_back(&emit(&record, false)), record);
  }

  #[test]
  fn test_empty_shapes() {
    assert_eq!(emit(&Record::new(), true), "{}\n");
    assert_eq!(emit(&Record::new(), false), "{}\n");

    let mut record = Record::new();
    record.set("tags", Vec::<Value>::new());
    record.set("extra", BTreeMap::<String, Value>::new());
    record.set("missing", Value::Null);
    assert_eq!(read_back(&emit(&record, true)), record);
  }

  #[test]
  fn test_floats_read_back_as_floats() {
    for f in [0.0, 1.0, -3.0, 0.1, 1e20, -1e20, 1e30, 1.5e-7, f64::INFINITY] {
      let mut record = Record::new();
      record.set("x", f);
      assert_eq!(read_back(&emit(&record, true)).get("x"), Some(&Value::Float(f)), "{f}");
    }
  }

  #[test]
  fn test_nested_sequences() {
    let mut record = Record::new();
    record.set("matrix", vec![Value::from(vec![Value::from(1), Value::from(2)]), Value::from(Vec::<Value>::new())]);
    assert_eq!(read_back(&emit(&record, true)), record);
  }
}
