//! Pure Rust backend on the `yaml-rust2` event parser.
//!
//! The parser reports a stream of events; [`Builder`] folds them into values. Plain scalars are
//! typed by the same rules the `serde_yaml` backend applies, so both backends agree on what a
//! document means. Duplicate keys, undefined aliases and application specific tags are rejected
//! as malformed input.

use std::collections::HashMap;

use yaml_rust2::{
  parser::{Event, MarkedEventReceiver, Parser, Tag},
  scanner::{Marker, TScalarStyle},
};

use super::*;

/// Handle of the core schema tags once `!!` is expanded.
const CORE_SCHEMA: &str = "tag:yaml.org,2002:";

/// The pure Rust backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct Native;

impl Backend for Native {
  fn name(&self) -> &'static str { "native" }

  fn parse_all(&self, text: &str) -> Result<Vec<Value>> {
    let mut builder = Builder::default();
    Parser::new(text.chars()).load(&mut builder, true).map_err(FolioError::format)?;
    builder.finish()
  }
}

/// A collection still receiving its children.
enum Node {
  Sequence(Vec<Value>),
  /// Entries so far and the key waiting for its value.
  Mapping(BTreeMap<String, Value>, Option<String>),
}

/// Builds documents from parser events.
#[derive(Default)]
struct Builder {
  documents: Vec<Value>,
  /// Open collections with the anchor id they were declared with.
  stack:     Vec<(usize, Node)>,
  anchors:   HashMap<usize, Value>,
  /// First failure; later events are ignored.
  error:     Option<FolioError>,
}

impl Builder {
  fn finish(self) -> Result<Vec<Value>> {
    match self.error {
      Some(error) => Err(error),
      None => Ok(self.documents),
    }
  }

  /// Hands a complete value to the innermost open collection, or to the stream.
  fn insert(&mut self, anchor: usize, value: Value) -> core::result::Result<(), String> {
    if anchor > 0 {
      self.anchors.insert(anchor, value.clone());
    }
    match self.stack.last_mut() {
      None => self.documents.push(value),
      Some((_, Node::Sequence(items))) => items.push(value),
      Some((_, Node::Mapping(map, pending))) => match pending.take() {
        None => *pending = Some(key_text(value)?),
        Some(key) if map.contains_key(&key) => return Err(format!("duplicate key \"{key}\"")),
        Some(key) => {
          map.insert(key, value);
        },
      },
    }
    Ok(())
  }

  fn close(&mut self) -> core::result::Result<(), String> {
    match self.stack.pop() {
      Some((anchor, Node::Sequence(items))) => self.insert(anchor, Value::Sequence(items)),
      Some((anchor, Node::Mapping(map, _))) => self.insert(anchor, Value::Mapping(map)),
      None => Ok(()),
    }
  }

  fn alias(&mut self, id: usize) -> core::result::Result<(), String> {
    let value = self.anchors.get(&id).cloned();
    match value {
      Some(value) => self.insert(0, value),
      None => Err("unknown anchor".to_owned()),
    }
  }
}

impl MarkedEventReceiver for Builder {
  fn on_event(&mut self, event: Event, mark: Marker) {
    if self.error.is_some() {
      return;
    }
    let result = match event {
      Event::Scalar(text, style, anchor, tag) =>
        scalar(text, style, tag.as_ref()).and_then(|value| self.insert(anchor, value)),
      Event::SequenceStart(anchor, tag) => collection_tag(tag.as_ref(), "seq")
        .map(|()| self.stack.push((anchor, Node::Sequence(Vec::new())))),
      Event::MappingStart(anchor, tag) => collection_tag(tag.as_ref(), "map")
        .map(|()| self.stack.push((anchor, Node::Mapping(BTreeMap::new(), None)))),
      Event::SequenceEnd | Event::MappingEnd => self.close(),
      Event::Alias(id) => self.alias(id),
      _ => Ok(()),
    };
    if let Err(message) = result {
      self.error = Some(FolioError::format(format!(
        "{message} at line {} column {}",
        mark.line(),
        mark.col() + 1
      )));
    }
  }
}

/// Mapping keys are stored as text.
fn key_text(value: Value) -> core::result::Result<String, String> {
  value.into_key().map_err(|error| match error {
    FolioError::Format(message) => message,
    other => other.to_string(),
  })
}

/// Suffix of a core schema tag.
fn core_suffix(tag: &Tag) -> Option<&str> {
  matches!(tag.handle.as_str(), "!!" | CORE_SCHEMA).then_some(tag.suffix.as_str())
}

fn unsupported(tag: &Tag) -> String { format!("unsupported tag {}{}", tag.handle, tag.suffix) }

fn collection_tag(tag: Option<&Tag>, kind: &str) -> core::result::Result<(), String> {
  match tag {
    Some(tag) if core_suffix(tag) != Some(kind) => Err(unsupported(tag)),
    _ => Ok(()),
  }
}

/// Types a scalar. Quoted and block scalars are strings unless tagged otherwise.
fn scalar(text: String, style: TScalarStyle, tag: Option<&Tag>) -> core::result::Result<Value, String> {
  let Some(tag) = tag else {
    return Ok(match style {
      TScalarStyle::Plain => resolve_plain(&text),
      _ => Value::String(text),
    });
  };
  let typed = match (core_suffix(tag), resolve_plain(&text)) {
    (Some("str"), _) => return Ok(Value::String(text)),
    (Some("null"), Value::Null) => Value::Null,
    (Some("bool"), value @ Value::Bool(_)) => value,
    (Some("int"), value @ Value::Integer(_)) => value,
    (Some("float"), value @ Value::Float(_)) => value,
    (Some("float"), Value::Integer(i)) => Value::Float(i as f64),
    (Some(suffix @ ("null" | "bool" | "int" | "float")), _) =>
      return Err(format!("invalid !!{suffix} value \"{text}\"")),
    _ => return Err(unsupported(tag)),
  };
  Ok(typed)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(text: &str) -> Value {
    let mut documents = Native.parse_all(text).unwrap();
    assert_eq!(documents.len(), 1, "{text:?}");
    documents.remove(0)
  }

  fn map(entries: &[(&str, Value)]) -> Value {
    Value::Mapping(entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect())
  }

  fn seq(items: &[Value]) -> Value { Value::Sequence(items.to_vec()) }

  #[test]
  fn test_block_mapping_and_sequences() {
    let text = "title: Some title\nauthor_list:\n- family: Doe\n  given: John\n- family: Roe\nfiles:\n  \
                - a.pdf\n  - b.pdf\nyear: 2020\n";
    assert_eq!(
      parse(text),
      map(&[
        ("title", "Some title".into()),
        (
          "author_list",
          seq(&[
            map(&[("family", "Doe".into()), ("given", "John".into())]),
            map(&[("family", "Roe".into())])
          ])
        ),
        ("files", seq(&["a.pdf".into(), "b.pdf".into()])),
        ("year", 2020.into()),
      ])
    );
  }

  #[test]
  fn test_plain_scalars_are_typed_quoted_ones_are_not() {
    let text = "a: 12\nb: '12'\nc: 007\nd: true\ne: \"true\"\nf:\ng: 1e20\nh: |\n  12\n";
    assert_eq!(
      parse(text),
      map(&[
        ("a", 12.into()),
        ("b", "12".into()),
        ("c", "007".into()),
        ("d", true.into()),
        ("e", "true".into()),
        ("f", Value::Null),
        ("g", 1e20.into()),
        ("h", "12\n".into()),
      ])
    );
  }

  #[test]
  fn test_keys_are_text() {
    let Value::Mapping(map) = parse("2020: a\ntrue: b\n1.5: c\n") else { panic!("expected a mapping") };
    assert_eq!(map.keys().map(String::as_str).collect::<Vec<_>>(), ["1.5", "2020", "true"]);
    assert!(matches!(Native.parse_all("~: a\n"), Err(FolioError::Format(_))));
    assert!(matches!(Native.parse_all("[a]: b\n"), Err(FolioError::Format(_))));
  }

  #[test]
  fn test_flow_collections() {
    let text = "tags: [a, 'b c', 3]\nmeta: {x: 1, \"y\": []}\nspan: [one,\n  two]\n";
    assert_eq!(
      parse(text),
      map(&[
        ("tags", seq(&["a".into(), "b c".into(), 3.into()])),
        ("meta", map(&[("x", 1.into()), ("y", seq(&[]))])),
        ("span", seq(&["one".into(), "two".into()])),
      ])
    );
  }

  #[test]
  fn test_anchors_aliases_and_tags() {
    let text = "base: &b\n  x: 1\nother: *b\ncode: !!str 007\nnum: !!float 3\nlist: !!seq [1]\n";
    assert_eq!(
      parse(text),
      map(&[
        ("base", map(&[("x", 1.into())])),
        ("other", map(&[("x", 1.into())])),
        ("code", "007".into()),
        ("num", 3.0.into()),
        ("list", seq(&[1.into()])),
      ])
    );
  }

  #[test]
  fn test_multiple_documents() {
    let documents = Native.parse_all("---\na: 1\n---\n{}\n...\n---\n- b\n").unwrap();
    assert_eq!(documents, vec![map(&[("a", 1.into())]), map(&[]), seq(&["b".into()])]);
    assert!(Native.parse_all("").unwrap().is_empty());
    assert!(Native.parse_all("# only a comment\n").unwrap().is_empty());
    assert_eq!(Native.parse_all("---\n").unwrap(), vec![Value::Null]);
  }

  #[test]
  fn test_malformed_input_is_rejected() {
    for text in [
      "title: [a, b\n",
      "title: {a: 1\n",
      "title: \"unterminated\n",
      "a: 1\n  b: 2\n",
      "a: b: c\n",
      "a: 1\na: 2\n",
      "x: *missing\n",
      "a: !custom 1\n",
      "a: !!int twelve\n",
      "a: !!map [1]\n",
    ] {
      assert!(matches!(Native.parse_all(text), Err(FolioError::Format(_))), "{text:?}");
    }
  }

  #[test]
  fn test_errors_name_the_position() {
    let Err(FolioError::Format(message)) = Native.parse_all("a: 1\nb: 2\na: 3\n") else {
      panic!("expected a format error")
    };
    assert!(message.contains("duplicate key \"a\""), "{message}");
    assert!(message.contains(" at line "), "{message}");
  }
}
