//! Backend built on `serde_yaml` and its libyaml port.

use std::fmt;

use serde::{
  de::{self, EnumAccess, MapAccess, SeqAccess, Visitor},
  Deserializer,
};

use super::*;

/// The `serde_yaml` backend, used by default.
#[derive(Debug, Default, Clone, Copy)]
pub struct Libyaml;

impl Backend for Libyaml {
  fn name(&self) -> &'static str { "libyaml" }

  fn parse_all(&self, text: &str) -> Result<Vec<Value>> {
    // `serde_yaml` reports one null document for a stream without any
    if !has_content(text) {
      return Ok(Vec::new());
    }
    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_str(text) {
      let Node(value) = Node::deserialize(document).map_err(FolioError::format)?;
      documents.push(value);
    }
    Ok(documents)
  }
}

/// Whether the stream has anything besides blank lines and comments.
fn has_content(text: &str) -> bool {
  text.trim_start_matches('\u{FEFF}').lines().any(|line| {
    let line = line.trim();
    !line.is_empty() && !line.starts_with('#')
  })
}

/// A [`Value`] deserialized straight from the YAML events, without an intermediate tree.
struct Node(Value);

impl<'de> Deserialize<'de> for Node {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
    deserializer.deserialize_any(NodeVisitor)
  }
}

/// Narrows what `serde_yaml` reports to the record value model.
struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
  type Value = Node;

  fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
    formatter.write_str("a YAML value")
  }

  fn visit_unit<E: de::Error>(self) -> core::result::Result<Node, E> { Ok(Node(Value::Null)) }

  fn visit_none<E: de::Error>(self) -> core::result::Result<Node, E> { Ok(Node(Value::Null)) }

  fn visit_bool<E: de::Error>(self, b: bool) -> core::result::Result<Node, E> {
    Ok(Node(Value::Bool(b)))
  }

  fn visit_i64<E: de::Error>(self, i: i64) -> core::result::Result<Node, E> {
    Ok(Node(Value::Integer(i)))
  }

  /// Integers past `i64` become floats.
  fn visit_u64<E: de::Error>(self, u: u64) -> core::result::Result<Node, E> {
    Ok(Node(i64::try_from(u).map_or(Value::Float(u as f64), Value::Integer)))
  }

  fn visit_i128<E: de::Error>(self, i: i128) -> core::result::Result<Node, E> {
    Ok(Node(i64::try_from(i).map_or(Value::Float(i as f64), Value::Integer)))
  }

  fn visit_u128<E: de::Error>(self, u: u128) -> core::result::Result<Node, E> {
    Ok(Node(i64::try_from(u).map_or(Value::Float(u as f64), Value::Integer)))
  }

  fn visit_f64<E: de::Error>(self, f: f64) -> core::result::Result<Node, E> {
    Ok(Node(Value::Float(f)))
  }

  fn visit_str<E: de::Error>(self, s: &str) -> core::result::Result<Node, E> {
    Ok(Node(Value::String(s.to_owned())))
  }

  fn visit_string<E: de::Error>(self, s: String) -> core::result::Result<Node, E> {
    Ok(Node(Value::String(s)))
  }

  fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> core::result::Result<Node, A::Error> {
    let mut items = Vec::new();
    while let Some(Node(item)) = seq.next_element()? {
      items.push(item);
    }
    Ok(Node(Value::Sequence(items)))
  }

  fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> core::result::Result<Node, A::Error> {
    let mut map = BTreeMap::new();
    while let Some(Node(key)) = access.next_key()? {
      let key = key.into_key().map_err(|error| match error {
        FolioError::Format(message) => de::Error::custom(message),
        other => de::Error::custom(other),
      })?;
      let Node(value) = access.next_value()?;
      if map.contains_key(&key) {
        return Err(de::Error::custom(format!("duplicate key \"{key}\"")));
      }
      map.insert(key, value);
    }
    Ok(Node(Value::Mapping(map)))
  }

  /// `serde_yaml` reports tagged nodes as enums.
  fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> core::result::Result<Node, A::Error> {
    let (tag, _) = data.variant::<String>()?;
    Err(de::Error::custom(format!("unsupported tag {tag}")))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn mapping(text: &str) -> BTreeMap<String, Value> {
    let mut documents = Libyaml.parse_all(text).unwrap();
    assert_eq!(documents.len(), 1, "{text:?}");
    match documents.remove(0) {
      Value::Mapping(map) => map,
      other => panic!("expected a mapping, found {other:?}"),
    }
  }

  #[test]
  fn test_numbers_narrow_to_record_values() {
    let map = mapping("a: 1\nb: 18446744073709551615\nc: 0.5\nd: 007\ne: -9223372036854775808\n");
    assert_eq!(map["a"], Value::Integer(1));
    assert_eq!(map["b"], Value::Float(18446744073709551615.0));
    assert_eq!(map["c"], Value::Float(0.5));
    assert_eq!(map["d"], Value::from("007"));
    assert_eq!(map["e"], Value::Integer(i64::MIN));
  }

  #[test]
  fn test_integers_past_u64_become_floats() {
    let map = mapping("big: 100000000000000000000\nneg: -100000000000000000000\nexp: 1e20\n");
    assert_eq!(map["big"], Value::Float(1e20));
    assert_eq!(map["neg"], Value::Float(-1e20));
    assert_eq!(map["exp"], Value::Float(1e20));
  }

  #[test]
  fn test_keys_are_text() {
    let map = mapping("2020: a\ntrue: b\n");
    assert!(map.contains_key("2020"));
    assert!(map.contains_key("true"));
    assert!(Libyaml.parse_all("~: a\n").is_err());
    assert!(matches!(Libyaml.parse_all("a: 1\na: 2\n"), Err(FolioError::Format(_))));
  }

  #[test]
  fn test_custom_tags_are_rejected() {
    assert!(matches!(Libyaml.parse_all("a: !custom 1\n"), Err(FolioError::Format(_))));
  }

  #[test]
  fn test_streams_without_documents() {
    for text in ["", "\n\n", "# just a comment\n", "  # indented comment\n\n# another\n"] {
      assert_eq!(Libyaml.parse_all(text).unwrap(), Vec::<Value>::new(), "{text:?}");
    }
    assert_eq!(Libyaml.parse_all("---\n").unwrap(), vec![Value::Null]);
  }
}
