//! The in-memory metadata of a single document.
//!
//! A [`Record`] maps field names to [`Value`]s. Values form a closed set of shapes (null,
//! booleans, integers, floats, strings, sequences and string-keyed mappings), which is exactly
//! what the YAML metadata files can hold.
//!
//! Records are keyed collections: consumers look fields up by name and must never depend on the
//! order fields are stored or iterated in.
//!
//! # Examples
//!
//! ```
//! use folio::record::{Record, Value};
//!
//! let mut record = Record::new();
//! record.set("title", "On Computable Numbers");
//! record.set("year", 1936);
//! record.set("tags", vec![Value::from("logic"), Value::from("computability")]);
//!
//! assert_eq!(record.get("year"), Some(&Value::Integer(1936)));
//! assert!(record.keys().contains("tags"));
//! ```

use super::*;

/// A single metadata value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
  /// An explicitly empty value (`~`, `null` or nothing at all in YAML)
  Null,
  /// `true` or `false`
  Bool(bool),
  /// A signed integer that fits in 64 bits
  Integer(i64),
  /// A floating point number
  Float(f64),
  /// A Unicode string
  String(String),
  /// An ordered list of values
  Sequence(Vec<Value>),
  /// A nested string-keyed mapping
  Mapping(BTreeMap<String, Value>),
}

impl Value {
  /// Human readable name of this value's shape, used in error messages.
  pub fn kind(&self) -> &'static str {
    match self {
      Value::Null => "null",
      Value::Bool(_) => "boolean",
      Value::Integer(_) => "integer",
      Value::Float(_) => "float",
      Value::String(_) => "string",
      Value::Sequence(_) => "sequence",
      Value::Mapping(_) => "mapping",
    }
  }

  /// Returns the string slice if this is a [`Value::String`].
  pub fn as_str(&self) -> Option<&str> {
    match self {
      Value::String(s) => Some(s),
      _ => None,
    }
  }

  /// Returns the integer if this is a [`Value::Integer`].
  pub fn as_i64(&self) -> Option<i64> {
    match self {
      Value::Integer(i) => Some(*i),
      _ => None,
    }
  }

  /// Returns the elements if this is a [`Value::Sequence`].
  pub fn as_sequence(&self) -> Option<&[Value]> {
    match self {
      Value::Sequence(items) => Some(items),
      _ => None,
    }
  }

  /// Returns the mapping if this is a [`Value::Mapping`].
  pub fn as_mapping(&self) -> Option<&BTreeMap<String, Value>> {
    match self {
      Value::Mapping(map) => Some(map),
      _ => None,
    }
  }

  /// Whether this is [`Value::Null`].
  pub fn is_null(&self) -> bool { matches!(self, Value::Null) }

  /// Text of a scalar used as a mapping key.
  ///
  /// YAML allows numbers and booleans as keys but records are string-keyed, so such keys are
  /// stored under their canonical text. Null and collection keys have no sensible text form.
  pub(crate) fn into_key(self) -> Result<String> {
    match self {
      Value::String(s) => Ok(s),
      Value::Bool(b) => Ok(b.to_string()),
      Value::Integer(i) => Ok(i.to_string()),
      Value::Float(f) => Ok(f.to_string()),
      other => Err(FolioError::format(format!("{} values cannot be used as keys", other.kind()))),
    }
  }
}

impl From<&str> for Value {
  fn from(value: &str) -> Self { Value::String(value.to_owned()) }
}

impl From<String> for Value {
  fn from(value: String) -> Self { Value::String(value) }
}

impl From<bool> for Value {
  fn from(value: bool) -> Self { Value::Bool(value) }
}

impl From<i64> for Value {
  fn from(value: i64) -> Self { Value::Integer(value) }
}

impl From<i32> for Value {
  fn from(value: i32) -> Self { Value::Integer(value.into()) }
}

impl From<f64> for Value {
  fn from(value: f64) -> Self { Value::Float(value) }
}

impl From<Vec<Value>> for Value {
  fn from(value: Vec<Value>) -> Self { Value::Sequence(value) }
}

impl From<BTreeMap<String, Value>> for Value {
  fn from(value: BTreeMap<String, Value>) -> Self { Value::Mapping(value) }
}

impl From<Record> for Value {
  fn from(value: Record) -> Self { Value::Mapping(value.fields) }
}

/// Metadata of one document.
///
/// A record may be empty, which is a different state from having no record at all: APIs that can
/// come up empty-handed return `Option<Record>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
  /// Field name to value
  fields: BTreeMap<String, Value>,
}

impl Record {
  /// Creates an empty record.
  pub fn new() -> Self { Self::default() }

  /// Looks up a field by name.
  pub fn get(&self, key: &str) -> Option<&Value> { self.fields.get(key) }

  /// Looks up a field by name for in-place modification.
  pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> { self.fields.get_mut(key) }

  /// Inserts or overwrites a field, returning the previous value if there was one.
  pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
    self.fields.insert(key.into(), value.into())
  }

  /// Removes a field, returning its value.
  pub fn remove(&mut self, key: &str) -> Option<Value> { self.fields.remove(key) }

  /// Whether a field with this name exists.
  pub fn contains_key(&self, key: &str) -> bool { self.fields.contains_key(key) }

  /// The set of field names, as used by validators to check required fields.
  pub fn keys(&self) -> BTreeSet<&str> { self.fields.keys().map(String::as_str).collect() }

  /// Number of fields.
  pub fn len(&self) -> usize { self.fields.len() }

  /// Whether the record has no fields.
  pub fn is_empty(&self) -> bool { self.fields.is_empty() }

  /// Iterates over the fields.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
    self.fields.iter().map(|(k, v)| (k.as_str(), v))
  }

  /// Merges `other` into this record, fields of `other` winning on conflicts.
  pub fn update(&mut self, other: Record) { self.fields.extend(other.fields) }

  /// Convenience accessor for string fields.
  pub fn get_str(&self, key: &str) -> Option<&str> { self.get(key).and_then(Value::as_str) }
}

impl From<BTreeMap<String, Value>> for Record {
  fn from(fields: BTreeMap<String, Value>) -> Self { Self { fields } }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
  fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
    Self { fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
  }
}

impl IntoIterator for Record {
  type IntoIter = std::collections::btree_map::IntoIter<String, Value>;
  type Item = (String, Value);

  fn into_iter(self) -> Self::IntoIter { self.fields.into_iter() }
}
