//! Resolution of untagged plain scalars to typed values.
//!
//! These are the rules `serde_yaml` applies to plain scalars, so the [`native`](super::native)
//! backend types a scalar the same way the `libyaml` one does.

use super::*;

/// Types a plain (unquoted) scalar.
pub fn resolve_plain(scalar: &str) -> Value {
  if is_null(scalar) {
    return Value::Null;
  }
  if let Some(b) = parse_bool(scalar) {
    return Value::Bool(b);
  }
  if let Some(u) = parse_unsigned_int(scalar) {
    return match i64::try_from(u) {
      Ok(i) => Value::Integer(i),
      Err(_) => Value::Float(u as f64),
    };
  }
  if let Some(i) = parse_negative_int(scalar) {
    return Value::Integer(i);
  }
  if digits_but_not_number(scalar) {
    return Value::String(scalar.to_owned());
  }
  if let Some(f) = parse_float(scalar) {
    return Value::Float(f);
  }
  Value::String(scalar.to_owned())
}

/// Whether a plain scalar is one of the null spellings.
pub fn is_null(scalar: &str) -> bool { matches!(scalar, "" | "~" | "null" | "Null" | "NULL") }

fn parse_bool(scalar: &str) -> Option<bool> {
  match scalar {
    "true" | "True" | "TRUE" => Some(true),
    "false" | "False" | "FALSE" => Some(false),
    _ => None,
  }
}

/// Leading zeros followed by more digits is a string, not an octal or decimal number.
fn digits_but_not_number(scalar: &str) -> bool {
  let scalar = scalar.strip_prefix(['-', '+']).unwrap_or(scalar);
  scalar.len() > 1 && scalar.starts_with('0') && scalar[1..].bytes().all(|b| b.is_ascii_digit())
}

fn parse_unsigned_int(scalar: &str) -> Option<u64> {
  let unpositive = scalar.strip_prefix('+').unwrap_or(scalar);
  for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
    if let Some(rest) = unpositive.strip_prefix(prefix) {
      if rest.starts_with(['+', '-']) {
        return None;
      }
      if let Ok(int) = u64::from_str_radix(rest, radix) {
        return Some(int);
      }
    }
  }
  if unpositive.starts_with(['+', '-']) || digits_but_not_number(scalar) {
    return None;
  }
  unpositive.parse().ok()
}

fn parse_negative_int(scalar: &str) -> Option<i64> {
  for (prefix, radix) in [("-0x", 16), ("-0o", 8), ("-0b", 2)] {
    if let Some(rest) = scalar.strip_prefix(prefix) {
      if rest.starts_with(['+', '-']) {
        return None;
      }
      if let Ok(int) = i64::from_str_radix(&format!("-{rest}"), radix) {
        return Some(int);
      }
    }
  }
  if !scalar.starts_with('-') || digits_but_not_number(scalar) {
    return None;
  }
  scalar.parse().ok()
}

fn parse_float(scalar: &str) -> Option<f64> {
  let unpositive = match scalar.strip_prefix('+') {
    Some(rest) if rest.starts_with(['+', '-']) => return None,
    Some(rest) => rest,
    None => scalar,
  };
  if let ".inf" | ".Inf" | ".INF" = unpositive {
    return Some(f64::INFINITY);
  }
  if let "-.inf" | "-.Inf" | "-.INF" = scalar {
    return Some(f64::NEG_INFINITY);
  }
  if let ".nan" | ".NaN" | ".NAN" = scalar {
    return Some(f64::NAN);
  }
  // Rust's grammar also accepts `inf` and `nan`, which YAML keeps as strings.
  unpositive.parse::<f64>().ok().filter(|f| f.is_finite())
}
