use serde::Deserialize;
use serde::Serialize;
use serde::Serializer;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

// Integers beyond this can't be represented exactly as an f64, so they're written as floats.
const MAX_SAFE_INTEGER: f64 = 9007199254740991.0;

/// A dynamically-typed value, as produced by evaluating a widget property's binding.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum Value {
  #[default]
  Undefined,
  Null,
  Bool(bool),
  Number(f64),
  String(String),
  Array(Vec<Value>),
  Object(BTreeMap<String, Value>),
}

/// Identity of a value under SameValueZero: NaN equals NaN, `+0` equals `-0`, and arrays
/// and objects are only equal to themselves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SameValueZeroKey<'a> {
  Undefined,
  Null,
  Bool(bool),
  NaN,
  Number(u64),
  String(&'a str),
  Reference(*const Value),
}

impl Value {
  pub fn is_undefined(&self) -> bool {
    matches!(self, Value::Undefined)
  }

  /// Whether this is `null` or `undefined`.
  pub fn is_nil(&self) -> bool {
    matches!(self, Value::Undefined | Value::Null)
  }

  pub fn as_array(&self) -> Option<&[Value]> {
    match self {
      Value::Array(items) => Some(items),
      _ => None,
    }
  }

  /// Reads a property of an object. Anything else has no properties.
  pub fn get(&self, key: &str) -> Option<&Value> {
    match self {
      Value::Object(map) => map.get(key),
      _ => None,
    }
  }

  /// The `typeof`-style name of this value's type.
  pub fn type_name(&self) -> &'static str {
    match self {
      Value::Undefined => "undefined",
      Value::Null => "null",
      Value::Bool(_) => "boolean",
      Value::Number(_) => "number",
      Value::String(_) => "string",
      Value::Array(_) => "array",
      Value::Object(_) => "object",
    }
  }

  pub fn same_value_zero_key(&self) -> SameValueZeroKey<'_> {
    match self {
      Value::Undefined => SameValueZeroKey::Undefined,
      Value::Null => SameValueZeroKey::Null,
      Value::Bool(b) => SameValueZeroKey::Bool(*b),
      Value::Number(n) if n.is_nan() => SameValueZeroKey::NaN,
      // Folds `-0` into `+0`.
      Value::Number(n) => SameValueZeroKey::Number((n + 0.0).to_bits()),
      Value::String(s) => SameValueZeroKey::String(s),
      Value::Array(_) | Value::Object(_) => SameValueZeroKey::Reference(self as *const Value),
    }
  }

  pub fn same_value_zero(&self, other: &Value) -> bool {
    self.same_value_zero_key() == other.same_value_zero_key()
  }
}

/// Formats a number the way JS's `String(number)` does for the common cases.
pub fn number_to_string(n: f64) -> String {
  if n.is_nan() {
    "NaN".to_string()
  } else if n == f64::INFINITY {
    "Infinity".to_string()
  } else if n == f64::NEG_INFINITY {
    "-Infinity".to_string()
  } else if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
    format!("{}", n as i64)
  } else {
    format!("{}", n)
  }
}

impl Display for Value {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Value::Undefined => write!(f, "undefined"),
      Value::Null => write!(f, "null"),
      Value::Bool(b) => write!(f, "{}", b),
      Value::Number(n) => write!(f, "{}", number_to_string(*n)),
      Value::String(s) => write!(f, "{}", s),
      Value::Array(_) | Value::Object(_) => {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{}", json)
      }
    }
  }
}

impl Serialize for Value {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      // JSON has no `undefined`; inside arrays it becomes `null`, like `JSON.stringify`.
      Value::Undefined | Value::Null => serializer.serialize_unit(),
      Value::Bool(b) => serializer.serialize_bool(*b),
      Value::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
        serializer.serialize_i64(*n as i64)
      }
      Value::Number(n) => serializer.serialize_f64(*n),
      Value::String(s) => serializer.serialize_str(s),
      Value::Array(items) => items.serialize(serializer),
      Value::Object(map) => map.serialize(serializer),
    }
  }
}

impl From<serde_json::Value> for Value {
  fn from(value: serde_json::Value) -> Self {
    match value {
      serde_json::Value::Null => Value::Null,
      serde_json::Value::Bool(b) => Value::Bool(b),
      serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
      serde_json::Value::String(s) => Value::String(s),
      serde_json::Value::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
      serde_json::Value::Object(map) => {
        Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
      }
    }
  }
}

impl From<bool> for Value {
  fn from(value: bool) -> Self {
    Value::Bool(value)
  }
}

impl From<f64> for Value {
  fn from(value: f64) -> Self {
    Value::Number(value)
  }
}

impl From<i32> for Value {
  fn from(value: i32) -> Self {
    Value::Number(value.into())
  }
}

impl From<&str> for Value {
  fn from(value: &str) -> Self {
    Value::String(value.to_string())
  }
}

impl From<String> for Value {
  fn from(value: String) -> Self {
    Value::String(value)
  }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
  fn from(items: Vec<T>) -> Self {
    Value::Array(items.into_iter().map(Into::into).collect())
  }
}
