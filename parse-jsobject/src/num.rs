use core::hash::Hash;
use core::hash::Hasher;
use serde::Serialize;
use serde::Serializer;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

// This provides Eq for f64.
#[derive(Copy, Clone, Debug)]
pub struct JsNumber(pub f64);

impl JsNumber {
  /// Parses the raw text of a number literal token, including radix prefixes and numeric separators.
  pub fn from_literal(raw: &str) -> Option<JsNumber> {
    let raw = raw.replace('_', "");
    let radix = |prefix_len: usize, radix: u32| {
      u64::from_str_radix(&raw[prefix_len..], radix)
        .ok()
        .map(|v| JsNumber(v as f64))
    };
    match raw.get(..2) {
      Some("0x" | "0X") => radix(2, 16),
      Some("0o" | "0O") => radix(2, 8),
      Some("0b" | "0B") => radix(2, 2),
      _ => raw.parse::<f64>().ok().map(JsNumber),
    }
  }

  /// The string this number becomes when used as a property key.
  pub fn to_property_key(self) -> String {
    let v = self.0;
    if v.is_nan() {
      "NaN".to_string()
    } else if v.is_infinite() {
      if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if v == 0.0 {
      // Also covers negative zero.
      "0".to_string()
    } else if v.fract() == 0.0 && v.abs() < 1e21 {
      format!("{:.0}", v)
    } else {
      format!("{}", v)
    }
  }
}

impl Display for JsNumber {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl PartialEq for JsNumber {
  fn eq(&self, other: &Self) -> bool {
    if self.0.is_nan() {
      return other.0.is_nan();
    };
    self.0.eq(&other.0)
  }
}

impl Eq for JsNumber {}

impl Hash for JsNumber {
  fn hash<H: Hasher>(&self, state: &mut H) {
    if !self.0.is_nan() {
      self.0.to_bits().hash(state);
    };
  }
}

impl Serialize for JsNumber {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(self.0)
  }
}
