use crate::value::Value;
use serde::Deserialize;
use serde::Serialize;

pub const PRIMARY_KEYS_PATH: &str = "primaryKeys";
pub const DEFAULT_IDENTIFIER: &str = "id";

/// Validates the data identifiers of a list widget: the values, one per row, that
/// uniquely identify each displayed record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrimaryKeyRule {
  /// The widget property the rule is bound to, which decides whether it's in JS mode.
  pub property_path: String,
  /// The record attribute the identifiers are matched against.
  pub identifier: String,
}

impl Default for PrimaryKeyRule {
  fn default() -> Self {
    PrimaryKeyRule {
      property_path: PRIMARY_KEYS_PATH.to_string(),
      identifier: DEFAULT_IDENTIFIER.to_string(),
    }
  }
}

/// A declarative rule attached to a widget property.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ValidationRule {
  PrimaryKey(PrimaryKeyRule),
  #[serde(rename_all = "camelCase")]
  Array {
    #[serde(default)]
    unique: bool,
    #[serde(default)]
    allowed: Option<Vec<Value>>,
  },
  #[serde(rename_all = "camelCase")]
  Text {
    #[serde(default)]
    required: bool,
  },
  #[serde(rename_all = "camelCase")]
  Number {
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
  },
  Boolean,
}

impl Default for ValidationRule {
  fn default() -> Self {
    ValidationRule::PrimaryKey(PrimaryKeyRule::default())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn deserializes_tagged_rules() {
    let rule: ValidationRule = serde_json::from_str(r#"{"type": "primaryKey"}"#).unwrap();
    assert_eq!(rule, ValidationRule::default());
    let rule: ValidationRule =
      serde_json::from_str(r#"{"type": "primaryKey", "identifier": "uuid"}"#).unwrap();
    assert_eq!(
      rule,
      ValidationRule::PrimaryKey(PrimaryKeyRule {
        property_path: PRIMARY_KEYS_PATH.to_string(),
        identifier: "uuid".to_string(),
      })
    );
    let rule: ValidationRule =
      serde_json::from_str(r#"{"type": "array", "unique": true, "allowed": ["a", 1]}"#).unwrap();
    assert_eq!(
      rule,
      ValidationRule::Array {
        unique: true,
        allowed: Some(vec![Value::from("a"), Value::from(1)]),
      }
    );
    let rule: ValidationRule = serde_json::from_str(r#"{"type": "number", "min": 0}"#).unwrap();
    assert_eq!(
      rule,
      ValidationRule::Number {
        min: Some(0.0),
        max: None
      }
    );
  }
}
