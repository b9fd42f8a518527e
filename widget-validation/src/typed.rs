use crate::result::ValidationResult;
use crate::value::number_to_string;
use crate::value::Value;
use ahash::HashMap;
use ahash::HashMapExt;

pub fn validate_text(required: bool, value: &Value) -> ValidationResult {
  match value {
    Value::String(_) => ValidationResult::valid(value.clone()),
    Value::Number(n) => ValidationResult::valid(Value::String(number_to_string(*n))),
    Value::Bool(b) => ValidationResult::valid(Value::String(b.to_string())),
    Value::Undefined | Value::Null if required => {
      ValidationResult::invalid(Value::from(""), "This value is required")
    }
    Value::Undefined | Value::Null => ValidationResult::valid(Value::from("")),
    Value::Array(_) | Value::Object(_) => ValidationResult::invalid(
      Value::from(""),
      "This value does not evaluate to type string",
    ),
  }
}

pub fn validate_number(min: Option<f64>, max: Option<f64>, value: &Value) -> ValidationResult {
  let n = match value {
    Value::Number(n) if n.is_finite() => *n,
    Value::String(s) => match s.trim().parse::<f64>() {
      Ok(n) if n.is_finite() => n,
      _ => return not_a_number(),
    },
    _ => return not_a_number(),
  };
  if let Some(min) = min.filter(|min| n < *min) {
    return ValidationResult::invalid(
      Value::Number(min),
      format!("Minimum allowed value: {}", number_to_string(min)),
    );
  };
  if let Some(max) = max.filter(|max| n > *max) {
    return ValidationResult::invalid(
      Value::Number(max),
      format!("Maximum allowed value: {}", number_to_string(max)),
    );
  };
  ValidationResult::valid(Value::Number(n))
}

fn not_a_number() -> ValidationResult {
  ValidationResult::invalid(
    Value::Number(0.0),
    "This value does not evaluate to type number",
  )
}

pub fn validate_boolean(value: &Value) -> ValidationResult {
  match value {
    Value::Bool(b) => ValidationResult::valid(Value::Bool(*b)),
    Value::String(s) if s == "true" => ValidationResult::valid(Value::Bool(true)),
    Value::String(s) if s == "false" => ValidationResult::valid(Value::Bool(false)),
    _ => ValidationResult::invalid(
      Value::Bool(false),
      "This value does not evaluate to type boolean",
    ),
  }
}

pub fn validate_array(unique: bool, allowed: Option<&[Value]>, value: &Value) -> ValidationResult {
  let Some(items) = value.as_array() else {
    return ValidationResult::invalid(
      Value::Array(Vec::new()),
      "This value does not evaluate to type Array",
    );
  };
  if unique {
    let mut seen = HashMap::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
      if seen.insert(item.same_value_zero_key(), i).is_some() {
        return ValidationResult::invalid(
          value.clone(),
          format!("Array must be unique. Duplicate values found at index: {}", i),
        );
      };
    }
  };
  if let Some(allowed) = allowed {
    if let Some(item) = items
      .iter()
      .find(|item| !allowed.iter().any(|a| a.same_value_zero(item)))
    {
      return ValidationResult::invalid(
        value.clone(),
        format!("Value is not allowed in this array: {}", item),
      );
    };
  };
  ValidationResult::valid(value.clone())
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn text_coerces_primitives() {
    assert_eq!(validate_text(false, &Value::from(3)).parsed, Value::from("3"));
    assert_eq!(validate_text(false, &Value::Bool(true)).parsed, Value::from("true"));
    assert_eq!(validate_text(false, &Value::Null).parsed, Value::from(""));
    assert_eq!(
      validate_text(true, &Value::Undefined).message(),
      Some("This value is required")
    );
    assert!(!validate_text(false, &Value::from(vec![1])).is_valid);
  }

  #[test]
  fn number_bounds() {
    assert_eq!(
      validate_number(None, None, &Value::from(" 42 ")).parsed,
      Value::from(42)
    );
    let result = validate_number(Some(1.0), Some(10.0), &Value::from(0));
    assert_eq!(result.message(), Some("Minimum allowed value: 1"));
    assert_eq!(result.parsed, Value::from(1));
    let result = validate_number(Some(1.0), Some(10.0), &Value::from(10.5));
    assert_eq!(result.message(), Some("Maximum allowed value: 10"));
    assert!(!validate_number(None, None, &Value::from("abc")).is_valid);
    assert!(!validate_number(None, None, &Value::from(f64::NAN)).is_valid);
  }

  #[test]
  fn boolean_strings() {
    assert_eq!(validate_boolean(&Value::from("false")).parsed, Value::Bool(false));
    assert!(validate_boolean(&Value::Bool(true)).is_valid);
    assert!(!validate_boolean(&Value::from(1)).is_valid);
  }

  #[test]
  fn array_uniqueness_and_allow_list() {
    let value = Value::from(json!(["a", "b", "a"]));
    assert_eq!(
      validate_array(true, None, &value).message(),
      Some("Array must be unique. Duplicate values found at index: 2")
    );
    assert!(validate_array(false, None, &value).is_valid);
    let allowed = [Value::from("a")];
    let result = validate_array(false, Some(&allowed), &value);
    assert_eq!(result.message(), Some("Value is not allowed in this array: b"));
    assert_eq!(result.parsed, value);
    assert_eq!(
      validate_array(false, None, &Value::from("a")).parsed,
      Value::Array(vec![])
    );
  }
}
