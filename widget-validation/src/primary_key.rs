use crate::context::ValidationContext;
use crate::result::ValidationResult;
use crate::rule::PrimaryKeyRule;
use crate::value::Value;
use ahash::HashSet;
use ahash::HashSetExt;

pub const SELECT_FROM_DROPDOWN: &str =
  "Select an option from the dropdown or toggle JS on to define a data identifier.";
pub const USE_CURRENT_ITEM: &str = "Use currentItem or currentIndex to find a good data identifier. You can also combine two or more data attributes or columns.";
pub const EMPTY_ARRAY: &str = "This data identifier evaluates to an empty array. Please use an identifier that evaluates to a valid value.";
pub const NIL_ELEMENT: &str = "This data identifier evaluates to null or undefined. Please use an identifier that evaluates to a valid value.";
pub const NOT_A_DATA_ATTRIBUTE: &str =
  "This identifier isn't a data attribute. Use an existing data attribute as your data identifier.";
pub const DUPLICATE_VALUE: &str = "This data identifier is evaluating to a duplicate value. Please use an identifier that evaluates to a unique value.";

/// Checks, in order, that the identifiers are an array, non-empty, free of holes, refer to
/// the data, and single out every record. The first failed check is the only one reported.
pub fn validate_primary_key(
  rule: &PrimaryKeyRule,
  value: &Value,
  ctx: &ValidationContext,
) -> ValidationResult {
  let Some(keys) = value.as_array() else {
    return ValidationResult::invalid(
      Value::Undefined,
      match ctx.is_dynamic(&rule.property_path) {
        true => USE_CURRENT_ITEM,
        false => SELECT_FROM_DROPDOWN,
      },
    );
  };

  if keys.is_empty() {
    return ValidationResult::invalid(Value::Array(Vec::new()), EMPTY_ARRAY);
  };

  // When every key is nil, none can match a record, which the attribute check reports.
  let nil_count = keys.iter().filter(|k| k.is_nil()).count();
  if nil_count > 0 && nil_count < keys.len() {
    return ValidationResult::invalid(value.clone(), NIL_ELEMENT);
  };

  let identifiers: HashSet<_> = ctx
    .list_data
    .iter()
    .filter_map(|record| record.get(&rule.identifier))
    .filter(|id| !id.is_nil())
    .map(|id| id.same_value_zero_key())
    .collect();
  if !keys
    .iter()
    .any(|k| identifiers.contains(&k.same_value_zero_key()))
  {
    return ValidationResult::invalid(value.clone(), NOT_A_DATA_ATTRIBUTE);
  };

  let mut distinct = HashSet::with_capacity(keys.len());
  for k in keys {
    distinct.insert(k.same_value_zero_key());
  }
  if distinct.len() != keys.len() || distinct.len() != ctx.list_data.len() {
    return ValidationResult::invalid(Value::Array(Vec::new()), DUPLICATE_VALUE);
  };

  ValidationResult::valid(value.clone())
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn records(ids: &[i32]) -> ValidationContext {
    ValidationContext::new(ids.iter().map(|id| Value::from(json!({ "id": id }))).collect())
  }

  fn check(value: serde_json::Value, ctx: &ValidationContext) -> ValidationResult {
    validate_primary_key(&PrimaryKeyRule::default(), &Value::from(value), ctx)
  }

  #[test]
  fn non_arrays_depend_on_js_mode() {
    let ctx = records(&[1, 2]);
    let dynamic = records(&[1, 2]).with_dynamic_path("primaryKeys");
    for input in [
      Value::Bool(true),
      Value::from("true"),
      Value::from(0),
      Value::from(1),
      Value::Undefined,
      Value::Null,
      Value::from(json!({"id": 1})),
    ] {
      let result = validate_primary_key(&PrimaryKeyRule::default(), &input, &ctx);
      assert!(!result.is_valid);
      assert_eq!(result.parsed, Value::Undefined);
      assert_eq!(result.message(), Some(SELECT_FROM_DROPDOWN));

      let result = validate_primary_key(&PrimaryKeyRule::default(), &input, &dynamic);
      assert_eq!(result.parsed, Value::Undefined);
      assert_eq!(result.message(), Some(USE_CURRENT_ITEM));
    }
  }

  #[test]
  fn mode_follows_the_rule_path() {
    let rule = PrimaryKeyRule {
      property_path: "keys".to_string(),
      ..Default::default()
    };
    let ctx = records(&[1]).with_dynamic_path("primaryKeys");
    let result = validate_primary_key(&rule, &Value::Null, &ctx);
    assert_eq!(result.message(), Some(SELECT_FROM_DROPDOWN));
  }

  #[test]
  fn nil_elements() {
    let ctx = records(&[1, 12, 14, 11]);
    let input = Value::Array(vec![
      Value::from(1),
      Value::Null,
      Value::Undefined,
      Value::from(4),
    ]);
    let result = validate_primary_key(&PrimaryKeyRule::default(), &input, &ctx);
    assert_eq!(result.message(), Some(NIL_ELEMENT));
    assert_eq!(result.parsed, input);

    let result = check(json!([null, null]), &records(&[1, 2]));
    assert_eq!(result.message(), Some(NOT_A_DATA_ATTRIBUTE));
    assert_eq!(result.parsed, Value::from(json!([null, null])));
  }

  #[test]
  fn keys_must_refer_to_records() {
    let result = check(json!(["a", "b"]), &records(&[1, 2]));
    assert_eq!(result.message(), Some(NOT_A_DATA_ATTRIBUTE));
    // Matching is by SameValueZero, so a numeric string isn't the number.
    let result = check(json!(["1", "2"]), &records(&[1, 2]));
    assert_eq!(result.message(), Some(NOT_A_DATA_ATTRIBUTE));
    let result = check(json!([1]), &ValidationContext::default());
    assert_eq!(result.message(), Some(NOT_A_DATA_ATTRIBUTE));
  }

  #[test]
  fn keys_must_be_unique_per_record() {
    let result = check(json!([1, 1]), &records(&[1, 2]));
    assert_eq!(result.message(), Some(DUPLICATE_VALUE));
    assert_eq!(result.parsed, Value::Array(vec![]));
    let result = check(json!([1, 2, 3]), &records(&[1, 2]));
    assert_eq!(result.message(), Some(DUPLICATE_VALUE));
    let result = check(json!([1]), &records(&[1, 2]));
    assert_eq!(result.message(), Some(DUPLICATE_VALUE));
  }

  #[test]
  fn custom_identifier_attribute() {
    let rule = PrimaryKeyRule {
      identifier: "uuid".to_string(),
      ..Default::default()
    };
    let ctx = ValidationContext::new(vec![
      Value::from(json!({"id": 1, "uuid": "a"})),
      Value::from(json!({"id": 2, "uuid": "b"})),
    ]);
    let keys = Value::from(json!(["a", "b"]));
    assert!(validate_primary_key(&rule, &keys, &ctx).is_valid);
    let ids = Value::from(json!([1, 2]));
    assert_eq!(
      validate_primary_key(&rule, &ids, &ctx).message(),
      Some(NOT_A_DATA_ATTRIBUTE)
    );
  }
}
