use serde_json::json;
use widget_validation::validate;
use widget_validation::ValidationContext;
use widget_validation::ValidationMessage;
use widget_validation::ValidationRule;
use widget_validation::Value;

fn list_props(props: serde_json::Value) -> ValidationContext {
  serde_json::from_value(props).unwrap()
}

fn primary_key(value: serde_json::Value, props: serde_json::Value) -> serde_json::Value {
  let result = validate(
    &ValidationRule::default(),
    &Value::from(value),
    &list_props(props),
  );
  serde_json::to_value(result).unwrap()
}

#[test]
fn unique_keys_are_valid() {
  assert_eq!(
    primary_key(json!([1, 2]), json!({"listData": [{"id": 1}, {"id": 2}]})),
    json!({
      "isValid": true,
      "parsed": [1, 2],
      "messages": [{"name": "", "message": ""}],
    })
  );
}

#[test]
fn more_keys_than_records_are_duplicates() {
  assert_eq!(
    primary_key(json!([1, 2, 3]), json!({"listData": [{"id": 1}, {"id": 2}]})),
    json!({
      "isValid": false,
      "parsed": [],
      "messages": [{
        "name": "ValidationError",
        "message": "This data identifier is evaluating to a duplicate value. Please use an identifier that evaluates to a unique value.",
      }],
    })
  );
}

#[test]
fn empty_array_in_js_mode() {
  assert_eq!(
    primary_key(
      json!([]),
      json!({
        "listData": [{"id": 1}, {"id": 2}],
        "dynamicPropertyPathList": [{"key": "primaryKeys"}],
      })
    ),
    json!({
      "isValid": false,
      "parsed": [],
      "messages": [{
        "name": "ValidationError",
        "message": "This data identifier evaluates to an empty array. Please use an identifier that evaluates to a valid value.",
      }],
    })
  );
}

#[test]
fn null_element_keeps_input() {
  assert_eq!(
    primary_key(
      json!([1, null]),
      json!({
        "listData": [{"id": 1}, {"id": 12}, {"id": 14}, {"id": 11}],
        "dynamicPropertyPathList": [{"key": "primaryKeys"}],
      })
    ),
    json!({
      "isValid": false,
      "parsed": [1, null],
      "messages": [{
        "name": "ValidationError",
        "message": "This data identifier evaluates to null or undefined. Please use an identifier that evaluates to a valid value.",
      }],
    })
  );
}

#[test]
fn non_array_omits_parsed() {
  let json = primary_key(json!("true"), json!({"listData": [{"id": 1}]}));
  assert_eq!(
    json,
    json!({
      "isValid": false,
      "messages": [{
        "name": "ValidationError",
        "message": "Select an option from the dropdown or toggle JS on to define a data identifier.",
      }],
    })
  );
}

#[test]
fn every_rule_accepts_every_kind_of_value() {
  let rules = [
    ValidationRule::default(),
    ValidationRule::Array {
      unique: true,
      allowed: Some(vec![Value::from(1)]),
    },
    ValidationRule::Text { required: true },
    ValidationRule::Number {
      min: Some(0.0),
      max: Some(1.0),
    },
    ValidationRule::Boolean,
  ];
  let values = [
    Value::Undefined,
    Value::Null,
    Value::Bool(false),
    Value::from(f64::NAN),
    Value::from(-0.0),
    Value::from(""),
    Value::from(vec![Value::Undefined, Value::from(vec![1])]),
    Value::from(json!({"id": {"nested": []}})),
  ];
  let ctx = list_props(json!({"listData": [{"id": 1}, {"name": "no id"}, 5]}));
  for rule in rules.iter() {
    for value in values.iter() {
      let result = validate(rule, value, &ctx);
      assert_eq!(result.messages.len(), 1);
      if result.is_valid {
        assert_eq!(result.messages[0], ValidationMessage::none());
      } else {
        assert_eq!(result.messages[0].name, "ValidationError");
        assert!(!result.messages[0].message.is_empty());
      }
    }
  }
}
