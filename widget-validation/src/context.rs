use crate::value::Value;
use serde::Deserialize;

/// The widget state a rule is evaluated against.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "WidgetProps")]
pub struct ValidationContext {
  /// The records displayed by the widget.
  pub list_data: Vec<Value>,
  /// Property paths whose value is a JS binding rather than a dropdown selection.
  pub dynamic_property_paths: Vec<String>,
}

impl ValidationContext {
  pub fn new(list_data: Vec<Value>) -> ValidationContext {
    ValidationContext {
      list_data,
      dynamic_property_paths: Vec::new(),
    }
  }

  pub fn with_dynamic_path(mut self, path: impl Into<String>) -> ValidationContext {
    self.dynamic_property_paths.push(path.into());
    self
  }

  pub fn is_dynamic(&self, path: &str) -> bool {
    self.dynamic_property_paths.iter().any(|p| p == path)
  }
}

#[derive(Deserialize)]
struct DynamicPath {
  key: String,
}

// The widget props as the host stores them.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WidgetProps {
  #[serde(default)]
  list_data: Value,
  #[serde(default)]
  dynamic_property_path_list: Vec<DynamicPath>,
}

impl From<WidgetProps> for ValidationContext {
  fn from(props: WidgetProps) -> Self {
    ValidationContext {
      // Anything but an array displays no records.
      list_data: match props.list_data {
        Value::Array(items) => items,
        _ => Vec::new(),
      },
      dynamic_property_paths: props
        .dynamic_property_path_list
        .into_iter()
        .map(|p| p.key)
        .collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::ValidationContext;
  use crate::value::Value;

  #[test]
  fn deserializes_widget_props() {
    let ctx: ValidationContext = serde_json::from_str(
      r#"{"listData": [{"id": 1}], "dynamicPropertyPathList": [{"key": "primaryKeys"}], "other": 1}"#,
    )
    .unwrap();
    assert_eq!(ctx.list_data.len(), 1);
    assert_eq!(ctx.list_data[0].get("id"), Some(&Value::Number(1.0)));
    assert!(ctx.is_dynamic("primaryKeys"));
    assert!(!ctx.is_dynamic("listData"));

    let ctx: ValidationContext = serde_json::from_str(r#"{"listData": "oops"}"#).unwrap();
    assert_eq!(ctx, ValidationContext::default());
  }
}
