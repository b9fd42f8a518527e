use crate::value::Value;
use serde::Serialize;

pub const VALIDATION_ERROR: &str = "ValidationError";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationMessage {
  pub name: String,
  pub message: String,
}

impl ValidationMessage {
  /// The entry carried by every valid result.
  pub fn none() -> ValidationMessage {
    ValidationMessage::default()
  }

  pub fn error(message: impl Into<String>) -> ValidationMessage {
    ValidationMessage {
      name: VALIDATION_ERROR.to_string(),
      message: message.into(),
    }
  }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
  pub is_valid: bool,
  #[serde(skip_serializing_if = "Value::is_undefined")]
  pub parsed: Value,
  pub messages: Vec<ValidationMessage>,
}

impl ValidationResult {
  pub fn valid(parsed: Value) -> ValidationResult {
    ValidationResult {
      is_valid: true,
      parsed,
      messages: vec![ValidationMessage::none()],
    }
  }

  pub fn invalid(parsed: Value, message: impl Into<String>) -> ValidationResult {
    ValidationResult {
      is_valid: false,
      parsed,
      messages: vec![ValidationMessage::error(message)],
    }
  }

  /// The failure message, if invalid.
  pub fn message(&self) -> Option<&str> {
    match self.is_valid {
      true => None,
      false => self.messages.first().map(|m| m.message.as_str()),
    }
  }
}
