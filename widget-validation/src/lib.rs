//! Validation of widget property values.
//!
//! A [`ValidationRule`] describes what a property accepts. [`validate`] checks a
//! dynamically-typed [`Value`] against it in the context of the widget, and always returns
//! a [`ValidationResult`] with at most one failure message.

use tracing::trace;

pub mod context;
pub mod primary_key;
pub mod result;
pub mod rule;
pub mod typed;
pub mod value;

pub use context::ValidationContext;
pub use result::ValidationMessage;
pub use result::ValidationResult;
pub use rule::PrimaryKeyRule;
pub use rule::ValidationRule;
pub use value::Value;

pub fn validate(rule: &ValidationRule, value: &Value, ctx: &ValidationContext) -> ValidationResult {
  let result = match rule {
    ValidationRule::PrimaryKey(rule) => primary_key::validate_primary_key(rule, value, ctx),
    ValidationRule::Array { unique, allowed } => {
      typed::validate_array(*unique, allowed.as_deref(), value)
    }
    ValidationRule::Text { required } => typed::validate_text(*required, value),
    ValidationRule::Number { min, max } => typed::validate_number(*min, *max, value),
    ValidationRule::Boolean => typed::validate_boolean(value),
  };
  if let Some(message) = result.message() {
    trace!(value_type = value.type_name(), message, "validation failed");
  };
  result
}
