//! Form field validators
//!
//! Validators are looked up by name from [`ValidatorRegistry`] and run against
//! the raw JSON value a form submitted.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

pub trait FieldValidator: Send + Sync {
    /// Whether `value` is acceptable. `locale` is the submitting session's locale.
    fn validate(&self, value: &Value, locale: &str) -> bool;

    fn display_name(&self) -> &str;
}

/// Accepts anything that reads as a double once surrounding whitespace is
/// trimmed. Empty input is left to the mandatory-field check; whitespace-only
/// input is not empty and is refused.
#[derive(Debug, Default, Clone, Copy)]
pub struct NumericDoubleValidator;

impl FieldValidator for NumericDoubleValidator {
    fn validate(&self, value: &Value, _locale: &str) -> bool {
        match value {
            Value::Number(_) => true,
            Value::String(s) => s.is_empty() || parses_as_double(s.trim()),
            Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => false,
        }
    }

    fn display_name(&self) -> &str {
        "Double decimal validator"
    }
}

/// Decimal or exponent notation, or the exact words `Infinity` and `NaN`
/// with an optional sign. Other spellings `f64::from_str` takes (`inf`,
/// `nan`, `infinity` in any case) are refused.
fn parses_as_double(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    if unsigned.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return matches!(unsigned, "Infinity" | "NaN");
    }
    s.parse::<f64>().is_ok()
}

#[derive(Default, Clone)]
pub struct ValidatorRegistry {
    validators: BTreeMap<String, Arc<dyn FieldValidator>>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in validators.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("numeric_double", Arc::new(NumericDoubleValidator));
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, validator: Arc<dyn FieldValidator>) {
        self.validators.insert(name.into(), validator);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn FieldValidator>> {
        self.validators.get(name)
    }

    /// `(name, display name)` pairs in name order.
    pub fn list(&self) -> Vec<(&str, &str)> {
        self.validators
            .iter()
            .map(|(name, v)| (name.as_str(), v.display_name()))
            .collect()
    }
}
