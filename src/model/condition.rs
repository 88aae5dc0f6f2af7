//! Single field comparisons and their sequence validation

use serde::{Deserialize, Serialize};

use super::errors::{ValidationError, ValidationResult};
use super::primitives::{Field, Operator};
use super::value::Value;

/// A `field operator value` comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Field the value is compared against
    pub field: Field,
    /// Comparison operator
    pub operator: Operator,
    /// Comparison value
    #[serde(default = "null_value")]
    pub value: Value,
}

fn null_value() -> Value {
    Value::Null
}

impl Condition {
    pub fn new(field: impl Into<Field>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Validates the field and the value.
    ///
    /// Both checks run; failures are accumulated.
    pub fn validate(&self) -> ValidationResult<()> {
        let mut errors = Vec::new();

        if let Err(e) = self.field.validate() {
            errors.push(e);
        }

        if self.value.is_null() {
            errors.push(ValidationError::invalid("invalid value: cannot be null"));
        } else if self.value.is_empty_map() {
            errors.push(ValidationError::invalid("invalid value: cannot be empty map"));
        }

        ValidationError::collect(errors)
    }
}

/// Validates a condition sequence, accumulating failures per index.
pub fn validate_conditions(conditions: &[Condition]) -> ValidationResult<()> {
    if conditions.is_empty() {
        return Err(ValidationError::EmptyConditions);
    }

    let errors = conditions
        .iter()
        .enumerate()
        .filter_map(|(index, condition)| {
            condition
                .validate()
                .err()
                .map(|e| ValidationError::at("conditions", index, e))
        })
        .collect();

    ValidationError::collect(errors)
}
