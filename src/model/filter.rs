//! A group of conditions joined by one logical operator

use serde::{Deserialize, Serialize};

use super::condition::{validate_conditions, Condition};
use super::errors::{ValidationError, ValidationResult};
use super::primitives::{deserialize_optional_logical, Logical};

/// Conditions combined by a logical operator
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Filter {
    /// Conditions of this filter, in client order
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Required when there is more than one condition
    #[serde(
        default,
        deserialize_with = "deserialize_optional_logical",
        skip_serializing_if = "Option::is_none"
    )]
    pub logical: Option<Logical>,
}

impl Filter {
    /// A filter holding one condition, logical left to normalization
    pub fn single(condition: Condition) -> Self {
        Self {
            conditions: vec![condition],
            logical: None,
        }
    }

    /// Every condition must match
    pub fn all(conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            logical: Some(Logical::And),
        }
    }

    /// At least one condition must match
    pub fn any(conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            logical: Some(Logical::Or),
        }
    }

    pub fn with_logical(mut self, logical: Logical) -> Self {
        self.logical = Some(logical);
        self
    }

    /// Validates the filter.
    ///
    /// A missing logical operator with several conditions short-circuits;
    /// otherwise condition errors are reported per index.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.conditions.len() > 1 && self.logical.is_none() {
            return Err(ValidationError::LogicalRequired {
                scope: "filter.logical",
                item: "condition",
            });
        }

        validate_conditions(&self.conditions)
    }
}

/// Validates a filter sequence, accumulating failures per index.
pub fn validate_filters(filters: &[Filter]) -> ValidationResult<()> {
    let errors = filters
        .iter()
        .enumerate()
        .filter_map(|(index, filter)| {
            filter
                .validate()
                .err()
                .map(|e| ValidationError::at("filters", index, e))
        })
        .collect();

    ValidationError::collect(errors)
}
