//! Filters, sorts and the logical operator joining the filters

use serde::{Deserialize, Serialize};

use super::errors::{ValidationError, ValidationResult};
use super::filter::{validate_filters, Filter};
use super::primitives::{deserialize_optional_logical, Logical, Order};

/// A sort directive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    pub order: Order,
}

impl Sort {
    pub fn new(field: impl Into<String>, order: Order) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, Order::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, Order::Desc)
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if self.field.is_empty() {
            return Err(ValidationError::invalid("invalid field: empty"));
        }
        Ok(())
    }
}

/// Validates sorts, stopping at the first invalid one.
pub fn validate_sorts(sorts: &[Sort]) -> ValidationResult<()> {
    for (index, sort) in sorts.iter().enumerate() {
        sort.validate()
            .map_err(|e| ValidationError::at("sorts", index, e))?;
    }
    Ok(())
}

/// Filters and sorts of a search
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Query {
    /// Empty filters match everything
    #[serde(default)]
    pub filters: Vec<Filter>,
    /// Empty sorts leave ordering to the backend
    #[serde(default)]
    pub sorts: Vec<Sort>,
    /// Required when there is more than one filter
    #[serde(
        default,
        deserialize_with = "deserialize_optional_logical",
        skip_serializing_if = "Option::is_none"
    )]
    pub logical: Option<Logical>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sorts.push(sort);
        self
    }

    pub fn with_logical(mut self, logical: Logical) -> Self {
        self.logical = Some(logical);
        self
    }

    /// Validates filters, then sorts, then the logical operator.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_filters(&self.filters)?;
        validate_sorts(&self.sorts)?;

        if self.filters.len() > 1 && self.logical.is_none() {
            return Err(ValidationError::LogicalRequired {
                scope: "query.logical",
                item: "filter",
            });
        }

        Ok(())
    }
}
