//! Top-level search request and trusted super filters

use serde::{Deserialize, Serialize};

use super::errors::ValidationResult;
use super::pagination::Pagination;
use super::query::Query;
use super::value::Value;

/// A client search request: pagination plus query
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Criteria {
    #[serde(default)]
    pub pagination: Pagination,
    #[serde(default)]
    pub query: Query,
}

impl Criteria {
    pub fn new(pagination: Pagination, query: Query) -> Self {
        Self { pagination, query }
    }

    /// Validates pagination, then the query.
    pub fn validate(&self) -> ValidationResult<()> {
        self.pagination.validate()?;
        self.query.validate()
    }
}

/// A server-injected equality constraint.
///
/// Always mandatory at the outermost level of a built query and never
/// checked against the entity schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuperFilter {
    pub field: String,
    pub value: Value,
}

impl SuperFilter {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, Filter, Logical, Operator, ValidationError};
    use serde_json::json;

    #[test]
    fn test_pagination_checked_first() {
        let criteria = Criteria::new(
            Pagination::new(5000, 0),
            Query::new().filter(Filter::default()),
        );
        assert!(matches!(
            criteria.validate(),
            Err(ValidationError::LimitExceeded { .. })
        ));
    }

    #[test]
    fn test_deserialize_wire_format() {
        let criteria: Criteria = serde_json::from_value(json!({
            "pagination": {"limit": 10, "offset": 20},
            "query": {
                "filters": [{
                    "conditions": [
                        {"field": "amount", "operator": ">=", "value": 100},
                        {"field": "amount", "operator": "<", "value": 500}
                    ],
                    "logical": "AND"
                }],
                "sorts": [{"field": "amount", "order": "desc"}]
            }
        }))
        .unwrap();

        assert_eq!(criteria.pagination, Pagination::new(10, 20));
        let filter = &criteria.query.filters[0];
        assert_eq!(filter.logical, Some(Logical::And));
        assert_eq!(filter.conditions[1].operator, Operator::LessThan);
        assert_eq!(criteria.query.logical, None);
        assert!(criteria.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_default() {
        let criteria: Criteria = serde_json::from_str("{}").unwrap();
        assert_eq!(criteria, Criteria::default());
        assert!(criteria.validate().is_ok());
    }

    #[test]
    fn test_invalid_operator_rejected_on_decode() {
        let result = serde_json::from_value::<Criteria>(json!({
            "query": {"filters": [{"conditions": [
                {"field": "amount", "operator": "~", "value": 1}
            ]}]}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_super_filter_value() {
        let sf = SuperFilter::new("client_id", "acme");
        assert_eq!(sf.value, Value::from("acme"));

        let condition = Condition::new("amount", Operator::Equals, 1);
        assert_eq!(condition.value, Value::Integer(1));
    }
}
