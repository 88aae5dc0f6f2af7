//! Schema resolution of a normalized criteria
//!
//! Every condition field must be registered for the entity; the first
//! unregistered one aborts. Date-typed values are coerced from ISO-8601
//! strings to UTC instants. Sort fields are checked after all conditions.

use crate::date::DateParser;
use crate::model::{Condition, Criteria, Filter, Logical, Operator, Order, Pagination, Sort, Value};
use crate::schema::{FieldType, ValidFields};

use super::errors::{SearchError, SearchResult};

/// A condition checked against the schema
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedCondition {
    pub field: String,
    pub analyzed: bool,
    pub operator: Operator,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedFilter {
    pub conditions: Vec<ResolvedCondition>,
    pub logical: Logical,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedSort {
    pub field: String,
    pub analyzed: bool,
    pub order: Order,
}

/// A criteria ready for a backend builder
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedQuery {
    pub filters: Vec<ResolvedFilter>,
    pub sorts: Vec<ResolvedSort>,
    pub logical: Logical,
    pub pagination: Pagination,
}

pub(crate) struct Resolver<'a> {
    entity: &'a str,
    schema: &'a ValidFields,
    dates: &'a dyn DateParser,
}

impl<'a> Resolver<'a> {
    pub fn new(entity: &'a str, schema: &'a ValidFields, dates: &'a dyn DateParser) -> Self {
        Self {
            entity,
            schema,
            dates,
        }
    }

    /// Resolves a normalized criteria, consuming it.
    pub fn resolve(&self, criteria: Criteria) -> SearchResult<ResolvedQuery> {
        let Criteria { pagination, query } = criteria;

        let filters = query
            .filters
            .into_iter()
            .map(|filter| self.resolve_filter(filter))
            .collect::<SearchResult<Vec<_>>>()?;

        let sorts = query
            .sorts
            .into_iter()
            .map(|sort| self.resolve_sort(sort))
            .collect::<SearchResult<Vec<_>>>()?;

        Ok(ResolvedQuery {
            filters,
            sorts,
            logical: query.logical.unwrap_or_default(),
            pagination,
        })
    }

    fn resolve_filter(&self, filter: Filter) -> SearchResult<ResolvedFilter> {
        let conditions = filter
            .conditions
            .into_iter()
            .map(|condition| self.resolve_condition(condition))
            .collect::<SearchResult<Vec<_>>>()?;

        Ok(ResolvedFilter {
            conditions,
            logical: filter.logical.unwrap_or_default(),
        })
    }

    fn resolve_condition(&self, condition: Condition) -> SearchResult<ResolvedCondition> {
        let field = condition.field.as_str();
        let meta = self
            .schema
            .get(field)
            .ok_or_else(|| SearchError::unknown_field(self.entity, field))?;

        let value = match meta.field_type {
            FieldType::Date => self.coerce_date(field, condition.value)?,
            _ => condition.value,
        };

        Ok(ResolvedCondition {
            field: field.to_string(),
            analyzed: meta.is_analyzed,
            operator: condition.operator,
            value,
        })
    }

    fn coerce_date(&self, field: &str, value: Value) -> SearchResult<Value> {
        match value {
            Value::String(text) => self
                .dates
                .parse_iso8601_utc(&text)
                .map(Value::Date)
                .map_err(|e| SearchError::invalid_date(field, e)),
            Value::Date(date) => Ok(Value::Date(date)),
            other => Err(SearchError::date_not_string(field, other.type_name())),
        }
    }

    fn resolve_sort(&self, sort: Sort) -> SearchResult<ResolvedSort> {
        let meta = self
            .schema
            .get(&sort.field)
            .ok_or_else(|| SearchError::unknown_field(self.entity, &sort.field))?;

        Ok(ResolvedSort {
            analyzed: meta.is_analyzed,
            field: sort.field,
            order: sort.order,
        })
    }
}
