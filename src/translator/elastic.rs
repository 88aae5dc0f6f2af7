//! Elasticsearch query builder
//!
//! Within one filter:
//! - `=` becomes a `term` clause, `!=` a `bool.must_not` around a `term`
//! - `>`/`>=` and `<`/`<=` are staged per field, one slot per side,
//!   a later condition on the same side replacing the earlier one
//! - a field staged on both sides merges into one `range` clause with two
//!   bounds; the rest become `range` clauses with a single bound
//!
//! Term clauses keep condition order and precede range clauses. Range
//! clauses come out in field name order.

use std::collections::BTreeMap;

use serde_json::{json, Map, Value as JsonValue};

use super::config::TranslatorConfig;
use super::resolve::{ResolvedCondition, ResolvedFilter, ResolvedQuery, ResolvedSort};
use crate::model::{Logical, Operator, SuperFilter, Value};
use crate::observability::{log_event_with_fields, Event};

/// A staged range bound
#[derive(Debug, Clone, PartialEq)]
struct Bound {
    operator: Operator,
    value: Value,
}

impl Bound {
    fn of(condition: &ResolvedCondition) -> Self {
        Self {
            operator: condition.operator,
            value: condition.value.clone(),
        }
    }

    fn key(&self) -> &'static str {
        match (self.operator.is_lower_bound(), self.operator.is_inclusive()) {
            (true, true) => "gte",
            (true, false) => "gt",
            (false, true) => "lte",
            (false, false) => "lt",
        }
    }
}

/// Builds the request body and reports how many ranges were merged.
pub(crate) fn build(
    query: &ResolvedQuery,
    super_filters: &[SuperFilter],
    config: &TranslatorConfig,
) -> (JsonValue, usize) {
    let mut merged = 0;
    let mut filter_clauses = Vec::new();

    for filter in &query.filters {
        let (clauses, count) = filter_clauses_of(filter, &config.raw_suffix);
        merged += count;
        if let Some(clause) = combine(filter.logical, clauses) {
            filter_clauses.push(clause);
        }
    }

    let mut must: Vec<JsonValue> = super_filters
        .iter()
        .map(|sf| term(&sf.field, &sf.value))
        .collect();
    if let Some(clause) = combine(query.logical, filter_clauses) {
        must.push(clause);
    }

    let body = json!({
        "query": { "bool": { "must": must } },
        "sort": sorts(&query.sorts, config),
        "size": query.pagination.limit,
        "from": query.pagination.offset,
    });

    (body, merged)
}

fn filter_clauses_of(filter: &ResolvedFilter, raw_suffix: &str) -> (Vec<JsonValue>, usize) {
    let mut clauses = Vec::new();
    let mut greater: BTreeMap<String, Bound> = BTreeMap::new();
    let mut lesser: BTreeMap<String, Bound> = BTreeMap::new();

    for condition in &filter.conditions {
        let field = field_name(condition, raw_suffix);

        match condition.operator {
            Operator::Equals => clauses.push(term(&field, &condition.value)),
            Operator::NotEquals => clauses.push(json!({
                "bool": { "must_not": [term(&field, &condition.value)] }
            })),
            Operator::GreaterThan | Operator::GreaterOrEquals => {
                greater.insert(field, Bound::of(condition));
            }
            Operator::LessThan | Operator::LessOrEquals => {
                lesser.insert(field, Bound::of(condition));
            }
        }
    }

    let common: Vec<String> = greater
        .keys()
        .filter(|field| lesser.contains_key(*field))
        .cloned()
        .collect();

    let mut merged = 0;
    for field in common {
        if let (Some(low), Some(high)) = (greater.remove(&field), lesser.remove(&field)) {
            log_event_with_fields(Event::RangeMerged, &[("field", field.as_str())]);
            clauses.push(range(&field, &[&low, &high]));
            merged += 1;
        }
    }

    for (field, bound) in greater.iter().chain(lesser.iter()) {
        clauses.push(range(field, &[bound]));
    }

    (clauses, merged)
}

fn field_name(condition: &ResolvedCondition, raw_suffix: &str) -> String {
    if condition.analyzed {
        format!("{}{}", condition.field, raw_suffix)
    } else {
        condition.field.clone()
    }
}

fn term(field: &str, value: &Value) -> JsonValue {
    let mut inner = Map::new();
    inner.insert(field.to_string(), value.to_json());
    json!({ "term": inner })
}

fn range(field: &str, bounds: &[&Bound]) -> JsonValue {
    let limits: Map<String, JsonValue> = bounds
        .iter()
        .map(|bound| (bound.key().to_string(), bound.value.to_json()))
        .collect();

    let mut inner = Map::new();
    inner.insert(field.to_string(), JsonValue::Object(limits));
    json!({ "range": inner })
}

/// Joins clauses under `bool.must` (and) or `bool.should` (or).
fn combine(logical: Logical, clauses: Vec<JsonValue>) -> Option<JsonValue> {
    if clauses.is_empty() {
        return None;
    }

    let occurrence = match logical {
        Logical::And => "must",
        Logical::Or => "should",
    };

    let mut inner = Map::new();
    inner.insert(occurrence.to_string(), JsonValue::Array(clauses));
    Some(json!({ "bool": inner }))
}

fn sorts(sorts: &[ResolvedSort], config: &TranslatorConfig) -> Vec<JsonValue> {
    let mut rendered: Vec<JsonValue> = sorts
        .iter()
        .map(|sort| {
            let field = if sort.analyzed {
                format!("{}{}", sort.field, config.raw_suffix)
            } else {
                sort.field.clone()
            };
            sort_clause(&field, sort.order.as_str())
        })
        .collect();

    rendered.push(sort_clause(&config.tracking_field, "asc"));
    rendered
}

fn sort_clause(field: &str, order: &str) -> JsonValue {
    let mut inner = Map::new();
    inner.insert(field.to_string(), json!({ "order": order }));
    JsonValue::Object(inner)
}
