//! MongoDB query builder
//!
//! Each condition becomes `{field: {$op: value}}`. A filter joins its
//! conditions under `$and`/`$or`, the query joins filters the same way, and
//! the result sits after the super filters inside one outer `$and`.
//!
//! Unlike the Elasticsearch builder there is no range merging, no `.raw`
//! suffix and no tie-break sort.

use bson::{Bson, Document};
use serde::Serialize;

use super::resolve::{ResolvedFilter, ResolvedQuery, ResolvedSort};
use crate::model::{Logical, Operator, Order, SuperFilter};

/// A translated MongoDB query: filter document, sort document, pagination
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MongoQuery {
    limit: u32,
    offset: u32,
    filters: Document,
    sorts: Document,
}

impl MongoQuery {
    /// The `{"$and": [...]}` filter document
    pub fn filters(&self) -> &Document {
        &self.filters
    }

    /// Field to 1 (asc) or -1 (desc), in client order
    pub fn sorts(&self) -> &Document {
        &self.sorts
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// The whole query as `{limit, offset, filters, sorts}`
    pub fn into_document(self) -> Document {
        let mut document = Document::new();
        document.insert("limit", Bson::Int64(i64::from(self.limit)));
        document.insert("offset", Bson::Int64(i64::from(self.offset)));
        document.insert("filters", self.filters);
        document.insert("sorts", self.sorts);
        document
    }

    /// Relaxed Extended JSON rendering, dates as `{"$date": ...}`
    pub fn to_relaxed_extjson(&self) -> serde_json::Value {
        Bson::Document(self.clone().into_document()).into_relaxed_extjson()
    }
}

pub(crate) fn build(query: &ResolvedQuery, super_filters: &[SuperFilter]) -> MongoQuery {
    let mut clauses: Vec<Bson> = super_filters
        .iter()
        .map(|sf| {
            let mut clause = Document::new();
            clause.insert(sf.field.clone(), sf.value.to_bson());
            Bson::Document(clause)
        })
        .collect();

    let filters: Vec<Bson> = query.filters.iter().map(filter_clause).collect();
    if !filters.is_empty() {
        clauses.push(Bson::Document(join(query.logical, filters)));
    }

    let mut root = Document::new();
    root.insert("$and", Bson::Array(clauses));

    MongoQuery {
        limit: query.pagination.limit,
        offset: query.pagination.offset,
        filters: root,
        sorts: sorts(&query.sorts),
    }
}

fn filter_clause(filter: &ResolvedFilter) -> Bson {
    let conditions = filter
        .conditions
        .iter()
        .map(|condition| {
            let mut comparison = Document::new();
            comparison.insert(operator(condition.operator), condition.value.to_bson());

            let mut clause = Document::new();
            clause.insert(condition.field.clone(), comparison);
            Bson::Document(clause)
        })
        .collect();

    Bson::Document(join(filter.logical, conditions))
}

fn join(logical: Logical, clauses: Vec<Bson>) -> Document {
    let mut document = Document::new();
    document.insert(format!("${}", logical.as_str()), Bson::Array(clauses));
    document
}

fn operator(operator: Operator) -> &'static str {
    match operator {
        Operator::Equals => "$eq",
        Operator::NotEquals => "$ne",
        Operator::GreaterThan => "$gt",
        Operator::LessThan => "$lt",
        Operator::GreaterOrEquals => "$gte",
        Operator::LessOrEquals => "$lte",
    }
}

fn sorts(sorts: &[ResolvedSort]) -> Document {
    let mut document = Document::new();
    for sort in sorts {
        let direction = match sort.order {
            Order::Asc => 1,
            Order::Desc => -1,
        };
        document.insert(sort.field.clone(), Bson::Int32(direction));
    }
    document
}
