//! Criteria translation for searcher
//!
//! A `QueryTranslator` owns the schema registry and turns a client
//! `Criteria` into a MongoDB query or an Elasticsearch request body.
//!
//! # Pipeline
//!
//! 1. Normalization (default limit, default logical operators)
//! 2. Entity lookup, then field lookup for every condition, then sorts
//! 3. Date coercion for date-typed fields
//! 4. Backend assembly
//!
//! Structural validation is left to the caller (`Criteria::validate`);
//! a missing logical operator is translated as `and`.
//!
//! Setup (`register_schema`, `load_schemas`) takes `&mut self`;
//! translation takes `&self`, so a configured translator can be shared
//! behind an `Arc` without locks.

mod config;
mod elastic;
mod errors;
mod mongo;
mod normalize;
mod resolve;

pub use config::{TranslatorConfig, DEFAULT_RAW_SUFFIX, DEFAULT_TRACKING_FIELD};
pub use errors::{ErrorCategory, SearchError, SearchErrorCode, SearchResult};
pub use mongo::MongoQuery;
pub use normalize::{prepare_criteria, prepare_criteria_with_limit};

use std::fmt;
use std::path::Path;

use crate::date::{DateParser, Rfc3339Parser};
use crate::model::{Criteria, SuperFilter};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry, MetricsSnapshot};
use crate::schema::{SchemaRegistry, ValidFields};

use resolve::{ResolvedQuery, Resolver};

/// Target query language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Mongo,
    Elastic,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Mongo => "mongo",
            Backend::Elastic => "elastic",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Translates criteria into backend queries.
pub struct QueryTranslator {
    registry: SchemaRegistry,
    config: TranslatorConfig,
    dates: Box<dyn DateParser>,
    metrics: MetricsRegistry,
}

impl QueryTranslator {
    /// Translator with the default configuration and RFC 3339 dates
    pub fn new() -> Self {
        Self {
            registry: SchemaRegistry::new(),
            config: TranslatorConfig::default(),
            dates: Box::new(Rfc3339Parser),
            metrics: MetricsRegistry::new(),
        }
    }

    /// Translator with a validated configuration
    pub fn with_config(config: TranslatorConfig) -> SearchResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// Replaces the date adapter
    pub fn with_date_parser(mut self, parser: impl DateParser + 'static) -> Self {
        self.dates = Box::new(parser);
        self
    }

    /// Registers the permitted fields of an entity, once per entity.
    pub fn register_schema(&mut self, schema: ValidFields) -> SearchResult<()> {
        self.registry.register(schema)?;
        self.metrics.increment_schemas_registered();
        Ok(())
    }

    /// Registers every `*.json` schema in a directory.
    ///
    /// Schemas registered before a failing file stay registered.
    pub fn load_schemas(&mut self, dir: &Path) -> SearchResult<usize> {
        let before = self.registry.len();
        let result = self.registry.load_dir(dir);
        self.metrics
            .add_schemas_registered((self.registry.len() - before) as u64);
        Ok(result?)
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Normalizes a criteria with this translator's default limit
    pub fn prepare_criteria(&self, criteria: Criteria) -> Criteria {
        prepare_criteria_with_limit(criteria, self.config.default_limit)
    }

    /// Translates a criteria into a MongoDB query.
    pub fn to_mongo(
        &self,
        entity: &str,
        criteria: Criteria,
        super_filters: &[SuperFilter],
    ) -> SearchResult<MongoQuery> {
        self.start(Backend::Mongo, entity);

        let result = self
            .resolve(entity, criteria)
            .map(|query| mongo::build(&query, super_filters));

        self.finish(Backend::Mongo, entity, result)
    }

    /// Translates a criteria into a serialized Elasticsearch request body.
    pub fn to_elastic(
        &self,
        entity: &str,
        criteria: Criteria,
        super_filters: &[SuperFilter],
    ) -> SearchResult<String> {
        self.start(Backend::Elastic, entity);

        let result = self.resolve(entity, criteria).and_then(|query| {
            let (body, merged) = elastic::build(&query, super_filters, &self.config);
            self.metrics.add_ranges_merged(merged as u64);
            serde_json::to_string(&body).map_err(|e| SearchError::serialization_failed(e.to_string()))
        });

        self.finish(Backend::Elastic, entity, result)
    }

    fn resolve(&self, entity: &str, criteria: Criteria) -> SearchResult<ResolvedQuery> {
        let criteria = self.prepare_criteria(criteria);

        let schema = self
            .registry
            .get(entity)
            .ok_or_else(|| SearchError::unknown_entity(entity))?;

        Resolver::new(entity, schema, self.dates.as_ref()).resolve(criteria)
    }

    fn start(&self, backend: Backend, entity: &str) {
        log_event_with_fields(
            Event::TranslationStart,
            &[("backend", backend.as_str()), ("entity", entity)],
        );
    }

    fn finish<T>(&self, backend: Backend, entity: &str, result: SearchResult<T>) -> SearchResult<T> {
        match &result {
            Ok(_) => {
                match backend {
                    Backend::Mongo => self.metrics.increment_mongo_translations(),
                    Backend::Elastic => self.metrics.increment_elastic_translations(),
                }
                log_event_with_fields(
                    Event::TranslationComplete,
                    &[("backend", backend.as_str()), ("entity", entity)],
                );
            }
            Err(err) => {
                self.metrics.increment_translations_rejected();
                log_event_with_fields(
                    Event::TranslationRejected,
                    &[
                        ("backend", backend.as_str()),
                        ("code", err.code().code()),
                        ("entity", entity),
                        ("message", err.message()),
                    ],
                );
            }
        }
        result
    }
}

impl Default for QueryTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QueryTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryTranslator")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::DateError;
    use crate::model::{Condition, Filter, Logical, Operator, Pagination, Query, Sort};
    use crate::schema::FieldMetaData;
    use bson::doc;
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::json;

    fn orders() -> ValidFields {
        ValidFields::new("orders")
            .with_field("amount", FieldMetaData::number())
            .with_field("created_at", FieldMetaData::date())
            .with_field("title", FieldMetaData::analyzed_string())
    }

    fn translator() -> QueryTranslator {
        let mut translator = QueryTranslator::new();
        translator.register_schema(orders()).unwrap();
        translator
    }

    fn amount_between() -> Criteria {
        Criteria::new(
            Pagination::new(0, 0),
            Query::new().filter(Filter::all(vec![
                Condition::new("amount", Operator::GreaterOrEquals, 100),
                Condition::new("amount", Operator::LessThan, 500),
            ])),
        )
    }

    fn elastic(criteria: Criteria, super_filters: &[SuperFilter]) -> serde_json::Value {
        let body = translator().to_elastic("orders", criteria, super_filters).unwrap();
        serde_json::from_str(&body).unwrap()
    }

    #[test]
    fn test_orders_elastic() {
        assert_eq!(
            elastic(amount_between(), &[]),
            json!({
                "query": {"bool": {"must": [
                    {"bool": {"must": [
                        {"bool": {"must": [{"range": {"amount": {"gte": 100, "lt": 500}}}]}}
                    ]}}
                ]}},
                "sort": [{"bayonet_tracking_id": {"order": "asc"}}],
                "size": 50,
                "from": 0
            })
        );
    }

    #[test]
    fn test_orders_mongo() {
        let query = translator().to_mongo("orders", amount_between(), &[]).unwrap();

        assert_eq!(query.limit(), 50);
        assert_eq!(query.offset(), 0);
        assert_eq!(
            query.filters(),
            &doc! {"$and": [{"$and": [{"$and": [
                {"amount": {"$gte": 100_i64}},
                {"amount": {"$lt": 500_i64}}
            ]}]}]}
        );
        assert!(query.sorts().is_empty());
    }

    /// Several conditions without a logical operator, as clients send them
    fn amount_between_unjoined() -> Criteria {
        Criteria::new(
            Pagination::new(0, 0),
            Query::new().filter(Filter {
                conditions: vec![
                    Condition::new("amount", Operator::GreaterOrEquals, 100),
                    Condition::new("amount", Operator::LessThan, 500),
                ],
                logical: None,
            }),
        )
    }

    #[test]
    fn test_missing_logical_translates_as_and() {
        let body = elastic(amount_between_unjoined(), &[]);
        assert_eq!(body["query"], elastic(amount_between(), &[])["query"]);
        assert_eq!(
            body["query"]["bool"]["must"][0]["bool"]["must"][0]["bool"]["must"][0]["range"]["amount"],
            json!({"gte": 100, "lt": 500})
        );

        let query = translator()
            .to_mongo("orders", amount_between_unjoined(), &[])
            .unwrap();
        assert_eq!(
            query.filters(),
            &doc! {"$and": [{"$and": [{"$and": [
                {"amount": {"$gte": 100_i64}},
                {"amount": {"$lt": 500_i64}}
            ]}]}]}
        );
    }

    #[test]
    fn test_translation_does_not_validate_structure() {
        let criteria = Criteria::new(Pagination::new(1001, 0), Query::new());
        assert!(criteria.validate().is_err());

        let query = translator().to_mongo("orders", criteria, &[]).unwrap();
        assert_eq!(query.limit(), 1001);
    }

    #[test]
    fn test_unknown_entity() {
        let err = translator()
            .to_elastic("invoices", Criteria::default(), &[])
            .unwrap_err();
        assert_eq!(err.code(), SearchErrorCode::UnknownEntity);
        assert_eq!(err.entity(), Some("invoices"));
    }

    #[test]
    fn test_unknown_field_no_output() {
        let criteria = Criteria::new(
            Pagination::default(),
            Query::new().filter(Filter::single(Condition::new("secret", Operator::Equals, 1))),
        );
        let translator = translator();

        let err = translator.to_elastic("orders", criteria.clone(), &[]).unwrap_err();
        assert_eq!(err.code(), SearchErrorCode::UnknownField);
        let err = translator.to_mongo("orders", criteria, &[]).unwrap_err();
        assert_eq!(err.code(), SearchErrorCode::UnknownField);
    }

    #[test]
    fn test_analyzed_field_per_backend() {
        let criteria = Criteria::new(
            Pagination::default(),
            Query::new()
                .filter(Filter::single(Condition::new("title", Operator::Equals, "Widget")))
                .sort(Sort::desc("title")),
        );
        let translator = translator();

        let body: serde_json::Value = serde_json::from_str(
            &translator.to_elastic("orders", criteria.clone(), &[]).unwrap(),
        )
        .unwrap();
        assert_eq!(
            body["query"]["bool"]["must"][0]["bool"]["must"][0]["bool"]["must"][0],
            json!({"term": {"title.raw": "Widget"}})
        );
        assert_eq!(body["sort"][0], json!({"title.raw": {"order": "desc"}}));

        let mongo = translator.to_mongo("orders", criteria, &[]).unwrap();
        assert_eq!(mongo.sorts(), &doc! {"title": -1});
    }

    #[test]
    fn test_dates_per_backend() {
        let criteria = Criteria::new(
            Pagination::default(),
            Query::new().filter(Filter::single(Condition::new(
                "created_at",
                Operator::GreaterThan,
                "2023-01-01T05:00:00+05:00",
            ))),
        );
        let translator = translator();

        let body: serde_json::Value = serde_json::from_str(
            &translator.to_elastic("orders", criteria.clone(), &[]).unwrap(),
        )
        .unwrap();
        assert_eq!(
            body["query"]["bool"]["must"][0]["bool"]["must"][0]["bool"]["must"][0],
            json!({"range": {"created_at": {"gt": "2023-01-01T00:00:00Z"}}})
        );

        let mongo = translator.to_mongo("orders", criteria, &[]).unwrap();
        let instant = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            mongo.filters(),
            &doc! {"$and": [{"$and": [{"$and": [
                {"created_at": {"$gt": bson::DateTime::from_chrono(instant)}}
            ]}]}]}
        );
    }

    #[test]
    fn test_super_filters_mandatory_under_or() {
        let criteria = Criteria::new(
            Pagination::default(),
            Query::new()
                .filter(Filter::single(Condition::new("amount", Operator::Equals, 1)))
                .filter(Filter::single(Condition::new("amount", Operator::Equals, 2)))
                .with_logical(Logical::Or),
        );
        let body = elastic(criteria, &[SuperFilter::new("client_id", "acme")]);

        let must = body["query"]["bool"]["must"].as_array().unwrap();
        assert_eq!(must[0], json!({"term": {"client_id": "acme"}}));
        assert!(must[1]["bool"]["should"].is_array());
    }

    #[test]
    fn test_custom_config() {
        let config = TranslatorConfig {
            tracking_field: "tracking_id".to_string(),
            raw_suffix: ".keyword".to_string(),
            default_limit: 10,
        };
        let mut translator = QueryTranslator::with_config(config).unwrap();
        translator.register_schema(orders()).unwrap();

        let criteria = Criteria::new(Pagination::default(), Query::new().sort(Sort::asc("title")));
        let body: serde_json::Value =
            serde_json::from_str(&translator.to_elastic("orders", criteria, &[]).unwrap()).unwrap();

        assert_eq!(body["size"], 10);
        assert_eq!(
            body["sort"],
            json!([{"title.keyword": {"order": "asc"}}, {"tracking_id": {"order": "asc"}}])
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = TranslatorConfig {
            default_limit: 0,
            ..TranslatorConfig::default()
        };
        let err = QueryTranslator::with_config(config).unwrap_err();
        assert_eq!(err.code(), SearchErrorCode::InvalidConfig);
    }

    #[test]
    fn test_duplicate_registration() {
        let mut translator = translator();
        let err = translator.register_schema(orders()).unwrap_err();
        assert_eq!(err.code(), SearchErrorCode::SchemaAlreadyRegistered);
        assert_eq!(translator.metrics().schemas_registered, 1);
    }

    #[test]
    fn test_custom_date_parser() {
        struct Epoch;

        impl DateParser for Epoch {
            fn parse_iso8601_utc(&self, _input: &str) -> Result<DateTime<Utc>, DateError> {
                Ok(Utc.timestamp_opt(0, 0).unwrap())
            }
        }

        let mut translator = QueryTranslator::new().with_date_parser(Epoch);
        translator.register_schema(orders()).unwrap();
        let criteria = Criteria::new(
            Pagination::default(),
            Query::new().filter(Filter::single(Condition::new(
                "created_at",
                Operator::Equals,
                "anything",
            ))),
        );

        let mongo = translator.to_mongo("orders", criteria, &[]).unwrap();
        assert_eq!(
            mongo.filters(),
            &doc! {"$and": [{"$and": [{"$and": [
                {"created_at": {"$eq": bson::DateTime::from_millis(0)}}
            ]}]}]}
        );
    }

    #[test]
    fn test_metrics() {
        let translator = translator();
        translator.to_elastic("orders", amount_between(), &[]).unwrap();
        translator.to_mongo("orders", amount_between(), &[]).unwrap();
        translator
            .to_mongo("invoices", amount_between(), &[])
            .unwrap_err();

        let metrics = translator.metrics();
        assert_eq!(metrics.elastic_translations, 1);
        assert_eq!(metrics.mongo_translations, 1);
        assert_eq!(metrics.translations_rejected, 1);
        assert_eq!(metrics.ranges_merged, 1);
    }

    #[test]
    fn test_translator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<QueryTranslator>();
    }
}
