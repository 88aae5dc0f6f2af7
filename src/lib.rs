//! searcher - database-agnostic search criteria translated into MongoDB
//! and Elasticsearch queries
//!
//! ```ignore
//! use searcher::{Condition, Criteria, Filter, Operator, Pagination, Query, QueryTranslator};
//! use searcher::schema::{FieldMetaData, ValidFields};
//!
//! let mut translator = QueryTranslator::new();
//! translator.register_schema(
//!     ValidFields::new("orders").with_field("amount", FieldMetaData::number()),
//! )?;
//!
//! let criteria = Criteria::new(
//!     Pagination::default(),
//!     Query::new().filter(Filter::single(Condition::new("amount", Operator::GreaterThan, 100))),
//! );
//! let body = translator.to_elastic("orders", criteria, &[])?;
//! ```

pub mod cli;
pub mod date;
pub mod model;
pub mod observability;
pub mod schema;
pub mod translator;

pub use model::{
    Condition, Criteria, Field, Filter, Logical, Operator, Order, Pagination, Query, Sort,
    SuperFilter, ValidationError, Value,
};
pub use translator::{MongoQuery, QueryTranslator, SearchError, SearchResult, TranslatorConfig};
