//! Criteria model for searcher
//!
//! A `Criteria` is what a client sends: pagination plus a query made of
//! filters (groups of conditions) and sorts. Every type validates itself.
//!
//! # Validation policy
//!
//! - Leaf failures inside a sequence accumulate per index
//! - A missing required logical operator short-circuits
//! - Pagination is checked before the query

mod condition;
mod criteria;
mod errors;
mod filter;
mod pagination;
mod primitives;
mod query;
mod value;

pub use condition::{validate_conditions, Condition};
pub use criteria::{Criteria, SuperFilter};
pub use errors::{ValidationError, ValidationResult};
pub use filter::{validate_filters, Filter};
pub use pagination::{
    Pagination, DEFAULT_PAGINATION_LIMIT, MAXIMUM_LIMIT, MAXIMUM_LIMIT_OFFSET_SIZE,
};
pub use primitives::{Field, Logical, Operator, Order};
pub use query::{validate_sorts, Query, Sort};
pub use value::Value;
