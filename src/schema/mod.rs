//! Field schema registry for searcher
//!
//! Each searchable entity registers the fields clients may filter and sort
//! on, with a type and an analyzed flag per field.
//!
//! # Rules
//!
//! - One registration per entity; a second one is a configuration error
//! - Unknown fields report `undefined` type and not analyzed
//! - Callers check `contains` to tell "not permitted" apart

mod errors;
mod registry;
mod types;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult};
pub use registry::SchemaRegistry;
pub use types::{FieldMetaData, FieldType, ValidFields};
