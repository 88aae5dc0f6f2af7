//! Field metadata for searchable entities
//!
//! Supported field types:
//! - undefined: no special handling (also the answer for unknown fields)
//! - string: plain string
//! - number: numeric value
//! - date: ISO-8601 string coerced to a UTC instant before translation

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Declared type of a searchable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// No declared type
    #[default]
    Undefined,
    /// UTF-8 string
    String,
    /// Integer or floating point number
    Number,
    /// ISO-8601 timestamp
    Date,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Undefined => "undefined",
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Date => "date",
        }
    }
}

/// Metadata of one permitted field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldMetaData {
    /// Field data type
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    /// Whether the field is full-text analyzed
    #[serde(default)]
    pub is_analyzed: bool,
}

impl FieldMetaData {
    pub fn new(field_type: FieldType, is_analyzed: bool) -> Self {
        Self {
            field_type,
            is_analyzed,
        }
    }

    /// A non-analyzed string field
    pub fn string() -> Self {
        Self::new(FieldType::String, false)
    }

    /// A full-text analyzed string field
    pub fn analyzed_string() -> Self {
        Self::new(FieldType::String, true)
    }

    pub fn number() -> Self {
        Self::new(FieldType::Number, false)
    }

    pub fn date() -> Self {
        Self::new(FieldType::Date, false)
    }
}

/// The set of fields an entity may be searched and sorted on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidFields {
    /// Entity the fields belong to
    pub entity_name: String,
    /// Permitted fields
    #[serde(default)]
    pub fields: HashMap<String, FieldMetaData>,
}

impl ValidFields {
    /// Create an entity schema with no fields
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            fields: HashMap::new(),
        }
    }

    /// Add a permitted field
    pub fn with_field(mut self, name: impl Into<String>, meta: FieldMetaData) -> Self {
        self.fields.insert(name.into(), meta);
        self
    }

    /// Metadata of a permitted field
    pub fn get(&self, field: &str) -> Option<&FieldMetaData> {
        self.fields.get(field)
    }

    /// Checks whether a field is permitted
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Declared type, `Undefined` for unknown fields
    pub fn field_type(&self, field: &str) -> FieldType {
        self.get(field).map(|m| m.field_type).unwrap_or_default()
    }

    /// Analyzed flag, `false` for unknown fields
    pub fn is_analyzed(&self, field: &str) -> bool {
        self.get(field).is_some_and(|m| m.is_analyzed)
    }

    /// Validates the schema structure itself
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.entity_name.trim().is_empty() {
            return Err("entity name cannot be empty".into());
        }

        if self.fields.keys().any(|name| name.is_empty()) {
            return Err(format!(
                "entity '{}' declares a field with an empty name",
                self.entity_name
            ));
        }

        Ok(())
    }
}
