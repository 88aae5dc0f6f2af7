//! Per-entity registry of permitted fields
//!
//! - One `ValidFields` per entity name, registered once
//! - A second registration for the same entity is rejected
//! - Schemas can be loaded from a directory of `*.json` files

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::errors::{SchemaError, SchemaResult};
use super::types::ValidFields;
use crate::observability::{log_event_with_fields, Event};

/// In-memory registry of entity schemas.
///
/// Written during setup, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, ValidFields>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the permitted fields of an entity.
    ///
    /// Only the first registration per entity name succeeds.
    pub fn register(&mut self, schema: ValidFields) -> SchemaResult<()> {
        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed("<in-memory>", e))?;

        if self.schemas.contains_key(&schema.entity_name) {
            log_event_with_fields(Event::SchemaRejected, &[("entity", schema.entity_name.as_str())]);
            return Err(SchemaError::already_registered(&schema.entity_name));
        }

        let field_count = schema.fields.len().to_string();
        log_event_with_fields(
            Event::SchemaRegistered,
            &[("entity", schema.entity_name.as_str()), ("fields", field_count.as_str())],
        );

        self.schemas.insert(schema.entity_name.clone(), schema);
        Ok(())
    }

    /// Loads and registers every `*.json` schema file in a directory.
    ///
    /// Files are registered in name order. Returns the number registered.
    pub fn load_dir(&mut self, dir: &Path) -> SchemaResult<usize> {
        let entries = fs::read_dir(dir).map_err(|e| {
            SchemaError::malformed(
                dir.display().to_string(),
                format!("failed to read schema directory: {}", e),
            )
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed(
                    dir.display().to_string(),
                    format!("failed to read directory entry: {}", e),
                )
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        for path in &paths {
            self.load_file(path)?;
        }

        let count = paths.len().to_string();
        let dir_name = dir.display().to_string();
        log_event_with_fields(
            Event::SchemasLoaded,
            &[("dir", dir_name.as_str()), ("count", count.as_str())],
        );

        Ok(paths.len())
    }

    /// Loads a single schema file.
    fn load_file(&mut self, path: &Path) -> SchemaResult<()> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed(path.display().to_string(), format!("failed to read file: {}", e))
        })?;

        let schema: ValidFields = serde_json::from_str(&content).map_err(|e| {
            SchemaError::malformed(path.display().to_string(), format!("invalid JSON: {}", e))
        })?;

        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed(path.display().to_string(), e))?;

        self.register(schema)
    }

    /// Gets the schema of an entity
    pub fn get(&self, entity: &str) -> Option<&ValidFields> {
        self.schemas.get(entity)
    }

    /// Checks if an entity is registered
    pub fn contains(&self, entity: &str) -> bool {
        self.schemas.contains_key(entity)
    }

    /// Registered entity names, sorted
    pub fn entities(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered entities
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldMetaData, FieldType, SchemaErrorCode};
    use tempfile::TempDir;

    fn orders() -> ValidFields {
        ValidFields::new("orders")
            .with_field("amount", FieldMetaData::number())
            .with_field("created_at", FieldMetaData::date())
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = SchemaRegistry::new();
        registry.register(orders()).unwrap();

        let schema = registry.get("orders").unwrap();
        assert_eq!(schema.field_type("amount"), FieldType::Number);
        assert!(registry.contains("orders"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_second_registration_rejected() {
        let mut registry = SchemaRegistry::new();
        registry.register(orders()).unwrap();

        let replacement = ValidFields::new("orders").with_field("status", FieldMetaData::string());
        let err = registry.register(replacement).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::AlreadyRegistered);

        // The first registration is kept
        assert!(registry.get("orders").unwrap().contains("amount"));
        assert!(!registry.get("orders").unwrap().contains("status"));
    }

    #[test]
    fn test_malformed_schema_rejected() {
        let mut registry = SchemaRegistry::new();
        let err = registry.register(ValidFields::new("")).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::MalformedSchema);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_entities_sorted() {
        let mut registry = SchemaRegistry::new();
        registry.register(ValidFields::new("users")).unwrap();
        registry.register(ValidFields::new("orders")).unwrap();
        assert_eq!(registry.entities(), vec!["orders", "users"]);
    }

    #[test]
    fn test_load_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("orders.json"),
            serde_json::to_string(&orders()).unwrap(),
        )
        .unwrap();
        fs::write(
            temp_dir.path().join("users.json"),
            r#"{"entity_name": "users", "fields": {"name": {"type": "string", "is_analyzed": true}}}"#,
        )
        .unwrap();
        fs::write(temp_dir.path().join("README.md"), "not a schema").unwrap();

        let mut registry = SchemaRegistry::new();
        assert_eq!(registry.load_dir(temp_dir.path()).unwrap(), 2);
        assert!(registry.get("users").unwrap().is_analyzed("name"));
        assert!(registry.contains("orders"));
    }

    #[test]
    fn test_load_dir_duplicate_entity() {
        let temp_dir = TempDir::new().unwrap();
        let body = serde_json::to_string(&orders()).unwrap();
        fs::write(temp_dir.path().join("a.json"), &body).unwrap();
        fs::write(temp_dir.path().join("b.json"), &body).unwrap();

        let mut registry = SchemaRegistry::new();
        let err = registry.load_dir(temp_dir.path()).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::AlreadyRegistered);
    }

    #[test]
    fn test_load_dir_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("broken.json"), "{not json").unwrap();

        let mut registry = SchemaRegistry::new();
        let err = registry.load_dir(temp_dir.path()).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::MalformedSchema);
        assert!(err.message().contains("invalid JSON"));
    }

    #[test]
    fn test_load_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let mut registry = SchemaRegistry::new();
        assert!(registry.load_dir(&temp_dir.path().join("absent")).is_err());
    }
}
