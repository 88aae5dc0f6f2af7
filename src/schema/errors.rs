//! Schema registry errors
//!
//! Error codes:
//! - SEARCH_SCHEMA_ALREADY_REGISTERED
//! - SEARCH_MALFORMED_SCHEMA
//!
//! Both are configuration errors raised while setting up a translator,
//! never while translating.

use std::fmt;

/// Schema error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// A schema for the entity is already registered
    AlreadyRegistered,
    /// Schema document is unreadable or structurally invalid
    MalformedSchema,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::AlreadyRegistered => "SEARCH_SCHEMA_ALREADY_REGISTERED",
            SchemaErrorCode::MalformedSchema => "SEARCH_MALFORMED_SCHEMA",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error with context
#[derive(Debug, Clone)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    entity: Option<String>,
}

impl SchemaError {
    /// Create an already registered error
    pub fn already_registered(entity: impl Into<String>) -> Self {
        let entity = entity.into();
        Self {
            code: SchemaErrorCode::AlreadyRegistered,
            message: format!("valid fields already registered for entity '{}'", entity),
            entity: Some(entity),
        }
    }

    /// Create an error for a malformed schema document
    pub fn malformed(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::MalformedSchema,
            message: format!("malformed schema '{}': {}", source.into(), reason.into()),
            entity: None,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the entity name if applicable
    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
