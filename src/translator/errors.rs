//! Translation error types
//!
//! Error codes:
//! - SEARCH_INVALID_CRITERIA (Structural)
//! - SEARCH_UNKNOWN_ENTITY (Schema)
//! - SEARCH_UNKNOWN_FIELD (Schema)
//! - SEARCH_INVALID_DATE (Coercion)
//! - SEARCH_SCHEMA_ALREADY_REGISTERED (Configuration)
//! - SEARCH_MALFORMED_SCHEMA (Configuration)
//! - SEARCH_INVALID_CONFIG (Configuration)
//! - SEARCH_SERIALIZATION_FAILED (Internal)
//!
//! Every error is terminal for the call that raised it. There are no
//! retries and no partial results.

use std::fmt;

use crate::date::DateError;
use crate::model::ValidationError;
use crate::schema::{SchemaError, SchemaErrorCode};

/// Error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Criteria failed structural validation
    Structural,
    /// Entity or field not registered
    Schema,
    /// Value could not be coerced to the field type
    Coercion,
    /// Translator setup failure
    Configuration,
    /// Output could not be produced
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Structural => "STRUCTURAL",
            ErrorCategory::Schema => "SCHEMA",
            ErrorCategory::Coercion => "COERCION",
            ErrorCategory::Configuration => "CONFIGURATION",
            ErrorCategory::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Translation error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorCode {
    InvalidCriteria,
    UnknownEntity,
    UnknownField,
    InvalidDate,
    SchemaAlreadyRegistered,
    MalformedSchema,
    InvalidConfig,
    SerializationFailed,
}

impl SearchErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SearchErrorCode::InvalidCriteria => "SEARCH_INVALID_CRITERIA",
            SearchErrorCode::UnknownEntity => "SEARCH_UNKNOWN_ENTITY",
            SearchErrorCode::UnknownField => "SEARCH_UNKNOWN_FIELD",
            SearchErrorCode::InvalidDate => "SEARCH_INVALID_DATE",
            SearchErrorCode::SchemaAlreadyRegistered => "SEARCH_SCHEMA_ALREADY_REGISTERED",
            SearchErrorCode::MalformedSchema => "SEARCH_MALFORMED_SCHEMA",
            SearchErrorCode::InvalidConfig => "SEARCH_INVALID_CONFIG",
            SearchErrorCode::SerializationFailed => "SEARCH_SERIALIZATION_FAILED",
        }
    }

    /// Returns the category this code belongs to
    pub fn category(&self) -> ErrorCategory {
        match self {
            SearchErrorCode::InvalidCriteria => ErrorCategory::Structural,
            SearchErrorCode::UnknownEntity | SearchErrorCode::UnknownField => {
                ErrorCategory::Schema
            }
            SearchErrorCode::InvalidDate => ErrorCategory::Coercion,
            SearchErrorCode::SchemaAlreadyRegistered
            | SearchErrorCode::MalformedSchema
            | SearchErrorCode::InvalidConfig => ErrorCategory::Configuration,
            SearchErrorCode::SerializationFailed => ErrorCategory::Internal,
        }
    }
}

impl fmt::Display for SearchErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Translation error with context
#[derive(Debug, Clone)]
pub struct SearchError {
    code: SearchErrorCode,
    message: String,
    entity: Option<String>,
    field: Option<String>,
    validation: Option<ValidationError>,
}

impl SearchError {
    fn new(code: SearchErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            entity: None,
            field: None,
            validation: None,
        }
    }

    /// Criteria failed structural validation
    pub fn invalid_criteria(source: ValidationError) -> Self {
        Self {
            validation: Some(source.clone()),
            ..Self::new(SearchErrorCode::InvalidCriteria, source.to_string())
        }
    }

    /// No schema registered for the entity
    pub fn unknown_entity(entity: impl Into<String>) -> Self {
        let entity = entity.into();
        Self {
            entity: Some(entity.clone()),
            ..Self::new(
                SearchErrorCode::UnknownEntity,
                format!("no valid fields registered for entity '{}'", entity),
            )
        }
    }

    /// A condition or sort names a field the entity does not permit
    pub fn unknown_field(entity: impl Into<String>, field: impl Into<String>) -> Self {
        let entity = entity.into();
        let field = field.into();
        Self {
            message: format!("invalid field: '{}' is not registered for '{}'", field, entity),
            entity: Some(entity),
            field: Some(field),
            ..Self::new(SearchErrorCode::UnknownField, String::new())
        }
    }

    /// A date-typed field holds a non-string value
    pub fn date_not_string(field: impl Into<String>, type_name: &str) -> Self {
        let field = field.into();
        Self {
            message: format!(
                "invalid date field: '{}' expects an ISO-8601 string, got {}",
                field, type_name
            ),
            field: Some(field),
            ..Self::new(SearchErrorCode::InvalidDate, String::new())
        }
    }

    /// A date-typed field holds an unparseable string
    pub fn invalid_date(field: impl Into<String>, source: DateError) -> Self {
        let field = field.into();
        Self {
            message: format!("invalid date field: '{}': {}", field, source),
            field: Some(field),
            ..Self::new(SearchErrorCode::InvalidDate, String::new())
        }
    }

    /// Translator configuration out of range
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::new(SearchErrorCode::InvalidConfig, reason)
    }

    /// Backend output could not be encoded
    pub fn serialization_failed(reason: impl Into<String>) -> Self {
        Self::new(SearchErrorCode::SerializationFailed, reason)
    }

    /// Returns the error code
    pub fn code(&self) -> SearchErrorCode {
        self.code
    }

    /// Returns the error category
    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the entity name if applicable
    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    /// Returns the field name if applicable
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns the structural validation failure, for `SEARCH_INVALID_CRITERIA`
    pub fn validation(&self) -> Option<&ValidationError> {
        self.validation.as_ref()
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.category(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.validation
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl From<ValidationError> for SearchError {
    fn from(err: ValidationError) -> Self {
        SearchError::invalid_criteria(err)
    }
}

impl From<SchemaError> for SearchError {
    fn from(err: SchemaError) -> Self {
        let code = match err.code() {
            SchemaErrorCode::AlreadyRegistered => SearchErrorCode::SchemaAlreadyRegistered,
            SchemaErrorCode::MalformedSchema => SearchErrorCode::MalformedSchema,
        };
        Self {
            entity: err.entity().map(str::to_string),
            ..Self::new(code, err.message())
        }
    }
}

/// Result type for translation operations
pub type SearchResult<T> = Result<T, SearchError>;
