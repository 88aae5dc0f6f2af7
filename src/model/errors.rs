//! Structural validation errors for the criteria model
//!
//! Two reporting policies coexist:
//! - Leaf errors inside a homogeneous sequence accumulate per index
//!   (`conditions[2]: ...`) into one `Multiple` value.
//! - Cross-field structural errors (a missing required logical operator)
//!   short-circuit with a single error.

use thiserror::Error;

/// Result type for model validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A structural validation failure in a criteria, query, filter or primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A primitive holds an empty or unknown value
    #[error("{0}")]
    InvalidValue(String),

    /// More than one sibling is combined without a logical operator
    #[error("{scope}: logical operator is required for more than 1 {item}")]
    LogicalRequired {
        /// Where the operator is missing (`filter.logical`, `query.logical`)
        scope: &'static str,
        /// What is being combined (`condition`, `filter`)
        item: &'static str,
    },

    /// A filter without conditions
    #[error("empty conditions: at least one condition must be specified")]
    EmptyConditions,

    /// Pagination limit above the maximum
    #[error("limit({limit}) must be less or equals {maximum}")]
    LimitExceeded { limit: u32, maximum: u32 },

    /// Pagination window above the maximum
    #[error("limit({limit}) + offset({offset}) must be less or equals {maximum}")]
    LimitOffsetExceeded { limit: u32, offset: u32, maximum: u32 },

    /// An error reported against one element of a sequence
    #[error("{label}[{index}]: {source}")]
    At {
        label: &'static str,
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },

    /// Accumulated errors, in the order they were found
    #[error("{}", join_messages(.0))]
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Create an invalid value error
    pub fn invalid(reason: impl Into<String>) -> Self {
        ValidationError::InvalidValue(reason.into())
    }

    /// Attach a sequence position to an error
    pub fn at(label: &'static str, index: usize, source: ValidationError) -> Self {
        ValidationError::At {
            label,
            index,
            source: Box::new(source),
        }
    }

    /// Fold accumulated errors into a single result.
    ///
    /// No errors is success; anything else is reported as one `Multiple`.
    pub fn collect(errors: Vec<ValidationError>) -> ValidationResult<()> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Multiple(errors))
        }
    }

    /// Flattens nested accumulations into one message per leaf failure.
    ///
    /// Positions are kept as prefixes, e.g.
    /// `filters[0]: conditions[1]: invalid field: cannot be empty`.
    pub fn messages(&self) -> Vec<String> {
        match self {
            ValidationError::Multiple(errors) => {
                errors.iter().flat_map(ValidationError::messages).collect()
            }
            ValidationError::At {
                label,
                index,
                source,
            } => source
                .messages()
                .into_iter()
                .map(|m| format!("{}[{}]: {}", label, index, m))
                .collect(),
            other => vec![other.to_string()],
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
