//! Primitive value types of the criteria model
//!
//! - `Field`: non-empty identifier
//! - `Operator`: `=`, `!=`, `>`, `<`, `>=`, `<=`
//! - `Logical`: `and`, `or` (case-insensitive on construction)
//! - `Order`: `asc`, `desc` (case-insensitive on construction)
//!
//! The closed sets are enums: `parse` is their validation, so a constructed
//! value is always valid. Serde goes through the same `parse`.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};

use super::errors::{ValidationError, ValidationResult};

/// Name of a field in a condition
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Field(String);

impl Field {
    /// Create a field, rejecting empty names
    pub fn new(name: impl Into<String>) -> ValidationResult<Self> {
        let field = Self(name.into());
        field.validate()?;
        Ok(field)
    }

    /// Checks the field is not empty
    pub fn validate(&self) -> ValidationResult<()> {
        if self.0.is_empty() {
            return Err(ValidationError::invalid("invalid field: cannot be empty"));
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Field {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Field {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Comparison operator of a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Operator {
    /// `=`
    Equals,
    /// `!=`
    NotEquals,
    /// `>`
    GreaterThan,
    /// `<`
    LessThan,
    /// `>=`
    GreaterOrEquals,
    /// `<=`
    LessOrEquals,
}

impl Operator {
    /// Parse the canonical operator text
    pub fn parse(s: &str) -> ValidationResult<Self> {
        match s {
            "=" => Ok(Operator::Equals),
            "!=" => Ok(Operator::NotEquals),
            ">" => Ok(Operator::GreaterThan),
            "<" => Ok(Operator::LessThan),
            ">=" => Ok(Operator::GreaterOrEquals),
            "<=" => Ok(Operator::LessOrEquals),
            "" => Err(ValidationError::invalid("invalid operator: empty operator")),
            other => Err(ValidationError::invalid(format!("invalid operator: {}", other))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "=",
            Operator::NotEquals => "!=",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::GreaterOrEquals => ">=",
            Operator::LessOrEquals => "<=",
        }
    }

    /// Lower bound operators (`>`, `>=`)
    pub fn is_lower_bound(&self) -> bool {
        matches!(self, Operator::GreaterThan | Operator::GreaterOrEquals)
    }

    /// Bound operators that include the boundary value
    pub fn is_inclusive(&self) -> bool {
        matches!(self, Operator::GreaterOrEquals | Operator::LessOrEquals)
    }
}

impl FromStr for Operator {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Operator {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_str().to_string()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical operator joining conditions or filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Logical {
    #[default]
    And,
    Or,
}

impl Logical {
    /// Parse a logical operator, ignoring case
    pub fn parse(s: &str) -> ValidationResult<Self> {
        match s.to_lowercase().as_str() {
            "and" => Ok(Logical::And),
            "or" => Ok(Logical::Or),
            "" => Err(ValidationError::invalid(
                "invalid logical operator: cannot be empty",
            )),
            other => Err(ValidationError::invalid(format!(
                "invalid logical operator: {}",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Logical::And => "and",
            Logical::Or => "or",
        }
    }
}

impl FromStr for Logical {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Logical {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Logical> for String {
    fn from(logical: Logical) -> Self {
        logical.as_str().to_string()
    }
}

impl fmt::Display for Logical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads an optional logical operator, treating `""` as absent.
///
/// Clients send the empty string where the operator was left out.
pub(crate) fn deserialize_optional_logical<'de, D>(deserializer: D) -> Result<Option<Logical>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => Logical::parse(s).map(Some).map_err(de::Error::custom),
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    /// Parse a sort direction, ignoring case
    pub fn parse(s: &str) -> ValidationResult<Self> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(Order::Asc),
            "desc" => Ok(Order::Desc),
            "" => Err(ValidationError::invalid("invalid order: empty string")),
            other => Err(ValidationError::invalid(format!(
                "invalid order [available:(asc,desc)]: {}",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

impl FromStr for Order {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Order {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Order> for String {
    fn from(order: Order) -> Self {
        order.as_str().to_string()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
