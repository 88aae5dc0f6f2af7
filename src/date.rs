//! ISO-8601 date adapter
//!
//! Date-typed condition values arrive as strings and are coerced to UTC
//! instants before a backend query is built. The adapter is a trait so a
//! translator can be given a stricter or more lenient parser.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Date parsing failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("date cannot be empty")]
    Empty,

    #[error("invalid ISO-8601 date '{input}': {reason}")]
    Malformed { input: String, reason: String },
}

/// Converts ISO-8601 text into a UTC instant
pub trait DateParser: Send + Sync {
    fn parse_iso8601_utc(&self, input: &str) -> Result<DateTime<Utc>, DateError>;
}

/// RFC 3339 parser, the ISO-8601 profile with a mandatory offset
#[derive(Debug, Clone, Copy, Default)]
pub struct Rfc3339Parser;

impl DateParser for Rfc3339Parser {
    fn parse_iso8601_utc(&self, input: &str) -> Result<DateTime<Utc>, DateError> {
        if input.is_empty() {
            return Err(DateError::Empty);
        }

        DateTime::parse_from_rfc3339(input)
            .map(|date| date.with_timezone(&Utc))
            .map_err(|e| DateError::Malformed {
                input: input.to_string(),
                reason: e.to_string(),
            })
    }
}
