//! Translator configuration
//!
//! All fields are optional in serialized form and fall back to the
//! defaults below.

use serde::{Deserialize, Serialize};

use super::errors::{SearchError, SearchResult};
use crate::model::{DEFAULT_PAGINATION_LIMIT, MAXIMUM_LIMIT};

/// Field appended as the final ascending sort of every Elasticsearch query
pub const DEFAULT_TRACKING_FIELD: &str = "bayonet_tracking_id";

/// Sub-field holding the exact value of an analyzed field
pub const DEFAULT_RAW_SUFFIX: &str = ".raw";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Elasticsearch tie-break sort field (never schema-checked)
    #[serde(default = "default_tracking_field")]
    pub tracking_field: String,

    /// Suffix for analyzed fields in Elasticsearch filters and sorts
    #[serde(default = "default_raw_suffix")]
    pub raw_suffix: String,

    /// Limit applied when a criteria asks for 0
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

fn default_tracking_field() -> String {
    DEFAULT_TRACKING_FIELD.to_string()
}

fn default_raw_suffix() -> String {
    DEFAULT_RAW_SUFFIX.to_string()
}

fn default_limit() -> u32 {
    DEFAULT_PAGINATION_LIMIT
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            tracking_field: default_tracking_field(),
            raw_suffix: default_raw_suffix(),
            default_limit: default_limit(),
        }
    }
}

impl TranslatorConfig {
    pub fn validate(&self) -> SearchResult<()> {
        if self.tracking_field.is_empty() {
            return Err(SearchError::invalid_config("tracking_field cannot be empty"));
        }

        if self.raw_suffix.is_empty() {
            return Err(SearchError::invalid_config("raw_suffix cannot be empty"));
        }

        if self.default_limit == 0 || self.default_limit > MAXIMUM_LIMIT {
            return Err(SearchError::invalid_config(format!(
                "default_limit must be between 1 and {}, got {}",
                MAXIMUM_LIMIT, self.default_limit
            )));
        }

        Ok(())
    }
}
