//! Observable events for searcher
//!
//! Events are explicit and typed. Each one carries a fixed severity so
//! callers never choose a level at the call site.

use std::fmt;

use super::logger::Severity;

/// Observable events in searcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Schema registry
    /// Entity schema accepted
    SchemaRegistered,
    /// Duplicate entity schema refused
    SchemaRejected,
    /// Schema directory loaded
    SchemasLoaded,

    // Translation
    /// Translation begins
    TranslationStart,
    /// Translation produced a backend query
    TranslationComplete,
    /// Translation refused the criteria
    TranslationRejected,
    /// Two range conditions on one field merged into one clause
    RangeMerged,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::SchemaRegistered => "SCHEMA_REGISTERED",
            Event::SchemaRejected => "SCHEMA_REJECTED",
            Event::SchemasLoaded => "SCHEMAS_LOADED",
            Event::TranslationStart => "TRANSLATION_BEGIN",
            Event::TranslationComplete => "TRANSLATION_COMPLETE",
            Event::TranslationRejected => "TRANSLATION_REJECTED",
            Event::RangeMerged => "RANGE_MERGED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::TranslationStart | Event::RangeMerged => Severity::Trace,
            Event::SchemaRejected | Event::TranslationRejected => Severity::Warn,
            Event::SchemaRegistered | Event::SchemasLoaded | Event::TranslationComplete => {
                Severity::Info
            }
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
