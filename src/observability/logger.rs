//! Structured logger for searcher
//!
//! - One log line = one event
//! - Deterministic key ordering
//! - Explicit severity levels
//!
//! Events go to `tracing` with the event name and the fields as structured
//! values, so the installed subscriber decides format and destination.

use serde_json::{Map, Value};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Per-request detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Refused input or configuration
    Warn = 2,
    /// Operation failures
    Error = 3,
}

/// A structured logger that emits events through `tracing`
pub struct Logger;

impl Logger {
    /// Log an event with the given severity and fields
    ///
    /// Fields are output in deterministic order (alphabetical by key)
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let fields = Self::render_fields(fields);
        match severity {
            Severity::Trace => tracing::trace!(target: "searcher", event = event, %fields),
            Severity::Info => tracing::info!(target: "searcher", event = event, %fields),
            Severity::Warn => tracing::warn!(target: "searcher", event = event, %fields),
            Severity::Error => tracing::error!(target: "searcher", event = event, %fields),
        }
    }

    /// Fields as one JSON object, keys sorted
    fn render_fields(fields: &[(&str, &str)]) -> Value {
        let map: Map<String, Value> = fields
            .iter()
            .map(|(key, value)| ((*key).to_string(), Value::from(*value)))
            .collect();
        Value::Object(map)
    }
}
