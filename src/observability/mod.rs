//! Observability for searcher
//!
//! - Structured `tracing` events: the event name plus a sorted fields object
//! - Per-translator counters
//!
//! Observability never changes a translation result.
//!
//! # Usage
//!
//! ```ignore
//! use searcher::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::SchemaRegistered, &[("entity", "orders")]);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
