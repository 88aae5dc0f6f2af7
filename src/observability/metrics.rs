//! Translation counters
//!
//! - Counters only, monotonic
//! - Reset only when the owning translator is created
//! - Thread-safe, lock-free

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters owned by one translator.
///
/// Relaxed ordering throughout; counters are independent of each other.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    mongo_translations: AtomicU64,
    elastic_translations: AtomicU64,
    translations_rejected: AtomicU64,
    ranges_merged: AtomicU64,
    schemas_registered: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_mongo_translations(&self) {
        self.mongo_translations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_elastic_translations(&self) {
        self.elastic_translations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_translations_rejected(&self) {
        self.translations_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_ranges_merged(&self) {
        self.add_ranges_merged(1);
    }

    pub fn increment_schemas_registered(&self) {
        self.add_schemas_registered(1);
    }

    pub fn add_schemas_registered(&self, count: u64) {
        self.schemas_registered.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_ranges_merged(&self, count: u64) {
        self.ranges_merged.fetch_add(count, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            mongo_translations: self.mongo_translations.load(Ordering::Relaxed),
            elastic_translations: self.elastic_translations.load(Ordering::Relaxed),
            translations_rejected: self.translations_rejected.load(Ordering::Relaxed),
            ranges_merged: self.ranges_merged.load(Ordering::Relaxed),
            schemas_registered: self.schemas_registered.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct MetricsSnapshot {
    pub mongo_translations: u64,
    pub elastic_translations: u64,
    pub translations_rejected: u64,
    pub ranges_merged: u64,
    pub schemas_registered: u64,
}
