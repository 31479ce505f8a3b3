//! Call trackers for message resolution.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::trace;

use lingua_core::config::{TrackingConfig, TrackingMode};
use lingua_core::locale::Locale;
use lingua_core::traits::CallTracker;

/// Discards every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTracker;

impl CallTracker for NoopTracker {
    fn track(&self, _key: &str, _locale: Locale) {}
}

/// Emits one trace event per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTracker;

impl CallTracker for LogTracker {
    fn track(&self, key: &str, locale: Locale) {
        trace!(key, locale = locale.as_str(), "message resolved");
    }
}

/// Counts calls per key and locale.
#[derive(Debug, Default)]
pub struct CallCounter {
    counts: Mutex<HashMap<(String, Locale), u64>>,
}

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, key: &str, locale: Locale) -> u64 {
        let counts = self.counts.lock().unwrap_or_else(|e| e.into_inner());
        counts.get(&(key.to_string(), locale)).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        let counts = self.counts.lock().unwrap_or_else(|e| e.into_inner());
        counts.values().sum()
    }

    /// Counts sorted by key then locale.
    pub fn snapshot(&self) -> Vec<(String, Locale, u64)> {
        let counts = self.counts.lock().unwrap_or_else(|e| e.into_inner());
        let mut rows: Vec<(String, Locale, u64)> = counts
            .iter()
            .map(|((key, locale), n)| (key.clone(), *locale, *n))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
        rows
    }
}

impl CallTracker for CallCounter {
    fn track(&self, key: &str, locale: Locale) {
        let mut counts = self.counts.lock().unwrap_or_else(|e| e.into_inner());
        *counts.entry((key.to_string(), locale)).or_insert(0) += 1;
    }
}

/// Build the tracker selected by configuration.
pub fn build_tracker(cfg: &TrackingConfig) -> Arc<dyn CallTracker> {
    match cfg.mode {
        TrackingMode::Off => Arc::new(NoopTracker),
        TrackingMode::Log => Arc::new(LogTracker),
        TrackingMode::Count => Arc::new(CallCounter::new()),
    }
}
