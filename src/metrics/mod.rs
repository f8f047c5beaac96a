//! Metrics collection module
//!
//! Defines the observer hook the orchestrator notifies about completed and
//! failed searches and about dropped detail lookups, and a collector that
//! aggregates those notifications.

use crate::lookup::LookupError;
use crate::results::SearchHit;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

/// Number of recent response times kept for the rolling average
const RESPONSE_WINDOW: usize = 100;

/// Diagnostic hook called by the orchestrator
pub trait SearchObserver: Send + Sync {
    /// A search finished; `results` may be lower than `hits` when details were dropped
    fn search_completed(&self, _query: &str, _hits: usize, _results: usize, _elapsed: Duration) {}

    /// The search lookup failed and the whole search was abandoned
    fn search_failed(&self, _query: &str, _error: &LookupError) {}

    /// A hit was dropped because its detail lookup failed
    fn detail_dropped(&self, _hit: &SearchHit, _reason: &LookupError) {}
}

/// Observer that ignores every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Aggregated search statistics
pub struct Metrics {
    total_searches: AtomicU64,
    failed_searches: AtomicU64,
    total_hits: AtomicU64,
    total_results: AtomicU64,
    /// Dropped detail lookups by error kind
    dropped: RwLock<BTreeMap<&'static str, u64>>,
    /// Search failures by error kind
    failures: RwLock<BTreeMap<&'static str, u64>>,
    /// Recent search durations in ms
    response_times: RwLock<Vec<u64>>,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            total_searches: AtomicU64::new(0),
            failed_searches: AtomicU64::new(0),
            total_hits: AtomicU64::new(0),
            total_results: AtomicU64::new(0),
            dropped: RwLock::new(BTreeMap::new()),
            failures: RwLock::new(BTreeMap::new()),
            response_times: RwLock::new(Vec::new()),
        }
    }

    pub fn total_searches(&self) -> u64 {
        self.total_searches.load(Ordering::Relaxed)
    }

    pub fn failed_searches(&self) -> u64 {
        self.failed_searches.load(Ordering::Relaxed)
    }

    /// Number of dropped detail lookups for an error kind
    pub fn dropped(&self, kind: &str) -> u64 {
        read(&self.dropped).get(kind).copied().unwrap_or(0)
    }

    /// Average duration of recent successful searches
    pub fn avg_response_time(&self) -> Option<u64> {
        let times = read(&self.response_times);
        if times.is_empty() {
            None
        } else {
            Some(times.iter().sum::<u64>() / times.len() as u64)
        }
    }

    /// Share of searches that completed, in percent
    pub fn reliability(&self) -> f64 {
        let total = self.total_searches();
        if total == 0 {
            100.0
        } else {
            let ok = total - self.failed_searches();
            (ok as f64 / total as f64) * 100.0
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_searches: self.total_searches(),
            failed_searches: self.failed_searches(),
            total_hits: self.total_hits.load(Ordering::Relaxed),
            total_results: self.total_results.load(Ordering::Relaxed),
            dropped_details: read(&self.dropped).clone(),
            search_failures: read(&self.failures).clone(),
            avg_response_time_ms: self.avg_response_time(),
            reliability: self.reliability(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchObserver for Metrics {
    fn search_completed(&self, _query: &str, hits: usize, results: usize, elapsed: Duration) {
        self.total_searches.fetch_add(1, Ordering::Relaxed);
        self.total_hits.fetch_add(hits as u64, Ordering::Relaxed);
        self.total_results.fetch_add(results as u64, Ordering::Relaxed);

        let mut times = write(&self.response_times);
        if times.len() >= RESPONSE_WINDOW {
            times.remove(0);
        }
        times.push(elapsed.as_millis() as u64);
    }

    fn search_failed(&self, _query: &str, error: &LookupError) {
        self.total_searches.fetch_add(1, Ordering::Relaxed);
        self.failed_searches.fetch_add(1, Ordering::Relaxed);
        *write(&self.failures).entry(error.kind()).or_insert(0) += 1;
    }

    fn detail_dropped(&self, _hit: &SearchHit, reason: &LookupError) {
        *write(&self.dropped).entry(reason.kind()).or_insert(0) += 1;
    }
}

/// Serializable view of [`Metrics`], served on `/stats`
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub total_searches: u64,
    pub failed_searches: u64,
    pub total_hits: u64,
    pub total_results: u64,
    pub dropped_details: BTreeMap<&'static str, u64>,
    pub search_failures: BTreeMap<&'static str, u64>,
    pub avg_response_time_ms: Option<u64>,
    pub reliability: f64,
}

// Counters stay usable after a panicking writer.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}
