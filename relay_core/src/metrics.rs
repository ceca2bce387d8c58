//! Relay outcome counters

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

#[derive(Clone)]
pub struct RelayMetrics {
    received: Arc<AtomicU64>,
    rejected: Arc<AtomicU64>,
    unconfigured: Arc<AtomicU64>,
    delivered: Arc<AtomicU64>,
    failed: Arc<AtomicU64>,
    start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub received: u64,
    pub rejected: u64,
    pub unconfigured: u64,
    pub delivered: u64,
    pub failed: u64,
    pub uptime_seconds: i64,
    pub delivery_rate: f64,
}

impl RelayMetrics {
    pub fn new() -> Self {
        Self {
            received: Arc::new(AtomicU64::new(0)),
            rejected: Arc::new(AtomicU64::new(0)),
            unconfigured: Arc::new(AtomicU64::new(0)),
            delivered: Arc::new(AtomicU64::new(0)),
            failed: Arc::new(AtomicU64::new(0)),
            start_time: Utc::now(),
        }
    }

    pub fn record_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unconfigured(&self) {
        self.unconfigured.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delivered(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let delivered = self.delivered.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);
        let attempted = delivered + failed;

        MetricsSnapshot {
            received: self.received.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            unconfigured: self.unconfigured.load(Ordering::Relaxed),
            delivered,
            failed,
            uptime_seconds: Utc::now()
                .signed_duration_since(self.start_time)
                .num_seconds(),
            delivery_rate: if attempted > 0 {
                (delivered as f64 / attempted as f64) * 100.0
            } else {
                0.0
            },
        }
    }
}

impl Default for RelayMetrics {
    fn default() -> Self {
        Self::new()
    }
}
