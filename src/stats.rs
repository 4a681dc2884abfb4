// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Scan Statistics
 * Lock-free counters shared across the worker pool
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Runtime counters for one scan. All counters are relaxed atomics; the
/// progress reporter only ever reads approximate snapshots.
#[derive(Debug)]
pub struct ScanStats {
    pub total: AtomicU64,
    pub processed: AtomicU64,
    pub found: AtomicU64,
    pub errors: AtomicU64,
    pub secrets: AtomicU64,
    pub waf_hits: AtomicU64,
    start_time: Instant,
}

impl ScanStats {
    pub fn new() -> Self {
        Self {
            total: AtomicU64::new(0),
            processed: AtomicU64::new(0),
            found: AtomicU64::new(0),
            errors: AtomicU64::new(0),
            secrets: AtomicU64::new(0),
            waf_hits: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn add_total(&self, n: u64) {
        self.total.fetch_add(n, Ordering::Relaxed);
    }

    pub fn incr_processed(&self) {
        self.processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn incr_found(&self) {
        self.found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn incr_errors(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn incr_secrets(&self) {
        self.secrets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn incr_waf_hits(&self) {
        self.waf_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Consistent-enough snapshot for rendering a status line.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total: self.total.load(Ordering::Relaxed),
            processed: self.processed.load(Ordering::Relaxed),
            found: self.found.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            secrets: self.secrets.load(Ordering::Relaxed),
            waf_hits: self.waf_hits.load(Ordering::Relaxed),
            elapsed_secs: self.elapsed_secs(),
        }
    }
}

impl Default for ScanStats {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StatsSnapshot {
    pub total: u64,
    pub processed: u64,
    pub found: u64,
    pub errors: u64,
    pub secrets: u64,
    pub waf_hits: u64,
    pub elapsed_secs: f64,
}

impl StatsSnapshot {
    pub fn progress_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.processed as f64 / self.total as f64 * 100.0
    }

    pub fn requests_per_sec(&self) -> f64 {
        if self.elapsed_secs <= 0.0 {
            return 0.0;
        }
        self.processed as f64 / self.elapsed_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let stats = ScanStats::new();
        stats.add_total(10);
        stats.incr_processed();
        stats.incr_processed();
        stats.incr_found();
        stats.incr_errors();

        let snap = stats.snapshot();
        assert_eq!(snap.total, 10);
        assert_eq!(snap.processed, 2);
        assert_eq!(snap.found, 1);
        assert_eq!(snap.errors, 1);
        assert_eq!(snap.progress_percent(), 20.0);
    }

    #[test]
    fn test_progress_with_zero_total() {
        let stats = ScanStats::new();
        assert_eq!(stats.snapshot().progress_percent(), 0.0);
    }
}
