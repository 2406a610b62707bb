//! Performance metrics and statistics tracking for batch screening.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::info;

/// Metrics collector for one screening run.
pub struct BatchMetrics {
    /// Total transactions accepted and evaluated
    pub transactions_processed: AtomicU64,
    /// Transactions flagged suspicious
    pub records_flagged: AtomicU64,
    /// Input lines dropped as malformed
    pub lines_dropped: AtomicU64,
    /// Amounts that failed to parse and defaulted to zero
    pub amounts_defaulted: AtomicU64,
    /// Verdict counts keyed by reason label
    verdicts_by_reason: RwLock<HashMap<String, u64>>,
    /// Per-evaluation times (in microseconds)
    evaluation_times: RwLock<Vec<u64>>,
    /// Start time for rate calculation
    start_time: Instant,
}

impl BatchMetrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            transactions_processed: AtomicU64::new(0),
            records_flagged: AtomicU64::new(0),
            lines_dropped: AtomicU64::new(0),
            amounts_defaulted: AtomicU64::new(0),
            verdicts_by_reason: RwLock::new(HashMap::new()),
            evaluation_times: RwLock::new(Vec::with_capacity(1000)),
            start_time: Instant::now(),
        }
    }

    /// Record an evaluated transaction and its verdict outcome.
    pub fn record_verdict(&self, reason_label: &str, evaluation_time: Duration) {
        self.transactions_processed.fetch_add(1, Ordering::Relaxed);

        if !reason_label.is_empty() {
            self.records_flagged.fetch_add(1, Ordering::Relaxed);
            if let Ok(mut by_reason) = self.verdicts_by_reason.write() {
                *by_reason.entry(reason_label.to_string()).or_insert(0) += 1;
            }
        }

        if let Ok(mut times) = self.evaluation_times.write() {
            times.push(evaluation_time.as_micros() as u64);
            // Keep only the most recent window for memory efficiency
            if times.len() > 10000 {
                times.drain(0..5000);
            }
        }
    }

    /// Record a malformed line dropped at the input boundary.
    pub fn record_dropped_line(&self) {
        self.lines_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an amount that failed to parse and defaulted to zero.
    pub fn record_defaulted_amount(&self) {
        self.amounts_defaulted.fetch_add(1, Ordering::Relaxed);
    }

    /// Get evaluation time statistics.
    pub fn get_evaluation_stats(&self) -> EvaluationStats {
        let times = self.evaluation_times.read().unwrap();
        if times.is_empty() {
            return EvaluationStats::default();
        }

        let mut sorted: Vec<u64> = times.clone();
        sorted.sort_unstable();

        let sum: u64 = sorted.iter().sum();
        let count = sorted.len();

        EvaluationStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: sorted[count / 2],
            p95_us: sorted[(count as f64 * 0.95) as usize],
            p99_us: sorted[(count as f64 * 0.99) as usize],
            max_us: *sorted.last().unwrap_or(&0),
        }
    }

    /// Current throughput (transactions per second since construction).
    pub fn get_throughput(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.transactions_processed.load(Ordering::Relaxed) as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Verdict counts by reason label.
    pub fn get_verdicts_by_reason(&self) -> HashMap<String, u64> {
        self.verdicts_by_reason.read().unwrap().clone()
    }

    /// Log a summary of the run.
    pub fn print_summary(&self) {
        let processed = self.transactions_processed.load(Ordering::Relaxed);
        let flagged = self.records_flagged.load(Ordering::Relaxed);
        let dropped = self.lines_dropped.load(Ordering::Relaxed);
        let defaulted = self.amounts_defaulted.load(Ordering::Relaxed);
        let flag_rate = if processed > 0 {
            (flagged as f64 / processed as f64) * 100.0
        } else {
            0.0
        };

        let stats = self.get_evaluation_stats();
        let by_reason = self.get_verdicts_by_reason();

        info!("═══════════════ BATCH SCREENING SUMMARY ═══════════════");
        info!(
            "processed: {}  flagged: {} ({:.1}%)  dropped: {}  defaulted amounts: {}",
            processed, flagged, flag_rate, dropped, defaulted
        );
        info!(
            "evaluation time (μs): mean={} p50={} p95={} p99={} max={}",
            stats.mean_us, stats.p50_us, stats.p95_us, stats.p99_us, stats.max_us
        );
        info!("throughput: {:.1} tx/s", self.get_throughput());
        for (reason, count) in &by_reason {
            let pct = if flagged > 0 {
                (*count as f64 / flagged as f64) * 100.0
            } else {
                0.0
            };
            info!("  {}: {} ({:.1}%)", reason, count, pct);
        }
        info!("═══════════════════════════════════════════════════════");
    }
}

impl Default for BatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluation time statistics.
#[derive(Debug, Default)]
pub struct EvaluationStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub p99_us: u64,
    pub max_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_recording() {
        let metrics = BatchMetrics::new();

        metrics.record_verdict("", Duration::from_micros(100));
        metrics.record_verdict("blacklisted identifier", Duration::from_micros(200));
        metrics.record_dropped_line();
        metrics.record_defaulted_amount();

        assert_eq!(metrics.transactions_processed.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.records_flagged.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.lines_dropped.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.amounts_defaulted.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_verdicts_grouped_by_reason() {
        let metrics = BatchMetrics::new();

        metrics.record_verdict("high-frequency identifier", Duration::from_micros(50));
        metrics.record_verdict("high-frequency identifier", Duration::from_micros(60));
        metrics.record_verdict("keyword match: 'crypto'", Duration::from_micros(70));

        let by_reason = metrics.get_verdicts_by_reason();
        assert_eq!(by_reason.get("high-frequency identifier"), Some(&2));
        assert_eq!(by_reason.get("keyword match: 'crypto'"), Some(&1));
    }

    #[test]
    fn test_evaluation_stats() {
        let metrics = BatchMetrics::new();
        for us in [100, 200, 300, 400] {
            metrics.record_verdict("", Duration::from_micros(us));
        }

        let stats = metrics.get_evaluation_stats();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean_us, 250);
        assert_eq!(stats.max_us, 400);
    }
}
