//! Two-phase batch screening pipeline.
//!
//! Phase one ingests the whole input: decoding records and counting
//! identifier occurrences. Phase two freezes the counts, builds the verdict
//! engine, and evaluates every transaction in input order. Frequency
//! verdicts depend on full-batch counts, so no verdict is computed before
//! ingestion completes.

use crate::config::DetectionConfig;
use crate::decoder::{self, DecodedLine};
use crate::detectors::{
    Blacklist, FrequencyRecorder, FrequencySnapshot, KeywordScanner, VerdictEngine,
};
use crate::metrics::BatchMetrics;
use crate::types::transaction::Transaction;
use crate::types::verdict::ScreeningRecord;
use anyhow::{Context, Result};
use std::io::BufRead;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Batch screening pipeline wired from configuration.
pub struct ScreeningPipeline {
    blacklist: Blacklist,
    scanner: KeywordScanner,
    frequency_threshold: u64,
    metrics: Arc<BatchMetrics>,
}

impl ScreeningPipeline {
    /// Build a pipeline from detection configuration.
    pub fn new(detection: &DetectionConfig, metrics: Arc<BatchMetrics>) -> Self {
        let blacklist = Blacklist::from_identifiers(&detection.blacklist);
        let scanner = KeywordScanner::new(&detection.keywords);

        info!(
            blacklist_size = blacklist.len(),
            keywords = scanner.len(),
            frequency_threshold = detection.frequency_threshold,
            "Screening pipeline initialized"
        );

        Self {
            blacklist,
            scanner,
            frequency_threshold: detection.frequency_threshold,
            metrics,
        }
    }

    /// Screen a line-delimited batch, returning one record per accepted
    /// transaction in input order.
    pub fn screen<R: BufRead>(&self, input: R) -> Result<Vec<ScreeningRecord>> {
        let (transactions, recorder) = self.ingest(input)?;
        // Freezing the recorder is the barrier between the two phases:
        // every count is final before the first verdict is computed.
        Ok(self.evaluate(&transactions, recorder.freeze()))
    }

    /// Ingestion pass: decode every line and count identifier occurrences.
    fn ingest<R: BufRead>(&self, input: R) -> Result<(Vec<Transaction>, FrequencyRecorder)> {
        let mut transactions = Vec::new();
        let mut recorder = FrequencyRecorder::new();

        for line in input.lines() {
            let line = line.context("failed to read input line")?;
            match decoder::decode_line(&line) {
                DecodedLine::Record {
                    tx,
                    amount_defaulted,
                } => {
                    if amount_defaulted {
                        self.metrics.record_defaulted_amount();
                    }
                    recorder.record(&tx.id);
                    transactions.push(tx);
                }
                DecodedLine::Blank => {}
                DecodedLine::Malformed => self.metrics.record_dropped_line(),
            }
        }

        debug!(accepted = transactions.len(), "ingestion pass complete");
        Ok((transactions, recorder))
    }

    /// Evaluation pass over the fully ingested batch.
    fn evaluate(
        &self,
        transactions: &[Transaction],
        snapshot: FrequencySnapshot,
    ) -> Vec<ScreeningRecord> {
        let engine = VerdictEngine::new(
            &self.blacklist,
            &self.scanner,
            &snapshot,
            self.frequency_threshold,
        );

        transactions
            .iter()
            .map(|tx| {
                let started = Instant::now();
                let verdict = engine.evaluate(tx);
                self.metrics
                    .record_verdict(&verdict.reason_label(), started.elapsed());
                ScreeningRecord::from_verdict(tx, &verdict)
            })
            .collect()
    }
}
