//! Verdict engine combining the three detection signals.

use crate::detectors::blacklist::Blacklist;
use crate::detectors::frequency::FrequencySnapshot;
use crate::detectors::keywords::KeywordScanner;
use crate::types::transaction::Transaction;
use crate::types::verdict::{Verdict, VerdictReason};
use tracing::debug;

/// Applies the detection signals to one transaction at a time.
///
/// Built only after the counting pass, so the frequency snapshot it holds
/// covers the whole batch. Evaluation is a pure read against fixed state;
/// the engine can be shared freely across evaluations.
pub struct VerdictEngine<'a> {
    blacklist: &'a Blacklist,
    scanner: &'a KeywordScanner,
    frequency: &'a FrequencySnapshot,
    frequency_threshold: u64,
}

impl<'a> VerdictEngine<'a> {
    pub fn new(
        blacklist: &'a Blacklist,
        scanner: &'a KeywordScanner,
        frequency: &'a FrequencySnapshot,
        frequency_threshold: u64,
    ) -> Self {
        Self {
            blacklist,
            scanner,
            frequency,
            frequency_threshold,
        }
    }

    /// Evaluate one transaction. First matching signal wins:
    /// blacklist, then frequency, then keywords in priority order.
    pub fn evaluate(&self, tx: &Transaction) -> Verdict {
        if self.blacklist.contains(&tx.id) {
            debug!(id = %tx.id, "blacklist match");
            return Verdict::flag(VerdictReason::Blacklist);
        }

        // Over-threshold identifiers flag every occurrence in the batch,
        // including the first; the snapshot already holds full-batch counts.
        let occurrences = self.frequency.count(&tx.id);
        if occurrences > self.frequency_threshold {
            debug!(id = %tx.id, occurrences, "frequency threshold exceeded");
            return Verdict::flag(VerdictReason::HighFrequency);
        }

        if let Some(keyword) = self.scanner.first_match(&tx.description) {
            debug!(id = %tx.id, keyword, "keyword match");
            return Verdict::flag(VerdictReason::Keyword(keyword.to_string()));
        }

        Verdict::clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::frequency::FrequencyRecorder;

    fn snapshot_of(ids: &[&str]) -> FrequencySnapshot {
        let mut recorder = FrequencyRecorder::new();
        for id in ids {
            recorder.record(id);
        }
        recorder.freeze()
    }

    fn default_scanner() -> KeywordScanner {
        KeywordScanner::new(["crypto", "offshore", "bet"])
    }

    #[test]
    fn test_blacklist_wins_over_everything() {
        let blacklist = Blacklist::from_identifiers(["1001"]);
        let scanner = default_scanner();
        // 1001 is also over-threshold and carries a keyword.
        let snapshot = snapshot_of(&["1001", "1001", "1001", "1001", "1001"]);
        let engine = VerdictEngine::new(&blacklist, &scanner, &snapshot, 3);

        let tx = Transaction::new("1001", 50.0, "crypto payout");
        let verdict = engine.evaluate(&tx);

        assert_eq!(verdict.reason(), Some(&VerdictReason::Blacklist));
    }

    #[test]
    fn test_frequency_wins_over_keywords() {
        let blacklist = Blacklist::new();
        let scanner = default_scanner();
        let snapshot = snapshot_of(&["A1", "A1", "A1", "A1"]);
        let engine = VerdictEngine::new(&blacklist, &scanner, &snapshot, 3);

        let tx = Transaction::new("A1", 10.0, "offshore transfer");
        let verdict = engine.evaluate(&tx);

        assert_eq!(verdict.reason(), Some(&VerdictReason::HighFrequency));
    }

    #[test]
    fn test_frequency_at_threshold_is_not_flagged() {
        let blacklist = Blacklist::new();
        let scanner = default_scanner();
        let snapshot = snapshot_of(&["A1", "A1", "A1"]);
        let engine = VerdictEngine::new(&blacklist, &scanner, &snapshot, 3);

        let tx = Transaction::new("A1", 10.0, "groceries");
        assert!(!engine.evaluate(&tx).is_suspicious());
    }

    #[test]
    fn test_keyword_match_names_first_configured_keyword() {
        let blacklist = Blacklist::new();
        let scanner = default_scanner();
        let snapshot = snapshot_of(&["B2"]);
        let engine = VerdictEngine::new(&blacklist, &scanner, &snapshot, 3);

        let tx = Transaction::new("B2", 10.0, "offshore crypto bets");
        let verdict = engine.evaluate(&tx);

        assert_eq!(
            verdict.reason(),
            Some(&VerdictReason::Keyword("crypto".to_string()))
        );
    }

    #[test]
    fn test_clean_transaction_gets_clear_verdict() {
        let blacklist = Blacklist::from_identifiers(["9999"]);
        let scanner = default_scanner();
        let snapshot = snapshot_of(&["C3"]);
        let engine = VerdictEngine::new(&blacklist, &scanner, &snapshot, 3);

        let tx = Transaction::new("C3", 0.0, "gift");
        let verdict = engine.evaluate(&tx);

        assert!(!verdict.is_suspicious());
        assert_eq!(verdict.reason(), None);
    }

    #[test]
    fn test_evaluation_is_pure() {
        let blacklist = Blacklist::new();
        let scanner = default_scanner();
        let snapshot = snapshot_of(&["B2"]);
        let engine = VerdictEngine::new(&blacklist, &scanner, &snapshot, 3);

        let tx = Transaction::new("B2", 10.0, "invest in crypto now");
        assert_eq!(engine.evaluate(&tx), engine.evaluate(&tx));
    }
}
