//! Verdict types produced by the screening engine

use crate::types::transaction::Transaction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a transaction was flagged.
///
/// The enumeration is closed: output reason strings come from
/// [`VerdictReason::label`] and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictReason {
    /// Identifier is on the configured blacklist
    Blacklist,
    /// Identifier occurs more often in the batch than the threshold allows
    HighFrequency,
    /// Description contains the named watch keyword
    Keyword(String),
}

impl VerdictReason {
    /// Stable label used in output records.
    pub fn label(&self) -> String {
        match self {
            VerdictReason::Blacklist => "blacklisted identifier".to_string(),
            VerdictReason::HighFrequency => "high-frequency identifier".to_string(),
            VerdictReason::Keyword(kw) => format!("keyword match: '{}'", kw),
        }
    }
}

impl fmt::Display for VerdictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Outcome of evaluating one transaction.
///
/// A verdict is suspicious exactly when it carries a reason, so the
/// "reason present iff suspicious" invariant cannot be violated by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    reason: Option<VerdictReason>,
}

impl Verdict {
    /// A clean verdict with no reason.
    pub fn clear() -> Self {
        Self { reason: None }
    }

    /// A suspicious verdict carrying its reason.
    pub fn flag(reason: VerdictReason) -> Self {
        Self {
            reason: Some(reason),
        }
    }

    pub fn is_suspicious(&self) -> bool {
        self.reason.is_some()
    }

    pub fn reason(&self) -> Option<&VerdictReason> {
        self.reason.as_ref()
    }

    /// Reason label for output records; empty string when clean.
    pub fn reason_label(&self) -> String {
        self.reason.as_ref().map(VerdictReason::label).unwrap_or_default()
    }
}

/// One output row per accepted transaction.
///
/// Field names are part of the output contract consumed downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningRecord {
    pub id: String,
    pub amount: f64,
    pub description: String,
    pub is_suspicious: bool,
    pub reason: String,
}

impl ScreeningRecord {
    /// Combine a transaction with its verdict into an output record.
    pub fn from_verdict(tx: &Transaction, verdict: &Verdict) -> Self {
        Self {
            id: tx.id.clone(),
            amount: tx.amount,
            description: tx.description.clone(),
            is_suspicious: verdict.is_suspicious(),
            reason: verdict.reason_label(),
        }
    }
}
