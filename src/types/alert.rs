//! Fraud alert data structures

use crate::types::verdict::ScreeningRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Alert raised for a transaction that was flagged suspicious.
///
/// Alerts are a side channel derived from the screening output; they carry
/// the same reason the verdict carried and never feed back into screening.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudAlert {
    /// Unique alert identifier
    pub alert_id: String,

    /// Identifier of the flagged transaction
    pub transaction_id: String,

    /// Transaction amount
    pub amount: f64,

    /// Reason label copied from the verdict
    pub reason: String,

    /// Alert generation timestamp
    pub flagged_at: DateTime<Utc>,
}

impl FraudAlert {
    /// Build an alert from a suspicious screening record.
    ///
    /// Returns `None` for clean records; only flagged transactions alert.
    pub fn from_record(record: &ScreeningRecord) -> Option<Self> {
        if !record.is_suspicious {
            return None;
        }

        Some(Self {
            alert_id: uuid::Uuid::new_v4().to_string(),
            transaction_id: record.id.clone(),
            amount: record.amount,
            reason: record.reason.clone(),
            flagged_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::transaction::Transaction;
    use crate::types::verdict::{Verdict, VerdictReason};

    #[test]
    fn test_alert_from_suspicious_record() {
        let tx = Transaction::new("9999", 250.0, "offshore payout");
        let record =
            ScreeningRecord::from_verdict(&tx, &Verdict::flag(VerdictReason::Blacklist));

        let alert = FraudAlert::from_record(&record).expect("flagged record must alert");
        assert_eq!(alert.transaction_id, "9999");
        assert_eq!(alert.reason, "blacklisted identifier");
        assert!(!alert.alert_id.is_empty());
    }

    #[test]
    fn test_no_alert_from_clean_record() {
        let tx = Transaction::new("C3", 10.0, "gift");
        let record = ScreeningRecord::from_verdict(&tx, &Verdict::clear());

        assert!(FraudAlert::from_record(&record).is_none());
    }

    #[test]
    fn test_alert_serialization() {
        let tx = Transaction::new("B2", 10.0, "invest in crypto now");
        let record = ScreeningRecord::from_verdict(
            &tx,
            &Verdict::flag(VerdictReason::Keyword("crypto".to_string())),
        );

        let alert = FraudAlert::from_record(&record).unwrap();
        let json = serde_json::to_string(&alert).unwrap();
        let deserialized: FraudAlert = serde_json::from_str(&json).unwrap();

        assert_eq!(alert.alert_id, deserialized.alert_id);
        assert_eq!(alert.reason, deserialized.reason);
    }
}
