//! Transaction data structures for batch screening

use serde::{Deserialize, Serialize};

/// A single financial transaction decoded from one input record.
///
/// Identifiers are not required to be unique across a batch; repeated
/// identifiers are exactly what the frequency detector looks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Account or transaction identifier
    pub id: String,

    /// Transaction amount; 0.0 when the source field failed to parse
    pub amount: f64,

    /// Free-text description, may contain the field delimiter
    pub description: String,
}

impl Transaction {
    /// Create a new transaction.
    pub fn new(id: impl Into<String>, amount: f64, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            amount,
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_serialization() {
        let tx = Transaction::new("tx_123", 50.0, "wire transfer");

        let json = serde_json::to_string(&tx).unwrap();
        let deserialized: Transaction = serde_json::from_str(&json).unwrap();

        assert_eq!(tx, deserialized);
    }
}
