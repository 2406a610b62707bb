//! Line-delimited record decoding for incoming batches.
//!
//! Record format: `id,amount,description`. Descriptions may contain the
//! delimiter, so fields beyond the second are rejoined with it. Blank lines
//! are skipped and lines with fewer than three fields are dropped; neither
//! stops the batch.

use crate::types::transaction::Transaction;
use tracing::debug;

/// Field delimiter for incoming records.
pub const FIELD_DELIMITER: char = ',';

/// Minimum fields per record: identifier, amount, description.
const MIN_FIELDS: usize = 3;

/// Outcome of decoding one input line.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedLine {
    /// An accepted transaction. `amount_defaulted` is set when the amount
    /// field failed to parse and fell back to zero.
    Record {
        tx: Transaction,
        amount_defaulted: bool,
    },
    /// Empty line, skipped.
    Blank,
    /// Fewer than three fields, dropped.
    Malformed,
}

/// Decode one input line.
pub fn decode_line(line: &str) -> DecodedLine {
    if line.is_empty() {
        return DecodedLine::Blank;
    }

    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if fields.len() < MIN_FIELDS {
        debug!(fields = fields.len(), "dropping malformed record");
        return DecodedLine::Malformed;
    }

    let id = fields[0].to_string();
    let (amount, amount_defaulted) = match fields[1].trim().parse::<f64>() {
        Ok(amount) => (amount, false),
        Err(_) => {
            debug!(id = %id, raw = fields[1], "amount failed to parse, defaulting to 0.0");
            (0.0, true)
        }
    };
    // Rejoin policy: everything past the amount field is description text.
    let description = fields[MIN_FIELDS - 1..].join(&FIELD_DELIMITER.to_string());

    DecodedLine::Record {
        tx: Transaction {
            id,
            amount,
            description,
        },
        amount_defaulted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_record(line: &str) -> (Transaction, bool) {
        match decode_line(line) {
            DecodedLine::Record {
                tx,
                amount_defaulted,
            } => (tx, amount_defaulted),
            other => panic!("expected record for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_three_field_record() {
        let (tx, defaulted) = expect_record("1001,50.00,wire transfer");

        assert_eq!(tx.id, "1001");
        assert_eq!(tx.amount, 50.0);
        assert_eq!(tx.description, "wire transfer");
        assert!(!defaulted);
    }

    #[test]
    fn test_description_commas_are_rejoined() {
        let (tx, _) = expect_record("B2,10,invest in crypto, now, please");

        assert_eq!(tx.description, "invest in crypto, now, please");
    }

    #[test]
    fn test_unparseable_amount_defaults_to_zero() {
        let (tx, defaulted) = expect_record("C3,notanumber,gift");

        assert_eq!(tx.amount, 0.0);
        assert!(defaulted);
        assert_eq!(tx.id, "C3");
        assert_eq!(tx.description, "gift");
    }

    #[test]
    fn test_blank_line_is_skipped() {
        assert_eq!(decode_line(""), DecodedLine::Blank);
    }

    #[test]
    fn test_too_few_fields_is_malformed() {
        assert_eq!(decode_line("justanid"), DecodedLine::Malformed);
        assert_eq!(decode_line("id,42"), DecodedLine::Malformed);
    }

    #[test]
    fn test_empty_fields_still_decode() {
        // Three delimiters worth of empty fields is structurally valid.
        let (tx, defaulted) = expect_record(",,");

        assert_eq!(tx.id, "");
        assert_eq!(tx.amount, 0.0);
        assert!(defaulted);
        assert_eq!(tx.description, "");
    }

    #[test]
    fn test_negative_and_fractional_amounts() {
        let (tx, defaulted) = expect_record("D4,-12.5,refund");
        assert_eq!(tx.amount, -12.5);
        assert!(!defaulted);
    }
}
