//! Type definitions for the screening engine

pub mod alert;
pub mod transaction;
pub mod verdict;

pub use alert::FraudAlert;
pub use transaction::Transaction;
pub use verdict::{ScreeningRecord, Verdict, VerdictReason};
