//! Report emission for screened batches.
//!
//! The report is a single JSON array of screening records; downstream
//! consumers parse it as one document, so nothing else may be written to
//! the same stream.

use crate::types::alert::FraudAlert;
use crate::types::verdict::ScreeningRecord;
use anyhow::{Context, Result};
use std::io::Write;
use tracing::debug;

/// Serializes screening records to their JSON report form.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportWriter {
    pretty: bool,
}

impl ReportWriter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Write the report for a batch to `out`.
    pub fn write<W: Write>(&self, records: &[ScreeningRecord], mut out: W) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut out, records)
        } else {
            serde_json::to_writer(&mut out, records)
        }
        .context("failed to serialize screening report")?;
        out.write_all(b"\n").context("failed to write report")?;

        debug!(records = records.len(), "screening report written");
        Ok(())
    }

    /// Render the report as a JSON string.
    pub fn render(&self, records: &[ScreeningRecord]) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(records)
        } else {
            serde_json::to_string(records)
        }
        .context("failed to serialize screening report")?;
        Ok(json)
    }
}

/// Derive alerts for the suspicious records of a batch, in record order.
pub fn alerts_for(records: &[ScreeningRecord]) -> Vec<FraudAlert> {
    records.iter().filter_map(FraudAlert::from_record).collect()
}

/// Write derived alerts as a JSON array to `out`.
pub fn write_alerts<W: Write>(alerts: &[FraudAlert], mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, alerts).context("failed to serialize alerts")?;
    out.write_all(b"\n").context("failed to write alerts")?;
    Ok(())
}
