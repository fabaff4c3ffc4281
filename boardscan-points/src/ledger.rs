//! Load the points-paid ledger CSV into typed entries.
//!
//! One header row, then at least five columns:
//! Date Paid,Person,Points,Airline,Flight
//! 241222,K,38000,CX,198

use anyhow::{Context, Result};
use boardscan_core::parse_compact_date;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Columns a row needs before it is considered.
pub const REQUIRED_COLUMNS: usize = 5;

/// A prepaid/points-redeemed flight
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentLedgerEntry {
    pub date_paid: NaiveDate,
    /// Compared case-insensitively with the traveler code
    pub traveler_name: String,
    pub airline_code: String,
    /// Compared by numeric value, so `0198` equals `198`
    pub flight_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    TooFewColumns(usize),
    UnparseableDate(String),
    /// Row bytes are not valid UTF-8
    Undecodable,
}

/// A ledger row left out of the ledger, by line number in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: usize,
    pub reason: SkipReason,
}

/// Read-only set of ledger entries for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: Vec<PaymentLedgerEntry>,
}

impl Ledger {
    pub fn new(entries: Vec<PaymentLedgerEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PaymentLedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of a load: the entries kept and the rows that were not.
#[derive(Debug, Clone, Default)]
pub struct LedgerLoad {
    pub ledger: Ledger,
    pub skipped: Vec<SkippedRow>,
}

/// Load a ledger CSV from disk. Short, undated or undecodable rows are skipped
/// with a warning.
pub fn load_ledger(path: impl AsRef<Path>) -> Result<LedgerLoad> {
    let path = path.as_ref();
    let file =
        std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    load_ledger_from_reader(file).with_context(|| format!("reading {}", path.display()))
}

pub fn load_ledger_from_reader<R: Read>(reader: R) -> Result<LedgerLoad> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut entries = Vec::new();
    let mut skipped = Vec::new();

    for (idx, result) in rdr.records().enumerate() {
        // Header is line 1.
        let record = match result {
            Ok(record) => record,
            Err(e) if matches!(e.kind(), csv::ErrorKind::Utf8 { .. }) => {
                let line = e.position().map(|p| p.line() as usize).unwrap_or(idx + 2);
                warn!(line, error = %e, "skipping undecodable points row");
                skipped.push(SkippedRow {
                    line,
                    reason: SkipReason::Undecodable,
                });
                continue;
            }
            Err(e) => return Err(e).context("reading points ledger"),
        };
        let line = record.position().map(|p| p.line() as usize).unwrap_or(idx + 2);

        if record.len() < REQUIRED_COLUMNS {
            warn!(line, columns = record.len(), "skipping malformed points row");
            skipped.push(SkippedRow {
                line,
                reason: SkipReason::TooFewColumns(record.len()),
            });
            continue;
        }

        let raw_date = record.get(0).unwrap_or("");
        let Some(date_paid) = parse_compact_date(raw_date) else {
            warn!(line, date = raw_date, "skipping points row with unreadable date");
            skipped.push(SkippedRow {
                line,
                reason: SkipReason::UnparseableDate(raw_date.to_string()),
            });
            continue;
        };

        entries.push(PaymentLedgerEntry {
            date_paid,
            traveler_name: record.get(1).unwrap_or("").to_string(),
            airline_code: record.get(3).unwrap_or("").to_string(),
            flight_number: record.get(4).unwrap_or("").to_string(),
        });
    }

    info!(entries = entries.len(), skipped = skipped.len(), "loaded points ledger");
    Ok(LedgerLoad {
        ledger: Ledger::new(entries),
        skipped,
    })
}
