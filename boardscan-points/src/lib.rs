//! boardscan-points: points ledger loading and flight reconciliation

pub mod ledger;
pub mod matcher;

pub use ledger::{Ledger, LedgerLoad, PaymentLedgerEntry, load_ledger, load_ledger_from_reader};
pub use matcher::{MatchPolicy, PointsMatcher, TieBreak};
