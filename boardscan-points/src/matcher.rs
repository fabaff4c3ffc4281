//! Points reconciliation: does a scanned flight have a ledger payment?
//!
//! A ledger entry corroborates a record when person, airline and flight
//! number agree and the payment date is within the tolerance window of the
//! travel date.

use boardscan_core::{FlightRecord, PointsStatus, days_between};
use serde::{Deserialize, Serialize};

use crate::ledger::{Ledger, PaymentLedgerEntry};

pub const DEFAULT_TOLERANCE_DAYS: i64 = 2;

/// Which entry wins when several qualify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Ledger order; the first qualifying entry.
    #[default]
    FirstMatch,
    /// Smallest date difference; ledger order among equals.
    ClosestDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchPolicy {
    pub tolerance_days: i64,
    pub tie_break: TieBreak,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            tolerance_days: DEFAULT_TOLERANCE_DAYS,
            tie_break: TieBreak::default(),
        }
    }
}

/// Flight numbers are equal by numeric value (`0198` == `198`).
pub fn flight_numbers_equal(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim(), b.trim());
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x == y,
        _ => a.trim_start_matches('0').eq_ignore_ascii_case(b.trim_start_matches('0')),
    }
}

fn same_text(a: &str, b: &str) -> bool {
    a.trim().to_uppercase() == b.trim().to_uppercase()
}

pub struct PointsMatcher {
    ledger: Ledger,
    policy: MatchPolicy,
}

impl PointsMatcher {
    pub fn new(ledger: Ledger, policy: MatchPolicy) -> Self {
        Self { ledger, policy }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// The entry that corroborates `record`, if any. Records with an
    /// unresolved date, traveler, airline or flight number never match.
    pub fn find_match(&self, record: &FlightRecord) -> Option<&PaymentLedgerEntry> {
        let date = record.date()?;
        let person = record.traveler_code.as_deref()?;
        let airline = record.airline_code.as_deref()?;
        let flight = record.flight_number.as_deref()?;

        let mut candidates = self.ledger.entries().iter().filter_map(|e| {
            if !same_text(&e.traveler_name, person)
                || !same_text(&e.airline_code, airline)
                || !flight_numbers_equal(&e.flight_number, flight)
            {
                return None;
            }
            let gap = days_between(date, e.date_paid);
            (gap <= self.policy.tolerance_days).then_some((gap, e))
        });

        match self.policy.tie_break {
            TieBreak::FirstMatch => candidates.next().map(|(_, e)| e),
            // min_by_key keeps the first of equal keys.
            TieBreak::ClosestDate => candidates.min_by_key(|(gap, _)| *gap).map(|(_, e)| e),
        }
    }

    pub fn matches(&self, record: &FlightRecord) -> bool {
        self.find_match(record).is_some()
    }

    /// Set the record's points flag from the ledger.
    pub fn annotate(&self, record: FlightRecord) -> FlightRecord {
        let status = if self.matches(&record) {
            PointsStatus::Matched
        } else {
            PointsStatus::Unmatched
        };
        record.with_points_status(status)
    }

    pub fn annotate_all(&self, records: Vec<FlightRecord>) -> Vec<FlightRecord> {
        records.into_iter().map(|r| self.annotate(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardscan_core::{Field, parse_compact_date};

    fn record(date: &str) -> FlightRecord {
        FlightRecord::new(
            Field::from(boardscan_core::CompactDate::parse(date)),
            Field::Parsed("K".into()),
            Field::Parsed("AKL".into()),
            Field::Parsed("HKG".into()),
            Field::Parsed("CX".into()),
            Field::Parsed("0198".into()),
            Field::Parsed("359".into()),
        )
    }

    fn entry(date: &str, person: &str, airline: &str, flight: &str) -> PaymentLedgerEntry {
        PaymentLedgerEntry {
            date_paid: parse_compact_date(date).unwrap(),
            traveler_name: person.into(),
            airline_code: airline.into(),
            flight_number: flight.into(),
        }
    }

    fn matcher(entries: Vec<PaymentLedgerEntry>, policy: MatchPolicy) -> PointsMatcher {
        PointsMatcher::new(Ledger::new(entries), policy)
    }

    #[test]
    fn test_case_and_padding_insensitive_within_tolerance() {
        let m = matcher(vec![entry("241222", "k", "cx", "198")], MatchPolicy::default());
        assert!(m.matches(&record("241224")));
    }

    #[test]
    fn test_three_days_apart_does_not_match() {
        let m = matcher(vec![entry("241221", "k", "cx", "198")], MatchPolicy::default());
        assert!(!m.matches(&record("241224")));
    }

    #[test]
    fn test_each_predicate_required() {
        let m = matcher(
            vec![
                entry("241224", "S", "CX", "198"),
                entry("241224", "K", "NZ", "198"),
                entry("241224", "K", "CX", "199"),
            ],
            MatchPolicy::default(),
        );
        assert!(!m.matches(&record("241224")));
    }

    #[test]
    fn test_unresolved_date_never_matches() {
        let m = matcher(vec![entry("241224", "K", "CX", "198")], MatchPolicy::default());
        let mut r = record("241224");
        r.calendar_date = Field::Sentinel;
        assert!(!m.matches(&r));
        assert_eq!(m.annotate(r).points_matched(), PointsStatus::Unmatched);
    }

    #[test]
    fn test_tie_break_policies() {
        let entries = vec![entry("241222", "K", "CX", "198"), entry("241224", "K", "CX", "0198")];

        let first = matcher(entries.clone(), MatchPolicy::default());
        let hit = first.find_match(&record("241224")).unwrap();
        assert_eq!(hit.date_paid, parse_compact_date("241222").unwrap());

        let closest = matcher(
            entries,
            MatchPolicy {
                tie_break: TieBreak::ClosestDate,
                ..MatchPolicy::default()
            },
        );
        let hit = closest.find_match(&record("241224")).unwrap();
        assert_eq!(hit.date_paid, parse_compact_date("241224").unwrap());
    }

    #[test]
    fn test_tolerance_is_configurable() {
        let m = matcher(
            vec![entry("241220", "K", "CX", "198")],
            MatchPolicy {
                tolerance_days: 4,
                ..MatchPolicy::default()
            },
        );
        assert!(m.matches(&record("241224")));
    }

    #[test]
    fn test_annotate_sets_flag() {
        let m = matcher(vec![entry("241224", "K", "CX", "198")], MatchPolicy::default());
        let r = m.annotate(record("241225"));
        assert_eq!(r.points_matched(), PointsStatus::Matched);
        assert!(r.render(boardscan_core::Delimiter::Pipe).ends_with("|Y"));
    }

    #[test]
    fn test_flight_number_equality() {
        assert!(flight_numbers_equal("0198", "198"));
        assert!(flight_numbers_equal(" 0628", "628 "));
        assert!(!flight_numbers_equal("0198", "1980"));
        assert!(flight_numbers_equal("0000", "0"));
    }
}
