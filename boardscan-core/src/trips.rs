//! Trip segmentation: group a chronological flight stream into round trips
//! that leave from and return to a home airport.
//!
//! Two states only. Outside a trip, a record departing a home airport opens
//! one; every record inside a trip extends it, and the trip closes on the
//! first record that lands back home. Records that cannot open a trip are
//! dropped, and a trip still open at the end of the stream yields no summary.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::config::HomeAirports;
use crate::date_codec::{CompactDate, days_between};
use crate::field::Field;
use crate::record::FlightRecord;

/// A closed round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripSummary {
    pub start_date: Field<CompactDate>,
    pub end_date: Field<CompactDate>,
    /// Origin, each stop in order, destination
    pub itinerary: Vec<Field<String>>,
    /// `None` when either boundary date is unresolved
    pub duration_days: Option<i64>,
    /// Distinct non-home airports visited
    pub stop_count: usize,
    /// Cumulative days spent at each non-home airport
    pub dwell_by_location: BTreeMap<String, i64>,
}

impl TripSummary {
    pub fn dwell_days(&self, airport: &str) -> Option<i64> {
        self.dwell_by_location.get(airport).copied()
    }

    pub fn route(&self) -> String {
        self.itinerary
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("→")
    }
}

/// A trip still accumulating when the stream ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenTrip {
    pub start_date: Field<CompactDate>,
    pub itinerary: Vec<Field<String>>,
}

/// When a leg landed somewhere, by calendar date and by source day ordinal.
#[derive(Debug, Clone, Copy)]
struct LegTime {
    date: Option<NaiveDate>,
    ordinal: Option<u32>,
}

impl LegTime {
    fn of(record: &FlightRecord) -> Self {
        Self {
            date: record.date(),
            ordinal: record.day_ordinal(),
        }
    }

    /// Days from `self` to `later`. Calendar dates are preferred since they
    /// survive a year boundary; raw ordinals are the fallback.
    fn days_until(&self, later: &LegTime) -> Option<i64> {
        match (self.date, later.date) {
            (Some(a), Some(b)) => Some((b - a).num_days()),
            _ => match (self.ordinal, later.ordinal) {
                (Some(a), Some(b)) => Some(i64::from(b) - i64::from(a)),
                _ => None,
            },
        }
    }
}

#[derive(Debug, Clone)]
struct TripBuilder {
    start_date: Field<CompactDate>,
    itinerary: Vec<Field<String>>,
    /// One entry per record; `legs[i]` is when record `i` flew.
    legs: Vec<LegTime>,
}

impl TripBuilder {
    fn open(record: &FlightRecord) -> Self {
        Self {
            start_date: record.calendar_date,
            itinerary: vec![
                record.departure_airport.clone(),
                record.arrival_airport.clone(),
            ],
            legs: vec![LegTime::of(record)],
        }
    }

    fn extend(&mut self, record: &FlightRecord) {
        self.itinerary.push(record.arrival_airport.clone());
        self.legs.push(LegTime::of(record));
    }

    fn close(self, record: &FlightRecord, home: &HomeAirports) -> TripSummary {
        let end_date = record.calendar_date;
        let duration_days = match (self.start_date.value(), end_date.value()) {
            (Some(start), Some(end)) => Some(days_between(start.date(), end.date())),
            _ => None,
        };

        // itinerary[j] for 0 < j < last was reached by leg j-1 and left by leg j.
        let last = self.itinerary.len() - 1;
        let mut visited = BTreeSet::new();
        let mut dwell_by_location = BTreeMap::new();
        for j in 1..last {
            let Some(code) = self.itinerary[j].as_deref() else {
                continue;
            };
            if home.contains(code) {
                continue;
            }
            visited.insert(code.to_string());
            if let Some(stay) = self.legs[j - 1].days_until(&self.legs[j]) {
                *dwell_by_location.entry(code.to_string()).or_insert(0) += stay;
            }
        }

        TripSummary {
            start_date: self.start_date,
            end_date,
            itinerary: self.itinerary,
            duration_days,
            stop_count: visited.len(),
            dwell_by_location,
        }
    }
}

/// Incremental segmenter; feed records in time order with [`push`](Self::push).
#[derive(Debug, Clone)]
pub struct TripSegmenter {
    home: HomeAirports,
    current: Option<TripBuilder>,
}

impl TripSegmenter {
    pub fn new(home: HomeAirports) -> Self {
        Self {
            home,
            current: None,
        }
    }

    pub fn is_in_trip(&self) -> bool {
        self.current.is_some()
    }

    /// Advance the state machine by one record, returning a summary when
    /// this record closes a trip.
    pub fn push(&mut self, record: &FlightRecord) -> Option<TripSummary> {
        match self.current.as_mut() {
            Some(trip) => trip.extend(record),
            None => {
                if !self.home.contains_field(&record.departure_airport) {
                    debug!(
                        departure = %record.departure_airport,
                        date = %record.calendar_date,
                        "record outside a trip does not leave home; dropped"
                    );
                    return None;
                }
                self.current = Some(TripBuilder::open(record));
            }
        }

        if self.home.contains_field(&record.arrival_airport) {
            let trip = self.current.take()?;
            return Some(trip.close(record, &self.home));
        }
        None
    }

    /// End of stream. A trip still open produces no summary; it is handed
    /// back so the caller can decide whether to report it.
    pub fn finish(self) -> Option<OpenTrip> {
        let trip = self.current?;
        debug!(
            start = %trip.start_date,
            legs = trip.legs.len(),
            "trip still open at end of stream; no summary emitted"
        );
        Some(OpenTrip {
            start_date: trip.start_date,
            itinerary: trip.itinerary,
        })
    }
}

/// Closed trips in closure order, plus any trip left open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Segmentation {
    pub trips: Vec<TripSummary>,
    pub open_trip: Option<OpenTrip>,
}

pub fn segment_trips<'a, I>(records: I, home: &HomeAirports) -> Segmentation
where
    I: IntoIterator<Item = &'a FlightRecord>,
{
    let mut segmenter = TripSegmenter::new(home.clone());
    let trips = records
        .into_iter()
        .filter_map(|r| segmenter.push(r))
        .collect();
    Segmentation {
        trips,
        open_trip: segmenter.finish(),
    }
}

/// Stable sort by travel date. Records without a date keep their relative
/// order and go last.
pub fn sort_chronologically(records: &mut [FlightRecord]) {
    records.sort_by_key(|r| (r.date().is_none(), r.date()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_codec::day_of_year_to_compact_date;

    fn leg(dep: &str, arr: &str, day: u32, year: i32) -> FlightRecord {
        FlightRecord::new(
            day_of_year_to_compact_date(day, year),
            Field::Parsed("K".into()),
            Field::Parsed(dep.into()),
            Field::Parsed(arr.into()),
            Field::Parsed("CX".into()),
            Field::Parsed("0100".into()),
            Field::Parsed(format!("{day:03}")),
        )
    }

    fn hkg_only() -> HomeAirports {
        HomeAirports::new(["HKG"]).unwrap()
    }

    #[test]
    fn test_round_trip_via_shanghai() {
        let records = vec![
            leg("AKL", "HKG", 357, 2024),
            leg("HKG", "PVG", 359, 2024),
            leg("PVG", "HKG", 365, 2024),
        ];
        let seg = segment_trips(&records, &hkg_only());
        assert_eq!(seg.trips.len(), 1);
        assert!(seg.open_trip.is_none());

        let trip = &seg.trips[0];
        assert_eq!(trip.route(), "HKG→PVG→HKG");
        assert_eq!(trip.start_date.to_string(), "241224");
        assert_eq!(trip.end_date.to_string(), "241230");
        assert_eq!(trip.duration_days, Some(6));
        assert_eq!(trip.stop_count, 1);
        assert_eq!(trip.dwell_days("PVG"), Some(6));
        assert_eq!(trip.dwell_by_location.len(), 1);
    }

    #[test]
    fn test_never_returning_home_yields_no_trip() {
        let records = vec![leg("HKG", "PVG", 10, 2024), leg("PVG", "PEK", 12, 2024)];
        let seg = segment_trips(&records, &hkg_only());
        assert!(seg.trips.is_empty());
        let open = seg.open_trip.unwrap();
        assert_eq!(open.itinerary.len(), 3);
        assert_eq!(open.start_date.to_string(), "240110");
    }

    #[test]
    fn test_home_to_home_opens_and_closes_at_once() {
        let records = vec![leg("HKG", "SZX", 40, 2024)];
        let seg = segment_trips(&records, &HomeAirports::default());
        assert_eq!(seg.trips.len(), 1);
        let trip = &seg.trips[0];
        assert_eq!(trip.route(), "HKG→SZX");
        assert_eq!(trip.duration_days, Some(0));
        assert_eq!(trip.stop_count, 0);
        assert!(trip.dwell_by_location.is_empty());
    }

    #[test]
    fn test_multi_stop_dwell_accumulates_per_airport() {
        let records = vec![
            leg("HKG", "NRT", 100, 2024),
            leg("NRT", "ICN", 104, 2024),
            leg("ICN", "NRT", 106, 2024),
            leg("NRT", "SZX", 109, 2024),
        ];
        let seg = segment_trips(&records, &HomeAirports::default());
        let trip = &seg.trips[0];
        assert_eq!(trip.duration_days, Some(9));
        assert_eq!(trip.stop_count, 2);
        assert_eq!(trip.dwell_days("NRT"), Some(4 + 3));
        assert_eq!(trip.dwell_days("ICN"), Some(2));
    }

    #[test]
    fn test_dwell_spans_year_boundary() {
        let records = vec![leg("HKG", "PVG", 365, 2024), leg("PVG", "HKG", 2, 2025)];
        let seg = segment_trips(&records, &hkg_only());
        let trip = &seg.trips[0];
        assert_eq!(trip.duration_days, Some(3));
        assert_eq!(trip.dwell_days("PVG"), Some(3));
    }

    #[test]
    fn test_unresolved_date_leaves_duration_uncomputed() {
        let mut closing = leg("PVG", "HKG", 20, 2024);
        closing.calendar_date = Field::Sentinel;
        let records = vec![leg("HKG", "PVG", 15, 2024), closing];
        let seg = segment_trips(&records, &hkg_only());
        let trip = &seg.trips[0];
        assert_eq!(trip.duration_days, None);
        assert!(trip.end_date.is_sentinel());
        // Falls back to the day ordinals.
        assert_eq!(trip.dwell_days("PVG"), Some(5));
    }

    #[test]
    fn test_consecutive_trips_and_dropped_fragments() {
        let records = vec![
            leg("PEK", "PVG", 1, 2024),
            leg("HKG", "TPE", 5, 2024),
            leg("TPE", "HKG", 8, 2024),
            leg("NRT", "KIX", 9, 2024),
            leg("SZX", "BKK", 20, 2024),
            leg("BKK", "SZX", 27, 2024),
        ];
        let seg = segment_trips(&records, &HomeAirports::default());
        assert_eq!(seg.trips.len(), 2);
        assert_eq!(seg.trips[0].route(), "HKG→TPE→HKG");
        assert_eq!(seg.trips[1].route(), "SZX→BKK→SZX");
        assert_eq!(seg.trips[1].duration_days, Some(7));
    }

    #[test]
    fn test_push_reports_state() {
        let mut seg = TripSegmenter::new(hkg_only());
        assert!(seg.push(&leg("HKG", "PVG", 10, 2024)).is_none());
        assert!(seg.is_in_trip());
        assert!(seg.push(&leg("PVG", "HKG", 12, 2024)).is_some());
        assert!(!seg.is_in_trip());
        assert!(seg.finish().is_none());
    }

    #[test]
    fn test_sort_chronologically_puts_undated_last() {
        let mut undated = leg("AAA", "BBB", 1, 2024);
        undated.calendar_date = Field::Sentinel;
        let mut records = vec![
            leg("PVG", "HKG", 20, 2024),
            undated,
            leg("HKG", "PVG", 10, 2024),
        ];
        sort_chronologically(&mut records);
        assert_eq!(records[0].departure_airport.as_deref(), Some("HKG"));
        assert_eq!(records[1].departure_airport.as_deref(), Some("PVG"));
        assert!(records[2].calendar_date.is_sentinel());
    }
}
