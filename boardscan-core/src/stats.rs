//! Travel statistics over a set of flight records.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::record::FlightRecord;

/// Summary counts; sentinel fields are not counted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TravelStats {
    /// Flights per carrier, most used first
    pub airlines: Vec<(String, usize)>,
    /// Departures plus arrivals per airport, busiest first
    pub airports: Vec<(String, usize)>,
    /// Flights per calendar month (1-12)
    pub monthly: BTreeMap<u32, usize>,
}

impl TravelStats {
    pub fn from_records(records: &[FlightRecord]) -> Self {
        Self {
            airlines: airline_usage(records),
            airports: busiest_airports(records),
            monthly: monthly_frequency(records),
        }
    }
}

fn ranked(counts: HashMap<String, usize>) -> Vec<(String, usize)> {
    let mut out: Vec<_> = counts.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

pub fn airline_usage(records: &[FlightRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for code in records.iter().filter_map(|r| r.airline_code.as_deref()) {
        *counts.entry(code.to_string()).or_insert(0) += 1;
    }
    ranked(counts)
}

pub fn busiest_airports(records: &[FlightRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for r in records {
        for code in [&r.departure_airport, &r.arrival_airport]
            .into_iter()
            .filter_map(|f| f.as_deref())
        {
            *counts.entry(code.to_string()).or_insert(0) += 1;
        }
    }
    ranked(counts)
}

pub fn monthly_frequency(records: &[FlightRecord]) -> BTreeMap<u32, usize> {
    let mut monthly = BTreeMap::new();
    for date in records.iter().filter_map(|r| r.calendar_date.value()) {
        *monthly.entry(date.month()).or_insert(0) += 1;
    }
    monthly
}
