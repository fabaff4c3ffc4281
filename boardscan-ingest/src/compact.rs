//! Reader for the rendered record form, so reports can be rebuilt from
//! previously exported files.
//!
//!   241224|K|AKL|HKG|CX|0198|359
//!   241224, K, AKL, HKG, CX, 0198, 359, Y

use boardscan_core::record::{
    is_airline_code, is_airport_code, is_day_of_year, is_flight_number, is_traveler_code,
};
use boardscan_core::{CompactDate, Field, FlightRecord, PointsStatus, SENTINEL};
use tracing::warn;

fn field(raw: &str, shape: fn(&str) -> bool) -> Field<String> {
    if raw == SENTINEL || !shape(raw) {
        return Field::Sentinel;
    }
    Field::Parsed(raw.to_string())
}

/// Parse one compact row. Rows without 7 or 8 fields give `None`; inside a
/// row, each malformed field becomes the sentinel.
pub fn parse_compact_line(line: &str) -> Option<FlightRecord> {
    let delimiter = if line.contains('|') { '|' } else { ',' };
    let cols: Vec<&str> = line.split(delimiter).map(str::trim).collect();
    if !(7..=8).contains(&cols.len()) {
        return None;
    }

    let record = FlightRecord::new(
        CompactDate::parse(cols[0]).into(),
        field(cols[1], is_traveler_code),
        field(cols[2], is_airport_code),
        field(cols[3], is_airport_code),
        field(cols[4], is_airline_code),
        field(cols[5], is_flight_number),
        field(cols[6], is_day_of_year),
    );

    Some(match cols.get(7) {
        Some(flag) => record.with_points_status(PointsStatus::from_flag(flag)),
        None => record,
    })
}

/// Parse every non-blank row; rows with the wrong shape are logged and skipped.
pub fn parse_compact_text(text: &str) -> Vec<FlightRecord> {
    let mut out = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_compact_line(line) {
            Some(record) => out.push(record),
            None => warn!(line = idx + 1, "skipping compact row without 7 or 8 fields"),
        }
    }
    out
}
