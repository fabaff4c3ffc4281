//! Flight record types produced by the scan parser

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date_codec::CompactDate;
use crate::field::Field;

/// One normalized flight, recovered from one scan line.
///
/// Every field is either a well-shaped value or the sentinel; a field that
/// fails to parse never blocks the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightRecord {
    /// Date of travel as YYMMDD
    pub calendar_date: Field<CompactDate>,
    /// Passenger code taken from the name token
    pub traveler_code: Field<String>,
    pub departure_airport: Field<String>,
    pub arrival_airport: Field<String>,
    /// 2-3 character carrier code
    pub airline_code: Field<String>,
    /// 4-digit, zero padded
    pub flight_number: Field<String>,
    /// Day-of-year digits as they appeared in the source
    pub day_of_year: Field<String>,
    points_matched: PointsStatus,
}

/// Outcome of reconciling a record against the points ledger
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PointsStatus {
    #[serde(rename = "matched")]
    Matched,
    #[serde(rename = "unmatched")]
    Unmatched,
    #[default]
    #[serde(rename = "not-evaluated")]
    NotEvaluated,
}

impl PointsStatus {
    /// Report flag: `Y` or `-`; not-evaluated has no flag.
    pub fn flag(&self) -> Option<&'static str> {
        match self {
            PointsStatus::Matched => Some("Y"),
            PointsStatus::Unmatched => Some("-"),
            PointsStatus::NotEvaluated => None,
        }
    }

    pub fn from_flag(flag: &str) -> Self {
        match flag.trim() {
            "Y" | "y" => PointsStatus::Matched,
            "-" => PointsStatus::Unmatched,
            _ => PointsStatus::NotEvaluated,
        }
    }
}

/// Field separator for the textual record form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Delimiter {
    #[default]
    Comma,
    Pipe,
}

impl Delimiter {
    fn joiner(&self) -> &'static str {
        match self {
            Delimiter::Comma => ", ",
            Delimiter::Pipe => "|",
        }
    }
}

const HEADER: [&str; 7] = [
    "Date",
    "Person",
    "From Airport",
    "To Airport",
    "Airline",
    "Flight num",
    "Julian Date",
];

impl FlightRecord {
    pub fn new(
        calendar_date: Field<CompactDate>,
        traveler_code: Field<String>,
        departure_airport: Field<String>,
        arrival_airport: Field<String>,
        airline_code: Field<String>,
        flight_number: Field<String>,
        day_of_year: Field<String>,
    ) -> Self {
        Self {
            calendar_date,
            traveler_code,
            departure_airport,
            arrival_airport,
            airline_code,
            flight_number,
            day_of_year,
            points_matched: PointsStatus::NotEvaluated,
        }
    }

    /// Every field unresolved, as produced for a line with no tokens.
    pub fn sentinel() -> Self {
        Self::new(
            Field::Sentinel,
            Field::Sentinel,
            Field::Sentinel,
            Field::Sentinel,
            Field::Sentinel,
            Field::Sentinel,
            Field::Sentinel,
        )
    }

    pub fn points_matched(&self) -> PointsStatus {
        self.points_matched
    }

    /// Record the reconciliation outcome. Only the first evaluation sticks.
    pub fn with_points_status(mut self, status: PointsStatus) -> Self {
        if self.points_matched == PointsStatus::NotEvaluated {
            self.points_matched = status;
        }
        self
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.calendar_date.value().map(CompactDate::date)
    }

    /// Day-of-year as a number, when it parsed.
    pub fn day_ordinal(&self) -> Option<u32> {
        self.day_of_year.as_deref().and_then(|d| d.parse().ok())
    }

    /// Render as `date, traveler, departure, arrival, airline, flight, day[, Y|-]`.
    pub fn render(&self, delimiter: Delimiter) -> String {
        let mut fields = vec![
            self.calendar_date.to_string(),
            self.traveler_code.to_string(),
            self.departure_airport.to_string(),
            self.arrival_airport.to_string(),
            self.airline_code.to_string(),
            self.flight_number.to_string(),
            self.day_of_year.to_string(),
        ];
        if let Some(flag) = self.points_matched.flag() {
            fields.push(flag.to_string());
        }
        fields.join(delimiter.joiner())
    }

    pub fn header(delimiter: Delimiter, with_points: bool) -> String {
        let mut cols: Vec<&str> = HEADER.to_vec();
        if with_points {
            cols.push("Points Paid");
        }
        cols.join(delimiter.joiner())
    }
}

/// Three letters, e.g. `HKG`.
pub fn is_airport_code(s: &str) -> bool {
    s.len() == 3 && s.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Two or three alphanumerics with at least one letter, e.g. `CX`, `3K`.
pub fn is_airline_code(s: &str) -> bool {
    (2..=3).contains(&s.len())
        && s.bytes().all(|b| b.is_ascii_alphanumeric())
        && s.bytes().any(|b| b.is_ascii_alphabetic())
}

/// Exactly four digits.
pub fn is_flight_number(s: &str) -> bool {
    s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit())
}

/// Exactly three digits.
pub fn is_day_of_year(s: &str) -> bool {
    s.len() == 3 && s.bytes().all(|b| b.is_ascii_digit())
}

/// A short alphanumeric passenger code, e.g. `K` or `C2N`.
pub fn is_traveler_code(s: &str) -> bool {
    (1..=4).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_alphanumeric())
}
