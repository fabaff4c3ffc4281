//! Date utilities: day-of-year resolution and compact YYMMDD codes.

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::field::Field;

/// A calendar date written as a 6-digit `YYMMDD` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompactDate(NaiveDate);

impl CompactDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Parse a 6- or 8-digit code; see [`parse_compact_date`].
    pub fn parse(token: &str) -> Option<Self> {
        parse_compact_date(token).map(Self)
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }
}

impl fmt::Display for CompactDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%y%m%d"))
    }
}

impl Serialize for CompactDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<NaiveDate> for CompactDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// Resolve an ordinal day within `year` to a compact date.
///
/// Days outside 1..=366, or 366 in a non-leap year, give the sentinel.
pub fn day_of_year_to_compact_date(day_of_year: u32, year: i32) -> Field<CompactDate> {
    if !(1..=366).contains(&day_of_year) {
        return Field::Sentinel;
    }
    NaiveDate::from_yo_opt(year, day_of_year)
        .map(CompactDate)
        .into()
}

/// Parse `YYMMDD` or `YYYYMMDD`. Anything else is `None`, meaning
/// "cannot compare" rather than an error.
///
/// Two-digit years follow the usual pivot: 69..=99 are 19xx, 00..=68 are 20xx,
/// Run years are limited to `MIN_YEAR..=MAX_YEAR` in `config` to match.
pub fn parse_compact_date(token: &str) -> Option<NaiveDate> {
    let token = token.trim();
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let (year, rest) = match token.len() {
        6 => {
            let yy: i32 = token[..2].parse().ok()?;
            let year = if yy >= 69 { 1900 + yy } else { 2000 + yy };
            (year, &token[2..])
        }
        8 => (token[..4].parse().ok()?, &token[4..]),
        _ => return None,
    };

    let month: u32 = rest[..2].parse().ok()?;
    let day: u32 = rest[2..4].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Absolute difference in whole days.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days().abs()
}
