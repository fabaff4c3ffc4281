//! Scan-line tokenizer: one raw boarding-pass line in, one flight record out.
//!
//! Expected line shape (whitespace separated, order varies by batch):
//!   M1LEE/KEVIN EABC123 AKLHKGCX 0198 359Y034C0012 100
//!
//! Each field is recovered on its own; a field that cannot be found is the
//! sentinel and never stops the others.

use anyhow::Result;
use boardscan_core::record::{is_day_of_year, is_traveler_code};
use boardscan_core::{Field, FlightRecord, day_of_year_to_compact_date, validate_year};
use regex::Regex;

use crate::corrections::SubstitutionTable;
use crate::strategies::{RouteExtractor, build_extractor};
use crate::types::{DayCleanup, TokenizerConfig};

/// Separates surname from given name in the first token.
pub const NAME_SEPARATOR: char = '/';

/// Digits kept from the day-of-year token.
const DAY_DIGITS: usize = 3;

pub struct LineTokenizer {
    year: i32,
    route: Box<dyn RouteExtractor>,
    day_cleanup: DayCleanup,
    leading_digits_re: Regex,
    corrections: SubstitutionTable,
}

impl LineTokenizer {
    /// `year` resolves day-of-year tokens; it must lie in 1969..=2068.
    pub fn new(year: i32, config: &TokenizerConfig) -> Result<Self> {
        Ok(Self {
            year: validate_year(year)?,
            route: build_extractor(config)?,
            day_cleanup: config.day_cleanup,
            leading_digits_re: Regex::new(r"^[0-9]+")?,
            corrections: SubstitutionTable::from_version(
                config.corrections,
                &config.extra_corrections,
            ),
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn tokenize(&self, line: &str) -> FlightRecord {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            return FlightRecord::sentinel();
        }

        let traveler_code = self.traveler_code(tokens[0]);
        let route = self.route.extract(&tokens);

        let flight_idx = tokens
            .iter()
            .position(|t| t.len() == 4 && t.bytes().all(|b| b.is_ascii_digit()));
        let flight_number: Field<String> = flight_idx.map(|i| tokens[i].to_string()).into();

        let day_of_year = match flight_idx.and_then(|i| tokens.get(i + 1)) {
            Some(next) => self.day_of_year(next),
            None => Field::Sentinel,
        };

        let calendar_date = match day_of_year.as_deref().and_then(|d| d.parse::<u32>().ok()) {
            Some(day) => day_of_year_to_compact_date(day, self.year),
            None => Field::Sentinel,
        };

        FlightRecord::new(
            calendar_date,
            traveler_code,
            route.departure,
            route.arrival,
            route.airline,
            flight_number,
            day_of_year,
        )
    }

    /// Tokenize every non-blank line, preserving order.
    pub fn tokenize_text(&self, text: &str) -> Vec<FlightRecord> {
        text.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| self.tokenize(l))
            .collect()
    }

    fn traveler_code(&self, first: &str) -> Field<String> {
        let Some((_, given)) = first.split_once(NAME_SEPARATOR) else {
            return Field::Sentinel;
        };
        // Anything after a second separator is not part of the given name.
        let given = given.split(NAME_SEPARATOR).next().unwrap_or_default();
        Field::from(self.corrections.traveler_code(given)).filter(|c| is_traveler_code(c))
    }

    fn day_of_year(&self, token: &str) -> Field<String> {
        let digits = match self.day_cleanup {
            DayCleanup::Strict => strict_digits(token),
            DayCleanup::StripSuffix => strict_digits(strip_suffix(token)),
            DayCleanup::LeadingDigits => self
                .leading_digits_re
                .find(token)
                .map(|m| m.as_str()),
        };

        match digits {
            Some(d) if d.len() >= DAY_DIGITS => {
                Field::Parsed(d[..DAY_DIGITS].to_string()).filter(|s| is_day_of_year(s))
            }
            _ => Field::Sentinel,
        }
    }
}

fn strict_digits(token: &str) -> Option<&str> {
    (!token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())).then_some(token)
}

/// Drop a single trailing letter, e.g. `359Y` -> `359`.
fn strip_suffix(token: &str) -> &str {
    match token.as_bytes().last() {
        Some(b) if b.is_ascii_alphabetic() => &token[..token.len() - 1],
        _ => token,
    }
}
