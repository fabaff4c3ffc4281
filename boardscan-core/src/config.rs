//! Run-scoped settings shared by the parser and the trip segmenter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::field::Field;

/// Years a 2-digit `YYMMDD` code maps back to unambiguously (pivot at 69).
pub const MIN_YEAR: i32 = 1969;
pub const MAX_YEAR: i32 = 2068;

/// Airports treated as the traveler's base when none are configured.
pub const DEFAULT_HOME_AIRPORTS: [&str; 2] = ["HKG", "SZX"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("year {0} is outside 1969..=2068")]
    YearOutOfRange(i32),
    #[error("home airport set is empty")]
    NoHomeAirports,
    #[error("invalid home airport code '{0}' (expected 3 letters)")]
    InvalidAirport(String),
}

/// Check the target year used to resolve day-of-year tokens.
pub fn validate_year(year: i32) -> Result<i32, ConfigError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(ConfigError::YearOutOfRange(year))
    }
}

/// The set of airports that open and close a trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct HomeAirports(BTreeSet<String>);

impl HomeAirports {
    /// Codes are upper-cased; at least one is required.
    pub fn new<I, S>(codes: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for code in codes {
            let code = code.as_ref().trim().to_ascii_uppercase();
            if !crate::record::is_airport_code(&code) {
                return Err(ConfigError::InvalidAirport(code));
            }
            set.insert(code);
        }
        if set.is_empty() {
            return Err(ConfigError::NoHomeAirports);
        }
        Ok(Self(set))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains(code)
    }

    /// A sentinel airport is never home.
    pub fn contains_field(&self, code: &Field<String>) -> bool {
        code.as_deref().is_some_and(|c| self.contains(c))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for HomeAirports {
    fn default() -> Self {
        Self(DEFAULT_HOME_AIRPORTS.iter().map(|s| s.to_string()).collect())
    }
}

impl TryFrom<Vec<String>> for HomeAirports {
    type Error = ConfigError;

    fn try_from(codes: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(codes)
    }
}

impl From<HomeAirports> for Vec<String> {
    fn from(home: HomeAirports) -> Self {
        home.0.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_home_airports() {
        let home = HomeAirports::default();
        assert!(home.contains("HKG"));
        assert!(home.contains("SZX"));
        assert!(!home.contains("PVG"));
    }

    #[test]
    fn test_home_airports_normalized_and_validated() {
        let home = HomeAirports::new(["hkg", " akl "]).unwrap();
        assert_eq!(home.iter().collect::<Vec<_>>(), vec!["AKL", "HKG"]);
        assert_eq!(
            HomeAirports::new(Vec::<String>::new()),
            Err(ConfigError::NoHomeAirports)
        );
        assert_eq!(
            HomeAirports::new(["HK"]),
            Err(ConfigError::InvalidAirport("HK".into()))
        );
    }

    #[test]
    fn test_sentinel_is_never_home() {
        let home = HomeAirports::default();
        assert!(!home.contains_field(&Field::Sentinel));
        assert!(home.contains_field(&Field::Parsed("SZX".to_string())));
    }

    #[test]
    fn test_validate_year() {
        assert_eq!(validate_year(2024), Ok(2024));
        assert_eq!(validate_year(MIN_YEAR), Ok(1969));
        assert_eq!(validate_year(MAX_YEAR), Ok(2068));
        assert_eq!(validate_year(1950), Err(ConfigError::YearOutOfRange(1950)));
        assert_eq!(validate_year(2069), Err(ConfigError::YearOutOfRange(2069)));
    }

    #[test]
    fn test_home_airports_deserialize_from_list() {
        let home: HomeAirports = serde_json::from_str(r#"["HKG", "AKL"]"#).unwrap();
        assert!(home.contains("AKL"));
        assert!(serde_json::from_str::<HomeAirports>("[]").is_err());
    }
}
