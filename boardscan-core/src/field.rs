//! Best-effort field values: either a parsed value or the `Err` sentinel.

use serde::{Serialize, Serializer};
use std::fmt;

/// Literal written in place of any field that could not be parsed.
pub const SENTINEL: &str = "Err";

/// A single record field. Parsing one field never depends on another,
/// so each carries its own outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Field<T> {
    Parsed(T),
    #[default]
    Sentinel,
}

impl<T> Field<T> {
    pub fn is_parsed(&self) -> bool {
        matches!(self, Field::Parsed(_))
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, Field::Sentinel)
    }

    /// Borrow the parsed value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Parsed(v) => Some(v),
            Field::Sentinel => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Parsed(v) => Some(v),
            Field::Sentinel => None,
        }
    }

    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Field::Parsed(v) => Field::Parsed(v),
            Field::Sentinel => Field::Sentinel,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Field::Parsed(v) => Field::Parsed(f(v)),
            Field::Sentinel => Field::Sentinel,
        }
    }

    /// Keep the value only if it satisfies `shape`.
    pub fn filter(self, shape: impl FnOnce(&T) -> bool) -> Field<T> {
        match self {
            Field::Parsed(v) if shape(&v) => Field::Parsed(v),
            _ => Field::Sentinel,
        }
    }
}

impl Field<String> {
    pub fn as_deref(&self) -> Option<&str> {
        self.value().map(String::as_str)
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Field::Parsed(v),
            None => Field::Sentinel,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Parsed(v) => v.fmt(f),
            Field::Sentinel => f.write_str(SENTINEL),
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Parsed(v) => v.serialize(serializer),
            Field::Sentinel => serializer.serialize_str(SENTINEL),
        }
    }
}
