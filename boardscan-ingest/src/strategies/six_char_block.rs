//! 6-letter route block with a separate carrier token.
//!
//! Some scan batches split the block:
//!   LEE/KEVIN HKGPVG CX 0380 002
//!
//! The airport pair is the first 6-letter token; the carrier is the first token
//! found in the known-carrier list. Codes come out upper-case.

use anyhow::Result;
use boardscan_core::Field;
use regex::Regex;
use std::collections::BTreeSet;

use super::{RouteBlock, RouteExtractor};

#[derive(Debug, Clone)]
pub struct SixCharBlock {
    pair_re: Regex,
    carriers: BTreeSet<String>,
}

impl SixCharBlock {
    pub fn new(carriers: &[String]) -> Result<Self> {
        Ok(Self {
            pair_re: Regex::new(r"^(?P<dep>[A-Za-z]{3})(?P<arr>[A-Za-z]{3})$")?,
            carriers: carriers
                .iter()
                .map(|c| c.trim().to_ascii_uppercase())
                .filter(|c| !c.is_empty())
                .collect(),
        })
    }
}

impl RouteExtractor for SixCharBlock {
    fn extract(&self, tokens: &[&str]) -> RouteBlock {
        let pair = tokens.iter().find_map(|t| self.pair_re.captures(t));
        let (departure, arrival) = match pair {
            Some(caps) => (
                Field::Parsed(caps["dep"].to_ascii_uppercase()),
                Field::Parsed(caps["arr"].to_ascii_uppercase()),
            ),
            None => (Field::Sentinel, Field::Sentinel),
        };

        let airline = tokens
            .iter()
            .map(|t| t.to_ascii_uppercase())
            .find(|t| self.carriers.contains(t))
            .into();

        RouteBlock {
            departure,
            arrival,
            airline,
        }
    }
}
