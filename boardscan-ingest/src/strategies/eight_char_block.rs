//! 8-character route block, the layout of standard boarding-pass scans.
//!
//! Example line:
//!   M1LEE/KEVIN      EABC123 AKLHKGCX 0198 359Y034C0012 100
//!
//! `AKLHKGCX` reads positionally as AKL -> HKG on CX. Only the first
//! 8-character token counts; later ones are ignored.

use boardscan_core::Field;
use boardscan_core::record::{is_airline_code, is_airport_code};

use super::{RouteBlock, RouteExtractor};

#[derive(Debug, Clone, Copy, Default)]
pub struct EightCharBlock;

impl EightCharBlock {
    pub fn find<'a>(tokens: &[&'a str]) -> Option<&'a str> {
        tokens.iter().copied().find(|t| t.chars().count() == 8)
    }
}

impl RouteExtractor for EightCharBlock {
    fn extract(&self, tokens: &[&str]) -> RouteBlock {
        let Some(block) = Self::find(tokens) else {
            return RouteBlock::default();
        };
        // Slicing by byte below needs one byte per char.
        if !block.is_ascii() {
            return RouteBlock::default();
        }

        let block = block.to_ascii_uppercase();
        RouteBlock {
            departure: Field::Parsed(block[..3].to_string()).filter(|s| is_airport_code(s)),
            arrival: Field::Parsed(block[3..6].to_string()).filter(|s| is_airport_code(s)),
            airline: Field::Parsed(block[6..].to_string()).filter(|s| is_airline_code(s)),
        }
    }
}
