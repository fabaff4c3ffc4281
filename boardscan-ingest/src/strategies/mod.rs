//! Route-block strategies: locate departure, arrival and carrier in a line's tokens.
//!
//! Scan batches disagree on layout, so each layout is its own extractor behind
//! [`RouteExtractor`] and the tokenizer picks one from config.

pub mod eight_char_block;
pub mod six_char_block;

use anyhow::Result;
use boardscan_core::Field;

pub use eight_char_block::EightCharBlock;
pub use six_char_block::SixCharBlock;

use crate::types::{BlockStrategy, TokenizerConfig};

/// Airport pair and carrier recovered from one line; each part independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteBlock {
    pub departure: Field<String>,
    pub arrival: Field<String>,
    pub airline: Field<String>,
}

pub trait RouteExtractor: Send + Sync {
    fn extract(&self, tokens: &[&str]) -> RouteBlock;
}

/// 8-character block when the line has one, 6-letter form otherwise.
#[derive(Debug, Clone)]
pub struct AutoDetect {
    eight: EightCharBlock,
    six: SixCharBlock,
}

impl AutoDetect {
    pub fn new(six: SixCharBlock) -> Self {
        Self {
            eight: EightCharBlock,
            six,
        }
    }
}

impl RouteExtractor for AutoDetect {
    fn extract(&self, tokens: &[&str]) -> RouteBlock {
        if EightCharBlock::find(tokens).is_some() {
            self.eight.extract(tokens)
        } else {
            self.six.extract(tokens)
        }
    }
}

pub fn build_extractor(config: &TokenizerConfig) -> Result<Box<dyn RouteExtractor>> {
    let extractor: Box<dyn RouteExtractor> = match config.strategy {
        BlockStrategy::EightCharBlock => Box::new(EightCharBlock),
        BlockStrategy::SixCharBlock => Box::new(SixCharBlock::new(&config.known_carriers)?),
        BlockStrategy::Auto => Box::new(AutoDetect::new(SixCharBlock::new(
            &config.known_carriers,
        )?)),
    };
    Ok(extractor)
}
