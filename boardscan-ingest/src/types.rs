use serde::{Deserialize, Serialize};

use crate::corrections::{Correction, TableVersion};

/// How the airport/airline block is located in a line's tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BlockStrategy {
    /// First 8-character token: `DEP(3) ARR(3) AIRLINE(2)`.
    #[default]
    EightCharBlock,
    /// First 6-letter token as the airport pair; carrier from a known list.
    SixCharBlock,
    /// Per line: 8-character block when one exists, otherwise the 6-letter form.
    Auto,
}

/// Cleanup applied to the token that follows the flight number before the
/// day-of-year digits are taken from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DayCleanup {
    /// Token must be all digits.
    Strict,
    /// Drop one trailing letter (status/zone flag), then as `Strict`.
    StripSuffix,
    /// Use the run of digits the token starts with; the rest is ignored.
    #[default]
    LeadingDigits,
}

/// Carriers recognised by the 6-letter block strategy when none are configured.
pub const DEFAULT_KNOWN_CARRIERS: &[&str] = &[
    "CX", "KA", "UO", "HX", "HB", "NZ", "QF", "JQ", "VA", "SQ", "TR", "MU", "CA", "CZ", "HO",
    "FM", "ZH", "MF", "3U", "NH", "JL", "MM", "KE", "OZ", "BR", "CI", "TG", "VN", "MH", "AK",
    "PR", "5J", "GA", "EK", "QR", "EY", "BA", "LH", "AF", "KL", "UA", "AA", "DL", "AC",
];

/// Parser settings that vary across scan batches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    pub strategy: BlockStrategy,
    pub day_cleanup: DayCleanup,
    pub known_carriers: Vec<String>,
    /// Built-in correction table
    pub corrections: TableVersion,
    /// Applied before the built-in table
    pub extra_corrections: Vec<Correction>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            strategy: BlockStrategy::default(),
            day_cleanup: DayCleanup::default(),
            known_carriers: DEFAULT_KNOWN_CARRIERS.iter().map(|s| s.to_string()).collect(),
            corrections: TableVersion::default(),
            extra_corrections: Vec::new(),
        }
    }
}
