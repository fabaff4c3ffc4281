//! Traveler-code corrections for known scan artifacts.
//!
//! Kept as data rather than branches in the parser: adding a correction means
//! adding a row here or in config.

use serde::{Deserialize, Serialize};

/// What part of the name token a correction is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CorrectionScope {
    /// The single-character initial taken from the given name.
    Initial,
    /// The whole given-name segment; a hit replaces the code outright.
    GivenName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    pub scope: CorrectionScope,
    pub from: String,
    pub to: String,
}

impl Correction {
    pub fn new(scope: CorrectionScope, from: &str, to: &str) -> Self {
        Self {
            scope,
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// Named revisions of the built-in table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TableVersion {
    None,
    /// `C` initial reads as `S`.
    #[default]
    V1,
    /// V1 plus the `CHUN` given name coded as `C2N`.
    V2,
}

impl TableVersion {
    pub fn corrections(&self) -> Vec<Correction> {
        match self {
            TableVersion::None => Vec::new(),
            TableVersion::V1 => vec![Correction::new(CorrectionScope::Initial, "C", "S")],
            TableVersion::V2 => vec![
                Correction::new(CorrectionScope::GivenName, "CHUN", "C2N"),
                Correction::new(CorrectionScope::Initial, "C", "S"),
            ],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionTable {
    corrections: Vec<Correction>,
}

impl SubstitutionTable {
    pub fn new(corrections: Vec<Correction>) -> Self {
        Self { corrections }
    }

    /// `extra` rows take precedence over the versioned table.
    pub fn from_version(version: TableVersion, extra: &[Correction]) -> Self {
        let mut corrections = extra.to_vec();
        corrections.extend(version.corrections());
        Self { corrections }
    }

    pub fn corrections(&self) -> &[Correction] {
        &self.corrections
    }

    /// Traveler code for a given-name segment: a whole-name correction if one
    /// matches, otherwise the (possibly corrected) first character.
    pub fn traveler_code(&self, given_name: &str) -> Option<String> {
        if let Some(c) = self
            .corrections
            .iter()
            .find(|c| c.scope == CorrectionScope::GivenName && c.from == given_name)
        {
            return Some(c.to.clone());
        }

        let initial: String = given_name.chars().take(1).collect();
        if initial.is_empty() {
            return None;
        }
        let corrected = self
            .corrections
            .iter()
            .find(|c| c.scope == CorrectionScope::Initial && c.from == initial)
            .map(|c| c.to.clone());
        Some(corrected.unwrap_or(initial))
    }
}
