//! boardscan-ingest: scan-line tokenization with per-batch strategies.

pub mod compact;
pub mod corrections;
pub mod strategies;
pub mod tokenizer;
pub mod types;

pub use compact::{parse_compact_line, parse_compact_text};
pub use corrections::{Correction, CorrectionScope, SubstitutionTable, TableVersion};
pub use tokenizer::LineTokenizer;
pub use types::{BlockStrategy, DayCleanup, TokenizerConfig};
