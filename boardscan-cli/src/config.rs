use anyhow::{Context, Result, bail};
use boardscan_core::{Delimiter, HomeAirports, validate_year};
use boardscan_ingest::TokenizerConfig;
use boardscan_points::MatchPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for one run. Every key is optional in the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Year used to resolve day-of-year tokens in raw scans
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub home_airports: HomeAirports,
    pub tokenizer: TokenizerConfig,
    pub points: MatchPolicy,
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub delimiter: Delimiter,
}

impl Config {
    /// Year from the command line, else from the file; validated either way.
    pub fn resolve_year(&self, flag: Option<i32>) -> Result<i32> {
        let Some(year) = flag.or(self.year) else {
            bail!("no year given (pass --year <YYYY> or set `year` in the config file)");
        };
        Ok(validate_year(year)?)
    }
}

pub fn boardscan_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".boardscan"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(boardscan_home()?.join("config.toml"))
}

pub fn read_config(path: &Path) -> Result<Config> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

/// An explicit path must exist; the default location is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(p) = explicit {
        return read_config(p);
    }
    let p = default_config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    read_config(&p)
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }
    save_config(&Config::default(), path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardscan_ingest::{BlockStrategy, DayCleanup, TableVersion};
    use boardscan_points::TieBreak;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"
year = 2024
home_airports = ["HKG", "AKL"]

[tokenizer]
strategy = "auto"
day_cleanup = "strip-suffix"
corrections = "v2"

[[tokenizer.extra_corrections]]
scope = "initial"
from = "Q"
to = "O"

[points]
tolerance_days = 3
tie_break = "closest-date"

[output]
delimiter = "pipe"
"#,
        )
        .unwrap();
        file.flush().unwrap();

        let cfg = load_config(Some(file.path())).unwrap();
        assert_eq!(cfg.year, Some(2024));
        assert!(cfg.home_airports.contains("AKL"));
        assert_eq!(cfg.tokenizer.strategy, BlockStrategy::Auto);
        assert_eq!(cfg.tokenizer.day_cleanup, DayCleanup::StripSuffix);
        assert_eq!(cfg.tokenizer.corrections, TableVersion::V2);
        assert_eq!(cfg.tokenizer.extra_corrections.len(), 1);
        // Unset keys keep their defaults.
        assert!(cfg.tokenizer.known_carriers.iter().any(|c| c == "CX"));
        assert_eq!(cfg.points.tolerance_days, 3);
        assert_eq!(cfg.points.tie_break, TieBreak::ClosestDate);
        assert_eq!(cfg.output.delimiter, Delimiter::Pipe);
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        let file = NamedTempFile::new().unwrap();
        let cfg = load_config(Some(file.path())).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(cfg.home_airports.contains("SZX"));
        assert_eq!(cfg.points.tolerance_days, 2);
    }

    #[test]
    fn test_bad_home_airport_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"home_airports = []\n").unwrap();
        file.flush().unwrap();
        assert!(load_config(Some(file.path())).is_err());
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        assert!(load_config(Some(Path::new("/nonexistent/boardscan.toml"))).is_err());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config {
            year: Some(2025),
            ..Config::default()
        };
        save_config(&cfg, &path).unwrap();
        assert_eq!(read_config(&path).unwrap(), cfg);
    }

    #[test]
    fn test_resolve_year() {
        let cfg = Config {
            year: Some(2023),
            ..Config::default()
        };
        assert_eq!(cfg.resolve_year(None).unwrap(), 2023);
        assert_eq!(cfg.resolve_year(Some(2024)).unwrap(), 2024);
        assert!(Config::default().resolve_year(None).is_err());
        assert!(cfg.resolve_year(Some(3000)).is_err());
    }
}
