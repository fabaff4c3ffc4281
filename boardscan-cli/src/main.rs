use anyhow::{Context, Result, bail};
use boardscan_core::{
    Delimiter, FlightRecord, HomeAirports, TravelStats, segment_trips, sort_chronologically,
};
use boardscan_ingest::{BlockStrategy, DayCleanup, LineTokenizer, parse_compact_text};
use boardscan_points::{PointsMatcher, load_ledger};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "boardscan",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BOARDSCAN_BUILD_SHA"), ")"),
    about = "Boarding-pass scan parser, points reconciliation and trip summaries"
)]
struct Cli {
    /// Config file (default: ~/.boardscan/config.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse raw scan lines into flight records
    Scan {
        #[command(flatten)]
        source: SourceArgs,

        /// Points ledger CSV; adds the Points Paid column
        #[arg(long)]
        ledger: Option<PathBuf>,

        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },

    /// Group flights into round trips from the home airports
    Trips {
        #[command(flatten)]
        source: SourceArgs,

        /// Home airports, comma separated (default: HKG,SZX)
        #[arg(long, value_delimiter = ',')]
        home: Option<Vec<String>>,
    },

    /// Airline, airport and monthly counts
    Stats {
        #[command(flatten)]
        source: SourceArgs,

        /// Number of airports to list (default: 5)
        #[arg(long, default_value_t = 5)]
        top: usize,
    },

    /// Config file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(clap::Args, Debug)]
struct SourceArgs {
    /// Input file, or `-` for stdin
    #[arg(long, default_value = "-")]
    input: PathBuf,

    /// Input is already in compact `date|person|from|to|airline|flight|day` form
    #[arg(long)]
    compact: bool,

    /// Year for day-of-year resolution (raw scans only)
    #[arg(long)]
    year: Option<i32>,

    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    #[arg(long, value_enum)]
    day_cleanup: Option<DayCleanupArg>,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file
    Init,
    /// Print the effective config
    Show,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Comma,
    Pipe,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StrategyArg {
    EightCharBlock,
    SixCharBlock,
    Auto,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DayCleanupArg {
    Strict,
    StripSuffix,
    LeadingDigits,
}

fn main() -> Result<()> {
    // Reports go to stdout; logs to stderr. RUST_LOG=debug shows dropped records.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Scan {
            source,
            ledger,
            format,
        } => {
            let delimiter = match format {
                Some(FormatArg::Comma) => Delimiter::Comma,
                Some(FormatArg::Pipe) => Delimiter::Pipe,
                None => cfg.output.delimiter,
            };
            let mut records = load_records(&source, &cfg)?;

            if let Some(path) = &ledger {
                let load = load_ledger(path)
                    .with_context(|| format!("loading points ledger {}", path.display()))?;
                for row in &load.skipped {
                    warn!(line = row.line, reason = ?row.reason, "points row skipped");
                }
                let matcher = PointsMatcher::new(load.ledger, cfg.points);
                records = matcher.annotate_all(records);
            }

            println!("{}", FlightRecord::header(delimiter, ledger.is_some()));
            for r in &records {
                println!("{}", r.render(delimiter));
            }
            info!(records = records.len(), "processed scan lines");
        }

        Command::Trips { source, home } => {
            let home = match home {
                Some(codes) => HomeAirports::new(codes)?,
                None => cfg.home_airports.clone(),
            };
            let mut records = load_records(&source, &cfg)?;
            sort_chronologically(&mut records);

            let seg = segment_trips(&records, &home);
            print!("{}", render::trips_markdown(&seg.trips));
            if let Some(open) = &seg.open_trip {
                eprintln!("{}", render::open_trip_note(open));
            }
            info!(records = records.len(), trips = seg.trips.len(), "segmented trips");
        }

        Command::Stats { source, top } => {
            let records = load_records(&source, &cfg)?;
            let stats = TravelStats::from_records(&records);
            print!("{}", render::stats_report(&stats, top));
        }

        Command::Config { command } => {
            let path = match &cli.config {
                Some(p) => p.clone(),
                None => config::default_config_path()?,
            };
            match command {
                ConfigCommand::Init => config::init_config(&path)?,
                ConfigCommand::Show => {
                    print!(
                        "{}",
                        toml::to_string_pretty(&cfg).context("serialize config")?
                    );
                }
            }
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut s = String::new();
        std::io::stdin()
            .read_to_string(&mut s)
            .context("reading stdin")?;
        return Ok(s);
    }
    if !path.exists() {
        bail!("input not found: {} (pass --input <path>)", path.display());
    }
    std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

fn load_records(source: &SourceArgs, cfg: &Config) -> Result<Vec<FlightRecord>> {
    let text = read_input(&source.input)?;
    if source.compact {
        return Ok(parse_compact_text(&text));
    }

    let year = cfg.resolve_year(source.year)?;
    let mut tokenizer_cfg = cfg.tokenizer.clone();
    if let Some(s) = source.strategy {
        tokenizer_cfg.strategy = match s {
            StrategyArg::EightCharBlock => BlockStrategy::EightCharBlock,
            StrategyArg::SixCharBlock => BlockStrategy::SixCharBlock,
            StrategyArg::Auto => BlockStrategy::Auto,
        };
    }
    if let Some(c) = source.day_cleanup {
        tokenizer_cfg.day_cleanup = match c {
            DayCleanupArg::Strict => DayCleanup::Strict,
            DayCleanupArg::StripSuffix => DayCleanup::StripSuffix,
            DayCleanupArg::LeadingDigits => DayCleanup::LeadingDigits,
        };
    }

    let tokenizer = LineTokenizer::new(year, &tokenizer_cfg)?;
    Ok(tokenizer.tokenize_text(&text))
}
