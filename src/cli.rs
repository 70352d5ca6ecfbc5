//! CLI definition and dispatch.

use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::builtin_seed::BuiltinSeed;
use crate::adapters::csv_adapter::CsvInstrumentSource;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{validate_market_config, DEFAULT_WINDOW_MINUTES};
use crate::domain::error::SsstocksError;
use crate::domain::index::Index;
use crate::ports::config_port::ConfigPort;
use crate::ports::instrument_port::InstrumentSource;
use crate::shell::{Shell, DEFAULT_PROMPT};

#[derive(Parser, Debug)]
#[command(name = "ssstocks", about = "Super simple stock market")]
pub struct Cli {
    /// INI settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// CSV instrument list, overriding the configured one
    #[arg(long, global = true)]
    pub instruments: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start the interactive shell (default)
    Shell,
    /// Print the instrument table and the all-share index
    Show,
    /// Validate a settings file
    Validate,
}

/// Settings resolved from the INI file, with defaults for anything unset.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketConfig {
    pub window: Duration,
    pub instruments: Option<PathBuf>,
    pub seed: Option<u64>,
    pub prompt: String,
    pub banner: bool,
}

impl Default for MarketConfig {
    fn default() -> Self {
        MarketConfig {
            window: Duration::minutes(DEFAULT_WINDOW_MINUTES),
            instruments: None,
            seed: None,
            prompt: DEFAULT_PROMPT.to_string(),
            banner: true,
        }
    }
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => run_shell(cli.config.as_ref(), cli.instruments.as_ref()),
        Command::Show => run_show(cli.config.as_ref(), cli.instruments.as_ref()),
        Command::Validate => run_validate(cli.config.as_ref()),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

pub fn build_market_config(config: &dyn ConfigPort) -> Result<MarketConfig, SsstocksError> {
    validate_market_config(config)?;

    let minutes = config.get_int("market", "window_minutes", DEFAULT_WINDOW_MINUTES);
    let seed = config
        .get_string("simulation", "seed")
        .and_then(|s| s.trim().parse::<u64>().ok());

    Ok(MarketConfig {
        window: Duration::minutes(minutes),
        instruments: config
            .get_string("market", "instruments")
            .map(|p| PathBuf::from(p.trim())),
        seed,
        prompt: config
            .get_string("shell", "prompt")
            .unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
        banner: config.get_bool("shell", "banner", true),
    })
}

/// Resolves settings from an optional INI file.
pub fn resolve_market_config(config_path: Option<&PathBuf>) -> Result<MarketConfig, ExitCode> {
    let Some(path) = config_path else {
        return Ok(MarketConfig::default());
    };
    log::info!("loading config from {}", path.display());
    let adapter = load_config(path)?;
    build_market_config(&adapter).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

/// Builds the index from the CSV override, the configured CSV, or the
/// built-in table, in that order.
pub fn build_index(
    market: &MarketConfig,
    instruments_override: Option<&PathBuf>,
) -> Result<Index, SsstocksError> {
    let source: Box<dyn InstrumentSource> =
        match instruments_override.or(market.instruments.as_ref()) {
            Some(path) => Box::new(CsvInstrumentSource::new(path.clone())),
            None => Box::new(BuiltinSeed),
        };
    Index::new(source.load_instruments()?)
}

pub fn make_rng(seed: Option<u64>) -> Box<dyn RngCore> {
    match seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(StdRng::from_entropy()),
    }
}

fn prepare_shell(
    config_path: Option<&PathBuf>,
    instruments: Option<&PathBuf>,
) -> Result<(Shell, MarketConfig), ExitCode> {
    let market = resolve_market_config(config_path)?;
    let index = build_index(&market, instruments).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })?;
    log::info!(
        "{} instruments, trailing window {} minutes",
        index.instruments().len(),
        market.window.num_minutes()
    );
    let shell = Shell::new(index, market.window, make_rng(market.seed));
    Ok((shell, market))
}

fn run_shell(config_path: Option<&PathBuf>, instruments: Option<&PathBuf>) -> ExitCode {
    let (mut shell, market) = match prepare_shell(config_path, instruments) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    match shell.run(stdin.lock(), &mut stdout, &market.prompt, market.banner) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let err = SsstocksError::from(e);
            eprintln!("error: {err}");
            ExitCode::from(&err)
        }
    }
}

fn run_show(config_path: Option<&PathBuf>, instruments: Option<&PathBuf>) -> ExitCode {
    let (mut shell, _) = match prepare_shell(config_path, instruments) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let mut stdout = io::stdout();
    let result = shell
        .execute("index", &mut stdout, Utc::now())
        .and_then(|_| stdout.flush());
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let err = SsstocksError::from(e);
            eprintln!("error: {err}");
            ExitCode::from(&err)
        }
    }
}

fn run_validate(config_path: Option<&PathBuf>) -> ExitCode {
    let Some(path) = config_path else {
        eprintln!("error: --config is required for validate");
        return ExitCode::from(2);
    };

    eprintln!("Validating config: {}", path.display());
    let market = match resolve_market_config(Some(path)) {
        Ok(m) => m,
        Err(code) => return code,
    };

    if let Some(csv) = &market.instruments {
        match build_index(&market, None) {
            Ok(index) => eprintln!(
                "  instruments: {} ({} loaded)",
                csv.display(),
                index.instruments().len()
            ),
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
    } else {
        eprintln!("  instruments: built-in GBCE table");
    }
    eprintln!("  window:      {} minutes", market.window.num_minutes());
    match market.seed {
        Some(seed) => eprintln!("  seed:        {}", seed),
        None => eprintln!("  seed:        random"),
    }

    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}
