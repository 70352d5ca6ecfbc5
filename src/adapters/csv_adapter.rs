//! CSV instrument list adapter.
//!
//! Expected header: `symbol,class,last_dividend,fixed_dividend,par_value`.
//! `class` is `common` or `preferred`; `fixed_dividend` is a percentage and
//! is ignored for common stock.

use crate::domain::error::SsstocksError;
use crate::domain::instrument::Instrument;
use crate::ports::instrument_port::InstrumentSource;
use std::fs;
use std::path::PathBuf;

pub struct CsvInstrumentSource {
    path: PathBuf,
}

impl CsvInstrumentSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Parses instrument rows from CSV text.
    pub fn parse(content: &str) -> Result<Vec<Instrument>, SsstocksError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(content.as_bytes());

        let mut instruments = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| SsstocksError::InvalidInstrument {
                line: e.position().map(|p| p.line() as usize).unwrap_or(0),
                reason: format!("CSV parse error: {}", e),
            })?;
            let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
            instruments.push(parse_row(&record, line)?);
        }
        Ok(instruments)
    }
}

fn field<'r>(record: &'r csv::StringRecord, idx: usize, name: &str, line: usize) -> Result<&'r str, SsstocksError> {
    record.get(idx).ok_or_else(|| SsstocksError::InvalidInstrument {
        line,
        reason: format!("missing {} column", name),
    })
}

fn amount(record: &csv::StringRecord, idx: usize, name: &str, line: usize) -> Result<f64, SsstocksError> {
    let raw = field(record, idx, name, line)?;
    let value: f64 = raw.parse().map_err(|e| SsstocksError::InvalidInstrument {
        line,
        reason: format!("invalid {} value '{}': {}", name, raw, e),
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(SsstocksError::InvalidInstrument {
            line,
            reason: format!("{} must be a non-negative amount", name),
        });
    }
    Ok(value)
}

fn parse_row(record: &csv::StringRecord, line: usize) -> Result<Instrument, SsstocksError> {
    let symbol = field(record, 0, "symbol", line)?.to_uppercase();
    if symbol.is_empty() {
        return Err(SsstocksError::InvalidInstrument {
            line,
            reason: "symbol is empty".into(),
        });
    }

    let class = field(record, 1, "class", line)?.to_lowercase();
    let last_dividend = amount(record, 2, "last_dividend", line)?;
    let fixed_dividend = amount(record, 3, "fixed_dividend", line)?;
    let par_value = amount(record, 4, "par_value", line)?;
    if par_value == 0.0 {
        return Err(SsstocksError::InvalidInstrument {
            line,
            reason: "par_value must be positive".into(),
        });
    }

    match class.as_str() {
        "common" => {
            if fixed_dividend != 0.0 {
                log::warn!("{}: fixed dividend ignored for common stock", symbol);
            }
            Ok(Instrument::common(symbol, last_dividend, par_value))
        }
        "preferred" => Ok(Instrument::preferred(
            symbol,
            last_dividend,
            fixed_dividend,
            par_value,
        )),
        other => Err(SsstocksError::InvalidInstrument {
            line,
            reason: format!("unknown class '{}' (expected common or preferred)", other),
        }),
    }
}

impl InstrumentSource for CsvInstrumentSource {
    fn load_instruments(&self) -> Result<Vec<Instrument>, SsstocksError> {
        let content = fs::read_to_string(&self.path).map_err(|e| SsstocksError::InvalidInstrument {
            line: 0,
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        let instruments = Self::parse(&content)?;
        log::info!(
            "loaded {} instruments from {}",
            instruments.len(),
            self.path.display()
        );
        Ok(instruments)
    }
}
