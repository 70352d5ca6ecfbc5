//! Configuration validation.
//!
//! Checks the INI settings before the index is built.

use crate::domain::error::SsstocksError;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_WINDOW_MINUTES: i64 = 15;
/// One year.
pub const MAX_WINDOW_MINUTES: i64 = 366 * 24 * 60;

pub fn validate_market_config(config: &dyn ConfigPort) -> Result<(), SsstocksError> {
    validate_window(config)?;
    validate_instruments_path(config)?;
    validate_seed(config)?;
    Ok(())
}

fn validate_window(config: &dyn ConfigPort) -> Result<(), SsstocksError> {
    let Some(raw) = config.get_string("market", "window_minutes") else {
        return Ok(());
    };
    match raw.trim().parse::<i64>() {
        Ok(minutes) if minutes > 0 && minutes <= MAX_WINDOW_MINUTES => Ok(()),
        Ok(_) => Err(SsstocksError::ConfigInvalid {
            section: "market".to_string(),
            key: "window_minutes".to_string(),
            reason: format!("window_minutes must be between 1 and {}", MAX_WINDOW_MINUTES),
        }),
        Err(_) => Err(SsstocksError::ConfigInvalid {
            section: "market".to_string(),
            key: "window_minutes".to_string(),
            reason: format!("'{}' is not a whole number of minutes", raw.trim()),
        }),
    }
}

fn validate_instruments_path(config: &dyn ConfigPort) -> Result<(), SsstocksError> {
    match config.get_string("market", "instruments") {
        Some(path) if path.trim().is_empty() => Err(SsstocksError::ConfigInvalid {
            section: "market".to_string(),
            key: "instruments".to_string(),
            reason: "instruments path is empty".to_string(),
        }),
        _ => Ok(()),
    }
}

fn validate_seed(config: &dyn ConfigPort) -> Result<(), SsstocksError> {
    let Some(raw) = config.get_string("simulation", "seed") else {
        return Ok(());
    };
    raw.trim()
        .parse::<u64>()
        .map(|_| ())
        .map_err(|_| SsstocksError::ConfigInvalid {
            section: "simulation".to_string(),
            key: "seed".to_string(),
            reason: "seed must be a non-negative integer".to_string(),
        })
}
