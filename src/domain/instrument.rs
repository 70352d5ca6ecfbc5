//! Tradable instruments and their per-instrument analytics.

use chrono::{DateTime, Duration, Utc};
use std::fmt;

use super::ledger::Ledger;

/// Stock classification. Only preferred stock carries a fixed dividend rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StockClass {
    Common,
    /// `fixed_dividend_rate` is a percentage, e.g. `2.0` for 2%.
    Preferred { fixed_dividend_rate: f64 },
}

impl StockClass {
    pub fn fixed_dividend_rate(&self) -> f64 {
        match self {
            StockClass::Common => 0.0,
            StockClass::Preferred {
                fixed_dividend_rate,
            } => *fixed_dividend_rate,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockClass::Common => "COMM",
            StockClass::Preferred { .. } => "PREF",
        }
    }
}

impl fmt::Display for StockClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    symbol: String,
    class: StockClass,
    last_dividend: f64,
    par_value: f64,
    price: f64,
}

impl Instrument {
    /// Creates an instrument priced at its par value.
    pub fn new(symbol: impl Into<String>, class: StockClass, last_dividend: f64, par_value: f64) -> Self {
        Instrument {
            symbol: symbol.into(),
            class,
            last_dividend,
            par_value,
            price: par_value,
        }
    }

    pub fn common(symbol: impl Into<String>, last_dividend: f64, par_value: f64) -> Self {
        Self::new(symbol, StockClass::Common, last_dividend, par_value)
    }

    pub fn preferred(
        symbol: impl Into<String>,
        last_dividend: f64,
        fixed_dividend_rate: f64,
        par_value: f64,
    ) -> Self {
        Self::new(
            symbol,
            StockClass::Preferred {
                fixed_dividend_rate,
            },
            last_dividend,
            par_value,
        )
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn class(&self) -> StockClass {
        self.class
    }

    pub fn last_dividend(&self) -> f64 {
        self.last_dividend
    }

    pub fn fixed_dividend_rate(&self) -> f64 {
        self.class.fixed_dividend_rate()
    }

    pub fn par_value(&self) -> f64 {
        self.par_value
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Common: last_dividend / price.
    /// Preferred: (fixed_dividend_rate% × par_value) / price.
    /// Zero when the price is zero.
    pub fn dividend_yield(&self) -> f64 {
        if self.price == 0.0 {
            return 0.0;
        }
        let dividend = match self.class {
            StockClass::Common => self.last_dividend,
            StockClass::Preferred {
                fixed_dividend_rate,
            } => fixed_dividend_rate / 100.0 * self.par_value,
        };
        dividend / self.price
    }

    /// price / last_dividend, or zero when no dividend was paid.
    pub fn pe_ratio(&self) -> f64 {
        if self.last_dividend == 0.0 {
            return 0.0;
        }
        self.price / self.last_dividend
    }

    /// Resets the price to the volume-weighted average of this instrument's
    /// trades no older than `window` at `now`. The price is left untouched
    /// when the window holds no volume. Returns the resulting price.
    pub fn recompute_price(&mut self, ledger: &Ledger, window: Duration, now: DateTime<Utc>) -> f64 {
        match ledger.volume_weighted_price(&self.symbol, window, now) {
            Some(vwap) => {
                log::debug!("{}: price {} -> {}", self.symbol, self.price, vwap);
                self.price = vwap;
            }
            None => log::debug!("{}: no trades in window, price unchanged", self.symbol),
        }
        self.price
    }
}
