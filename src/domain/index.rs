//! Instrument registry, trade submission and the all-share index.

use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, HashSet};

use super::error::SsstocksError;
use super::instrument::Instrument;
use super::ledger::Ledger;
use super::seed::gbce_instruments;
use super::trade::{Side, TradeRecord};

/// Owns the fixed instrument set and the ledger they are priced from.
#[derive(Debug, Clone)]
pub struct Index {
    instruments: Vec<Instrument>,
    positions: HashMap<String, usize>,
    ledger: Ledger,
}

impl Index {
    /// Builds a registry over `instruments`, kept in the given order.
    pub fn new(instruments: Vec<Instrument>) -> Result<Self, SsstocksError> {
        if instruments.is_empty() {
            return Err(SsstocksError::NoInstruments);
        }

        let mut seen = HashSet::with_capacity(instruments.len());
        for instrument in &instruments {
            if instrument.symbol().is_empty() {
                return Err(SsstocksError::EmptySymbol);
            }
            let par_value = instrument.par_value();
            if !par_value.is_finite() || par_value <= 0.0 {
                return Err(SsstocksError::InvalidParValue {
                    symbol: instrument.symbol().to_string(),
                    par_value,
                });
            }
            if !seen.insert(instrument.symbol()) {
                return Err(SsstocksError::DuplicateSymbol {
                    symbol: instrument.symbol().to_string(),
                });
            }
        }

        Ok(Self::build(instruments))
    }

    /// The five-stock GBCE sample table.
    pub fn gbce() -> Self {
        Self::build(gbce_instruments())
    }

    fn build(instruments: Vec<Instrument>) -> Self {
        let positions = instruments
            .iter()
            .enumerate()
            .map(|(i, inst)| (inst.symbol().to_string(), i))
            .collect();
        Index {
            instruments,
            positions,
            ledger: Ledger::new(),
        }
    }

    pub fn exists(&self, symbol: &str) -> bool {
        self.positions.contains_key(symbol)
    }

    pub fn lookup(&self, symbol: &str) -> Option<&Instrument> {
        self.positions.get(symbol).map(|&i| &self.instruments[i])
    }

    /// Instruments in registry order.
    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Records a trade stamped with the current wall-clock time.
    pub fn submit_trade(
        &mut self,
        symbol: &str,
        side: Side,
        quantity: i64,
        price: f64,
    ) -> Result<&TradeRecord, SsstocksError> {
        self.submit_trade_at(symbol, side, quantity, price, Utc::now())
    }

    /// Records a trade stamped with `now`. Rejected trades leave the ledger
    /// untouched.
    pub fn submit_trade_at(
        &mut self,
        symbol: &str,
        side: Side,
        quantity: i64,
        price: f64,
        now: DateTime<Utc>,
    ) -> Result<&TradeRecord, SsstocksError> {
        if let Err(e) = self.check_trade(symbol, quantity, price) {
            log::warn!("rejected {side} {quantity} {symbol} @ {price}: {e}");
            return Err(e);
        }

        log::debug!("accepted {side} {quantity} {symbol} @ {price}");
        let record = TradeRecord::new(now, symbol.to_string(), side, quantity as u64, price);
        Ok(self.ledger.append(record))
    }

    fn check_trade(&self, symbol: &str, quantity: i64, price: f64) -> Result<(), SsstocksError> {
        if symbol.is_empty() {
            return Err(SsstocksError::EmptySymbol);
        }
        if !price.is_finite() {
            return Err(SsstocksError::NonFinitePrice { price });
        }
        if price < 0.0 {
            return Err(SsstocksError::NegativePrice { price });
        }
        if quantity < 0 {
            return Err(SsstocksError::NegativeQuantity { quantity });
        }
        if !self.exists(symbol) {
            return Err(SsstocksError::UnknownSymbol {
                symbol: symbol.to_string(),
            });
        }
        Ok(())
    }

    /// Every recorded trade, in submission order.
    pub fn list_trades(&self) -> &[TradeRecord] {
        self.ledger.records()
    }

    /// Recomputes the trailing price of one instrument.
    pub fn recompute_price(
        &mut self,
        symbol: &str,
        window: Duration,
        now: DateTime<Utc>,
    ) -> Result<f64, SsstocksError> {
        let i = *self
            .positions
            .get(symbol)
            .ok_or_else(|| SsstocksError::UnknownSymbol {
                symbol: symbol.to_string(),
            })?;
        Ok(self.instruments[i].recompute_price(&self.ledger, window, now))
    }

    /// Recomputes every instrument's trailing price, returning
    /// `(symbol, price)` pairs in registry order.
    pub fn recompute_prices(&mut self, window: Duration, now: DateTime<Utc>) -> Vec<(String, f64)> {
        let ledger = &self.ledger;
        self.instruments
            .iter_mut()
            .map(|inst| {
                let price = inst.recompute_price(ledger, window, now);
                (inst.symbol().to_string(), price)
            })
            .collect()
    }

    /// Geometric mean of all instrument prices.
    ///
    /// Zero prices are left out of the product but still count towards the
    /// root, which is the same as treating them as 1.
    pub fn aggregate_index(&self) -> f64 {
        let n = self.instruments.len();
        if n == 0 {
            return 0.0;
        }
        let product: f64 = self
            .instruments
            .iter()
            .map(Instrument::price)
            .filter(|&p| p > 0.0)
            .product();
        product.powf(1.0 / n as f64)
    }
}
