//! Trade records appended to the ledger.

use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Past-tense verb used when listing trades.
    pub fn verb(&self) -> &'static str {
        match self {
            Side::Buy => "BOUGHT",
            Side::Sell => "SOLD",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// A single executed trade. Fields are private so a record cannot change
/// once it has been created.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    timestamp: DateTime<Utc>,
    symbol: String,
    side: Side,
    quantity: u64,
    price: f64,
}

impl TradeRecord {
    pub(crate) fn new(
        timestamp: DateTime<Utc>,
        symbol: String,
        side: Side,
        quantity: u64,
        price: f64,
    ) -> Self {
        TradeRecord {
            timestamp,
            symbol,
            side,
            quantity,
            price,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// price * quantity
    pub fn notional(&self) -> f64 {
        self.price * self.quantity as f64
    }
}
