#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use ssstocks::domain::index::Index;
use ssstocks::domain::instrument::Instrument;
use ssstocks::domain::trade::Side;
use std::io::Write;

pub const WINDOW_MINUTES: i64 = 15;

pub fn window() -> Duration {
    Duration::minutes(WINDOW_MINUTES)
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

pub fn minutes_after_t0(minutes: i64) -> DateTime<Utc> {
    t0() + Duration::minutes(minutes)
}

/// Five instruments with the given prices, reached by one trade each at t0.
pub fn index_with_prices(prices: &[f64]) -> Index {
    let instruments = prices
        .iter()
        .enumerate()
        .map(|(i, _)| Instrument::common(format!("S{i}"), 0.1, 1.0))
        .collect();
    let mut index = Index::new(instruments).unwrap();
    for (i, &price) in prices.iter().enumerate() {
        index
            .submit_trade_at(&format!("S{i}"), Side::Buy, 10, price, t0())
            .unwrap();
    }
    index.recompute_prices(window(), t0());
    index
}

pub fn write_temp_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub const GBCE_CSV: &str = "symbol,class,last_dividend,fixed_dividend,par_value
TEA,common,0.00,0,1.00
POP,common,0.08,0,1.00
ALE,common,0.23,0,0.60
GIN,preferred,0.08,2,1.00
JOE,common,0.13,0,2.50
";
