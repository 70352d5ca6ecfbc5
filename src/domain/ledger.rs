//! Append-only trade ledger shared by every instrument.
//!
//! Records are kept in insertion order. There are no per-instrument
//! sub-ledgers: filtering by symbol happens at read time.

use chrono::{DateTime, Duration, Utc};

use super::trade::TradeRecord;

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    records: Vec<TradeRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger {
            records: Vec::new(),
        }
    }

    pub(crate) fn append(&mut self, record: TradeRecord) -> &TradeRecord {
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    /// Records for `symbol` whose age at `now` is at most `window`.
    pub fn trades_within<'a>(
        &'a self,
        symbol: &'a str,
        window: Duration,
        now: DateTime<Utc>,
    ) -> impl Iterator<Item = &'a TradeRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| r.symbol() == symbol && now - r.timestamp() <= window)
    }

    /// Σ(price × quantity) / Σ(quantity) over the trades in the window.
    ///
    /// Returns `None` when no trade matches, or when every matching trade
    /// has zero quantity.
    pub fn volume_weighted_price(
        &self,
        symbol: &str,
        window: Duration,
        now: DateTime<Utc>,
    ) -> Option<f64> {
        let (notional, volume) = self
            .trades_within(symbol, window, now)
            .fold((0.0_f64, 0.0_f64), |(n, v), r| {
                (n + r.notional(), v + r.quantity() as f64)
            });

        if volume == 0.0 {
            None
        } else {
            Some(notional / volume)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trade::Side;
    use chrono::TimeZone;

    fn at(min: u32, sec: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 10, min, sec).unwrap()
    }

    fn record(ts: DateTime<Utc>, symbol: &str, qty: u64, price: f64) -> TradeRecord {
        TradeRecord::new(ts, symbol.to_string(), Side::Buy, qty, price)
    }

    #[test]
    fn new_ledger_is_empty() {
        let ledger = Ledger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.len(), 0);
        assert!(ledger.records().is_empty());
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut ledger = Ledger::new();
        ledger.append(record(at(0, 0), "TEA", 1, 1.0));
        ledger.append(record(at(0, 1), "POP", 2, 2.0));
        ledger.append(record(at(0, 2), "TEA", 3, 3.0));

        let symbols: Vec<_> = ledger.records().iter().map(|r| r.symbol()).collect();
        assert_eq!(symbols, vec!["TEA", "POP", "TEA"]);
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn trades_within_filters_symbol_and_age() {
        let mut ledger = Ledger::new();
        ledger.append(record(at(0, 0), "TEA", 1, 1.0));
        ledger.append(record(at(10, 0), "TEA", 2, 2.0));
        ledger.append(record(at(10, 0), "POP", 3, 3.0));

        let now = at(20, 0);
        let hits: Vec<_> = ledger
            .trades_within("TEA", Duration::minutes(15), now)
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].quantity(), 2);
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let mut ledger = Ledger::new();
        ledger.append(record(at(0, 0), "TEA", 1, 1.0));

        let now = at(15, 0);
        assert_eq!(ledger.trades_within("TEA", Duration::minutes(15), now).count(), 1);
        let later = at(15, 1);
        assert_eq!(ledger.trades_within("TEA", Duration::minutes(15), later).count(), 0);
    }

    #[test]
    fn volume_weighted_price_matches_hand_computation() {
        let mut ledger = Ledger::new();
        ledger.append(record(at(0, 0), "ALE", 10, 100.0));
        ledger.append(record(at(0, 0), "ALE", 30, 80.0));

        let vwap = ledger
            .volume_weighted_price("ALE", Duration::minutes(15), at(1, 0))
            .unwrap();
        assert!((vwap - 85.0).abs() < 1e-12);
    }

    #[test]
    fn volume_weighted_price_survives_huge_volumes() {
        let mut ledger = Ledger::new();
        for _ in 0..3 {
            ledger.append(record(at(0, 0), "TEA", i64::MAX as u64, 1.0));
        }
        let vwap = ledger
            .volume_weighted_price("TEA", Duration::minutes(15), at(0, 0))
            .unwrap();
        assert!((vwap - 1.0).abs() < 1e-9);
    }

    #[test]
    fn volume_weighted_price_none_without_trades() {
        let ledger = Ledger::new();
        assert!(
            ledger
                .volume_weighted_price("ALE", Duration::minutes(15), at(0, 0))
                .is_none()
        );
    }

    #[test]
    fn volume_weighted_price_none_for_zero_volume() {
        let mut ledger = Ledger::new();
        ledger.append(record(at(0, 0), "ALE", 0, 5.0));
        assert!(
            ledger
                .volume_weighted_price("ALE", Duration::minutes(15), at(0, 0))
                .is_none()
        );
    }
}
