//! Random demo trading: one trade per instrument.

use chrono::{DateTime, Utc};
use rand::Rng;

use super::error::SsstocksError;
use super::index::Index;
use super::trade::Side;

pub const MAX_RANDOM_QUANTITY: i64 = 109;
pub const MIN_RANDOM_PRICE: f64 = 0.41;
/// Number of one-penny price steps above [`MIN_RANDOM_PRICE`].
pub const RANDOM_PRICE_STEPS: u32 = 299;

/// Draws one random trade for every instrument in the index, stamped `now`.
/// Returns the number of trades added.
pub fn random_trades<R: Rng + ?Sized>(
    index: &mut Index,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<usize, SsstocksError> {
    let symbols: Vec<String> = index
        .instruments()
        .iter()
        .map(|i| i.symbol().to_string())
        .collect();

    for symbol in &symbols {
        let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
        let quantity = rng.gen_range(1..=MAX_RANDOM_QUANTITY);
        let price = MIN_RANDOM_PRICE + f64::from(rng.gen_range(0..RANDOM_PRICE_STEPS)) / 100.0;
        index.submit_trade_at(symbol, side, quantity, price, now)?;
    }

    Ok(symbols.len())
}
