//! The GBCE sample table. Values are in pounds rather than pennies.

use super::instrument::Instrument;

pub fn gbce_instruments() -> Vec<Instrument> {
    vec![
        Instrument::common("TEA", 0.00, 1.00),
        Instrument::common("POP", 0.08, 1.00),
        Instrument::common("ALE", 0.23, 0.60),
        Instrument::preferred("GIN", 0.08, 2.0, 1.00),
        Instrument::common("JOE", 0.13, 2.50),
    ]
}
