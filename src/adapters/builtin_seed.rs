//! Instrument source backed by the built-in GBCE table.

use crate::domain::error::SsstocksError;
use crate::domain::instrument::Instrument;
use crate::domain::seed::gbce_instruments;
use crate::ports::instrument_port::InstrumentSource;

#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinSeed;

impl InstrumentSource for BuiltinSeed {
    fn load_instruments(&self) -> Result<Vec<Instrument>, SsstocksError> {
        Ok(gbce_instruments())
    }
}
