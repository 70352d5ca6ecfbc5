//! Start-up source of the instrument list.

use crate::domain::error::SsstocksError;
use crate::domain::instrument::Instrument;

pub trait InstrumentSource {
    fn load_instruments(&self) -> Result<Vec<Instrument>, SsstocksError>;
}
