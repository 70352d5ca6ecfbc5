//! Domain error types.

/// Top-level error type for ssstocks.
#[derive(Debug, thiserror::Error)]
pub enum SsstocksError {
    #[error("trade rejected: symbol is empty")]
    EmptySymbol,

    #[error("trade rejected: negative quantity {quantity}")]
    NegativeQuantity { quantity: i64 },

    #[error("trade rejected: negative price {price}")]
    NegativePrice { price: f64 },

    #[error("trade rejected: price {price} is not a finite amount")]
    NonFinitePrice { price: f64 },

    #[error("unknown symbol {symbol}")]
    UnknownSymbol { symbol: String },

    #[error("duplicate symbol {symbol} in instrument list")]
    DuplicateSymbol { symbol: String },

    #[error("instrument list is empty")]
    NoInstruments,

    #[error("{symbol}: par value {par_value} must be a positive finite amount")]
    InvalidParValue { symbol: String, par_value: f64 },

    #[error("invalid instrument at line {line}: {reason}")]
    InvalidInstrument { line: usize, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SsstocksError {
    /// True for the validation failures of trade submission.
    pub fn is_trade_rejection(&self) -> bool {
        matches!(
            self,
            SsstocksError::EmptySymbol
                | SsstocksError::NegativeQuantity { .. }
                | SsstocksError::NegativePrice { .. }
                | SsstocksError::NonFinitePrice { .. }
                | SsstocksError::UnknownSymbol { .. }
        )
    }
}

impl From<&SsstocksError> for std::process::ExitCode {
    fn from(err: &SsstocksError) -> Self {
        let code: u8 = match err {
            SsstocksError::Io(_) => 1,
            SsstocksError::ConfigParse { .. } | SsstocksError::ConfigInvalid { .. } => 2,
            SsstocksError::DuplicateSymbol { .. }
            | SsstocksError::NoInstruments
            | SsstocksError::InvalidParValue { .. }
            | SsstocksError::InvalidInstrument { .. } => 3,
            SsstocksError::EmptySymbol
            | SsstocksError::NegativeQuantity { .. }
            | SsstocksError::NegativePrice { .. }
            | SsstocksError::NonFinitePrice { .. }
            | SsstocksError::UnknownSymbol { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
