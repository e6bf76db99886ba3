//! Crate error types

/// Top-level error type for pairtrader.
///
/// Retryable network problems stay internal to the market-data client; what
/// callers of a pipeline see after retries are exhausted is
/// [`PairtraderError::DataUnavailable`].
#[derive(Debug, thiserror::Error)]
pub enum PairtraderError {
    #[error("no candles available for {symbol} {timeframe}")]
    DataUnavailable { symbol: String, timeframe: String },

    #[error("no strategy profile configured for {symbol} {timeframe}")]
    ConfigurationMissing { symbol: String, timeframe: String },

    #[error("invalid configuration: {reason}")]
    ConfigurationInvalid { reason: String },

    #[error("market data request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected market data payload: {reason}")]
    UnexpectedPayload { reason: String },
}

impl PairtraderError {
    /// Whether this error is worth retrying at the fetch boundary.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PairtraderError::Network(_))
    }
}
