use signalbot_data::error::DataError;
use thiserror::Error;

/// All errors generated in Signalbot.
///
/// Insufficient candle history is never an error, see
/// [`SignalStatus`](signalbot_strategy::result::SignalStatus).
#[derive(Debug, Error)]
pub enum SignalBotError {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("market data: {0}")]
    Data(#[from] DataError),
}
