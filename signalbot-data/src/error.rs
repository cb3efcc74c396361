use chrono::{DateTime, Utc};
use smol_str::SmolStr;
use thiserror::Error;

/// All errors generated in `signalbot-data`.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum DataError {
    #[error("invalid candle at {open_time}: {reason}")]
    InvalidCandle {
        open_time: DateTime<Utc>,
        reason: &'static str,
    },

    #[error("candle open_time {current} does not follow previous open_time {previous}")]
    NonIncreasingTime {
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },

    #[error("unknown pair: {0}")]
    UnknownPair(SmolStr),

    #[error("candle source: {0}")]
    Source(String),

    #[error("deserialising candle payload: {0}")]
    Deserialise(String),
}

impl From<serde_json::Error> for DataError {
    fn from(value: serde_json::Error) -> Self {
        Self::Deserialise(value.to_string())
    }
}
