use crate::{candle::Candle, error::DataError};
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt::{Display, Formatter};
use tracing::debug;

/// Candle interval supported by Signalbot market data sources.
#[derive(
    Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize,
)]
pub enum Interval {
    #[default]
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "3m")]
    ThreeMinutes,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "1d")]
    OneDay,
}

impl Interval {
    /// Return the &str representation of this [`Interval`], as used by Binance.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::OneMinute => "1m",
            Interval::ThreeMinutes => "3m",
            Interval::FiveMinutes => "5m",
            Interval::FifteenMinutes => "15m",
            Interval::ThirtyMinutes => "30m",
            Interval::OneHour => "1h",
            Interval::FourHours => "4h",
            Interval::OneDay => "1d",
        }
    }

    pub fn seconds(&self) -> u64 {
        match self {
            Interval::OneMinute => 60,
            Interval::ThreeMinutes => 3 * 60,
            Interval::FiveMinutes => 5 * 60,
            Interval::FifteenMinutes => 15 * 60,
            Interval::ThirtyMinutes => 30 * 60,
            Interval::OneHour => 60 * 60,
            Interval::FourHours => 4 * 60 * 60,
            Interval::OneDay => 24 * 60 * 60,
        }
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Market data collaborator that supplies [`Candle`]s for an already-resolved provider ticker.
///
/// Implementations must return candles in ascending `open_time` order. Timeout & retry policy
/// belongs to the implementation, not to the signal pipeline.
#[async_trait]
pub trait CandleSource {
    /// Fetch the newest `limit` candles of `interval` for `ticker`.
    async fn fetch_candles(
        &self,
        ticker: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, DataError>;
}

/// [`CandleSource`] replaying candles held in memory, keyed by ticker.
///
/// Useful for replays and tests. The `interval` argument is ignored.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCandleSource {
    candles: IndexMap<SmolStr, Vec<Candle>>,
}

impl InMemoryCandleSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) the candles served for `ticker`.
    pub fn with_candles<S>(mut self, ticker: S, candles: Vec<Candle>) -> Self
    where
        S: Into<SmolStr>,
    {
        self.candles.insert(ticker.into(), candles);
        self
    }
}

#[async_trait]
impl CandleSource for InMemoryCandleSource {
    async fn fetch_candles(
        &self,
        ticker: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, DataError> {
        let candles = self
            .candles
            .get(ticker)
            .ok_or_else(|| DataError::Source(format!("no candles held for {ticker}")))?;

        let start = candles.len().saturating_sub(limit);
        debug!(
            %ticker,
            %interval,
            limit,
            served = candles.len() - start,
            "serving in-memory candles"
        );

        Ok(candles[start..].to_vec())
    }
}
