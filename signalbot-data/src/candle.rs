use crate::error::DataError;
use chrono::{DateTime, Utc};
use derive_more::Constructor;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Normalised Signalbot OHLCV [`Candle`] model.
///
/// Candles are plain values; validation of the OHLC invariants happens once when a
/// [`CandleSeries`](crate::series::CandleSeries) is constructed.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Deserialize, Serialize, Constructor,
)]
pub struct Candle {
    pub open_time: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

impl Candle {
    /// Close above open.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Close below open.
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Absolute size of the real body.
    pub fn body(&self) -> Decimal {
        (self.close - self.open).abs()
    }

    /// Full high-low range of the candle.
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }

    pub fn body_top(&self) -> Decimal {
        self.open.max(self.close)
    }

    pub fn body_bottom(&self) -> Decimal {
        self.open.min(self.close)
    }

    pub fn upper_wick(&self) -> Decimal {
        self.high - self.body_top()
    }

    pub fn lower_wick(&self) -> Decimal {
        self.body_bottom() - self.low
    }

    /// Midpoint of the real body, `(open + close) / 2`.
    pub fn body_midpoint(&self) -> Decimal {
        (self.open + self.close) / Decimal::TWO
    }

    /// Real body size relative to the full range.
    ///
    /// Returns `None` for a zero-range candle (`high == low`).
    pub fn body_ratio(&self) -> Option<Decimal> {
        let range = self.range();
        (range > Decimal::ZERO).then(|| self.body() / range)
    }

    /// Check the OHLCV invariants: non-negative values, `high >= max(open, close)` and
    /// `low <= min(open, close)`.
    pub fn validate(&self) -> Result<(), DataError> {
        let invalid = |reason| DataError::InvalidCandle {
            open_time: self.open_time,
            reason,
        };

        let values = [self.open, self.high, self.low, self.close, self.volume];
        if values.iter().any(|value| *value < Decimal::ZERO) {
            return Err(invalid("negative price or volume"));
        }
        if self.high < self.body_top() {
            return Err(invalid("high below open/close"));
        }
        if self.low > self.body_bottom() {
            return Err(invalid("low above open/close"));
        }

        Ok(())
    }
}
