use crate::signal::{CandleSignal, Signal};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use signalbot_ta::{frame::IndicatorSnapshot, patterns::PatternFlags};
use smol_str::SmolStr;

/// Whether an evaluation had enough candles to run.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SignalStatus {
    #[default]
    Complete,
    InsufficientData { required: usize, available: usize },
}

impl SignalStatus {
    /// [`SignalStatus::Complete`] if `available >= required`.
    pub fn check(required: usize, available: usize) -> Self {
        if available >= required {
            Self::Complete
        } else {
            Self::InsufficientData {
                required,
                available,
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Result of a single-shot evaluation, constructed fresh per invocation.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize, Serialize)]
pub struct SignalResult {
    pub symbol: SmolStr,
    /// `open_time` of the newest candle evaluated.
    pub timestamp: Option<DateTime<Utc>>,
    /// Close of the newest candle evaluated.
    pub price: Option<Decimal>,
    pub signal: Signal,
    pub support: Option<Decimal>,
    pub resistance: Option<Decimal>,
    pub patterns: PatternFlags,
    pub indicators: IndicatorSnapshot,
    pub status: SignalStatus,
}

/// One labelled candle of a streaming evaluation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize, Serialize)]
pub struct SignalRow {
    pub open_time: DateTime<Utc>,
    pub close: Decimal,
    pub rsi: Option<Decimal>,
    /// MACD momentum as read by the configured [`MacdMode`](crate::config::MacdMode).
    pub macd: Option<Decimal>,
    pub support: Option<Decimal>,
    pub resistance: Option<Decimal>,
    pub price_action: CandleSignal,
    pub signal: CandleSignal,
}

/// Result of a streaming evaluation: one [`SignalRow`] per candle, oldest first.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize, Serialize)]
pub struct StreamingReport {
    pub symbol: SmolStr,
    pub status: SignalStatus,
    pub rows: Vec<SignalRow>,
}

impl StreamingReport {
    /// Newest `n` rows, oldest first.
    pub fn tail(&self, n: usize) -> &[SignalRow] {
        &self.rows[self.rows.len().saturating_sub(n)..]
    }

    pub fn latest(&self) -> Option<&SignalRow> {
        self.rows.last()
    }

    /// Rows labelled [`CandleSignal::Buy`] or [`CandleSignal::Sell`].
    pub fn actionable(&self) -> impl Iterator<Item = &SignalRow> {
        self.rows
            .iter()
            .filter(|row| row.signal != CandleSignal::Hold)
    }
}
