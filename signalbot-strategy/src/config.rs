use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use signalbot_ta::{
    frame::{IndicatorConfig, IndicatorSnapshot},
    indicators::MovingAverageConvergenceDivergence,
};

/// How MACD momentum is read from an [`IndicatorSnapshot`].
#[derive(
    Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MacdMode {
    /// Bullish when the MACD line is above its signal line.
    #[default]
    SignalLine,
    /// Bullish when the MACD histogram is above zero.
    ZeroLine,
}

impl MacdMode {
    /// Signed MACD momentum for this mode, positive when bullish.
    ///
    /// Returns `None` if the values this mode reads are not yet defined.
    pub fn momentum(&self, snapshot: &IndicatorSnapshot) -> Option<Decimal> {
        match self {
            MacdMode::SignalLine => snapshot
                .macd
                .zip(snapshot.macd_signal)
                .map(|(macd, signal)| macd - signal),
            MacdMode::ZeroLine => snapshot.macd_histogram,
        }
    }

    pub fn is_bullish(&self, snapshot: &IndicatorSnapshot) -> bool {
        self.momentum(snapshot)
            .is_some_and(|momentum| momentum > Decimal::ZERO)
    }

    pub fn is_bearish(&self, snapshot: &IndicatorSnapshot) -> bool {
        self.momentum(snapshot)
            .is_some_and(|momentum| momentum < Decimal::ZERO)
    }
}

/// Thresholds of the single-shot classifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SingleShotConfig {
    /// Minimum number of candles before a single-shot evaluation is attempted.
    pub min_candles: usize,
    pub macd_mode: MacdMode,
    pub rsi_oversold: Decimal,
    pub rsi_overbought: Decimal,
    pub stoch_oversold: Decimal,
    pub stoch_overbought: Decimal,
    /// Candles used for the recent high / low breakout check.
    pub recent_window: usize,
}

impl Default for SingleShotConfig {
    fn default() -> Self {
        Self {
            min_candles: 60,
            macd_mode: MacdMode::SignalLine,
            rsi_oversold: dec!(30),
            rsi_overbought: dec!(70),
            stoch_oversold: dec!(0.2),
            stoch_overbought: dec!(0.8),
            recent_window: 10,
        }
    }
}

impl SingleShotConfig {
    /// Number of candles a single-shot evaluation needs.
    pub fn required_len(&self, indicators: &IndicatorConfig) -> usize {
        self.min_candles
            .max(indicators.required_warmup())
            .max(self.recent_window)
    }
}

/// Thresholds of the streaming per-candle classifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StreamingConfig {
    pub macd_mode: MacdMode,
    pub rsi_oversold: Decimal,
    pub rsi_overbought: Decimal,
    /// Rolling close window used for support & resistance.
    pub sr_window: usize,
    /// Fractional band around support & resistance, eg/ `0.01` for 1%.
    pub sr_tolerance: Decimal,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            macd_mode: MacdMode::ZeroLine,
            rsi_oversold: dec!(30),
            rsi_overbought: dec!(70),
            sr_window: 20,
            sr_tolerance: dec!(0.01),
        }
    }
}

impl StreamingConfig {
    /// Number of candles a streaming evaluation needs.
    ///
    /// Covers the RSI & support/resistance windows plus the MACD signal line warm-up, so the
    /// newest row always has every indicator defined.
    pub fn required_len(&self, indicators: &IndicatorConfig) -> usize {
        let windows = indicators.rsi_window.max(self.sr_window).max(2) + 1;
        windows.max(MovingAverageConvergenceDivergence::warmup(
            indicators.macd_fast,
            indicators.macd_slow,
            indicators.macd_signal,
        ))
    }
}
