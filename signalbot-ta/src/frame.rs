use crate::indicators::{
    ExponentialMovingAverage, MovingAverageConvergenceDivergence, RelativeStrengthIndex,
    StochasticRsi, ema_series, macd_series, rsi_series, stoch_rsi_series,
};
use itertools::izip;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use signalbot_data::series::CandleSeries;
use tracing::debug;

/// Indicator periods used to build an [`IndicatorFrame`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub rsi_window: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub stoch_window: usize,
    /// SMA smoothing applied to raw Stochastic RSI %K (`1` = unsmoothed).
    pub stoch_smooth_k: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            rsi_window: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            ema_fast: 20,
            ema_slow: 50,
            stoch_window: 14,
            stoch_smooth_k: 1,
        }
    }
}

impl IndicatorConfig {
    /// Number of candles required for every indicator to be defined on the newest candle.
    pub fn required_warmup(&self) -> usize {
        [
            RelativeStrengthIndex::warmup(self.rsi_window),
            MovingAverageConvergenceDivergence::warmup(
                self.macd_fast,
                self.macd_slow,
                self.macd_signal,
            ),
            ExponentialMovingAverage::warmup(self.ema_fast),
            ExponentialMovingAverage::warmup(self.ema_slow),
            StochasticRsi::warmup(self.rsi_window, self.stoch_window, self.stoch_smooth_k),
        ]
        .into_iter()
        .max()
        .unwrap_or_default()
    }
}

/// Indicator values computed for a single candle. `None` means insufficient history.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct IndicatorSnapshot {
    pub rsi: Option<Decimal>,
    pub macd: Option<Decimal>,
    pub macd_signal: Option<Decimal>,
    pub macd_histogram: Option<Decimal>,
    pub ema_fast: Option<Decimal>,
    pub ema_slow: Option<Decimal>,
    pub stoch_rsi_k: Option<Decimal>,
}

/// Indicator values aligned index-for-index with the [`CandleSeries`] they were computed from.
///
/// Always recomputed in full from the series, never updated incrementally.
#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct IndicatorFrame {
    rows: Vec<IndicatorSnapshot>,
}

impl IndicatorFrame {
    pub fn compute(series: &CandleSeries, config: &IndicatorConfig) -> Self {
        let closes = series.closes();

        let rsi = rsi_series(&closes, config.rsi_window);
        let macd = macd_series(
            &closes,
            config.macd_fast,
            config.macd_slow,
            config.macd_signal,
        );
        let ema_fast = ema_series(&closes, config.ema_fast);
        let ema_slow = ema_series(&closes, config.ema_slow);
        let stoch_rsi_k = stoch_rsi_series(
            &closes,
            config.rsi_window,
            config.stoch_window,
            config.stoch_smooth_k,
        );

        let rows = izip!(rsi, macd, ema_fast, ema_slow, stoch_rsi_k)
            .map(
                |(rsi, macd, ema_fast, ema_slow, stoch_rsi_k)| IndicatorSnapshot {
                    rsi,
                    macd: macd.map(|macd| macd.macd),
                    macd_signal: macd.and_then(|macd| macd.signal),
                    macd_histogram: macd.and_then(|macd| macd.histogram),
                    ema_fast,
                    ema_slow,
                    stoch_rsi_k,
                },
            )
            .collect::<Vec<_>>();

        debug!(
            candles = series.len(),
            required_warmup = config.required_warmup(),
            latest = ?rows.last(),
            "computed IndicatorFrame"
        );

        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&IndicatorSnapshot> {
        self.rows.get(index)
    }

    /// Snapshot for the newest candle.
    pub fn latest(&self) -> Option<&IndicatorSnapshot> {
        self.rows.last()
    }

    pub fn rows(&self) -> &[IndicatorSnapshot] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone, Utc};
    use rust_decimal_macros::dec;
    use signalbot_data::candle::Candle;

    fn rising_series(count: i64) -> CandleSeries {
        let start = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        CandleSeries::new(
            (0..count)
                .map(|i| {
                    let open = dec!(100) + Decimal::from(i) / Decimal::TWO;
                    let close = open + dec!(0.5);
                    Candle::new(
                        start + TimeDelta::minutes(i),
                        open,
                        close + dec!(0.1),
                        open - dec!(0.1),
                        close,
                        dec!(10),
                    )
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_required_warmup_default() {
        assert_eq!(IndicatorConfig::default().required_warmup(), 50);

        let config = IndicatorConfig {
            ema_slow: 10,
            ..IndicatorConfig::default()
        };
        assert_eq!(config.required_warmup(), 34);
    }

    #[test]
    fn test_frame_aligned_with_series() {
        let series = rising_series(60);
        let frame = IndicatorFrame::compute(&series, &IndicatorConfig::default());

        assert_eq!(frame.len(), series.len());
        assert_eq!(frame.get(13).and_then(|row| row.rsi), None);
        assert!(frame.get(14).and_then(|row| row.rsi).is_some());
        assert_eq!(frame.get(48).and_then(|row| row.ema_slow), None);
        assert!(frame.get(49).and_then(|row| row.ema_slow).is_some());

        let latest = frame.latest().unwrap();
        assert_eq!(latest.rsi, Some(Decimal::ONE_HUNDRED));
        assert!(latest.ema_fast > latest.ema_slow);
        assert!(latest.macd.unwrap() > Decimal::ZERO);
    }

    #[test]
    fn test_frame_shorter_than_warmup_is_undefined() {
        let series = rising_series(20);
        let frame = IndicatorFrame::compute(&series, &IndicatorConfig::default());

        assert_eq!(frame.len(), 20);
        for row in frame.rows() {
            assert_eq!(row.ema_slow, None);
            assert_eq!(row.macd, None);
            assert_eq!(row.macd_signal, None);
            assert_eq!(row.stoch_rsi_k, None);
        }
    }

    #[test]
    fn test_frame_of_empty_series() {
        let frame = IndicatorFrame::compute(&CandleSeries::default(), &IndicatorConfig::default());

        assert!(frame.is_empty());
        assert_eq!(frame.latest(), None);
    }
}
