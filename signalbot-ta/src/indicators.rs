use itertools::Itertools;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Simple moving average indicator.
#[derive(Debug, Clone)]
pub struct SimpleMovingAverage {
    period: usize,
    values: VecDeque<Decimal>,
    sum: Decimal,
}

impl SimpleMovingAverage {
    /// Create a new SMA with the given period.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            values: VecDeque::with_capacity(period),
            sum: Decimal::ZERO,
        }
    }

    /// Update the SMA with a new value and return the latest average once `period` values have
    /// been observed.
    pub fn update(&mut self, value: Decimal) -> Option<Decimal> {
        if self.period == 0 {
            return None;
        }

        self.values.push_back(value);
        self.sum += value;
        if self.values.len() > self.period {
            if let Some(old) = self.values.pop_front() {
                self.sum -= old;
            }
        }
        self.average()
    }

    pub fn is_ready(&self) -> bool {
        self.period > 0 && self.values.len() == self.period
    }

    /// Current average value if the window is full.
    pub fn average(&self) -> Option<Decimal> {
        self.is_ready()
            .then(|| self.sum / Decimal::from(self.period as u64))
    }
}

/// Exponential moving average indicator.
///
/// Multiplier `k = 2 / (period + 1)`, seeded with the simple average of the first `period`
/// values.
#[derive(Debug, Clone)]
pub struct ExponentialMovingAverage {
    multiplier: Decimal,
    seed: SimpleMovingAverage,
    value: Option<Decimal>,
}

impl ExponentialMovingAverage {
    /// Create a new EMA with the given period.
    pub fn new(period: usize) -> Self {
        let multiplier = Decimal::TWO / Decimal::from(period as u64 + 1);
        Self {
            multiplier,
            seed: SimpleMovingAverage::new(period),
            value: None,
        }
    }

    /// Number of values required before the first EMA is produced.
    pub fn warmup(period: usize) -> usize {
        period
    }

    /// Update the EMA with a new price and return the latest value if initialised.
    pub fn update(&mut self, price: Decimal) -> Option<Decimal> {
        let next = match self.value {
            Some(prev) => Some((price - prev) * self.multiplier + prev),
            None => self.seed.update(price),
        };
        self.value = next;
        next
    }

    /// Current EMA value if initialised.
    pub fn value(&self) -> Option<Decimal> {
        self.value
    }
}

/// Relative Strength Index using Wilder's smoothing (`1 / period`).
///
/// The first average gain & loss are simple averages of the first `period` close-to-close
/// changes, so the first value is produced on the `period + 1`th close.
#[derive(Debug, Clone)]
pub struct RelativeStrengthIndex {
    period: Decimal,
    prev_close: Option<Decimal>,
    seed_gain: SimpleMovingAverage,
    seed_loss: SimpleMovingAverage,
    averages: Option<(Decimal, Decimal)>,
}

impl RelativeStrengthIndex {
    pub fn new(period: usize) -> Self {
        Self {
            period: Decimal::from(period as u64),
            prev_close: None,
            seed_gain: SimpleMovingAverage::new(period),
            seed_loss: SimpleMovingAverage::new(period),
            averages: None,
        }
    }

    /// Number of closes required before the first RSI is produced.
    pub fn warmup(period: usize) -> usize {
        period + 1
    }

    /// Update the RSI with a new close and return the latest value in `[0, 100]`.
    pub fn update(&mut self, close: Decimal) -> Option<Decimal> {
        let prev = self.prev_close.replace(close)?;

        let change = close - prev;
        let gain = change.max(Decimal::ZERO);
        let loss = (-change).max(Decimal::ZERO);

        let (avg_gain, avg_loss) = match self.averages {
            Some((avg_gain, avg_loss)) => {
                let carried = self.period - Decimal::ONE;
                (
                    (avg_gain * carried + gain) / self.period,
                    (avg_loss * carried + loss) / self.period,
                )
            }
            None => match (self.seed_gain.update(gain), self.seed_loss.update(loss)) {
                (Some(avg_gain), Some(avg_loss)) => (avg_gain, avg_loss),
                _ => return None,
            },
        };

        self.averages = Some((avg_gain, avg_loss));
        Some(rsi_from_averages(avg_gain, avg_loss))
    }
}

/// `100 * avg_gain / (avg_gain + avg_loss)`, equal to `100 - 100 / (1 + RS)` without dividing by a
/// tiny `avg_loss`.
///
/// No losses gives 100, unless there were no gains either (flat prices) which gives a neutral 50.
fn rsi_from_averages(avg_gain: Decimal, avg_loss: Decimal) -> Decimal {
    if avg_loss.is_zero() {
        return if avg_gain.is_zero() {
            dec!(50)
        } else {
            Decimal::ONE_HUNDRED
        };
    }

    Decimal::ONE_HUNDRED * (avg_gain / (avg_gain + avg_loss))
}

/// Single MACD observation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize, Serialize)]
pub struct MacdValue {
    /// `EMA(fast) - EMA(slow)`.
    pub macd: Decimal,
    /// EMA of the MACD line.
    pub signal: Option<Decimal>,
    /// `macd - signal`.
    pub histogram: Option<Decimal>,
}

/// Moving Average Convergence Divergence.
#[derive(Debug, Clone)]
pub struct MovingAverageConvergenceDivergence {
    fast: ExponentialMovingAverage,
    slow: ExponentialMovingAverage,
    signal: ExponentialMovingAverage,
}

impl MovingAverageConvergenceDivergence {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self {
            fast: ExponentialMovingAverage::new(fast),
            slow: ExponentialMovingAverage::new(slow),
            signal: ExponentialMovingAverage::new(signal),
        }
    }

    /// Number of closes required before the first signal line value is produced.
    pub fn warmup(fast: usize, slow: usize, signal: usize) -> usize {
        (fast.max(slow) + signal).saturating_sub(1)
    }

    pub fn update(&mut self, close: Decimal) -> Option<MacdValue> {
        let fast = self.fast.update(close);
        let slow = self.slow.update(close);
        let macd = fast.zip(slow).map(|(fast, slow)| fast - slow)?;

        let signal = self.signal.update(macd);
        Some(MacdValue {
            macd,
            signal,
            histogram: signal.map(|signal| macd - signal),
        })
    }
}

/// Stochastic RSI %K as a `[0, 1]` fraction.
///
/// `(RSI - min(RSI, window)) / (max(RSI, window) - min(RSI, window))`, optionally smoothed by an
/// SMA of `smooth_k` values (`smooth_k <= 1` leaves the raw value). A window where RSI did not
/// move has no defined %K.
#[derive(Debug, Clone)]
pub struct StochasticRsi {
    rsi: RelativeStrengthIndex,
    window: usize,
    history: VecDeque<Decimal>,
    smoothing: SimpleMovingAverage,
}

impl StochasticRsi {
    pub fn new(rsi_period: usize, window: usize, smooth_k: usize) -> Self {
        Self {
            rsi: RelativeStrengthIndex::new(rsi_period),
            window,
            history: VecDeque::with_capacity(window),
            smoothing: SimpleMovingAverage::new(smooth_k.max(1)),
        }
    }

    /// Number of closes required before the first %K is produced.
    pub fn warmup(rsi_period: usize, window: usize, smooth_k: usize) -> usize {
        (RelativeStrengthIndex::warmup(rsi_period) + window + smooth_k.max(1)).saturating_sub(2)
    }

    pub fn update(&mut self, close: Decimal) -> Option<Decimal> {
        let rsi = self.rsi.update(close)?;

        self.history.push_back(rsi);
        if self.history.len() > self.window {
            self.history.pop_front();
        }
        if self.window == 0 || self.history.len() < self.window {
            return None;
        }

        let (min, max) = self.history.iter().copied().minmax().into_option()?;
        let range = max - min;
        if range.is_zero() {
            return None;
        }

        self.smoothing.update((rsi - min) / range)
    }
}

/// EMA of `values`, index-aligned (`None` during warm-up).
pub fn ema_series(values: &[Decimal], period: usize) -> Vec<Option<Decimal>> {
    let mut ema = ExponentialMovingAverage::new(period);
    values.iter().map(|value| ema.update(*value)).collect()
}

/// Wilder RSI of `closes`, index-aligned (`None` for the first `period` entries).
pub fn rsi_series(closes: &[Decimal], period: usize) -> Vec<Option<Decimal>> {
    let mut rsi = RelativeStrengthIndex::new(period);
    closes.iter().map(|close| rsi.update(*close)).collect()
}

/// MACD of `closes`, index-aligned.
pub fn macd_series(
    closes: &[Decimal],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Vec<Option<MacdValue>> {
    let mut macd = MovingAverageConvergenceDivergence::new(fast, slow, signal);
    closes.iter().map(|close| macd.update(*close)).collect()
}

/// Stochastic RSI %K of `closes`, index-aligned.
pub fn stoch_rsi_series(
    closes: &[Decimal],
    rsi_period: usize,
    window: usize,
    smooth_k: usize,
) -> Vec<Option<Decimal>> {
    let mut stoch = StochasticRsi::new(rsi_period, window, smooth_k);
    closes.iter().map(|close| stoch.update(*close)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decimals(values: &[i64]) -> Vec<Decimal> {
        values.iter().copied().map(Decimal::from).collect()
    }

    fn first_defined<T>(series: &[Option<T>]) -> Option<usize> {
        series.iter().position(Option::is_some)
    }

    #[test]
    fn test_sma() {
        let mut sma = SimpleMovingAverage::new(3);
        assert_eq!(sma.update(dec!(1)), None);
        assert_eq!(sma.update(dec!(2)), None);
        assert_eq!(sma.update(dec!(3)), Some(dec!(2)));
        assert_eq!(sma.update(dec!(4)), Some(dec!(3)));

        let mut zero = SimpleMovingAverage::new(0);
        assert_eq!(zero.update(dec!(1)), None);
    }

    #[test]
    fn test_ema_seeded_with_sma() {
        let mut ema = ExponentialMovingAverage::new(3);
        assert_eq!(ema.update(dec!(1)), None);
        assert_eq!(ema.update(dec!(2)), None);
        assert_eq!(ema.update(dec!(3)), Some(dec!(2)));
        // k = 0.5: (6 - 2) * 0.5 + 2
        assert_eq!(ema.update(dec!(6)), Some(dec!(4)));
        assert_eq!(ema.value(), Some(dec!(4)));
    }

    #[test]
    fn test_ema_series_shorter_than_period_is_undefined() {
        let actual = ema_series(&decimals(&[1, 2, 3, 4]), 5);
        assert!(actual.iter().all(Option::is_none));
        assert_eq!(actual.len(), 4);
    }

    #[test]
    fn test_rsi_warmup_and_values() {
        // changes: +1, -1, +2
        let actual = rsi_series(&decimals(&[10, 11, 10, 12]), 2);

        assert_eq!(actual[0], None);
        assert_eq!(actual[1], None);
        // avg_gain = 0.5, avg_loss = 0.5
        assert_eq!(actual[2], Some(dec!(50)));
        // avg_gain = (0.5 + 2) / 2 = 1.25, avg_loss = 0.25, rs = 5
        assert_eq!(
            actual[3].map(|rsi| rsi.round_dp(6)),
            Some((Decimal::ONE_HUNDRED - Decimal::ONE_HUNDRED / dec!(6)).round_dp(6))
        );
        assert_eq!(first_defined(&rsi_series(&decimals(&[1; 30]), 14)), Some(14));
    }

    #[test]
    fn test_rsi_extremes() {
        let rising = rsi_series(&decimals(&(0..20).collect::<Vec<_>>()), 14);
        let falling = rsi_series(&decimals(&(0..20).rev().collect::<Vec<_>>()), 14);
        let flat = rsi_series(&decimals(&[7; 20]), 14);

        assert_eq!(rising.last().copied().flatten(), Some(Decimal::ONE_HUNDRED));
        assert_eq!(falling.last().copied().flatten(), Some(Decimal::ZERO));
        assert_eq!(flat.last().copied().flatten(), Some(dec!(50)));
    }

    #[test]
    fn test_rsi_with_vanishing_average_loss() {
        // Average loss of 1e-28 against gains of 10
        let closes = std::iter::once(dec!(0.0000000000000000000000000014))
            .chain((0..20).map(|i: i64| Decimal::from(i * 10)))
            .collect::<Vec<_>>();

        let rsi = rsi_series(&closes, 14);

        let last = rsi.last().copied().flatten().unwrap();
        assert!(last > dec!(99) && last <= Decimal::ONE_HUNDRED, "{last}");
        for rsi in rsi.into_iter().flatten() {
            assert!(rsi >= Decimal::ZERO && rsi <= Decimal::ONE_HUNDRED, "{rsi}");
        }
    }

    #[test]
    fn test_rsi_bounded() {
        let closes = (0..200)
            .map(|i: i64| Decimal::from(100 + (i * 37 % 23) - (i * 11 % 7)))
            .collect::<Vec<_>>();

        for rsi in rsi_series(&closes, 14).into_iter().flatten() {
            assert!(rsi >= Decimal::ZERO && rsi <= Decimal::ONE_HUNDRED, "{rsi}");
        }
    }

    #[test]
    fn test_macd_warmup() {
        let closes = (0..60).map(|i: i64| Decimal::from(100 + i % 5)).collect::<Vec<_>>();
        let actual = macd_series(&closes, 12, 26, 9);

        assert_eq!(first_defined(&actual), Some(25));
        let first_signal = actual
            .iter()
            .position(|value| value.is_some_and(|value| value.signal.is_some()));
        assert_eq!(first_signal, Some(33));
        assert_eq!(MovingAverageConvergenceDivergence::warmup(12, 26, 9), 34);

        let latest = actual[59].unwrap();
        assert_eq!(latest.histogram, latest.signal.map(|signal| latest.macd - signal));
    }

    #[test]
    fn test_macd_of_constant_series_is_zero() {
        let actual = macd_series(&decimals(&[5; 40]), 12, 26, 9);
        let latest = actual[39].unwrap();

        assert_eq!(latest.macd, Decimal::ZERO);
        assert_eq!(latest.signal, Some(Decimal::ZERO));
        assert_eq!(latest.histogram, Some(Decimal::ZERO));
    }

    #[test]
    fn test_stoch_rsi_warmup_and_bounds() {
        let closes = (0..120)
            .map(|i: i64| Decimal::from(100 + (i * 13 % 17) - (i * 5 % 9)))
            .collect::<Vec<_>>();
        let actual = stoch_rsi_series(&closes, 14, 14, 1);

        assert!(actual[..27].iter().all(Option::is_none));
        assert_eq!(StochasticRsi::warmup(14, 14, 1), 28);
        assert_eq!(StochasticRsi::warmup(14, 14, 3), 30);

        let defined = actual.iter().flatten().collect::<Vec<_>>();
        assert!(!defined.is_empty());
        for k in defined {
            assert!(*k >= Decimal::ZERO && *k <= Decimal::ONE, "{k}");
        }
    }

    #[test]
    fn test_stoch_rsi_of_unmoving_rsi_is_undefined() {
        let rising = (0..60).map(Decimal::from).collect::<Vec<_>>();
        assert!(stoch_rsi_series(&rising, 14, 14, 1).iter().all(Option::is_none));
    }

    #[test]
    fn test_stoch_rsi_smoothing() {
        let closes = decimals(&[10, 12, 11, 13, 12, 9, 10, 14, 13, 15]);
        let raw = stoch_rsi_series(&closes, 2, 3, 1);
        let smoothed = stoch_rsi_series(&closes, 2, 3, 2);

        let (a, b) = (raw[8].unwrap(), raw[9].unwrap());
        assert_eq!(smoothed[9], Some((a + b) / Decimal::TWO));
    }
}
