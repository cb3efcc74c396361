use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use signalbot_data::{candle::Candle, series::CandleSeries};

/// Thresholds used by the candlestick pattern checks, as fractions of a candle's range.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Doji when `body / range` is below this.
    pub doji_body_ratio: Decimal,
    /// Hammer upper wick must be shorter than `range * hammer_upper_wick`.
    pub hammer_upper_wick: Decimal,
    /// Hammer lower wick must be longer than `range * hammer_lower_wick`.
    pub hammer_lower_wick: Decimal,
    /// Morning star middle candle `body / range` must be below this.
    pub star_body_ratio: Decimal,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            doji_body_ratio: dec!(0.1),
            hammer_upper_wick: dec!(0.2),
            hammer_lower_wick: dec!(0.5),
            star_body_ratio: dec!(0.3),
        }
    }
}

/// Candlestick patterns evaluated for the newest candle of a series.
///
/// All flags are independent. A pattern needing more candles than the series holds is `false`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct PatternFlags {
    pub bullish_engulfing: bool,
    pub bearish_engulfing: bool,
    pub doji: bool,
    pub hammer: bool,
    pub morning_star: bool,
}

impl PatternFlags {
    /// Evaluate every pattern against the newest 1-3 candles of the `series`.
    pub fn detect(series: &CandleSeries, config: &PatternConfig) -> Self {
        let Some(latest) = series.nth_back(0) else {
            return Self::default();
        };
        let previous = series.nth_back(1);

        Self {
            bullish_engulfing: previous
                .is_some_and(|previous| is_bullish_engulfing(previous, latest)),
            bearish_engulfing: previous
                .is_some_and(|previous| is_bearish_engulfing(previous, latest)),
            doji: is_doji(latest, config.doji_body_ratio),
            hammer: is_hammer(latest, config.hammer_upper_wick, config.hammer_lower_wick),
            morning_star: match (series.nth_back(2), previous) {
                (Some(first), Some(star)) => {
                    is_morning_star(first, star, latest, config.star_body_ratio)
                }
                _ => false,
            },
        }
    }

    /// Any of bullish engulfing, hammer or morning star.
    pub fn any_bullish(&self) -> bool {
        self.bullish_engulfing || self.hammer || self.morning_star
    }

    /// Any of bearish engulfing or doji.
    pub fn any_bearish(&self) -> bool {
        self.bearish_engulfing || self.doji
    }
}

/// Bearish `previous` candle whose body is fully contained by a bullish `latest` body.
pub fn is_bullish_engulfing(previous: &Candle, latest: &Candle) -> bool {
    previous.is_bearish()
        && latest.is_bullish()
        && latest.close > previous.open
        && latest.open < previous.close
}

/// Bullish `previous` candle whose body is fully contained by a bearish `latest` body.
pub fn is_bearish_engulfing(previous: &Candle, latest: &Candle) -> bool {
    previous.is_bullish()
        && latest.is_bearish()
        && latest.close < previous.open
        && latest.open > previous.close
}

/// Body smaller than `max_body_ratio` of the range. A zero-range candle is not a doji.
pub fn is_doji(candle: &Candle, max_body_ratio: Decimal) -> bool {
    candle
        .body_ratio()
        .is_some_and(|ratio| ratio < max_body_ratio)
}

/// Short upper wick and long lower wick, both relative to the range.
pub fn is_hammer(candle: &Candle, max_upper_wick: Decimal, min_lower_wick: Decimal) -> bool {
    let range = candle.range();
    if range.is_zero() {
        return false;
    }

    candle.upper_wick() < range * max_upper_wick && candle.lower_wick() > range * min_lower_wick
}

/// Three candle reversal: bearish `first`, indecisive `star`, then a bullish `last` closing above
/// the midpoint of the `first` body.
pub fn is_morning_star(
    first: &Candle,
    star: &Candle,
    last: &Candle,
    max_star_body_ratio: Decimal,
) -> bool {
    first.is_bearish()
        && star
            .body_ratio()
            .is_some_and(|ratio| ratio < max_star_body_ratio)
        && last.is_bullish()
        && last.close > first.body_midpoint()
}
