use derive_more::Constructor;
use itertools::Itertools;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use signalbot_data::series::CandleSeries;

/// Support & resistance estimate approximated by price extremes over a trailing window.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize, Serialize, Constructor)]
pub struct SupportResistance {
    pub support: Decimal,
    pub resistance: Decimal,
}

impl SupportResistance {
    /// Extremes mode: `support = min(low)` & `resistance = max(high)` over the newest `window`
    /// candles.
    ///
    /// Returns `None` until the series holds `window` candles.
    pub fn extremes(series: &CandleSeries, window: usize) -> Option<Self> {
        if window == 0 || series.len() < window {
            return None;
        }

        let recent = &series.candles()[series.len() - window..];
        let support = recent.iter().map(|candle| candle.low).min()?;
        let resistance = recent.iter().map(|candle| candle.high).max()?;

        Some(Self::new(support, resistance))
    }

    /// Close-rolling mode: rolling `min(close)` & `max(close)` over `window` candles, one entry
    /// per candle (`None` until the window fills).
    pub fn rolling_close(series: &CandleSeries, window: usize) -> Vec<Option<Self>> {
        let closes = series.closes();

        (0..closes.len())
            .map(|index| {
                if window == 0 {
                    return None;
                }
                let start = (index + 1).checked_sub(window)?;
                closes[start..=index]
                    .iter()
                    .copied()
                    .minmax()
                    .into_option()
                    .map(|(support, resistance)| Self::new(support, resistance))
            })
            .collect()
    }

    /// `price <= support * (1 + tolerance)`.
    pub fn is_near_support(&self, price: Decimal, tolerance: Decimal) -> bool {
        price <= self.support * (Decimal::ONE + tolerance)
    }

    /// `price >= resistance * (1 - tolerance)`.
    pub fn is_near_resistance(&self, price: Decimal, tolerance: Decimal) -> bool {
        price >= self.resistance * (Decimal::ONE - tolerance)
    }
}
