use crate::{
    config::{SingleShotConfig, StreamingConfig},
    price_action::price_action,
    result::SignalRow,
    signal::{CandleSignal, Signal},
};
use derive_more::Constructor;
use itertools::izip;
use rust_decimal::Decimal;
use signalbot_data::series::CandleSeries;
use signalbot_ta::{
    frame::{IndicatorFrame, IndicatorSnapshot},
    levels::SupportResistance,
    patterns::PatternFlags,
};

/// Everything the single-shot classifier reads about the newest candle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Constructor)]
pub struct SingleShotInput {
    pub close: Decimal,
    pub indicators: IndicatorSnapshot,
    /// Recent high / low extremes.
    pub recent: Option<SupportResistance>,
    pub patterns: PatternFlags,
}

/// Classifies the newest candle as [`Signal::StrongBuy`], [`Signal::StrongSell`] or
/// [`Signal::NoSignal`].
///
/// Every condition must hold. An undefined indicator fails its condition.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Constructor)]
pub struct SingleShotClassifier {
    pub config: SingleShotConfig,
}

impl SingleShotClassifier {
    pub fn classify(&self, input: &SingleShotInput) -> Signal {
        if self.is_strong_buy(input) {
            Signal::StrongBuy
        } else if self.is_strong_sell(input) {
            Signal::StrongSell
        } else {
            Signal::NoSignal
        }
    }

    fn is_strong_buy(&self, input: &SingleShotInput) -> bool {
        let SingleShotInput {
            close,
            indicators,
            recent,
            patterns,
        } = input;

        indicators
            .rsi
            .is_some_and(|rsi| rsi < self.config.rsi_oversold)
            && self.config.macd_mode.is_bullish(indicators)
            && matches!(
                (indicators.ema_fast, indicators.ema_slow),
                (Some(fast), Some(slow)) if *close > fast && fast > slow
            )
            && indicators
                .stoch_rsi_k
                .is_some_and(|k| k < self.config.stoch_oversold)
            && recent.is_some_and(|recent| *close > recent.support)
            && patterns.any_bullish()
    }

    fn is_strong_sell(&self, input: &SingleShotInput) -> bool {
        let SingleShotInput {
            close,
            indicators,
            recent,
            patterns,
        } = input;

        indicators
            .rsi
            .is_some_and(|rsi| rsi > self.config.rsi_overbought)
            && self.config.macd_mode.is_bearish(indicators)
            && matches!(
                (indicators.ema_fast, indicators.ema_slow),
                (Some(fast), Some(slow)) if *close < fast && fast < slow
            )
            && indicators
                .stoch_rsi_k
                .is_some_and(|k| k > self.config.stoch_overbought)
            && recent.is_some_and(|recent| *close < recent.resistance)
            && patterns.any_bearish()
    }
}

/// Everything the streaming classifier reads about one candle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Constructor)]
pub struct StreamingInput {
    pub close: Decimal,
    pub indicators: IndicatorSnapshot,
    /// Rolling close support & resistance.
    pub levels: Option<SupportResistance>,
    pub price_action: CandleSignal,
}

/// Labels each candle [`CandleSignal::Buy`], [`CandleSignal::Sell`] or [`CandleSignal::Hold`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Constructor)]
pub struct StreamingClassifier {
    pub config: StreamingConfig,
}

impl StreamingClassifier {
    pub fn classify(&self, input: &StreamingInput) -> CandleSignal {
        let StreamingInput {
            close,
            indicators,
            levels,
            price_action,
        } = input;
        let tolerance = self.config.sr_tolerance;

        let buy = indicators
            .rsi
            .is_some_and(|rsi| rsi < self.config.rsi_oversold)
            && self.config.macd_mode.is_bullish(indicators)
            && levels.is_some_and(|levels| levels.is_near_support(*close, tolerance))
            && *price_action == CandleSignal::Buy;

        let sell = indicators
            .rsi
            .is_some_and(|rsi| rsi > self.config.rsi_overbought)
            && self.config.macd_mode.is_bearish(indicators)
            && levels.is_some_and(|levels| levels.is_near_resistance(*close, tolerance))
            && *price_action == CandleSignal::Sell;

        match (buy, sell) {
            (true, false) => CandleSignal::Buy,
            (false, true) => CandleSignal::Sell,
            _ => CandleSignal::Hold,
        }
    }

    /// Label every candle of the `series` using its pre-computed `frame`.
    pub fn rows(&self, series: &CandleSeries, frame: &IndicatorFrame) -> Vec<SignalRow> {
        let closes = series.closes();
        let levels = SupportResistance::rolling_close(series, self.config.sr_window);
        let price_actions = price_action(&closes);

        izip!(series, frame.rows(), levels, price_actions)
            .map(|(candle, indicators, levels, price_action)| {
                let input = StreamingInput::new(candle.close, *indicators, levels, price_action);
                SignalRow {
                    open_time: candle.open_time,
                    close: candle.close,
                    rsi: indicators.rsi,
                    macd: self.config.macd_mode.momentum(indicators),
                    support: levels.map(|levels| levels.support),
                    resistance: levels.map(|levels| levels.resistance),
                    price_action,
                    signal: self.classify(&input),
                }
            })
            .collect()
    }
}
