use crate::config::SignalBotConfig;
use derive_more::Constructor;
use signalbot_data::series::CandleSeries;
use signalbot_strategy::{
    classifier::{SingleShotClassifier, SingleShotInput, StreamingClassifier},
    result::{SignalResult, SignalStatus, StreamingReport},
    signal::{CandleSignal, Signal},
};
use signalbot_ta::{
    frame::{IndicatorConfig, IndicatorFrame},
    levels::SupportResistance,
    patterns::{PatternConfig, PatternFlags},
};
use smol_str::SmolStr;
use tracing::{debug, info, warn};

/// Candle series to signal pipeline.
///
/// Stateless: every evaluation recomputes indicators, patterns and levels in full from the
/// supplied [`CandleSeries`], so identical input always yields an identical result.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Constructor)]
pub struct SignalEngine {
    pub indicators: IndicatorConfig,
    pub patterns: PatternConfig,
    pub single_shot: SingleShotClassifier,
    pub streaming: StreamingClassifier,
}

impl From<&SignalBotConfig> for SignalEngine {
    fn from(config: &SignalBotConfig) -> Self {
        Self::new(
            config.indicators,
            config.patterns,
            SingleShotClassifier::new(config.single_shot),
            StreamingClassifier::new(config.streaming),
        )
    }
}

impl SignalEngine {
    /// Classify the newest candle of the `series`.
    ///
    /// A series shorter than the single-shot requirement yields [`Signal::NoSignal`] with
    /// [`SignalStatus::InsufficientData`].
    pub fn single_shot(&self, symbol: &str, series: &CandleSeries) -> SignalResult {
        let required = self.single_shot.config.required_len(&self.indicators);
        let status = SignalStatus::check(required, series.len());

        let mut result = SignalResult {
            symbol: SmolStr::new(symbol),
            timestamp: series.latest().map(|candle| candle.open_time),
            price: series.latest().map(|candle| candle.close),
            signal: Signal::NoSignal,
            support: None,
            resistance: None,
            patterns: PatternFlags::default(),
            indicators: Default::default(),
            status,
        };

        let Some(latest) = series.latest().filter(|_| status.is_complete()) else {
            warn!(%symbol, ?status, "insufficient candles for single-shot signal");
            return result;
        };

        let frame = IndicatorFrame::compute(series, &self.indicators);
        let indicators = frame.latest().copied().unwrap_or_default();
        let patterns = PatternFlags::detect(series, &self.patterns);
        let recent = SupportResistance::extremes(series, self.single_shot.config.recent_window);

        let signal = self.single_shot.classify(&SingleShotInput::new(
            latest.close,
            indicators,
            recent,
            patterns,
        ));

        debug!(%symbol, ?indicators, ?patterns, ?recent, "single-shot inputs");
        info!(
            %symbol,
            %signal,
            price = %latest.close,
            time = %latest.open_time,
            "generated single-shot signal"
        );

        result.signal = signal;
        result.support = recent.map(|recent| recent.support);
        result.resistance = recent.map(|recent| recent.resistance);
        result.patterns = patterns;
        result.indicators = indicators;
        result
    }

    /// Label every candle of the `series`.
    ///
    /// A series shorter than the streaming requirement yields no rows with
    /// [`SignalStatus::InsufficientData`].
    pub fn streaming(&self, symbol: &str, series: &CandleSeries) -> StreamingReport {
        let required = self.streaming.config.required_len(&self.indicators);
        let status = SignalStatus::check(required, series.len());

        if !status.is_complete() {
            warn!(%symbol, ?status, "insufficient candles for streaming signals");
            return StreamingReport {
                symbol: SmolStr::new(symbol),
                status,
                rows: Vec::new(),
            };
        }

        let frame = IndicatorFrame::compute(series, &self.indicators);
        let rows = self.streaming.rows(series, &frame);

        info!(
            %symbol,
            candles = rows.len(),
            buy = rows.iter().filter(|row| row.signal == CandleSignal::Buy).count(),
            sell = rows.iter().filter(|row| row.signal == CandleSignal::Sell).count(),
            "generated streaming signals"
        );

        StreamingReport {
            symbol: SmolStr::new(symbol),
            status,
            rows,
        }
    }
}
