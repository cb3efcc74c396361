use crate::error::SignalBotError;
use serde::{Deserialize, Serialize};
use signalbot_data::{alias::PairAliases, source::Interval};
use signalbot_strategy::config::{SingleShotConfig, StreamingConfig};
use signalbot_ta::{frame::IndicatorConfig, patterns::PatternConfig};
use smol_str::SmolStr;
use std::{fs::File, io::BufReader, path::Path};

/// Top level `Signalbot` configuration.
///
/// Every field is optional in JSON and falls back to its default.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SignalBotConfig {
    /// Display pairs to evaluate, resolved through `aliases`.
    pub pairs: Vec<SmolStr>,
    pub interval: Interval,
    /// Number of newest candles requested per evaluation.
    pub limit: usize,
    pub aliases: PairAliases,
    pub indicators: IndicatorConfig,
    pub patterns: PatternConfig,
    pub single_shot: SingleShotConfig,
    pub streaming: StreamingConfig,
}

impl Default for SignalBotConfig {
    fn default() -> Self {
        Self {
            pairs: vec![SmolStr::new_static("BTC/USD")],
            interval: Interval::OneMinute,
            limit: 100,
            aliases: PairAliases::default(),
            indicators: IndicatorConfig::default(),
            patterns: PatternConfig::default(),
            single_shot: SingleShotConfig::default(),
            streaming: StreamingConfig::default(),
        }
    }
}

impl SignalBotConfig {
    /// Load a JSON [`SignalBotConfig`] from the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SignalBotError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, SignalBotError> {
        Ok(serde_json::from_str(json)?)
    }
}
