use serde::{Deserialize, Serialize};

/// Outcome of a single-shot evaluation of the newest candle.
#[derive(
    Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    StrongBuy,
    StrongSell,
    #[default]
    NoSignal,
}

impl Signal {
    /// Return the &str representation of this [`Signal`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::StrongBuy => "STRONG_BUY",
            Signal::StrongSell => "STRONG_SELL",
            Signal::NoSignal => "NO_SIGNAL",
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-candle label produced by the streaming classifier and the price action filter.
#[derive(
    Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CandleSignal {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl CandleSignal {
    /// Return the &str representation of this [`CandleSignal`].
    pub fn as_str(&self) -> &'static str {
        match self {
            CandleSignal::Buy => "BUY",
            CandleSignal::Sell => "SELL",
            CandleSignal::Hold => "HOLD",
        }
    }
}

impl std::fmt::Display for CandleSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
