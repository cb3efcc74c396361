use crate::error::DataError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Display pairs offered to users, each mapped to the Binance ticker used as a price proxy.
///
/// Quote currencies are proxied through USDT, and OTC pairs share the ticker of their
/// standard counterpart.
const QUOTEX_TO_BINANCE: &[(&str, &str)] = &[
    ("EUR/USD", "EUR/USDT"),
    ("GBP/USD", "GBP/USDT"),
    ("USD/JPY", "JPY/USDT"),
    ("BTC/USD", "BTC/USDT"),
    ("ETH/USD", "ETH/USDT"),
    ("AUD/USD", "AUD/USDT"),
    ("NZD/USD", "NZD/USDT"),
    ("USD/CAD", "CAD/USDT"),
    ("USD/CHF", "CHF/USDT"),
    ("LTC/USD", "LTC/USDT"),
    ("XRP/USD", "XRP/USDT"),
    ("ADA/USD", "ADA/USDT"),
    ("DOT/USD", "DOT/USDT"),
    ("SOL/USD", "SOL/USDT"),
    ("BNB/USD", "BNB/USDT"),
    ("EUR/USD OTC", "EUR/USDT"),
    ("GBP/USD OTC", "GBP/USDT"),
    ("USD/JPY OTC", "JPY/USDT"),
    ("BTC/USD OTC", "BTC/USDT"),
    ("ETH/USD OTC", "ETH/USDT"),
    ("AUD/USD OTC", "AUD/USDT"),
    ("NZD/USD OTC", "NZD/USDT"),
    ("USD/CAD OTC", "CAD/USDT"),
    ("USD/CHF OTC", "CHF/USDT"),
    ("LTC/USD OTC", "LTC/USDT"),
    ("XRP/USD OTC", "XRP/USDT"),
    ("ADA/USD OTC", "ADA/USDT"),
    ("DOT/USD OTC", "DOT/USDT"),
    ("SOL/USD OTC", "SOL/USDT"),
    ("BNB/USD OTC", "BNB/USDT"),
];

/// Explicit mapping from display-facing pair names (eg/ "EUR/USD OTC") to data-provider tickers
/// (eg/ "EUR/USDT").
///
/// Passed by value to whoever resolves pairs before fetching candles; the signal pipeline itself
/// only ever sees resolved tickers.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize, Serialize)]
pub struct PairAliases {
    /// Ordered display pair -> provider ticker table.
    pub pairs: IndexMap<SmolStr, SmolStr>,

    /// Treat an unmapped name as an already-resolved ticker (upper-cased).
    #[serde(default = "default_allow_raw_tickers")]
    pub allow_raw_tickers: bool,
}

fn default_allow_raw_tickers() -> bool {
    true
}

impl Default for PairAliases {
    fn default() -> Self {
        Self {
            pairs: QUOTEX_TO_BINANCE
                .iter()
                .map(|(pair, ticker)| (SmolStr::new(pair), SmolStr::new(ticker)))
                .collect(),
            allow_raw_tickers: default_allow_raw_tickers(),
        }
    }
}

impl PairAliases {
    /// Resolve a display pair to the provider ticker.
    pub fn resolve(&self, pair: &str) -> Result<SmolStr, DataError> {
        if let Some(ticker) = self.pairs.get(pair.trim()) {
            return Ok(ticker.clone());
        }

        let raw = pair.trim();
        if self.allow_raw_tickers && !raw.is_empty() {
            Ok(SmolStr::new(raw.to_uppercase()))
        } else {
            Err(DataError::UnknownPair(SmolStr::new(pair)))
        }
    }

    /// Display pairs in table order, eg/ for a pair selector.
    pub fn display_pairs(&self) -> impl Iterator<Item = &str> {
        self.pairs.keys().map(SmolStr::as_str)
    }
}
