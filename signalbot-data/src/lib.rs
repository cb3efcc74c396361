#![forbid(unsafe_code)]
#![warn(
    unused,
    clippy::cognitive_complexity,
    unused_crate_dependencies,
    unused_extern_crates,
    clippy::unused_self,
    clippy::useless_let_if_seq,
    missing_debug_implementations,
    rust_2018_idioms,
    rust_2024_compatibility
)]

//! Market data model for Signalbot.
//!
//! Provides the normalised OHLCV [`Candle`](candle::Candle), the validated
//! [`CandleSeries`](series::CandleSeries) consumed by the indicator and signal crates, and the
//! contracts used to acquire candles from a market data provider:
//! - [`CandleSource`](source::CandleSource): async fetch of the newest `limit` candles.
//! - [`PairAliases`](alias::PairAliases): display pair -> provider ticker mapping.
//! - [`BinanceKline`](binance::BinanceKline): decoding of Binance kline rows.
//!
//! No network transport lives here; callers plug their own [`CandleSource`](source::CandleSource).

/// Display pair to provider ticker mapping.
pub mod alias;

/// Binance kline row decoding.
pub mod binance;

/// Normalised OHLCV [`Candle`](candle::Candle).
pub mod candle;

/// SerDe utilities for positional exchange payloads.
pub mod de;

/// All [`Error`](std::error::Error)s generated in Signalbot-Data.
pub mod error;

/// Validated, time-ordered [`CandleSeries`](series::CandleSeries).
pub mod series;

/// [`CandleSource`](source::CandleSource) contract and [`Interval`](source::Interval)s.
pub mod source;
