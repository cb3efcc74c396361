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

//! # Signalbot
//! Deterministic pipeline turning a window of recent OHLCV candles into a discrete trading signal.
//!
//! Data flows one way:
//! [`CandleSeries`](signalbot_data::series::CandleSeries) ->
//! [`IndicatorFrame`](signalbot_ta::frame::IndicatorFrame) ->
//! [`PatternFlags`](signalbot_ta::patterns::PatternFlags) -> classifier -> result.
//!
//! Two evaluation modes are provided by the [`SignalEngine`](engine::SignalEngine):
//! * **Single-shot**: classifies the newest candle as `STRONG_BUY`, `STRONG_SELL` or `NO_SIGNAL`
//!   and reports recent support & resistance.
//! * **Streaming**: labels every candle `BUY`, `SELL` or `HOLD` using rolling close support &
//!   resistance and a price action filter.
//!
//! The [`SignalService`](service::SignalService) glues the engine to any
//! [`CandleSource`](signalbot_data::source::CandleSource), resolving display pairs through
//! [`PairAliases`](signalbot_data::alias::PairAliases) and evaluating many pairs concurrently.
//!
//! ## Example
//! ```rust,ignore
//! use signalbot::{config::SignalBotConfig, logging::init_logging, service::SignalService};
//!
//! init_logging();
//! let config = SignalBotConfig::load("signalbot.json")?;
//! let service = SignalService::new(my_source, &config);
//! for (pair, result) in service.generate_all(&config.pairs).await {
//!     println!("{pair}: {:?}", result.map(|result| result.signal));
//! }
//! ```

/// [`SignalBotConfig`](config::SignalBotConfig) and JSON loading.
pub mod config;

/// Stateless single-shot & streaming pipeline.
pub mod engine;

/// All [`Error`](std::error::Error)s generated in Signalbot.
pub mod error;

/// Provides default Signalbot Tracing logging initialisers.
pub mod logging;

/// Multi-pair [`SignalService`](service::SignalService) over a
/// [`CandleSource`](signalbot_data::source::CandleSource).
pub mod service;
