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

//! Technical analysis utilities for Signalbot.
//!
//! This crate turns a [`CandleSeries`](signalbot_data::series::CandleSeries) into the values the
//! signal classifiers consume:
//! - [`indicators`]: streaming EMA, Wilder RSI, MACD and Stochastic RSI, plus index-aligned
//!   series helpers.
//! - [`frame`]: the [`IndicatorFrame`](frame::IndicatorFrame), one
//!   [`IndicatorSnapshot`](frame::IndicatorSnapshot) per candle.
//! - [`levels`]: rolling [`SupportResistance`](levels::SupportResistance) estimates.
//! - [`patterns`]: candlestick [`PatternFlags`](patterns::PatternFlags) for the newest candle.
//!
//! Everything is a pure function of the input series. Insufficient history never errors, the
//! affected values are simply `None`.

pub mod frame;
pub mod indicators;
pub mod levels;
pub mod patterns;
