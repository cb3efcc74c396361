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

//! Threshold based signal classification for Signalbot.
//!
//! Both classifiers are pure functions of immutable inputs:
//! - [`SingleShotClassifier`](classifier::SingleShotClassifier): newest candle only, producing a
//!   [`Signal`](signal::Signal).
//! - [`StreamingClassifier`](classifier::StreamingClassifier): every candle, producing
//!   [`SignalRow`](result::SignalRow)s labelled with a [`CandleSignal`](signal::CandleSignal),
//!   corroborated by a [`price_action`](price_action::price_action) filter.

pub mod classifier;

/// Classifier thresholds and [`MacdMode`](config::MacdMode).
pub mod config;

/// Momentum-only V-shape / peak labelling.
pub mod price_action;

pub mod result;

pub mod signal;
