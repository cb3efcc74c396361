use chrono::{TimeDelta, TimeZone, Utc};
use criterion::{Criterion, Throughput};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use signalbot::engine::SignalEngine;
use signalbot_data::{candle::Candle, series::CandleSeries};
use signalbot_ta::frame::IndicatorFrame;
use std::hint::black_box;

criterion::criterion_main!(benchmark_pipeline);

const NUM_CANDLES: i64 = 1000;

fn benchmark_pipeline() {
    let series = zigzag_series(NUM_CANDLES);
    let engine = SignalEngine::default();

    let mut c = Criterion::default().without_plots();

    let mut group = c.benchmark_group("Pipeline");
    group.warm_up_time(std::time::Duration::from_secs(1));
    group.measurement_time(std::time::Duration::from_secs(10));
    group.sample_size(50);
    group.throughput(Throughput::Elements(NUM_CANDLES as u64));

    group.bench_function("IndicatorFrame", |b| {
        b.iter(|| IndicatorFrame::compute(black_box(&series), &engine.indicators))
    });
    group.bench_function("SingleShot", |b| {
        b.iter(|| engine.single_shot("BTCUSDT", black_box(&series)))
    });
    group.bench_function("Streaming", |b| {
        b.iter(|| engine.streaming("BTCUSDT", black_box(&series)))
    });
    group.finish();
}

// Saw-tooth closes keep every indicator defined after warm-up
fn zigzag_series(count: i64) -> CandleSeries {
    let start = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

    CandleSeries::new(
        (0..count)
            .map(|i| {
                let open = dec!(100) + Decimal::from(i % 17) - Decimal::from(i % 5);
                let close = open + Decimal::from(i % 3) - Decimal::ONE;
                Candle::new(
                    start + TimeDelta::minutes(i),
                    open,
                    open.max(close) + dec!(0.5),
                    open.min(close) - dec!(0.5),
                    close,
                    dec!(10),
                )
            })
            .collect(),
    )
    .unwrap()
}
