//! Engine throughput benchmark

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pairtrader::backtest::BacktestEngine;
use pairtrader::config::{RunSettings, StrategyKind, StrategyProfile};
use pairtrader::data::{Candle, CandleSeries, Timeframe};

fn synthetic_series(len: usize) -> CandleSeries {
    let candles = (0..len)
        .map(|i| {
            let ts = Utc
                .timestamp_opt(1_700_000_000 + i as i64 * 3600, 0)
                .unwrap();
            // Deterministic wobble with occasional lurches
            let wave = ((i * 37) % 100) as f64 * 0.05;
            let lurch = if i % 97 == 0 { -4.0 } else { 0.0 };
            let close = 100.0 + wave + lurch;
            let volume = 1000.0 + ((i * 13) % 50) as f64 * 40.0;
            Candle::new(ts, close, close + 0.8, close - 0.8, close, volume)
        })
        .collect();
    CandleSeries::from_candles("BTCUSDT", Timeframe::H1, candles)
}

fn bench_engine(c: &mut Criterion) {
    let series = synthetic_series(5000);
    let profile = StrategyProfile {
        kind: StrategyKind::MeanReversion,
        min_confidence: 50.0,
        ..StrategyProfile::default()
    };
    let engine = BacktestEngine::new(RunSettings::default());

    c.bench_function("backtest_5000_candles", |b| {
        b.iter(|| black_box(engine.run(black_box(&series), black_box(&profile))))
    });
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
