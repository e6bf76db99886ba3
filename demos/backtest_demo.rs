//! Example: full fetch-then-backtest sweep over the built-in catalog pairs

use chrono::{Duration, Utc};
use pairtrader::backtest::{run_all, BacktestReport};
use pairtrader::config::{ProfileCatalog, RunSettings};
use pairtrader::data::Timeframe;
use pairtrader::exchange::MarketDataClient;

/// How much history to replay
const LOOKBACK_DAYS: i64 = 90;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("=== Pairtrader Backtest Demo ===\n");

    let client = MarketDataClient::new();
    let catalog = ProfileCatalog::default_catalog();
    let settings = RunSettings::default();

    let end_time = Utc::now().timestamp_millis();
    let start_time = (Utc::now() - Duration::days(LOOKBACK_DAYS)).timestamp_millis();

    let pairs: Vec<(String, Timeframe)> = ["BTCUSDT", "ETHUSDT", "SOLUSDT", "BNBUSDT"]
        .iter()
        .flat_map(|symbol| {
            [Timeframe::M15, Timeframe::H1, Timeframe::H4]
                .into_iter()
                .map(move |tf| (symbol.to_string(), tf))
        })
        .collect();

    println!(
        "Replaying {} days over {} (symbol, timeframe) pairs...\n",
        LOOKBACK_DAYS,
        pairs.len()
    );

    let results = run_all(&client, &catalog, &settings, &pairs, start_time, end_time).await;

    for ((symbol, timeframe), result) in pairs.iter().zip(results) {
        match result {
            Ok(report) => println!("{}", BacktestReport::new(&report).format()),
            Err(err) => eprintln!("{} {}: {}", symbol, timeframe, err),
        }
    }

    Ok(())
}
