//! Fetch-then-simulate pipelines

use crate::backtest::{BacktestEngine, RunReport};
use crate::config::{ProfileCatalog, RunSettings};
use crate::data::Timeframe;
use crate::exchange::MarketDataClient;
use crate::Result;
use tracing::info;

/// Run one (symbol, timeframe) pipeline: resolve the profile, fetch the
/// full candle range, then replay it.
///
/// The profile lookup happens before any network traffic, so a missing
/// configuration fails fast. The fetch completes (including pagination)
/// before the simulation starts; the replay itself never suspends.
pub async fn run_pair(
    client: &MarketDataClient,
    catalog: &ProfileCatalog,
    settings: &RunSettings,
    symbol: &str,
    timeframe: Timeframe,
    start_time: i64,
    end_time: i64,
) -> Result<RunReport> {
    let profile = catalog.get(symbol, timeframe)?;
    let series = client
        .get_candles(symbol, timeframe, start_time, end_time)
        .await?;
    info!(
        symbol,
        timeframe = %timeframe,
        candles = series.len(),
        kind = %profile.kind,
        "starting backtest"
    );

    let engine = BacktestEngine::new(settings.clone());
    Ok(engine.run(&series, profile))
}

/// Run independent (symbol, timeframe) pipelines concurrently.
///
/// Each pipeline owns its whole fetch-then-simulate lifecycle and shares no
/// mutable state with the others; results come back in input order.
pub async fn run_all(
    client: &MarketDataClient,
    catalog: &ProfileCatalog,
    settings: &RunSettings,
    pairs: &[(String, Timeframe)],
    start_time: i64,
    end_time: i64,
) -> Vec<Result<RunReport>> {
    let pipelines = pairs.iter().map(|(symbol, timeframe)| {
        run_pair(
            client, catalog, settings, symbol, *timeframe, start_time, end_time,
        )
    });
    futures::future::join_all(pipelines).await
}
