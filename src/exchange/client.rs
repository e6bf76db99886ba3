//! Historical market data client

use crate::data::{Candle, CandleSeries, Timeframe};
use crate::error::PairtraderError;
use crate::Result;
use chrono::{TimeZone, Utc};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default kline endpoint host
pub const DEFAULT_BASE_URL: &str = "https://fapi.binance.com";
/// Kline resource path
const KLINES_PATH: &str = "/fapi/v1/klines";
/// Maximum rows per page the endpoint serves
const PAGE_LIMIT: u32 = 1500;
/// Attempts per page before the fetch gives up
const MAX_ATTEMPTS: u32 = 3;
/// Base delay between attempts; grows linearly per retry
const RETRY_DELAY: Duration = Duration::from_millis(500);
/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Pause between successive pages
const PAGE_PAUSE: Duration = Duration::from_millis(100);

/// One raw kline row as served by the endpoint
#[derive(Debug, Clone, PartialEq)]
struct RawKline {
    open_time: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
    close_time: i64,
}

/// Historical market data client.
///
/// Fetches fixed-interval kline series over REST, paginating until the
/// requested range is exhausted. Network failures are retried a bounded
/// number of times with a short backoff; exhaustion surfaces as
/// [`PairtraderError::DataUnavailable`].
#[derive(Debug, Clone)]
pub struct MarketDataClient {
    http: reqwest::Client,
    base_url: String,
}

impl MarketDataClient {
    /// Create a client against the default host
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom host (tests, alternate endpoints)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the full candle range for a (symbol, timeframe) pair.
    ///
    /// Pages forward from `start_time` (ms) by advancing the cursor past the
    /// last returned close time until `end_time` is reached or the endpoint
    /// returns an empty page. Short pages are tolerated. An empty overall
    /// result is [`PairtraderError::DataUnavailable`].
    pub async fn get_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        start_time: i64,
        end_time: i64,
    ) -> Result<CandleSeries> {
        let mut raw: Vec<RawKline> = Vec::new();
        let mut cursor = start_time;

        while cursor < end_time {
            let page = self
                .fetch_page_with_retry(symbol, timeframe, cursor, end_time)
                .await?;
            let last = match page.last() {
                Some(last) => last.clone(),
                None => break,
            };
            debug!(
                symbol,
                timeframe = %timeframe,
                rows = page.len(),
                cursor,
                "fetched kline page"
            );
            raw.extend(page);
            cursor = last.close_time + 1;
        }

        if raw.is_empty() {
            return Err(PairtraderError::DataUnavailable {
                symbol: symbol.to_string(),
                timeframe: timeframe.as_str().to_string(),
            });
        }

        let candles = raw
            .into_iter()
            .map(|k| raw_to_candle(&k))
            .collect::<Result<Vec<Candle>>>()?;
        info!(
            symbol,
            timeframe = %timeframe,
            candles = candles.len(),
            "historical fetch complete"
        );
        Ok(CandleSeries::from_candles(symbol, timeframe, candles))
    }

    /// Fetch one page, retrying bounded network failures
    async fn fetch_page_with_retry(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        start_time: i64,
        end_time: i64,
    ) -> Result<Vec<RawKline>> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.fetch_page(symbol, timeframe, start_time, end_time).await {
                Ok(page) => {
                    // Brief pause between pages to stay friendly to the API
                    tokio::time::sleep(PAGE_PAUSE).await;
                    return Ok(page);
                }
                Err(err) if err.is_retryable() && attempt < MAX_ATTEMPTS => {
                    warn!(
                        symbol,
                        timeframe = %timeframe,
                        attempt,
                        error = %err,
                        "kline page fetch failed, retrying"
                    );
                    tokio::time::sleep(RETRY_DELAY * attempt).await;
                }
                Err(err) if err.is_retryable() => {
                    warn!(
                        symbol,
                        timeframe = %timeframe,
                        attempts = attempt,
                        error = %err,
                        "kline fetch retries exhausted"
                    );
                    return Err(PairtraderError::DataUnavailable {
                        symbol: symbol.to_string(),
                        timeframe: timeframe.as_str().to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn fetch_page(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        start_time: i64,
        end_time: i64,
    ) -> Result<Vec<RawKline>> {
        let url = format!("{}{}", self.base_url, KLINES_PATH);
        let response = self
            .http
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .query(&[
                ("symbol", symbol),
                ("interval", timeframe.as_str()),
                ("startTime", &start_time.to_string()),
                ("endTime", &end_time.to_string()),
                ("limit", &PAGE_LIMIT.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let payload: Value = response.json().await?;
        parse_klines(&payload)
    }
}

impl Default for MarketDataClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the endpoint's kline payload: an array of rows, each
/// `[open_time, open, high, low, close, volume, close_time, ...]` with the
/// prices as strings.
fn parse_klines(payload: &Value) -> Result<Vec<RawKline>> {
    let rows = payload
        .as_array()
        .ok_or_else(|| PairtraderError::UnexpectedPayload {
            reason: "kline payload is not an array".to_string(),
        })?;

    rows.iter().map(parse_kline_row).collect()
}

fn parse_kline_row(row: &Value) -> Result<RawKline> {
    let fields = row
        .as_array()
        .filter(|f| f.len() >= 7)
        .ok_or_else(|| PairtraderError::UnexpectedPayload {
            reason: format!("malformed kline row: {row}"),
        })?;

    let int_at = |idx: usize| -> Result<i64> {
        fields[idx]
            .as_i64()
            .ok_or_else(|| PairtraderError::UnexpectedPayload {
                reason: format!("kline field {idx} is not an integer: {}", fields[idx]),
            })
    };
    let price_at = |idx: usize| -> Result<f64> {
        let field = &fields[idx];
        field
            .as_str()
            .and_then(|s| s.parse::<f64>().ok())
            .or_else(|| field.as_f64())
            .ok_or_else(|| PairtraderError::UnexpectedPayload {
                reason: format!("kline field {idx} is not a price: {field}"),
            })
    };

    Ok(RawKline {
        open_time: int_at(0)?,
        open: price_at(1)?,
        high: price_at(2)?,
        low: price_at(3)?,
        close: price_at(4)?,
        volume: price_at(5)?,
        close_time: int_at(6)?,
    })
}

fn raw_to_candle(raw: &RawKline) -> Result<Candle> {
    let open_time = Utc
        .timestamp_millis_opt(raw.open_time)
        .single()
        .ok_or_else(|| PairtraderError::UnexpectedPayload {
            reason: format!("kline open time out of range: {}", raw.open_time),
        })?;
    Ok(Candle::new(
        open_time, raw.open, raw.high, raw.low, raw.close, raw.volume,
    ))
}
