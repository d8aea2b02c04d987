//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use chrono::{DateTime, Duration, Utc};
use coinbase_auth::Method;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::dispatch::Dispatcher;
use crate::error::{RestError, RestResult};
use crate::params::QueryParams;
use crate::range::TimeRange;
use crate::request::RequestSpec;
use crate::response::NormalizedResponse;
use crate::time::format_timestamp;

/// One day, the default candle granularity
pub const DEFAULT_CANDLE_GRANULARITY: u32 = 86_400;

/// How far back candle queries reach when no start is given
pub const DEFAULT_CANDLE_LOOKBACK_WEEKS: i64 = 4;

/// Public market data endpoints
pub struct ProductEndpoints<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> ProductEndpoints<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    async fn get(&self, endpoint: String, query: QueryParams) -> RestResult<NormalizedResponse> {
        self.dispatcher
            .dispatch(RequestSpec::public(Method::Get, endpoint).with_query(query))
            .await
    }

    /// List available currency pairs
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> RestResult<NormalizedResponse> {
        self.get("products".to_string(), QueryParams::new()).await
    }

    /// Get a single currency pair
    ///
    /// # Arguments
    /// * `product_id` - Trading pair (e.g., "BTC-USD")
    #[instrument(skip(self))]
    pub async fn get_product(&self, product_id: &str) -> RestResult<NormalizedResponse> {
        self.get(format!("products/{}", product_id), QueryParams::new())
            .await
    }

    /// Get the order book
    ///
    /// # Arguments
    /// * `product_id` - Trading pair (e.g., "BTC-USD")
    /// * `level` - 1 (best bid/ask), 2 (aggregated top 50) or 3 (full, non-aggregated)
    #[instrument(skip(self))]
    pub async fn get_order_book(
        &self,
        product_id: &str,
        level: Option<u8>,
    ) -> RestResult<NormalizedResponse> {
        if let Some(level) = level {
            if !(1..=3).contains(&level) {
                return Err(RestError::InvalidParameter(format!(
                    "order book level must be 1, 2 or 3, got {}",
                    level
                )));
            }
        }

        let query = QueryParams::new().with("level", level);
        self.get(format!("products/{}/book", product_id), query)
            .await
    }

    /// Get the latest trades
    ///
    /// # Arguments
    /// * `product_id` - Trading pair (e.g., "BTC-USD")
    /// * `params` - Pagination (`before`, `after`, `limit`)
    #[instrument(skip(self, params))]
    pub async fn get_trades(
        &self,
        product_id: &str,
        params: QueryParams,
    ) -> RestResult<NormalizedResponse> {
        self.get(format!("products/{}/trades", product_id), params)
            .await
    }

    /// Get 24 hour stats and 30 day volume
    #[instrument(skip(self))]
    pub async fn get_stats(&self, product_id: &str) -> RestResult<NormalizedResponse> {
        self.get(format!("products/{}/stats", product_id), QueryParams::new())
            .await
    }

    /// Get the last trade, best bid/ask and 24h volume
    #[instrument(skip(self))]
    pub async fn get_ticker(&self, product_id: &str) -> RestResult<NormalizedResponse> {
        self.get(format!("products/{}/ticker", product_id), QueryParams::new())
            .await
    }

    /// Get historical candles
    ///
    /// Missing bounds default to the last four weeks up to now. Ranges wider
    /// than one request allows are fetched window by window; see
    /// [`get_candles_range`](Self::get_candles_range).
    #[instrument(skip(self))]
    pub async fn get_candles(
        &self,
        product_id: &str,
        query: CandleQuery,
    ) -> RestResult<NormalizedResponse> {
        let range = query.resolve(Utc::now())?;
        self.get_candles_range(product_id, &range).await
    }

    /// Get historical candles for one window with a single request
    ///
    /// The exchange rejects windows spanning more than 300 buckets.
    #[instrument(skip(self))]
    pub async fn get_candles_window(
        &self,
        product_id: &str,
        window: &TimeRange,
    ) -> RestResult<NormalizedResponse> {
        let query = QueryParams::new()
            .with("start", format_timestamp(&window.start))
            .with("end", format_timestamp(&window.end))
            .with("granularity", window.granularity);

        self.get(format!("products/{}/candles", product_id), query)
            .await
    }

    /// Get historical candles over an arbitrary range
    ///
    /// Issues one request per window of [`TimeRange::chunks`] and returns the
    /// candles `[time, low, high, open, close, volume]` in ascending time
    /// order, without duplicates at window boundaries. The first API or
    /// transport failure is returned as-is.
    #[instrument(skip(self))]
    pub async fn get_candles_range(
        &self,
        product_id: &str,
        range: &TimeRange,
    ) -> RestResult<NormalizedResponse> {
        let mut candles = Vec::new();

        for (index, window) in range.chunks().enumerate() {
            debug!(
                window = index,
                start = %window.start,
                end = %window.end,
                "Fetching candle window"
            );

            match self.get_candles_window(product_id, &window).await? {
                NormalizedResponse::Success(Value::Array(batch)) => candles.extend(batch),
                NormalizedResponse::Success(Value::Null) => {}
                NormalizedResponse::Success(other) => {
                    return Err(RestError::UnexpectedResponse(format!(
                        "candle window {} returned a non-array body: {}",
                        index, other
                    )));
                }
                failure => return Ok(failure),
            }
        }

        Ok(NormalizedResponse::Success(Value::Array(merge_candles(
            candles,
        ))))
    }
}

/// Candle query with optional bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandleQuery {
    /// Range start; defaults to four weeks before `end`
    pub start: Option<DateTime<Utc>>,
    /// Range end; defaults to now
    pub end: Option<DateTime<Utc>>,
    /// Bucket width in seconds (60, 300, 900, 3600, 21600, 86400)
    pub granularity: u32,
}

impl Default for CandleQuery {
    fn default() -> Self {
        Self::new(DEFAULT_CANDLE_GRANULARITY)
    }
}

impl CandleQuery {
    pub fn new(granularity: u32) -> Self {
        Self {
            start: None,
            end: None,
            granularity,
        }
    }

    pub fn with_start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Fill in default bounds relative to `now`
    pub fn resolve(&self, now: DateTime<Utc>) -> RestResult<TimeRange> {
        let end = self.end.unwrap_or(now);
        let start = self
            .start
            .unwrap_or_else(|| end - Duration::weeks(DEFAULT_CANDLE_LOOKBACK_WEEKS));

        TimeRange::new(start, end, self.granularity)
    }
}

fn candle_time(candle: &Value) -> Option<i64> {
    candle.get(0).and_then(Value::as_i64)
}

/// Sort candles by bucket time and drop repeated buckets
fn merge_candles(mut candles: Vec<Value>) -> Vec<Value> {
    candles.sort_by_key(candle_time);
    candles.dedup_by(|a, b| {
        let time = candle_time(a);
        time.is_some() && time == candle_time(b)
    });
    candles
}
