use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::traits::PriceProvider;
use crate::errors::EngineError;
use crate::models::quote::{HistoricalBar, Quote, SeriesInterval, SeriesRange};

const BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER: &str = "Alpha Vantage";

/// Alpha Vantage API provider for stock/equity prices.
///
/// - **Free tier**: 25 requests/day (across ALL endpoints).
/// - **Requires**: API key.
/// - **Coverage**: 100k+ global equity symbols, full OHLCV history.
/// - **Strategy**: sits behind the market data cache; the TTLs there keep
///   repeat lookups off this quota.
///
/// Requests carry a 30-second timeout so a stalled call degrades into the
/// caller's fallback path instead of hanging an aggregation.
pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
}

impl AlphaVantageProvider {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, api_key }
    }

    fn function_for(interval: SeriesInterval) -> &'static str {
        match interval {
            SeriesInterval::Daily => "TIME_SERIES_DAILY",
            SeriesInterval::Weekly => "TIME_SERIES_WEEKLY",
            SeriesInterval::Monthly => "TIME_SERIES_MONTHLY",
        }
    }

    /// Parse an Alpha Vantage time-series payload into bars, ascending by date.
    ///
    /// The series object's key varies by function ("Time Series (Daily)",
    /// "Weekly Time Series", …), so the payload is located by substring
    /// rather than a fixed field name. Rows that fail to parse are skipped.
    pub fn parse_series(body: &serde_json::Value) -> Result<Vec<HistoricalBar>, EngineError> {
        let object = body.as_object().ok_or_else(|| EngineError::Api {
            provider: PROVIDER.into(),
            message: "Response is not a JSON object".into(),
        })?;

        let series = object
            .iter()
            .find(|(key, _)| key.contains("Time Series"))
            .and_then(|(_, value)| value.as_object())
            .ok_or_else(|| EngineError::Api {
                provider: PROVIDER.into(),
                message: "No time series in response. API limit may be exceeded.".into(),
            })?;

        let mut bars: Vec<HistoricalBar> = series
            .iter()
            .filter_map(|(date_str, row)| {
                let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()?;
                Some(HistoricalBar {
                    date,
                    open: Self::field(row, "1. open")?,
                    high: Self::field(row, "2. high")?,
                    low: Self::field(row, "3. low")?,
                    close: Self::field(row, "4. close")?,
                    volume: Self::field(row, "5. volume")? as u64,
                })
            })
            .collect();

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    fn field(row: &serde_json::Value, name: &str) -> Option<f64> {
        row.get(name)?.as_str()?.parse().ok()
    }
}

// ── Alpha Vantage API response types ────────────────────────────────

#[derive(Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,
}

#[derive(Deserialize)]
struct GlobalQuote {
    #[serde(rename = "05. price")]
    price: Option<String>,
}

#[async_trait]
impl PriceProvider for AlphaVantageProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn quote(&self, symbol: &str) -> Result<Quote, EngineError> {
        let resp: GlobalQuoteResponse = self
            .client
            .get(BASE_URL)
            .query(&[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", &symbol.to_uppercase()),
                ("apikey", &self.api_key),
            ])
            .send()
            .await?
            .json()
            .await
            .map_err(|e| EngineError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to parse quote for {symbol}: {e}"),
            })?;

        let price_str = resp
            .global_quote
            .and_then(|q| q.price)
            .ok_or_else(|| EngineError::PriceUnavailable {
                symbol: symbol.to_uppercase(),
            })?;

        let price: f64 = price_str.parse().map_err(|e| EngineError::Api {
            provider: PROVIDER.into(),
            message: format!("Invalid price format for {symbol}: {e}"),
        })?;

        Ok(Quote::live(symbol, price))
    }

    async fn historical_series(
        &self,
        symbol: &str,
        interval: SeriesInterval,
        range: SeriesRange,
    ) -> Result<Vec<HistoricalBar>, EngineError> {
        let body: serde_json::Value = self
            .client
            .get(BASE_URL)
            .query(&[
                ("function", Self::function_for(interval)),
                ("symbol", &symbol.to_uppercase()),
                ("outputsize", "full"),
                ("apikey", &self.api_key),
            ])
            .send()
            .await?
            .json()
            .await
            .map_err(|e| EngineError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to parse time series for {symbol}: {e}"),
            })?;

        let bars = Self::parse_series(&body)?;

        // The API has no range parameter for these functions; trim client-side.
        let today = chrono::Utc::now().date_naive();
        let bars = match range.cutoff(today) {
            Some(cutoff) => bars.into_iter().filter(|b| b.date >= cutoff).collect(),
            None => bars,
        };

        Ok(bars)
    }
}
