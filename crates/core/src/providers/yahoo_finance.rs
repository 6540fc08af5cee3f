use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use time::OffsetDateTime;

use super::traits::PriceProvider;
use crate::errors::EngineError;
use crate::models::quote::{HistoricalBar, Quote, SeriesInterval, SeriesRange};

const PROVIDER: &str = "Yahoo Finance";

/// Yahoo Finance API provider for stock/equity prices.
///
/// - **Free**: No API key required.
/// - **No strict rate limits** (unofficial public API).
/// - **Coverage**: Global equities, ETFs, indices, mutual funds.
/// - **Data**: Real-time quotes + full historical OHLCV.
///
/// Uses the `yahoo_finance_api` crate which wraps Yahoo Finance's public
/// endpoints and carries its own request timeout.
pub struct YahooFinanceProvider {
    connector: yahoo_finance_api::YahooConnector,
}

impl YahooFinanceProvider {
    pub fn new() -> Result<Self, EngineError> {
        let connector = yahoo_finance_api::YahooConnector::new().map_err(|e| EngineError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to create connector: {e}"),
        })?;
        Ok(Self { connector })
    }

    /// Interval token understood by the Yahoo chart endpoint.
    fn interval_token(interval: SeriesInterval) -> &'static str {
        match interval {
            SeriesInterval::Daily => "1d",
            SeriesInterval::Weekly => "1wk",
            SeriesInterval::Monthly => "1mo",
        }
    }

    /// Convert a `chrono::NaiveDate` to `time::OffsetDateTime` (midnight UTC).
    fn to_offset_datetime(date: NaiveDate) -> Result<OffsetDateTime, EngineError> {
        let month: time::Month = match date.month() {
            1 => time::Month::January,
            2 => time::Month::February,
            3 => time::Month::March,
            4 => time::Month::April,
            5 => time::Month::May,
            6 => time::Month::June,
            7 => time::Month::July,
            8 => time::Month::August,
            9 => time::Month::September,
            10 => time::Month::October,
            11 => time::Month::November,
            12 => time::Month::December,
            _ => unreachable!(),
        };

        let odt = time::Date::from_calendar_date(date.year(), month, date.day() as u8)
            .map_err(|e| EngineError::Api {
                provider: PROVIDER.into(),
                message: format!("Invalid date {date}: {e}"),
            })?
            .with_hms(0, 0, 0)
            .map_err(|e| EngineError::Api {
                provider: PROVIDER.into(),
                message: format!("Invalid time for {date}: {e}"),
            })?
            .assume_utc();
        Ok(odt)
    }

    /// Convert a unix timestamp (seconds) to `chrono::NaiveDate`.
    fn timestamp_to_naive_date(ts: i64) -> Option<NaiveDate> {
        chrono::DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
    }
}

#[async_trait]
impl PriceProvider for YahooFinanceProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn quote(&self, symbol: &str) -> Result<Quote, EngineError> {
        let resp = self
            .connector
            .get_latest_quotes(symbol, "1d")
            .await
            .map_err(|e| EngineError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to fetch latest quote for {symbol}: {e}"),
            })?;

        let quote = resp.last_quote().map_err(|_| EngineError::PriceUnavailable {
            symbol: symbol.to_uppercase(),
        })?;

        Ok(Quote::live(symbol, quote.close))
    }

    async fn historical_series(
        &self,
        symbol: &str,
        interval: SeriesInterval,
        range: SeriesRange,
    ) -> Result<Vec<HistoricalBar>, EngineError> {
        let today = chrono::Utc::now().date_naive();
        let start = match range.cutoff(today) {
            Some(cutoff) => Self::to_offset_datetime(cutoff)?,
            None => OffsetDateTime::UNIX_EPOCH,
        };
        let end = OffsetDateTime::now_utc();

        let resp = self
            .connector
            .get_quote_history_interval(symbol, start, end, Self::interval_token(interval))
            .await
            .map_err(|e| EngineError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to fetch history for {symbol}: {e}"),
            })?;

        let quotes = resp.quotes().map_err(|e| EngineError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse quotes for {symbol}: {e}"),
        })?;

        let mut bars: Vec<HistoricalBar> = quotes
            .iter()
            .filter_map(|q| {
                let date = Self::timestamp_to_naive_date(q.timestamp)?;
                Some(HistoricalBar {
                    date,
                    open: q.open,
                    high: q.high,
                    low: q.low,
                    close: q.close,
                    volume: q.volume,
                })
            })
            .collect();

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}
