use std::sync::Arc;

use crate::cache::{self, MarketDataCache, HISTORICAL_SERIES_TTL, REALTIME_QUOTE_TTL};
use crate::errors::EngineError;
use crate::models::quote::{HistoricalBar, Quote, QuoteOrigin, SeriesInterval, SeriesRange};
use crate::providers::traits::PriceProvider;

/// Cache-aside access to the price provider.
///
/// Every lookup checks the cache first; a miss fetches from the provider
/// and populates the cache. On a provider failure the cache is left
/// unpopulated and the error propagates — the caller decides whether to
/// fall back (aggregations do) or surface it (direct quote requests do).
///
/// Fetched prices are validated to be finite and non-negative before they
/// are cached or returned.
#[derive(Clone)]
pub struct MarketDataService {
    provider: Arc<dyn PriceProvider>,
    cache: MarketDataCache,
}

impl MarketDataService {
    pub fn new(provider: Arc<dyn PriceProvider>, cache: MarketDataCache) -> Self {
        Self { provider, cache }
    }

    /// Handle to the underlying cache (for maintenance operations).
    #[must_use]
    pub fn cache(&self) -> &MarketDataCache {
        &self.cache
    }

    /// Current quote for a symbol, cached for 5 minutes.
    ///
    /// A cache hit is re-tagged [`QuoteOrigin::Cached`] so downstream
    /// consumers can tell it apart from a live fetch.
    pub async fn quote(&self, symbol: &str) -> Result<Quote, EngineError> {
        let key = cache::realtime_key(symbol);

        if let Some(json) = self.cache.get(&key).await {
            match serde_json::from_str::<Quote>(&json) {
                Ok(mut quote) => {
                    log::debug!("serving quote for {symbol} from cache");
                    quote.origin = QuoteOrigin::Cached;
                    return Ok(quote);
                }
                Err(e) => {
                    // Undecodable entry: drop it and fall through to a fetch.
                    log::warn!("discarding corrupt cache entry {key}: {e}");
                    self.cache.delete(&key).await;
                }
            }
        }

        let quote = self.provider.quote(symbol).await?;
        self.validate_price(symbol, quote.price)?;

        self.cache
            .set(key, serde_json::to_string(&quote)?, REALTIME_QUOTE_TTL)
            .await;
        log::debug!("fetched quote for {symbol} from {}", self.provider.name());
        Ok(quote)
    }

    /// Historical series for a symbol, cached for 30 minutes.
    pub async fn historical_series(
        &self,
        symbol: &str,
        interval: SeriesInterval,
        range: SeriesRange,
    ) -> Result<Vec<HistoricalBar>, EngineError> {
        let key = cache::historical_key(symbol, interval, range);

        if let Some(json) = self.cache.get(&key).await {
            match serde_json::from_str::<Vec<HistoricalBar>>(&json) {
                Ok(bars) => {
                    log::debug!("serving {interval} series for {symbol} from cache");
                    return Ok(bars);
                }
                Err(e) => {
                    log::warn!("discarding corrupt cache entry {key}: {e}");
                    self.cache.delete(&key).await;
                }
            }
        }

        let mut bars = self.provider.historical_series(symbol, interval, range).await?;
        bars.sort_by_key(|b| b.date);

        self.cache
            .set(key, serde_json::to_string(&bars)?, HISTORICAL_SERIES_TTL)
            .await;
        log::debug!(
            "fetched {} {interval} bars for {symbol} from {}",
            bars.len(),
            self.provider.name()
        );
        Ok(bars)
    }

    fn validate_price(&self, symbol: &str, price: f64) -> Result<(), EngineError> {
        if !price.is_finite() || price < 0.0 {
            return Err(EngineError::Api {
                provider: self.provider.name().to_string(),
                message: format!(
                    "Invalid price returned for {symbol}: {price} (must be finite and non-negative)"
                ),
            });
        }
        Ok(())
    }
}
