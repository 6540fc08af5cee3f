use async_trait::async_trait;

use crate::errors::EngineError;
use crate::models::quote::{HistoricalBar, Quote, SeriesInterval, SeriesRange};

/// Trait abstraction for external price data sources.
///
/// The provider may fail, time out, or rate-limit at any moment — callers
/// own the fallback policy. Implementations must carry their own request
/// timeout so no lookup blocks indefinitely.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Current price of a symbol.
    async fn quote(&self, symbol: &str) -> Result<Quote, EngineError>;

    /// Historical OHLCV series for a symbol, sorted by date ascending.
    async fn historical_series(
        &self,
        symbol: &str,
        interval: SeriesInterval,
        range: SeriesRange,
    ) -> Result<Vec<HistoricalBar>, EngineError>;
}
