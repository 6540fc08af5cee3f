use chrono::Utc;
use futures::stream::{self, StreamExt};

use crate::models::analytics::{PortfolioValue, PositionValue, PriceWarning};
use crate::models::holding::Holding;
use crate::models::quote::QuoteOrigin;
use crate::services::market_data_service::MarketDataService;

/// How a holding is priced when no live or cached quote can be obtained.
///
/// Both variants appear in the valuation paths: strict valuation prefers to
/// under-report a position it cannot price, while allocation and risk
/// grouping keep the position weighted at its acquisition cost so it does
/// not vanish from the breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPricing {
    /// `last_known_price`, or zero when absent (valuation, gains).
    LastKnownOrZero,
    /// `last_known_price`, or the acquisition cost when absent
    /// (diversification, risk).
    LastKnownOrCost,
}

impl FallbackPricing {
    fn price_for(&self, holding: &Holding) -> f64 {
        match self {
            FallbackPricing::LastKnownOrZero => holding.last_known_price.unwrap_or(0.0),
            FallbackPricing::LastKnownOrCost => {
                holding.last_known_price.unwrap_or(holding.unit_cost)
            }
        }
    }
}

/// Quote fetches issued concurrently per aggregation. Small enough to stay
/// under external provider rate limits.
const MAX_PARALLEL_QUOTES: usize = 4;

/// Values holdings against live/cached prices and computes unrealized gains.
///
/// A portfolio valuation never fails because one symbol's quote is
/// unavailable: the failing position is priced by the chosen
/// [`FallbackPricing`], tagged [`QuoteOrigin::Fallback`], and reported in
/// the result's warnings list.
#[derive(Clone)]
pub struct ValuationService {
    market_data: MarketDataService,
    max_parallel: usize,
}

impl ValuationService {
    pub fn new(market_data: MarketDataService) -> Self {
        Self {
            market_data,
            max_parallel: MAX_PARALLEL_QUOTES,
        }
    }

    /// Override the quote fan-out width (mainly for tests and callers with
    /// stricter provider rate limits).
    #[must_use]
    pub fn with_max_parallel(mut self, max_parallel: usize) -> Self {
        self.max_parallel = max_parallel.max(1);
        self
    }

    /// Value every holding, fetching quotes concurrently with bounded
    /// parallelism. Completion order does not matter — the results are
    /// combined commutatively — but positions are sorted by symbol so the
    /// output is deterministic.
    pub async fn value_holdings(
        &self,
        holdings: &[Holding],
        fallback: FallbackPricing,
    ) -> (Vec<PositionValue>, Vec<PriceWarning>) {
        let valued: Vec<(PositionValue, Option<PriceWarning>)> =
            stream::iter(holdings.iter().cloned())
                .map(|holding| {
                    let market_data = self.market_data.clone();
                    async move { Self::value_one(&market_data, holding, fallback).await }
                })
                .buffer_unordered(self.max_parallel)
                .collect()
                .await;

        let mut positions = Vec::with_capacity(valued.len());
        let mut warnings = Vec::new();
        for (position, warning) in valued {
            positions.push(position);
            warnings.extend(warning);
        }
        positions.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        warnings.sort_by(|a, b| a.symbol.cmp(&b.symbol));

        (positions, warnings)
    }

    /// Full portfolio valuation: per-position values, aggregate total, and
    /// any degradations encountered.
    pub async fn portfolio_value(&self, holdings: &[Holding]) -> PortfolioValue {
        let (positions, warnings) = self
            .value_holdings(holdings, FallbackPricing::LastKnownOrZero)
            .await;

        PortfolioValue {
            as_of: Utc::now(),
            total_value: positions.iter().map(|p| p.value).sum(),
            positions,
            warnings,
        }
    }

    async fn value_one(
        market_data: &MarketDataService,
        holding: Holding,
        fallback: FallbackPricing,
    ) -> (PositionValue, Option<PriceWarning>) {
        let (price, origin, warning) = match market_data.quote(&holding.symbol).await {
            Ok(quote) => (quote.price, quote.origin, None),
            Err(e) => {
                let price = fallback.price_for(&holding);
                log::warn!(
                    "could not get price for {}: {e}; valuing at fallback price {price}",
                    holding.symbol
                );
                let warning = PriceWarning {
                    symbol: holding.symbol.clone(),
                    origin: QuoteOrigin::Fallback,
                    detail: format!("live quote unavailable ({e}); used fallback price {price}"),
                };
                (price, QuoteOrigin::Fallback, Some(warning))
            }
        };

        let position = PositionValue {
            symbol: holding.symbol.clone(),
            asset_type: holding.asset_type,
            quantity: holding.quantity,
            price,
            origin,
            value: holding.quantity * price,
            unrealized_gain: (price - holding.unit_cost) * holding.quantity,
        };

        (position, warning)
    }
}
