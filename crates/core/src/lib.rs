pub mod cache;
pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod stores;

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use cache::MarketDataCache;
use errors::EngineError;
use models::analytics::{Diversification, GainsLosses, PerformanceSeries, PortfolioValue, RiskProfile};
use models::ledger::EntryKind;
use models::quote::{HistoricalBar, Quote, SeriesInterval, SeriesRange};
use providers::traits::PriceProvider;
use services::allocation_service::AllocationService;
use services::cost_basis_service::{CostBasisService, OversellPolicy};
use services::market_data_service::MarketDataService;
use services::performance_service::PerformanceService;
use services::valuation_service::{FallbackPricing, ValuationService};
use stores::{HoldingsStore, LedgerStore};

/// Main entry point for the portfolio analytics engine.
///
/// Explicitly constructed with its collaborators — the holdings and ledger
/// stores it reads through, the price provider it quotes from, and the
/// market data cache that shields that provider. No process-wide state:
/// every handle is passed in, and dropping the engine drops its handles.
///
/// One method per exposed metric. The engine assumes the caller is trusted;
/// resource ownership is enforced by the stores, which answer
/// [`EngineError::NotFoundOrUnauthorized`] for foreign portfolios.
///
/// All methods are `async`; dropping a returned future abandons any
/// in-flight price fetches, so a cancelled computation can never be
/// observed as a partially summed result.
#[must_use]
pub struct AnalyticsEngine {
    holdings: Arc<dyn HoldingsStore>,
    ledger: Arc<dyn LedgerStore>,
    market_data: MarketDataService,
    cost_basis: CostBasisService,
    valuation: ValuationService,
    performance: PerformanceService,
    allocation: AllocationService,
}

impl std::fmt::Debug for AnalyticsEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsEngine")
            .field("oversell_policy", &self.cost_basis.policy())
            .finish_non_exhaustive()
    }
}

impl AnalyticsEngine {
    pub fn new(
        holdings: Arc<dyn HoldingsStore>,
        ledger: Arc<dyn LedgerStore>,
        provider: Arc<dyn PriceProvider>,
        cache: MarketDataCache,
    ) -> Self {
        let market_data = MarketDataService::new(provider, cache);
        let valuation = ValuationService::new(market_data.clone());
        let performance = PerformanceService::new(market_data.clone());
        let allocation = AllocationService::new(valuation.clone());

        Self {
            holdings,
            ledger,
            market_data,
            cost_basis: CostBasisService::new(),
            valuation,
            performance,
            allocation,
        }
    }

    /// Choose how sells that exceed recorded purchases are handled
    /// (builder style; the default keeps the zero-cost-basis behavior).
    pub fn with_oversell_policy(mut self, policy: OversellPolicy) -> Self {
        self.cost_basis = CostBasisService::with_policy(policy);
        self
    }

    // ── Valuation ───────────────────────────────────────────────────

    /// Present value of a portfolio, per position and in aggregate.
    ///
    /// Positions whose live quote is unavailable are valued at their last
    /// known price (or zero) and listed in the result's warnings — a
    /// single dead symbol never fails the valuation.
    pub async fn portfolio_value(
        &self,
        user_id: Uuid,
        portfolio_id: Uuid,
    ) -> Result<PortfolioValue, EngineError> {
        let holdings = self.holdings.list_by_portfolio(user_id, portfolio_id).await?;
        Ok(self.valuation.portfolio_value(&holdings).await)
    }

    // ── Gains / Losses ──────────────────────────────────────────────

    /// Realized gains (FIFO lot matching over the ledger) plus unrealized
    /// gains (current prices vs. acquisition cost), with a per-symbol
    /// realized breakdown.
    pub async fn gains_losses(
        &self,
        user_id: Uuid,
        portfolio_id: Uuid,
    ) -> Result<GainsLosses, EngineError> {
        let holdings = self.holdings.list_by_portfolio(user_id, portfolio_id).await?;
        let entries = self
            .ledger
            .list_by_portfolio(user_id, portfolio_id, &[EntryKind::Buy, EntryKind::Sell])
            .await?;

        let realized = self.cost_basis.realized_gains(&entries)?;
        let (positions, warnings) = self
            .valuation
            .value_holdings(&holdings, FallbackPricing::LastKnownOrZero)
            .await;

        Ok(GainsLosses {
            realized: realized.total,
            unrealized: positions.iter().map(|p| p.unrealized_gain).sum(),
            realized_by_symbol: realized.by_symbol,
            warnings,
        })
    }

    // ── Historical performance ──────────────────────────────────────

    /// Daily portfolio value over `start..=end` (inclusive calendar days).
    pub async fn historical_performance(
        &self,
        user_id: Uuid,
        portfolio_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PerformanceSeries, EngineError> {
        let holdings = self.holdings.list_by_portfolio(user_id, portfolio_id).await?;
        self.performance
            .historical_performance(&holdings, start, end)
            .await
    }

    // ── Diversification & Risk ──────────────────────────────────────

    /// Value share per asset type and per symbol (top 10).
    pub async fn diversification(
        &self,
        user_id: Uuid,
        portfolio_id: Uuid,
    ) -> Result<Diversification, EngineError> {
        let holdings = self.holdings.list_by_portfolio(user_id, portfolio_id).await?;
        Ok(self.allocation.diversification(&holdings).await)
    }

    /// Value-weighted risk score and bucket.
    pub async fn risk_profile(
        &self,
        user_id: Uuid,
        portfolio_id: Uuid,
    ) -> Result<RiskProfile, EngineError> {
        let holdings = self.holdings.list_by_portfolio(user_id, portfolio_id).await?;
        Ok(self.allocation.risk_profile(&holdings).await)
    }

    // ── Direct market data access ───────────────────────────────────

    /// Current quote for a single symbol (cache-aside).
    ///
    /// Unlike the aggregations, this surfaces provider failures to the
    /// caller — there is no holding to fall back on.
    pub async fn quote(&self, symbol: &str) -> Result<Quote, EngineError> {
        self.market_data.quote(symbol).await
    }

    /// Historical OHLCV series for a single symbol (cache-aside).
    pub async fn historical_series(
        &self,
        symbol: &str,
        interval: SeriesInterval,
        range: SeriesRange,
    ) -> Result<Vec<HistoricalBar>, EngineError> {
        self.market_data.historical_series(symbol, interval, range).await
    }

    // ── Cache management ────────────────────────────────────────────

    /// Number of cached market data entries (including expired ones not
    /// yet purged).
    pub async fn cache_len(&self) -> usize {
        self.market_data.cache().len().await
    }

    /// Drop all cached market data.
    pub async fn cache_clear(&self) {
        self.market_data.cache().clear().await;
    }

    /// Drop cached entries whose TTL has passed.
    pub async fn purge_expired_cache(&self) {
        self.market_data.cache().purge_expired().await;
    }
}
