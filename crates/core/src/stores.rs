//! Collaborator interfaces the engine consumes but does not own.
//!
//! The surrounding service implements these against its persistence layer;
//! the engine only ever reads through them. Ownership checks live behind
//! these seams: a portfolio that does not exist and a portfolio owned by
//! someone else are indistinguishable to the engine (both surface as
//! [`EngineError::NotFoundOrUnauthorized`]).

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::EngineError;
use crate::models::holding::Holding;
use crate::models::ledger::{EntryKind, LedgerEntry};

/// Read access to a portfolio's current holdings.
#[async_trait]
pub trait HoldingsStore: Send + Sync {
    /// List all holdings of a portfolio.
    ///
    /// Returns [`EngineError::NotFoundOrUnauthorized`] when the portfolio
    /// does not exist or is not owned by `user_id`. An owned, empty
    /// portfolio returns an empty list.
    async fn list_by_portfolio(
        &self,
        user_id: Uuid,
        portfolio_id: Uuid,
    ) -> Result<Vec<Holding>, EngineError>;
}

/// Read access to a portfolio's transaction ledger.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// List ledger entries restricted to `kinds`, ordered by date ascending.
    ///
    /// Malformed entries (negative quantities, negative prices) are the
    /// store's responsibility to reject; the engine trusts what it receives.
    async fn list_by_portfolio(
        &self,
        user_id: Uuid,
        portfolio_id: Uuid,
        kinds: &[EntryKind],
    ) -> Result<Vec<LedgerEntry>, EngineError>;
}
