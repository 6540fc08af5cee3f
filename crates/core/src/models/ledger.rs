use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of ledger entry.
///
/// Only `Buy` and `Sell` carry units of an asset and participate in
/// cost-basis matching; the cash-flow kinds are carried through for
/// completeness and skipped by the gains computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// Acquiring units of an asset
    Buy,
    /// Disposing of units of an asset
    Sell,
    /// Cash paid into the portfolio
    Deposit,
    /// Cash taken out of the portfolio
    Withdrawal,
    /// Dividend received
    Dividend,
}

impl EntryKind {
    /// Whether entries of this kind open or consume cost-basis lots.
    #[must_use]
    pub fn affects_cost_basis(&self) -> bool {
        matches!(self, EntryKind::Buy | EntryKind::Sell)
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Buy => write!(f, "Buy"),
            EntryKind::Sell => write!(f, "Sell"),
            EntryKind::Deposit => write!(f, "Deposit"),
            EntryKind::Withdrawal => write!(f, "Withdrawal"),
            EntryKind::Dividend => write!(f, "Dividend"),
        }
    }
}

/// A single row of a portfolio's transaction ledger.
///
/// Immutable once created. The ledger store returns entries ordered by
/// `date` ascending; the cost-basis service re-sorts defensively with a
/// stable sort, so entries sharing a timestamp keep their ledger order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier
    pub id: Uuid,

    /// Ticker symbol, uppercased
    pub symbol: String,

    /// Buy, Sell, or a cash-flow kind
    pub kind: EntryKind,

    /// Units transacted (zero for pure cash flows)
    pub quantity: f64,

    /// Price per unit at transaction time (zero for pure cash flows)
    pub unit_price: f64,

    /// Total cash amount of the transaction — proceeds for a sell,
    /// outlay for a buy. Not necessarily `quantity × unit_price`
    /// (fees, partial fills).
    pub amount: f64,

    /// When the transaction happened
    pub date: DateTime<Utc>,

    /// Optional free-text notes (e.g., broker, memo)
    #[serde(default)]
    pub notes: Option<String>,
}

impl LedgerEntry {
    pub fn new(
        symbol: impl Into<String>,
        kind: EntryKind,
        quantity: f64,
        unit_price: f64,
        amount: f64,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into().to_uppercase(),
            kind,
            quantity,
            unit_price,
            amount,
            date,
            notes: None,
        }
    }

    /// Convenience constructor for a buy; `amount` defaults to
    /// `quantity × unit_price`.
    pub fn buy(symbol: impl Into<String>, quantity: f64, unit_price: f64, date: DateTime<Utc>) -> Self {
        Self::new(symbol, EntryKind::Buy, quantity, unit_price, quantity * unit_price, date)
    }

    /// Convenience constructor for a sell; `amount` defaults to
    /// `quantity × unit_price`.
    pub fn sell(symbol: impl Into<String>, quantity: f64, unit_price: f64, date: DateTime<Utc>) -> Self {
        Self::new(symbol, EntryKind::Sell, quantity, unit_price, quantity * unit_price, date)
    }

    /// Override the cash amount (builder style).
    #[must_use]
    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }
}
