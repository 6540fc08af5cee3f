use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The category of a held asset.
/// Drives the fixed risk-weight model used by the risk aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetType {
    /// Equities (AAPL, MSFT, …)
    Stock,
    /// Cryptocurrencies (BTC, ETH, …)
    Crypto,
    /// Government and corporate bonds
    Bond,
    /// Mutual funds
    MutualFund,
    /// Exchange-traded funds
    Etf,
    /// Anything that doesn't fit the categories above
    Other,
}

impl AssetType {
    /// Fixed risk weight per asset category.
    ///
    /// The weighted average of these over a portfolio's position values is
    /// the portfolio risk score: riskier categories (crypto) pull the score
    /// up, defensive ones (bonds) pull it down.
    #[must_use]
    pub fn risk_weight(&self) -> f64 {
        match self {
            AssetType::Stock => 0.7,
            AssetType::Crypto => 0.9,
            AssetType::Bond => 0.2,
            AssetType::MutualFund => 0.4,
            AssetType::Etf => 0.5,
            AssetType::Other => 0.6,
        }
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetType::Stock => write!(f, "Stock"),
            AssetType::Crypto => write!(f, "Crypto"),
            AssetType::Bond => write!(f, "Bond"),
            AssetType::MutualFund => write!(f, "Mutual Fund"),
            AssetType::Etf => write!(f, "ETF"),
            AssetType::Other => write!(f, "Other"),
        }
    }
}

/// A position in a portfolio, as reported by the holdings store.
///
/// One record per purchase event recorded by the surrounding service. The
/// engine treats each record as a potentially blended position (quantity may
/// have been adjusted by later activity), not as a single tax lot — lot
/// tracking happens in the cost-basis service from the ledger instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    /// Unique identifier
    pub id: Uuid,

    /// Ticker symbol, uppercased (e.g., "AAPL", "BTC")
    pub symbol: String,

    /// Human-readable name (e.g., "Apple Inc.")
    pub name: String,

    /// Units currently held (never negative)
    pub quantity: f64,

    /// Price per unit paid at acquisition
    pub unit_cost: f64,

    /// Date the position was acquired
    pub acquisition_date: NaiveDate,

    /// Asset category — drives risk weighting and type grouping
    pub asset_type: AssetType,

    /// Most recent price recorded by the surrounding service, if any.
    /// Used as the fallback when no live or cached quote is available.
    #[serde(default)]
    pub last_known_price: Option<f64>,
}

impl Holding {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        quantity: f64,
        unit_cost: f64,
        acquisition_date: NaiveDate,
        asset_type: AssetType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into().to_uppercase(),
            name: name.into(),
            quantity,
            unit_cost,
            acquisition_date,
            asset_type,
            last_known_price: None,
        }
    }

    /// Attach a last-known price (builder style, for store implementations).
    #[must_use]
    pub fn with_last_known_price(mut self, price: f64) -> Self {
        self.last_known_price = Some(price);
        self
    }
}
