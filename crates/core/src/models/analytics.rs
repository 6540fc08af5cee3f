use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::holding::AssetType;
use super::quote::QuoteOrigin;

/// A non-fatal degradation recorded while computing an aggregate:
/// some symbol was priced from stale or estimated data instead of a
/// live quote. Never fails the overall computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceWarning {
    /// Symbol whose live price was unavailable
    pub symbol: String,

    /// Provenance of the price that was used instead
    pub origin: QuoteOrigin,

    /// What happened and what was substituted
    pub detail: String,
}

/// A single valued position within a portfolio valuation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionValue {
    pub symbol: String,
    pub asset_type: AssetType,

    /// Units held
    pub quantity: f64,

    /// Price per unit used for this valuation
    pub price: f64,

    /// Where that price came from (live, cached, or fallback)
    pub origin: QuoteOrigin,

    /// `quantity × price`
    pub value: f64,

    /// `(price − unit_cost) × quantity`
    pub unrealized_gain: f64,
}

/// Present value of a whole portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioValue {
    /// When the valuation was computed
    pub as_of: DateTime<Utc>,

    /// Sum of all position values
    pub total_value: f64,

    /// Per-position breakdown, sorted by symbol
    pub positions: Vec<PositionValue>,

    /// Symbols that fell back to stale/estimated prices
    pub warnings: Vec<PriceWarning>,
}

/// Realized gain attributed to one symbol by FIFO lot matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolGains {
    pub symbol: String,
    pub realized: f64,
}

/// FIFO-matched realized gains for a ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RealizedGains {
    /// Sum across all symbols
    pub total: f64,

    /// Per-symbol breakdown, sorted by symbol
    pub by_symbol: Vec<SymbolGains>,
}

/// Combined realized and unrealized gains for a portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GainsLosses {
    /// Profit/loss recognized on past sells (proceeds − FIFO cost basis)
    pub realized: f64,

    /// Paper profit/loss on current positions
    pub unrealized: f64,

    /// Realized gain per symbol, sorted by symbol
    pub realized_by_symbol: Vec<SymbolGains>,

    /// Symbols whose unrealized gain used a fallback price
    pub warnings: Vec<PriceWarning>,
}

/// One day of a reconstructed portfolio value series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Daily portfolio value over an inclusive date range — one point per
/// calendar day, non-trading days included via fallback pricing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceSeries {
    pub start: NaiveDate,
    pub end: NaiveDate,

    /// Exactly `end − start + 1` points, ascending by date
    pub points: Vec<PerformancePoint>,

    /// Symbols whose series could not be fetched at all
    pub warnings: Vec<PriceWarning>,
}

/// Value share of one asset category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeAllocation {
    pub asset_type: AssetType,
    pub value: f64,

    /// `value / total × 100`
    pub percentage: f64,
}

/// Value share of one symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolAllocation {
    pub symbol: String,
    pub value: f64,
    pub percentage: f64,
}

/// Diversification breakdown of a portfolio with value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiversificationReport {
    pub total_value: f64,

    /// Share per asset category, percentage descending (ties by label)
    pub by_type: Vec<TypeAllocation>,

    /// Top 10 symbols by share, percentage descending (ties by symbol)
    pub by_symbol: Vec<SymbolAllocation>,

    pub warnings: Vec<PriceWarning>,
}

/// Diversification analysis result.
///
/// Percentages are undefined for a portfolio with no holdings or no
/// value, so those cases are explicit variants rather than a report
/// full of divisions by zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Diversification {
    /// Portfolio has no holdings to analyze
    NoHoldings,
    /// Holdings exist but every position valued to zero
    NoValue,
    Report(DiversificationReport),
}

/// Risk classification buckets over the weighted average score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Score below 0.3
    Low,
    /// Score below 0.6
    Medium,
    /// Score 0.6 and up
    High,
}

impl RiskLevel {
    /// Bucket a weighted average risk score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score < 0.3 {
            RiskLevel::Low
        } else if score < 0.6 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// Value-weighted risk assessment of a portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReport {
    /// `Σ(position value × type weight) / total value`, rounded to 2 decimals
    pub average_score: f64,

    pub level: RiskLevel,

    pub total_value: f64,

    pub warnings: Vec<PriceWarning>,
}

/// Risk analysis result — explicit empty-portfolio state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RiskProfile {
    /// Portfolio has no holdings to score
    NoHoldings,
    Scored(RiskReport),
}
