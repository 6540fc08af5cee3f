use std::collections::HashMap;

use crate::models::analytics::{
    Diversification, DiversificationReport, RiskLevel, RiskProfile, RiskReport, SymbolAllocation,
    TypeAllocation,
};
use crate::models::holding::{AssetType, Holding};
use crate::services::valuation_service::{FallbackPricing, ValuationService};

/// Symbol slices returned by a diversification breakdown.
const TOP_SYMBOLS: usize = 10;

/// Groups valued holdings into diversification breakdowns and scores
/// portfolio risk from the fixed per-type weight model.
///
/// Holdings are valued with [`FallbackPricing::LastKnownOrCost`] so a
/// position with no live quote keeps its weight in the breakdown instead
/// of disappearing. All outputs are explicitly sorted — group order never
/// depends on map iteration order.
pub struct AllocationService {
    valuation: ValuationService,
}

impl AllocationService {
    pub fn new(valuation: ValuationService) -> Self {
        Self { valuation }
    }

    /// Diversification by asset type and by symbol (top 10).
    ///
    /// Portfolios with no holdings, or whose positions all value to zero,
    /// produce the explicit `NoHoldings` / `NoValue` states — percentages
    /// of nothing are not reported.
    pub async fn diversification(&self, holdings: &[Holding]) -> Diversification {
        if holdings.is_empty() {
            return Diversification::NoHoldings;
        }

        let (positions, warnings) = self
            .valuation
            .value_holdings(holdings, FallbackPricing::LastKnownOrCost)
            .await;

        let total_value: f64 = positions.iter().map(|p| p.value).sum();
        if total_value <= 0.0 {
            return Diversification::NoValue;
        }

        // Group by asset type (closed enum).
        let mut value_by_type: HashMap<AssetType, f64> = HashMap::new();
        for position in &positions {
            *value_by_type.entry(position.asset_type).or_insert(0.0) += position.value;
        }
        let mut by_type: Vec<TypeAllocation> = value_by_type
            .into_iter()
            .map(|(asset_type, value)| TypeAllocation {
                asset_type,
                value,
                percentage: value / total_value * 100.0,
            })
            .collect();
        by_type.sort_by(|a, b| {
            b.percentage
                .partial_cmp(&a.percentage)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.asset_type.to_string().cmp(&b.asset_type.to_string()))
        });

        // Group by symbol, keep the top slices.
        let mut value_by_symbol: HashMap<String, f64> = HashMap::new();
        for position in &positions {
            *value_by_symbol.entry(position.symbol.clone()).or_insert(0.0) += position.value;
        }
        let mut by_symbol: Vec<SymbolAllocation> = value_by_symbol
            .into_iter()
            .map(|(symbol, value)| SymbolAllocation {
                symbol,
                value,
                percentage: value / total_value * 100.0,
            })
            .collect();
        by_symbol.sort_by(|a, b| {
            b.percentage
                .partial_cmp(&a.percentage)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.symbol.cmp(&b.symbol))
        });
        by_symbol.truncate(TOP_SYMBOLS);

        Diversification::Report(DiversificationReport {
            total_value,
            by_type,
            by_symbol,
            warnings,
        })
    }

    /// Value-weighted average risk score, bucketed Low/Medium/High.
    pub async fn risk_profile(&self, holdings: &[Holding]) -> RiskProfile {
        if holdings.is_empty() {
            return RiskProfile::NoHoldings;
        }

        let (positions, warnings) = self
            .valuation
            .value_holdings(holdings, FallbackPricing::LastKnownOrCost)
            .await;

        let total_value: f64 = positions.iter().map(|p| p.value).sum();
        let weighted: f64 = positions
            .iter()
            .map(|p| p.value * p.asset_type.risk_weight())
            .sum();

        let average = if total_value > 0.0 {
            weighted / total_value
        } else {
            0.0
        };
        let average_score = (average * 100.0).round() / 100.0;

        RiskProfile::Scored(RiskReport {
            average_score,
            level: RiskLevel::from_score(average_score),
            total_value,
            warnings,
        })
    }
}
