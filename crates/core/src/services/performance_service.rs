use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::errors::EngineError;
use crate::models::analytics::{PerformancePoint, PerformanceSeries, PriceWarning};
use crate::models::holding::Holding;
use crate::models::quote::{QuoteOrigin, SeriesInterval, SeriesRange};
use crate::services::market_data_service::MarketDataService;

/// Maximum reconstruction range in days (10 years).
const MAX_RANGE_DAYS: i64 = 3650;

/// Rebuilds a portfolio's daily value trajectory over a date range.
///
/// Each symbol's daily series is fetched once (through the market data
/// cache) and indexed by calendar date; the day walk then does pure map
/// lookups. Days with no series entry — weekends, holidays, gaps — value
/// the holding at its acquisition cost, so the output always has exactly
/// one point per calendar day in the range.
pub struct PerformanceService {
    market_data: MarketDataService,
}

impl PerformanceService {
    pub fn new(market_data: MarketDataService) -> Self {
        Self { market_data }
    }

    /// Reconstruct daily portfolio values for `start..=end`.
    ///
    /// Returns `InvalidDateRange` when `start > end` or the range exceeds
    /// 10 years. A symbol whose series cannot be fetched at all is valued
    /// at acquisition cost for every day and recorded as a warning — the
    /// reconstruction itself never fails on market data.
    pub async fn historical_performance(
        &self,
        holdings: &[Holding],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PerformanceSeries, EngineError> {
        if start > end {
            return Err(EngineError::InvalidDateRange {
                start,
                end,
                reason: "start date is after end date".into(),
            });
        }
        let range_days = (end - start).num_days() + 1;
        if range_days > MAX_RANGE_DAYS {
            return Err(EngineError::InvalidDateRange {
                start,
                end,
                reason: format!(
                    "range of {range_days} days exceeds maximum of {MAX_RANGE_DAYS} days (10 years)"
                ),
            });
        }

        // One series fetch per distinct symbol, indexed date → close.
        let mut closes_by_symbol: HashMap<String, HashMap<NaiveDate, f64>> = HashMap::new();
        let mut warnings = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for holding in holdings {
            if !seen.insert(&holding.symbol) {
                continue;
            }
            match self
                .market_data
                .historical_series(&holding.symbol, SeriesInterval::Daily, SeriesRange::Full)
                .await
            {
                Ok(bars) => {
                    let index: HashMap<NaiveDate, f64> =
                        bars.into_iter().map(|b| (b.date, b.close)).collect();
                    closes_by_symbol.insert(holding.symbol.clone(), index);
                }
                Err(e) => {
                    log::warn!(
                        "could not get historical series for {}: {e}; valuing at acquisition cost",
                        holding.symbol
                    );
                    warnings.push(PriceWarning {
                        symbol: holding.symbol.clone(),
                        origin: QuoteOrigin::Fallback,
                        detail: format!(
                            "historical series unavailable ({e}); valued at acquisition cost for all days"
                        ),
                    });
                }
            }
        }

        // Sequential day walk over the pre-indexed closes.
        let mut points = Vec::with_capacity(range_days as usize);
        let mut day = start;
        while day <= end {
            let mut value = 0.0;
            for holding in holdings {
                let price = closes_by_symbol
                    .get(&holding.symbol)
                    .and_then(|index| index.get(&day))
                    .copied()
                    .unwrap_or(holding.unit_cost);
                value += holding.quantity * price;
            }
            points.push(PerformancePoint { date: day, value });

            day = match day.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        Ok(PerformanceSeries {
            start,
            end,
            points,
            warnings,
        })
    }
}
