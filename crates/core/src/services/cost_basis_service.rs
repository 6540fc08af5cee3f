use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::errors::EngineError;
use crate::models::analytics::{RealizedGains, SymbolGains};
use crate::models::ledger::{EntryKind, LedgerEntry};

/// What to do when a sell consumes more units than the ledger ever bought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OversellPolicy {
    /// The unmatched quantity contributes zero cost basis, so the whole
    /// sale amount for those units counts as gain. This mirrors the
    /// long-standing ledger behavior and inflates realized gains on
    /// incomplete ledgers — callers who prefer a hard failure should use
    /// [`OversellPolicy::Reject`].
    #[default]
    ZeroCostBasis,
    /// Fail the computation with [`EngineError::OversoldPosition`].
    Reject,
}

/// An open FIFO lot: units bought at one price, not yet consumed by sells.
/// Exists only for the duration of a single gains computation.
struct Lot {
    remaining_quantity: f64,
    unit_cost: f64,
}

/// Computes realized gains from a transaction ledger by FIFO lot matching.
///
/// Pure business logic — no I/O, no price lookups. The ledger's own unit
/// prices are the cost basis; market data never enters this computation.
///
/// For each symbol, buys open lots in date order and sells consume them
/// oldest-first. The realized gain of a sell is its cash amount minus the
/// cost of the consumed units.
pub struct CostBasisService {
    policy: OversellPolicy,
}

impl CostBasisService {
    pub fn new() -> Self {
        Self {
            policy: OversellPolicy::default(),
        }
    }

    pub fn with_policy(policy: OversellPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> OversellPolicy {
        self.policy
    }

    /// Replay the ledger and compute realized gains per symbol and in total.
    ///
    /// Entries are re-sorted by date with a stable sort, so entries sharing
    /// a timestamp keep their ledger order. Kinds other than Buy/Sell are
    /// ignored. A unit of quantity is never matched twice: each lot's
    /// remaining quantity only decreases, and a lot is dropped at zero.
    pub fn realized_gains(&self, entries: &[LedgerEntry]) -> Result<RealizedGains, EngineError> {
        let mut ordered: Vec<&LedgerEntry> = entries
            .iter()
            .filter(|e| e.kind.affects_cost_basis())
            .collect();
        ordered.sort_by_key(|e| e.date);

        let mut open_lots: HashMap<&str, VecDeque<Lot>> = HashMap::new();
        // BTreeMap so the per-symbol breakdown comes out sorted.
        let mut gains_by_symbol: BTreeMap<&str, f64> = BTreeMap::new();

        for entry in ordered {
            match entry.kind {
                EntryKind::Buy => {
                    open_lots.entry(&entry.symbol).or_default().push_back(Lot {
                        remaining_quantity: entry.quantity,
                        unit_cost: entry.unit_price,
                    });
                }
                EntryKind::Sell => {
                    let queue = open_lots.entry(&entry.symbol).or_default();
                    let mut to_match = entry.quantity;
                    let mut cost_basis = 0.0;

                    while to_match > f64::EPSILON {
                        let lot = match queue.front_mut() {
                            Some(lot) => lot,
                            None => break,
                        };
                        let consumed = to_match.min(lot.remaining_quantity);
                        cost_basis += consumed * lot.unit_cost;
                        lot.remaining_quantity -= consumed;
                        to_match -= consumed;
                        if lot.remaining_quantity <= f64::EPSILON {
                            queue.pop_front();
                        }
                    }

                    if to_match > f64::EPSILON && self.policy == OversellPolicy::Reject {
                        return Err(EngineError::OversoldPosition {
                            symbol: entry.symbol.clone(),
                            unmatched_quantity: to_match,
                        });
                    }
                    // ZeroCostBasis: any unmatched quantity simply adds
                    // nothing to cost_basis.

                    *gains_by_symbol.entry(&entry.symbol).or_insert(0.0) +=
                        entry.amount - cost_basis;
                }
                _ => {}
            }
        }

        let by_symbol: Vec<SymbolGains> = gains_by_symbol
            .into_iter()
            .map(|(symbol, realized)| SymbolGains {
                symbol: symbol.to_string(),
                realized,
            })
            .collect();

        Ok(RealizedGains {
            total: by_symbol.iter().map(|g| g.realized).sum(),
            by_symbol,
        })
    }
}

impl Default for CostBasisService {
    fn default() -> Self {
        Self::new()
    }
}
