use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// Unified error type for the portfolio analytics engine.
/// Every fallible public operation returns `Result<T, EngineError>`.
///
/// Aggregation operations (value, gains, history, diversification, risk)
/// never fail because a single symbol's price is unavailable — those paths
/// degrade to fallback prices and report a warning instead. The variants
/// below are the failures that do propagate.
#[derive(Debug, Error)]
pub enum EngineError {
    // ── Store lookups ───────────────────────────────────────────────
    #[error("Portfolio {portfolio_id} not found or not owned by the requesting user")]
    NotFoundOrUnauthorized { portfolio_id: Uuid },

    #[error("Invalid date range {start}..{end}: {reason}")]
    InvalidDateRange {
        start: NaiveDate,
        end: NaiveDate,
        reason: String,
    },

    // ── Market data ─────────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api { provider: String, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("No price available for {symbol}")]
    PriceUnavailable { symbol: String },

    // ── Ledger ──────────────────────────────────────────────────────
    #[error("Sell of {symbol} exceeds recorded purchases by {unmatched_quantity} units")]
    OversoldPosition {
        symbol: String,
        unmatched_quantity: f64,
    },

    // ── Cache / payload plumbing ────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<reqwest::Error> for EngineError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs to prevent
        // API key leakage. reqwest errors often contain full URLs with secrets.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        EngineError::Network(sanitized)
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::Serialization(e.to_string())
    }
}
