// ═══════════════════════════════════════════════════════════════════
// Error Tests — EngineError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use uuid::Uuid;

use portfolio_analytics_core::errors::EngineError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn not_found_or_unauthorized() {
        let id = Uuid::nil();
        let err = EngineError::NotFoundOrUnauthorized { portfolio_id: id };
        assert_eq!(
            err.to_string(),
            format!("Portfolio {id} not found or not owned by the requesting user")
        );
    }

    #[test]
    fn invalid_date_range() {
        let err = EngineError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            reason: "start date is after end date".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid date range 2023-02-01..2023-01-01: start date is after end date"
        );
    }

    #[test]
    fn api_error() {
        let err = EngineError::Api {
            provider: "Alpha Vantage".into(),
            message: "rate limit exceeded".into(),
        };
        assert_eq!(err.to_string(), "API error (Alpha Vantage): rate limit exceeded");
    }

    #[test]
    fn network_error() {
        let err = EngineError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn price_unavailable() {
        let err = EngineError::PriceUnavailable {
            symbol: "AAPL".into(),
        };
        assert_eq!(err.to_string(), "No price available for AAPL");
    }

    #[test]
    fn oversold_position() {
        let err = EngineError::OversoldPosition {
            symbol: "AAPL".into(),
            unmatched_quantity: 3.0,
        };
        assert_eq!(
            err.to_string(),
            "Sell of AAPL exceeds recorded purchases by 3 units"
        );
    }

    #[test]
    fn serialization() {
        let err = EngineError::Serialization("unexpected EOF".into());
        assert_eq!(err.to_string(), "Serialization error: unexpected EOF");
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn serde_json_errors_become_serialization() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: EngineError = json_err.into();
        assert!(matches!(err, EngineError::Serialization(_)));
    }

    #[test]
    fn errors_are_debug_and_display() {
        // Every variant goes through thiserror; spot-check the traits hold
        let err = EngineError::Network("boom".into());
        let _ = format!("{err} / {err:?}");
    }
}
