// ═══════════════════════════════════════════════════════════════════
// Model Tests — asset types, holdings, ledger entries, quotes,
// series intervals/ranges, risk buckets
// ═══════════════════════════════════════════════════════════════════

use chrono::{NaiveDate, TimeZone, Utc};

use portfolio_analytics_core::models::analytics::RiskLevel;
use portfolio_analytics_core::models::holding::{AssetType, Holding};
use portfolio_analytics_core::models::ledger::{EntryKind, LedgerEntry};
use portfolio_analytics_core::models::quote::{
    Quote, QuoteOrigin, SeriesInterval, SeriesRange,
};

fn make_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Asset types ─────────────────────────────────────────────────────

mod asset_types {
    use super::*;

    #[test]
    fn display_labels_match_ledger_vocabulary() {
        assert_eq!(AssetType::Stock.to_string(), "Stock");
        assert_eq!(AssetType::Crypto.to_string(), "Crypto");
        assert_eq!(AssetType::Bond.to_string(), "Bond");
        assert_eq!(AssetType::MutualFund.to_string(), "Mutual Fund");
        assert_eq!(AssetType::Etf.to_string(), "ETF");
        assert_eq!(AssetType::Other.to_string(), "Other");
    }

    #[test]
    fn risk_weight_table() {
        assert_eq!(AssetType::Stock.risk_weight(), 0.7);
        assert_eq!(AssetType::Crypto.risk_weight(), 0.9);
        assert_eq!(AssetType::Bond.risk_weight(), 0.2);
        assert_eq!(AssetType::MutualFund.risk_weight(), 0.4);
        assert_eq!(AssetType::Etf.risk_weight(), 0.5);
        assert_eq!(AssetType::Other.risk_weight(), 0.6);
    }
}

// ── Holdings ────────────────────────────────────────────────────────

mod holdings {
    use super::*;

    #[test]
    fn constructor_uppercases_symbol() {
        let h = Holding::new("aapl", "Apple Inc.", 10.0, 150.0, make_date(2023, 6, 1), AssetType::Stock);
        assert_eq!(h.symbol, "AAPL");
        assert_eq!(h.name, "Apple Inc.");
        assert!(h.last_known_price.is_none());
    }

    #[test]
    fn last_known_price_builder() {
        let h = Holding::new("BTC", "Bitcoin", 1.0, 30_000.0, make_date(2023, 6, 1), AssetType::Crypto)
            .with_last_known_price(42_000.0);
        assert_eq!(h.last_known_price, Some(42_000.0));
    }

    #[test]
    fn ids_are_unique() {
        let a = Holding::new("AAPL", "Apple", 1.0, 1.0, make_date(2023, 6, 1), AssetType::Stock);
        let b = Holding::new("AAPL", "Apple", 1.0, 1.0, make_date(2023, 6, 1), AssetType::Stock);
        assert_ne!(a.id, b.id);
    }
}

// ── Ledger entries ──────────────────────────────────────────────────

mod ledger_entries {
    use super::*;

    #[test]
    fn buy_defaults_amount_to_quantity_times_price() {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let entry = LedgerEntry::buy("aapl", 10.0, 15.0, date);

        assert_eq!(entry.symbol, "AAPL");
        assert_eq!(entry.kind, EntryKind::Buy);
        assert!((entry.amount - 150.0).abs() < 1e-9);
    }

    #[test]
    fn amount_can_be_overridden() {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let entry = LedgerEntry::sell("AAPL", 10.0, 15.0, date).with_amount(148.5);

        assert!((entry.amount - 148.5).abs() < 1e-9);
    }

    #[test]
    fn only_buy_and_sell_affect_cost_basis() {
        assert!(EntryKind::Buy.affects_cost_basis());
        assert!(EntryKind::Sell.affects_cost_basis());
        assert!(!EntryKind::Deposit.affects_cost_basis());
        assert!(!EntryKind::Withdrawal.affects_cost_basis());
        assert!(!EntryKind::Dividend.affects_cost_basis());
    }

    #[test]
    fn kind_display_labels() {
        assert_eq!(EntryKind::Buy.to_string(), "Buy");
        assert_eq!(EntryKind::Withdrawal.to_string(), "Withdrawal");
    }
}

// ── Quotes ──────────────────────────────────────────────────────────

mod quotes {
    use super::*;

    #[test]
    fn live_quote_is_tagged_live_and_uppercased() {
        let q = Quote::live("aapl", 187.5);
        assert_eq!(q.symbol, "AAPL");
        assert_eq!(q.origin, QuoteOrigin::Live);
        assert_eq!(q.price, 187.5);
    }

    #[test]
    fn fallback_quote_is_tagged_fallback() {
        let q = Quote::fallback("AAPL", 42.0);
        assert_eq!(q.origin, QuoteOrigin::Fallback);
    }

    #[test]
    fn origin_display_tokens() {
        assert_eq!(QuoteOrigin::Live.to_string(), "live");
        assert_eq!(QuoteOrigin::Cached.to_string(), "cached");
        assert_eq!(QuoteOrigin::Fallback.to_string(), "fallback");
    }
}

// ── Series intervals & ranges ───────────────────────────────────────

mod series {
    use super::*;

    #[test]
    fn interval_tokens() {
        assert_eq!(SeriesInterval::Daily.to_string(), "daily");
        assert_eq!(SeriesInterval::Weekly.to_string(), "weekly");
        assert_eq!(SeriesInterval::Monthly.to_string(), "monthly");
    }

    #[test]
    fn range_tokens() {
        assert_eq!(SeriesRange::OneMonth.to_string(), "1mo");
        assert_eq!(SeriesRange::ThreeMonths.to_string(), "3mo");
        assert_eq!(SeriesRange::OneYear.to_string(), "1yr");
        assert_eq!(SeriesRange::FiveYears.to_string(), "5yr");
        assert_eq!(SeriesRange::Full.to_string(), "full");
    }

    #[test]
    fn cutoffs_step_back_from_today() {
        let today = make_date(2023, 7, 15);
        assert_eq!(SeriesRange::OneMonth.cutoff(today), Some(make_date(2023, 6, 15)));
        assert_eq!(SeriesRange::ThreeMonths.cutoff(today), Some(make_date(2023, 4, 15)));
        assert_eq!(SeriesRange::OneYear.cutoff(today), Some(make_date(2022, 7, 15)));
        assert_eq!(SeriesRange::FiveYears.cutoff(today), Some(make_date(2018, 7, 15)));
    }

    #[test]
    fn full_range_has_no_cutoff() {
        assert_eq!(SeriesRange::Full.cutoff(make_date(2023, 7, 15)), None);
    }

    #[test]
    fn month_arithmetic_clamps_to_last_valid_day() {
        // Mar 31 − 1 month → Feb 28 (non-leap year)
        assert_eq!(
            SeriesRange::OneMonth.cutoff(make_date(2023, 3, 31)),
            Some(make_date(2023, 2, 28))
        );
        // Mar 31 − 1 month → Feb 29 (leap year)
        assert_eq!(
            SeriesRange::OneMonth.cutoff(make_date(2024, 3, 31)),
            Some(make_date(2024, 2, 29))
        );
        // Year boundary: Jan 15 − 1 month → Dec 15 of previous year
        assert_eq!(
            SeriesRange::OneMonth.cutoff(make_date(2023, 1, 15)),
            Some(make_date(2022, 12, 15))
        );
    }
}

// ── Risk buckets ────────────────────────────────────────────────────

mod risk_buckets {
    use super::*;

    #[test]
    fn bucket_boundaries() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.29), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.3), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.59), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.6), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(0.9), RiskLevel::High);
    }

    #[test]
    fn display_labels() {
        assert_eq!(RiskLevel::Low.to_string(), "Low");
        assert_eq!(RiskLevel::Medium.to_string(), "Medium");
        assert_eq!(RiskLevel::High.to_string(), "High");
    }
}
