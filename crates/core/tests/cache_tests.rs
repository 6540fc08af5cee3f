// ═══════════════════════════════════════════════════════════════════
// Cache Tests — MarketDataCache TTL behavior, key builders,
// disabled pass-through mode
// ═══════════════════════════════════════════════════════════════════

use std::time::Duration;

use portfolio_analytics_core::cache::{
    historical_key, realtime_key, MarketDataCache, HISTORICAL_SERIES_TTL, REALTIME_QUOTE_TTL,
};
use portfolio_analytics_core::models::quote::{SeriesInterval, SeriesRange};

const TTL: Duration = Duration::from_secs(60);

// ── Basic operations ────────────────────────────────────────────────

#[tokio::test]
async fn set_then_get_returns_value() {
    let cache = MarketDataCache::new();

    assert!(cache.get("realtime:AAPL").await.is_none());

    cache.set("realtime:AAPL", "187.5", TTL).await;
    assert_eq!(cache.get("realtime:AAPL").await.as_deref(), Some("187.5"));
}

#[tokio::test]
async fn overwrite_is_last_writer_wins() {
    let cache = MarketDataCache::new();

    cache.set("realtime:AAPL", "187.5", TTL).await;
    cache.set("realtime:AAPL", "190.0", TTL).await;

    assert_eq!(cache.get("realtime:AAPL").await.as_deref(), Some("190.0"));
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn delete_removes_entry() {
    let cache = MarketDataCache::new();

    cache.set("realtime:AAPL", "187.5", TTL).await;
    cache.delete("realtime:AAPL").await;

    assert!(cache.get("realtime:AAPL").await.is_none());
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn clear_removes_everything() {
    let cache = MarketDataCache::new();

    cache.set("a", "1", TTL).await;
    cache.set("b", "2", TTL).await;
    assert_eq!(cache.len().await, 2);

    cache.clear().await;
    assert!(cache.is_empty().await);
}

// ── TTL expiry ──────────────────────────────────────────────────────

#[tokio::test]
async fn entry_expires_after_ttl() {
    let cache = MarketDataCache::new();

    cache.set("realtime:AAPL", "187.5", Duration::from_millis(50)).await;
    assert!(cache.get("realtime:AAPL").await.is_some());

    tokio::time::sleep(Duration::from_millis(80)).await;
    assert!(cache.get("realtime:AAPL").await.is_none());
}

#[tokio::test]
async fn entries_carry_independent_ttls() {
    let cache = MarketDataCache::new();

    cache.set("short", "x", Duration::from_millis(50)).await;
    cache.set("long", "y", TTL).await;

    tokio::time::sleep(Duration::from_millis(80)).await;

    assert!(cache.get("short").await.is_none());
    assert_eq!(cache.get("long").await.as_deref(), Some("y"));
}

#[tokio::test]
async fn expired_entries_linger_until_purged() {
    let cache = MarketDataCache::new();

    cache.set("a", "1", Duration::from_millis(30)).await;
    cache.set("b", "2", TTL).await;

    tokio::time::sleep(Duration::from_millis(60)).await;

    // Dead entry still counted until purge
    assert_eq!(cache.len().await, 2);

    cache.purge_expired().await;
    assert_eq!(cache.len().await, 1);
    assert_eq!(cache.get("b").await.as_deref(), Some("2"));
}

#[tokio::test]
async fn rewriting_an_expired_key_revives_it() {
    let cache = MarketDataCache::new();

    cache.set("realtime:AAPL", "old", Duration::from_millis(30)).await;
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(cache.get("realtime:AAPL").await.is_none());

    cache.set("realtime:AAPL", "new", TTL).await;
    assert_eq!(cache.get("realtime:AAPL").await.as_deref(), Some("new"));
}

// ── Disabled pass-through mode ──────────────────────────────────────

#[tokio::test]
async fn disabled_cache_always_misses() {
    let cache = MarketDataCache::disabled();
    assert!(cache.is_disabled().await);

    cache.set("realtime:AAPL", "187.5", TTL).await;

    // Set was a no-op; get reports absent like any cold cache
    assert!(cache.get("realtime:AAPL").await.is_none());
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn enabled_cache_is_not_disabled() {
    let cache = MarketDataCache::new();
    assert!(!cache.is_disabled().await);
}

// ── Concurrency ─────────────────────────────────────────────────────

#[tokio::test]
async fn concurrent_writers_and_readers_settle() {
    let cache = MarketDataCache::new();

    let mut tasks = Vec::new();
    for i in 0..16 {
        let handle = cache.clone();
        tasks.push(tokio::spawn(async move {
            let key = format!("realtime:SYM{}", i % 4);
            handle.set(key.clone(), i.to_string(), TTL).await;
            handle.get(&key).await
        }));
    }
    for task in tasks {
        // Every read sees some writer's value for its key
        assert!(task.await.unwrap().is_some());
    }

    // 4 distinct keys survive, each holding the last write that won
    assert_eq!(cache.len().await, 4);
}

// ── Key builders & TTL constants ────────────────────────────────────

#[test]
fn realtime_key_is_namespaced_and_uppercased() {
    assert_eq!(realtime_key("aapl"), "realtime:AAPL");
}

#[test]
fn historical_key_carries_interval_and_range() {
    assert_eq!(
        historical_key("msft", SeriesInterval::Daily, SeriesRange::OneMonth),
        "historical:MSFT:daily:1mo"
    );
    assert_eq!(
        historical_key("BTC", SeriesInterval::Monthly, SeriesRange::Full),
        "historical:BTC:monthly:full"
    );
}

#[test]
fn historical_ttl_is_six_times_realtime() {
    assert_eq!(REALTIME_QUOTE_TTL, Duration::from_secs(300));
    assert_eq!(HISTORICAL_SERIES_TTL, REALTIME_QUOTE_TTL * 6);
}
