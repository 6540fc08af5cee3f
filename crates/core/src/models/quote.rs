use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Where a quote's price came from.
///
/// Threaded through every valuation result so callers can tell
/// authoritative figures from estimated ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteOrigin {
    /// Fetched from the price provider during this computation
    Live,
    /// Served from the market data cache within its TTL
    Cached,
    /// Synthesized from a holding's last known price or acquisition cost
    /// because the provider was unavailable
    Fallback,
}

impl std::fmt::Display for QuoteOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteOrigin::Live => write!(f, "live"),
            QuoteOrigin::Cached => write!(f, "cached"),
            QuoteOrigin::Fallback => write!(f, "fallback"),
        }
    }
}

/// A priced symbol at a moment in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Ticker symbol, uppercased
    pub symbol: String,

    /// Price per unit (never negative)
    pub price: f64,

    /// When the price was observed
    pub as_of: DateTime<Utc>,

    /// Provenance of the price
    pub origin: QuoteOrigin,
}

impl Quote {
    /// A quote freshly obtained from a provider.
    pub fn live(symbol: impl Into<String>, price: f64) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            price,
            as_of: Utc::now(),
            origin: QuoteOrigin::Live,
        }
    }

    /// A quote synthesized locally when no provider price is available.
    pub fn fallback(symbol: impl Into<String>, price: f64) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            price,
            as_of: Utc::now(),
            origin: QuoteOrigin::Fallback,
        }
    }
}

/// One row of a historical price series (daily/weekly/monthly granularity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Sampling interval of a historical series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesInterval {
    Daily,
    Weekly,
    Monthly,
}

impl std::fmt::Display for SeriesInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesInterval::Daily => write!(f, "daily"),
            SeriesInterval::Weekly => write!(f, "weekly"),
            SeriesInterval::Monthly => write!(f, "monthly"),
        }
    }
}

/// How far back a historical series request reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesRange {
    OneMonth,
    ThreeMonths,
    OneYear,
    FiveYears,
    /// Everything the provider has
    Full,
}

impl SeriesRange {
    /// Earliest date included by this range, relative to `today`.
    /// `None` means unbounded (`Full`).
    #[must_use]
    pub fn cutoff(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            SeriesRange::OneMonth => months_back(today, 1),
            SeriesRange::ThreeMonths => months_back(today, 3),
            SeriesRange::OneYear => months_back(today, 12),
            SeriesRange::FiveYears => months_back(today, 60),
            SeriesRange::Full => None,
        }
    }
}

impl std::fmt::Display for SeriesRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesRange::OneMonth => write!(f, "1mo"),
            SeriesRange::ThreeMonths => write!(f, "3mo"),
            SeriesRange::OneYear => write!(f, "1yr"),
            SeriesRange::FiveYears => write!(f, "5yr"),
            SeriesRange::Full => write!(f, "full"),
        }
    }
}

/// `today` minus `months`, clamped to the last valid day of the target month
/// (Mar 31 − 1mo → Feb 28/29).
fn months_back(today: NaiveDate, months: u32) -> Option<NaiveDate> {
    let zero_based = today.month0() as i32 - months as i32;
    let year = today.year() + zero_based.div_euclid(12);
    let month = zero_based.rem_euclid(12) as u32 + 1;
    let mut day = today.day();
    loop {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
        if day == 1 {
            return None;
        }
        day -= 1;
    }
}
