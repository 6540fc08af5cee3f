pub mod analytics;
pub mod holding;
pub mod ledger;
pub mod quote;
