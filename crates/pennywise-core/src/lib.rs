//! Pennywise Core Library
//!
//! Shared functionality for the Pennywise personal finance tracker:
//! - Database access and migrations (users, categories, transactions,
//!   templates, goals)
//! - A storage contract the analysis code is written against
//! - Aggregation: category breakdowns, monthly summaries, trends, forecast
//! - Rule-based spending and savings advice
//! - Advisor threshold configuration

pub mod analysis;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod store;

/// Test utilities including an in-memory store
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use analysis::{
    AdviceOutcome, AdviceTopic, Advisor, Aggregator, CategoryBreakdown, CategoryTotal, Forecast,
    MonthlySummary, PeriodTotals, TrendPoint,
};
pub use config::AdvisorConfig;
pub use db::Database;
pub use error::{Error, Result};
pub use store::FinanceStore;
