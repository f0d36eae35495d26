//! Analysis - aggregation and advice over a user's transactions
//!
//! ## Components
//!
//! - **Aggregator** - Category breakdowns, monthly summaries, trends and a
//!   naive next-month forecast
//! - **Advisor** - Rule-based spending and savings advice
//!
//! Both borrow a [`FinanceStore`](crate::store::FinanceStore) and hold no
//! state between calls.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pennywise_core::analysis::{Advisor, Aggregator};
//!
//! let trends = Aggregator::new(&db, user_id).monthly_trends(6)?;
//! let advice = Advisor::new(&db, user_id).spending_advice().into_messages();
//! ```

pub mod advisor;
pub mod aggregator;
pub mod format;
pub mod types;

pub use advisor::{AdviceOutcome, AdviceTopic, Advisor};
pub use aggregator::{Aggregator, FORECAST_MONTHS, MAX_TREND_MONTHS};
pub use format::{format_currency, format_percentage};
pub use types::{
    CategoryBreakdown, CategoryTotal, Forecast, MonthlySummary, PeriodTotals, TrendPoint,
};
