//! Storage contract consumed by the aggregator and advisor
//!
//! Analysis code never talks to SQLite directly. It is handed a
//! [`FinanceStore`] so the bundled [`Database`](crate::db::Database) can be
//! swapped for an in-memory fake in tests.

use crate::analysis::MonthlySummary;
use crate::error::Result;
use crate::models::{DateRange, Transaction};

/// Read access to a user's transactions
pub trait FinanceStore {
    /// Transactions of `user_id`, newest first.
    ///
    /// With a range, both bounds are inclusive. Without one, every
    /// transaction of the user is returned.
    fn get_transactions(&self, user_id: i64, range: Option<DateRange>) -> Result<Vec<Transaction>>;

    /// Totals for one calendar month
    fn get_monthly_summary(&self, user_id: i64, year: i32, month: u32) -> Result<MonthlySummary> {
        let range = DateRange::month(year, month)?;
        let transactions = self.get_transactions(user_id, Some(range))?;
        Ok(MonthlySummary::from_transactions(&transactions))
    }
}

impl<T: FinanceStore + ?Sized> FinanceStore for &T {
    fn get_transactions(&self, user_id: i64, range: Option<DateRange>) -> Result<Vec<Transaction>> {
        (**self).get_transactions(user_id, range)
    }

    fn get_monthly_summary(&self, user_id: i64, year: i32, month: u32) -> Result<MonthlySummary> {
        (**self).get_monthly_summary(user_id, year, month)
    }
}
