//! Aggregator - category breakdowns, monthly summaries and trends
//!
//! Pure transformation of the transactions a [`FinanceStore`] hands back.
//! Storage failures propagate to the caller.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::DateRange;
use crate::store::FinanceStore;

use super::types::{CategoryBreakdown, CategoryTotal, Forecast, MonthlySummary, PeriodTotals, TrendPoint};

/// Months averaged by [`Aggregator::predict_next_month`]
pub const FORECAST_MONTHS: u32 = 3;

/// Longest trend series [`Aggregator::monthly_trends`] will build (100 years)
pub const MAX_TREND_MONTHS: u32 = 1200;

/// Summaries over one user's transactions
pub struct Aggregator<'a, S: FinanceStore + ?Sized> {
    store: &'a S,
    user_id: i64,
    today: NaiveDate,
}

impl<'a, S: FinanceStore + ?Sized> Aggregator<'a, S> {
    pub fn new(store: &'a S, user_id: i64) -> Self {
        Self {
            store,
            user_id,
            today: chrono::Local::now().date_naive(),
        }
    }

    /// Pin "today" (trends and forecasts are relative to it)
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Per-category sums for transactions dated within `[start, end]`
    pub fn category_breakdown(&self, start: NaiveDate, end: NaiveDate) -> Result<CategoryBreakdown> {
        let transactions = self
            .store
            .get_transactions(self.user_id, Some(DateRange::new(start, end)))?;
        let breakdown = CategoryBreakdown::from_transactions(&transactions);

        debug!(
            user_id = self.user_id,
            %start,
            %end,
            income_categories = breakdown.income.len(),
            expense_categories = breakdown.expenses.len(),
            "Computed category breakdown"
        );
        Ok(breakdown)
    }

    /// Totals for one calendar month
    pub fn monthly_summary(&self, year: i32, month: u32) -> Result<MonthlySummary> {
        self.store.get_monthly_summary(self.user_id, year, month)
    }

    /// One point per calendar month, ending with the current month, oldest first
    pub fn monthly_trends(&self, n_months: u32) -> Result<Vec<TrendPoint>> {
        if n_months > MAX_TREND_MONTHS {
            return Err(Error::InvalidData(format!(
                "Trend window of {} months exceeds the maximum of {}",
                n_months, MAX_TREND_MONTHS
            )));
        }

        let mut points = Vec::with_capacity(n_months as usize);

        for back in (0..n_months).rev() {
            let (year, month) = months_before(self.today, back).ok_or_else(|| {
                Error::InvalidData(format!("{} months before {} is out of range", back, self.today))
            })?;
            let summary = self.monthly_summary(year, month)?;
            points.push(TrendPoint::new(year, month, summary));
        }

        debug!(user_id = self.user_id, months = points.len(), "Computed monthly trends");
        Ok(points)
    }

    /// Moving-average projection over the last [`FORECAST_MONTHS`] months.
    ///
    /// `None` means there is not enough history yet.
    pub fn predict_next_month(&self) -> Result<Option<Forecast>> {
        let trends = self.monthly_trends(FORECAST_MONTHS)?;
        Ok(Forecast::from_trend(&trends))
    }

    /// Income, expenses and balance for `[start, end]`
    pub fn period_totals(&self, start: NaiveDate, end: NaiveDate) -> Result<PeriodTotals> {
        let breakdown = self.category_breakdown(start, end)?;
        let income = breakdown.income_total();
        let expenses = breakdown.expense_total();

        Ok(PeriodTotals {
            income,
            expenses,
            balance: income - expenses,
        })
    }

    /// Largest expense categories in `[start, end]`
    pub fn top_expense_categories(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        limit: usize,
    ) -> Result<Vec<CategoryTotal>> {
        let mut expenses = self.category_breakdown(start, end)?.expenses;
        expenses.truncate(limit);
        Ok(expenses)
    }
}

/// Calendar (year, month) that lies `back` months before `today`'s month
pub(crate) fn months_before(today: NaiveDate, back: u32) -> Option<(i32, u32)> {
    let index = i64::from(today.year()) * 12 + i64::from(today.month0()) - i64::from(back);
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    // Beyond chrono's representable years
    NaiveDate::from_ymd_opt(year, 1, 1)?;
    Some((year, index.rem_euclid(12) as u32 + 1))
}
