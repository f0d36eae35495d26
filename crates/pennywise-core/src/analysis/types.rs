//! Derived (never persisted) analysis results

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::models::{Kind, Transaction};

/// Totals for one (user, year, month)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub income: f64,
    pub expenses: f64,
    /// income - expenses
    pub balance: f64,
    /// Posted transactions of either kind
    pub transaction_count: i64,
}

impl MonthlySummary {
    /// Sum posted transactions by kind. Templates are skipped.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut summary = Self::default();

        for tx in transactions.iter().filter(|t| !t.is_template) {
            match tx.kind {
                Kind::Income => summary.income += tx.amount,
                Kind::Expense => summary.expenses += tx.amount,
            }
            summary.transaction_count += 1;
        }

        summary.balance = summary.income - summary.expenses;
        summary
    }
}

/// Sum of one category within a breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category_id: i64,
    pub name: String,
    pub color: Option<String>,
    pub amount: f64,
    pub transaction_count: i64,
    /// Share of the bucket total, 0-100
    pub percentage: f64,
}

/// Per-category sums over a date range, split by kind
///
/// Each list is ordered by amount (largest first); equal amounts are
/// ordered by category id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub income: Vec<CategoryTotal>,
    pub expenses: Vec<CategoryTotal>,
}

impl CategoryBreakdown {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let posted: Vec<&Transaction> = transactions.iter().filter(|t| !t.is_template).collect();

        Self {
            income: group_by_category(posted.iter().copied().filter(|t| t.kind == Kind::Income)),
            expenses: group_by_category(
                posted.iter().copied().filter(|t| t.kind == Kind::Expense),
            ),
        }
    }

    pub fn income_total(&self) -> f64 {
        self.income.iter().map(|c| c.amount).sum()
    }

    pub fn expense_total(&self) -> f64 {
        self.expenses.iter().map(|c| c.amount).sum()
    }

    /// Category with the highest expense sum (lowest id wins a tie)
    pub fn largest_expense(&self) -> Option<&CategoryTotal> {
        self.expenses.first()
    }

    /// Income sums keyed by display name; same-named categories are merged
    pub fn income_by_name(&self) -> BTreeMap<String, f64> {
        by_name(&self.income)
    }

    /// Expense sums keyed by display name; same-named categories are merged
    pub fn expenses_by_name(&self) -> BTreeMap<String, f64> {
        by_name(&self.expenses)
    }

    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.expenses.is_empty()
    }
}

fn group_by_category<'a>(transactions: impl Iterator<Item = &'a Transaction>) -> Vec<CategoryTotal> {
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for tx in transactions {
        let slot = *index.entry(tx.category_id).or_insert_with(|| {
            totals.push(CategoryTotal {
                category_id: tx.category_id,
                name: tx.category_name.clone(),
                color: tx.category_color.clone(),
                amount: 0.0,
                transaction_count: 0,
                percentage: 0.0,
            });
            totals.len() - 1
        });
        totals[slot].amount += tx.amount;
        totals[slot].transaction_count += 1;
    }

    let total: f64 = totals.iter().map(|c| c.amount).sum();
    for cat in &mut totals {
        cat.percentage = if total > 0.0 {
            cat.amount / total * 100.0
        } else {
            0.0
        };
    }

    totals.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.category_id.cmp(&b.category_id))
    });
    totals
}

fn by_name(totals: &[CategoryTotal]) -> BTreeMap<String, f64> {
    let mut map = BTreeMap::new();
    for cat in totals {
        *map.entry(cat.name.clone()).or_insert(0.0) += cat.amount;
    }
    map
}

/// One month of a trend series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// `YYYY-MM`
    pub month: String,
    pub year: i32,
    pub month_number: u32,
    #[serde(flatten)]
    pub summary: MonthlySummary,
}

impl TrendPoint {
    pub fn new(year: i32, month: u32, summary: MonthlySummary) -> Self {
        Self {
            month: format!("{:04}-{:02}", year, month),
            year,
            month_number: month,
            summary,
        }
    }

    /// Whether any posted transaction fell in this month
    pub fn has_activity(&self) -> bool {
        self.summary.transaction_count > 0
    }
}

/// Naive moving-average projection of next month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub predicted_income: f64,
    pub predicted_expenses: f64,
    pub predicted_balance: f64,
    /// Number of months averaged
    pub based_on_months: usize,
}

impl Forecast {
    /// Average income and expenses across `points`.
    ///
    /// Returns `None` for fewer than two points. Empty months still count
    /// toward the mean.
    pub fn from_trend(points: &[TrendPoint]) -> Option<Self> {
        const MIN_POINTS: usize = 2;

        if points.len() < MIN_POINTS {
            return None;
        }

        let n = points.len() as f64;
        let predicted_income = points.iter().map(|p| p.summary.income).sum::<f64>() / n;
        let predicted_expenses = points.iter().map(|p| p.summary.expenses).sum::<f64>() / n;

        Some(Self {
            predicted_income,
            predicted_expenses,
            predicted_balance: predicted_income - predicted_expenses,
            based_on_months: points.len(),
        })
    }
}

/// Income, expenses and balance over an arbitrary range
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodTotals {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}
