//! Advisor - rule-based spending and savings advice
//!
//! Advice feeds straight into a user-facing list, so nothing here returns an
//! error. A failed storage read becomes [`AdviceOutcome::Unavailable`], which
//! still renders as a generic "add more data" message.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::AdvisorConfig;
use crate::error::{Error, Result};
use crate::models::{DateRange, Kind, Transaction};
use crate::store::FinanceStore;

use super::types::CategoryBreakdown;

pub const NO_EXPENSES: &str = "You had no expenses last month. Great!";
pub const STABLE_SPENDING: &str = "Your spending looks stable. Keep it up!";
pub const SET_INCOME: &str = "Set your monthly income in settings to get savings advice.";

/// What a piece of advice is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceTopic {
    Spending,
    Savings,
}

impl AdviceTopic {
    /// Message shown in place of advice when the analysis could not run
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::Spending => "Could not analyze your spending. Add more data about your transactions.",
            Self::Savings => "Could not analyze your savings. Add your income and expense data.",
        }
    }
}

/// Result of an advice request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AdviceOutcome {
    /// Analysis ran; always at least one message
    Advice { messages: Vec<String> },
    /// Analysis could not run (storage failure)
    Unavailable { topic: AdviceTopic, reason: String },
}

impl AdviceOutcome {
    fn single(message: impl Into<String>) -> Self {
        Self::Advice {
            messages: vec![message.into()],
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Advice { .. })
    }

    /// Messages to display, substituting the topic's fallback when unavailable
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Advice { messages } => messages.clone(),
            Self::Unavailable { topic, .. } => vec![topic.fallback_message().to_string()],
        }
    }

    pub fn into_messages(self) -> Vec<String> {
        match self {
            Self::Advice { messages } => messages,
            Self::Unavailable { topic, .. } => vec![topic.fallback_message().to_string()],
        }
    }
}

/// Heuristic advice for one user
pub struct Advisor<'a, S: FinanceStore + ?Sized> {
    store: &'a S,
    user_id: i64,
    config: AdvisorConfig,
    today: NaiveDate,
}

impl<'a, S: FinanceStore + ?Sized> Advisor<'a, S> {
    pub fn new(store: &'a S, user_id: i64) -> Self {
        Self {
            store,
            user_id,
            config: AdvisorConfig::default(),
            today: chrono::Local::now().date_naive(),
        }
    }

    pub fn with_config(mut self, config: AdvisorConfig) -> Self {
        self.config = config;
        self
    }

    /// Pin "today" (the spending windows are relative to it)
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Advice on the trailing spending window
    pub fn spending_advice(&self) -> AdviceOutcome {
        self.degrade(AdviceTopic::Spending, self.try_spending_advice())
    }

    /// Advice on the savings rate relative to the declared monthly income
    pub fn savings_advice(&self, monthly_income: f64) -> AdviceOutcome {
        if !monthly_income.is_finite() || monthly_income <= 0.0 {
            return AdviceOutcome::single(SET_INCOME);
        }
        self.degrade(AdviceTopic::Savings, self.try_savings_advice(monthly_income))
    }

    /// Spending advice followed by savings advice, as one feed
    pub fn advice_feed(&self, monthly_income: f64) -> Vec<String> {
        let mut feed = self.spending_advice().into_messages();
        feed.extend(self.savings_advice(monthly_income).into_messages());
        feed
    }

    fn degrade(&self, topic: AdviceTopic, result: Result<Vec<String>>) -> AdviceOutcome {
        match result {
            Ok(messages) => AdviceOutcome::Advice { messages },
            Err(e) => {
                warn!(
                    user_id = self.user_id,
                    topic = ?topic,
                    error = %e,
                    "Advice analysis failed"
                );
                AdviceOutcome::Unavailable {
                    topic,
                    reason: e.to_string(),
                }
            }
        }
    }

    fn try_spending_advice(&self) -> Result<Vec<String>> {
        let current = window_ending(self.today, self.config.window_days)?;

        let transactions = self.store.get_transactions(self.user_id, Some(current))?;
        let breakdown = CategoryBreakdown::from_transactions(&transactions);
        if breakdown.expenses.is_empty() {
            return Ok(vec![NO_EXPENSES.to_string()]);
        }

        let mut advice = Vec::new();
        let total = breakdown.expense_total();

        if let Some(top) = breakdown.largest_expense() {
            let share = top.amount / total * 100.0;
            if share > self.config.dominant_share_percent {
                advice.push(format!(
                    "You spend {:.1}% of your budget on {}. Consider cutting back on it.",
                    share, top.name
                ));
            }
        }

        // The prior window ends the day before the current one starts
        let prior_end = current
            .start
            .pred_opt()
            .ok_or_else(|| Error::InvalidData(format!("No day before {}", current.start)))?;
        let prior = window_ending(prior_end, self.config.window_days)?;
        let prior_total = expense_total(&self.store.get_transactions(self.user_id, Some(prior))?);

        if prior_total > 0.0 {
            let change = (total - prior_total) / prior_total * 100.0;
            debug!(user_id = self.user_id, total, prior_total, change, "Spending change");

            if change > self.config.change_alert_percent {
                advice.push(format!(
                    "Your expenses rose by {:.1}% compared to the previous month.",
                    change
                ));
            } else if change < -self.config.change_alert_percent {
                advice.push(format!(
                    "Your expenses fell by {:.1}% compared to the previous month. Great!",
                    change.abs()
                ));
            }
        }

        if advice.is_empty() {
            advice.push(STABLE_SPENDING.to_string());
        }
        Ok(advice)
    }

    fn try_savings_advice(&self, monthly_income: f64) -> Result<Vec<String>> {
        let transactions = self.store.get_transactions(self.user_id, None)?;
        let breakdown = CategoryBreakdown::from_transactions(&transactions);

        let total_savings = breakdown.income_total() - breakdown.expense_total();
        // Normalized against the declared monthly income, not total income
        let rate = total_savings / monthly_income * 100.0;
        debug!(user_id = self.user_id, total_savings, rate, "Savings rate");

        let message = if rate < self.config.min_savings_rate_percent {
            format!(
                "It is recommended to save at least {}% of your income. You are currently at {:.1}%.",
                self.config.min_savings_rate_percent, rate
            )
        } else if rate > self.config.high_savings_rate_percent {
            format!("Excellent savings rate! {:.1}% is above average.", rate)
        } else {
            format!(
                "Your savings rate of {:.1}% is within the recommended range.",
                rate
            )
        };

        Ok(vec![message])
    }
}

/// `[end - days, end]`, or an error when the start falls outside the calendar
fn window_ending(end: NaiveDate, days: i64) -> Result<DateRange> {
    let start = Duration::try_days(days)
        .and_then(|window| end.checked_sub_signed(window))
        .ok_or_else(|| {
            Error::InvalidData(format!("A {}-day window before {} is out of range", days, end))
        })?;
    Ok(DateRange::new(start, end))
}

fn expense_total(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|t| !t.is_template && t.kind == Kind::Expense)
        .map(|t| t.amount)
        .sum()
}
