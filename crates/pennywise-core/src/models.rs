//! Domain models for Pennywise

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Income/expense polarity of a transaction or category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Income,
    Expense,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" | "expenses" => Ok(Self::Expense),
            _ => Err(format!("Unknown kind: {}", s)),
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user of the tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    /// Declared monthly income, used as the savings-rate denominator
    pub monthly_income: f64,
    pub created_at: DateTime<Utc>,
}

/// A transaction category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub kind: Kind,
    /// Display color (presentation only)
    pub color: Option<String>,
    /// Owning user; `None` for system defaults
    pub user_id: Option<i64>,
}

/// A transaction as returned by the store, joined with its category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    /// Always positive; polarity comes from `kind`
    pub amount: f64,
    pub category_id: i64,
    pub category_name: String,
    pub category_color: Option<String>,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub kind: Kind,
    /// Recurring template rather than a posted transaction
    pub is_template: bool,
}

/// A new transaction to be recorded (before DB insertion)
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: f64,
    pub category_id: i64,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub kind: Kind,
    pub is_template: bool,
}

impl NewTransaction {
    pub fn new(kind: Kind, amount: f64, category_id: i64, date: NaiveDate) -> Self {
        Self {
            amount,
            category_id,
            date,
            description: None,
            kind,
            is_template: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A saved template for quickly recording a recurring transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub amount: f64,
    pub category_id: i64,
    pub category_name: String,
    pub kind: Kind,
}

#[derive(Debug, Clone)]
pub struct NewTemplate {
    pub name: String,
    pub amount: f64,
    pub category_id: i64,
    pub kind: Kind,
}

/// A savings goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: f64,
    pub deadline: Option<NaiveDate>,
}

/// Progress of a goal as of a given day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub percent: f64,
    pub remaining: f64,
    /// Days until the deadline; negative once it has passed
    pub days_left: Option<i64>,
    pub completed: bool,
}

impl Goal {
    pub fn progress(&self, today: NaiveDate) -> GoalProgress {
        let percent = if self.target_amount > 0.0 {
            self.current_amount / self.target_amount * 100.0
        } else {
            0.0
        };

        GoalProgress {
            percent,
            remaining: (self.target_amount - self.current_amount).max(0.0),
            days_left: self.deadline.map(|d| (d - today).num_days()),
            completed: self.current_amount >= self.target_amount,
        }
    }
}

/// Inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// All days of one calendar month
    pub fn month(year: i32, month: u32) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| Error::InvalidData(format!("Invalid month: {}-{}", year, month)))?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(|| Error::InvalidData(format!("Invalid month: {}-{}", year, month)))?;

        // Half-open [start, next) expressed as an inclusive range
        let end = next
            .pred_opt()
            .ok_or_else(|| Error::InvalidData(format!("Invalid month: {}-{}", year, month)))?;
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Predefined analysis periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Period {
    Last30Days,
    Last90Days,
    ThisYear,
    AllTime,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Last30Days => "last-30-days",
            Self::Last90Days => "last-90-days",
            Self::ThisYear => "this-year",
            Self::AllTime => "all",
        }
    }

    /// Resolve to a concrete range ending on `today`
    pub fn range(&self, today: NaiveDate) -> DateRange {
        let start = match self {
            Self::Last30Days => today - chrono::Duration::days(30),
            Self::Last90Days => today - chrono::Duration::days(90),
            Self::ThisYear => NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
            Self::AllTime => NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(today),
        };
        DateRange::new(start, today)
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "last-30-days" | "30d" => Ok(Self::Last30Days),
            "last-90-days" | "90d" => Ok(Self::Last90Days),
            "this-year" | "ytd" => Ok(Self::ThisYear),
            "all" | "all-time" => Ok(Self::AllTime),
            _ => Err(format!(
                "Unknown period: {}. Available: last-30-days, last-90-days, this-year, all",
                s
            )),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
