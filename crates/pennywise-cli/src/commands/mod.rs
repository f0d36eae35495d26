//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init and shared utilities (open_db, current_user, config loading)
//! - `users` - User and category commands
//! - `transactions` - Transaction commands (add, list, delete)
//! - `templates` - Recurring transaction templates
//! - `goals` - Savings goals
//! - `reports` - Report generation commands
//! - `advice` - Spending and savings advice

pub mod advice;
pub mod core;
pub mod goals;
pub mod reports;
pub mod templates;
pub mod transactions;
pub mod users;

// Re-export command functions for main.rs
pub use advice::*;
pub use core::*;
pub use goals::*;
pub use reports::*;
pub use templates::*;
pub use transactions::*;
pub use users::*;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use pennywise_core::models::Kind;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Parse a `YYYY-MM-DD` argument, defaulting to today
pub fn parse_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}' (use YYYY-MM-DD)", s)),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Parse an `income`/`expense` argument
pub fn parse_kind(kind: &str) -> Result<Kind> {
    kind.parse::<Kind>().map_err(|e| anyhow::anyhow!(e))
}
