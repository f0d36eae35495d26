//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pennywise_core::analysis::MAX_TREND_MONTHS;

/// Pennywise - Track income and expenses, get advice on where the money goes
#[derive(Parser)]
#[command(name = "pennywise")]
#[command(about = "Personal finance tracker with spending analytics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Advisor config file (overrides the default location)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Acting user
    #[arg(short, long, default_value = "me", global = true)]
    pub user: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and create the acting user
    Init,

    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// List categories
    Categories {
        /// Only income or expense categories
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// Record, list and delete transactions
    Tx {
        #[command(subcommand)]
        action: Option<TxAction>,
    },

    /// Manage recurring transaction templates
    Template {
        #[command(subcommand)]
        action: Option<TemplateAction>,
    },

    /// Manage savings goals
    Goal {
        #[command(subcommand)]
        action: Option<GoalAction>,
    },

    /// Generate reports
    Report {
        #[command(subcommand)]
        report_type: ReportType,
    },

    /// Show spending and savings advice
    Advice,
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Create a user with the default categories
    Add {
        /// Username
        name: String,

        /// Email address
        #[arg(long)]
        email: Option<String>,
    },

    /// Set the acting user's monthly income
    Income {
        /// Monthly income amount
        amount: f64,
    },

    /// Show the acting user
    Show,
}

#[derive(Subcommand)]
pub enum TxAction {
    /// Record a transaction
    Add {
        /// income or expense
        kind: String,

        /// Amount (positive)
        amount: f64,

        /// Category name
        category: String,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List recent transactions
    List {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: i64,

        /// Time period: last-30-days, last-90-days, this-year, all
        #[arg(long)]
        period: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum TemplateAction {
    /// Save a template
    Add {
        /// Template name
        name: String,

        /// income or expense
        kind: String,

        /// Amount (positive)
        amount: f64,

        /// Category name
        category: String,
    },

    /// List templates
    List,

    /// Record a transaction from a template
    Post {
        /// Template ID
        id: i64,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a template
    Delete {
        /// Template ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum GoalAction {
    /// Create a savings goal
    Add {
        /// Goal name
        name: String,

        /// Target amount
        target: f64,

        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<String>,
    },

    /// List goals with progress
    List,

    /// Add money to a goal
    Fund {
        /// Goal ID
        id: i64,

        /// Amount to add
        amount: f64,
    },

    /// Delete a goal
    Delete {
        /// Goal ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Totals per category
    Breakdown {
        /// Time period: last-30-days, last-90-days, this-year, all
        #[arg(long, default_value = "last-30-days")]
        period: String,

        /// Custom start date (YYYY-MM-DD) - overrides period
        #[arg(long)]
        from: Option<String>,

        /// Custom end date (YYYY-MM-DD) - overrides period
        #[arg(long)]
        to: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summary of one calendar month
    Month {
        /// Month (YYYY-MM, defaults to the current month)
        month: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Income and expenses for the last N months
    Trends {
        /// Number of months (1-1200)
        #[arg(
            short,
            long,
            default_value = "6",
            value_parser = clap::value_parser!(u32).range(1..=MAX_TREND_MONTHS as i64)
        )]
        months: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Naive forecast for next month
    Forecast {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Period totals and top expense categories
    Stats {
        /// Time period: last-30-days, last-90-days, this-year, all
        #[arg(long, default_value = "last-30-days")]
        period: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
