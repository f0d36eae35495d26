//! Pennywise CLI - Personal finance tracker
//!
//! Usage:
//!   pennywise init                              Initialize database and user
//!   pennywise tx add expense 42.50 Groceries    Record a transaction
//!   pennywise report breakdown --period 90d     Totals per category
//!   pennywise advice                            Spending and savings advice

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let db_path = commands::resolve_db_path(cli.db.as_deref())?;
    let db = commands::open_db(&db_path)?;
    // Resolved lazily: `init` and `user add` run before the acting user exists
    let current_user = || commands::current_user(&db, &cli.user);

    match cli.command {
        Commands::Init => commands::cmd_init(&db, &cli.user),
        Commands::User { action } => match action {
            UserAction::Add { name, email } => {
                commands::cmd_user_add(&db, &name, email.as_deref())
            }
            UserAction::Income { amount } => {
                commands::cmd_user_income(&db, &current_user()?, amount)
            }
            UserAction::Show => commands::cmd_user_show(&db, &current_user()?),
        },
        Commands::Categories { kind } => {
            commands::cmd_categories(&db, &current_user()?, kind.as_deref())
        }
        Commands::Tx { action } => {
            let user = current_user()?;
            match action {
                None => commands::cmd_tx_list(&db, &user, 20, None),
                Some(TxAction::List { limit, period }) => {
                    commands::cmd_tx_list(&db, &user, limit, period.as_deref())
                }
                Some(TxAction::Add {
                    kind,
                    amount,
                    category,
                    date,
                    description,
                }) => commands::cmd_tx_add(
                    &db,
                    &user,
                    &kind,
                    amount,
                    &category,
                    date.as_deref(),
                    description.as_deref(),
                ),
                Some(TxAction::Delete { id }) => commands::cmd_tx_delete(&db, &user, id),
            }
        }
        Commands::Template { action } => {
            let user = current_user()?;
            match action {
                None | Some(TemplateAction::List) => commands::cmd_template_list(&db, &user),
                Some(TemplateAction::Add {
                    name,
                    kind,
                    amount,
                    category,
                }) => commands::cmd_template_add(&db, &user, &name, &kind, amount, &category),
                Some(TemplateAction::Post { id, date }) => {
                    commands::cmd_template_post(&db, &user, id, date.as_deref())
                }
                Some(TemplateAction::Delete { id }) => {
                    commands::cmd_template_delete(&db, &user, id)
                }
            }
        }
        Commands::Goal { action } => {
            let user = current_user()?;
            match action {
                None | Some(GoalAction::List) => commands::cmd_goal_list(&db, &user),
                Some(GoalAction::Add {
                    name,
                    target,
                    deadline,
                }) => commands::cmd_goal_add(&db, &user, &name, target, deadline.as_deref()),
                Some(GoalAction::Fund { id, amount }) => {
                    commands::cmd_goal_fund(&db, &user, id, amount)
                }
                Some(GoalAction::Delete { id }) => commands::cmd_goal_delete(&db, &user, id),
            }
        }
        Commands::Report { report_type } => {
            let user = current_user()?;
            match report_type {
                ReportType::Breakdown {
                    period,
                    from,
                    to,
                    json,
                } => {
                    let (from, to) =
                        commands::resolve_period(&period, from.as_deref(), to.as_deref())?;
                    commands::cmd_report_breakdown(&db, &user, from, to, json)
                }
                ReportType::Month { month, json } => {
                    commands::cmd_report_month(&db, &user, month.as_deref(), json)
                }
                ReportType::Trends { months, json } => {
                    commands::cmd_report_trends(&db, &user, months, json)
                }
                ReportType::Forecast { json } => commands::cmd_report_forecast(&db, &user, json),
                ReportType::Stats { period, json } => {
                    let (from, to) = commands::resolve_period(&period, None, None)?;
                    commands::cmd_report_stats(&db, &user, from, to, json)
                }
            }
        }
        Commands::Advice => {
            let config = commands::load_advisor_config(cli.config.as_deref())?;
            commands::cmd_advice(&db, &current_user()?, config)
        }
    }
}
