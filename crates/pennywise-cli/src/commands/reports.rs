//! Report command implementations

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use pennywise_core::analysis::{
    format_currency, format_percentage, Aggregator, CategoryTotal, FORECAST_MONTHS,
};
use pennywise_core::db::Database;
use pennywise_core::models::{Period, User};
use serde::Serialize;

use super::truncate;

/// Resolve a period string to (from_date, to_date)
pub fn resolve_period(
    period: &str,
    custom_from: Option<&str>,
    custom_to: Option<&str>,
) -> Result<(NaiveDate, NaiveDate)> {
    // If custom dates provided, use those
    if let (Some(from), Some(to)) = (custom_from, custom_to) {
        let from_date = NaiveDate::parse_from_str(from, "%Y-%m-%d")
            .context("Invalid --from date format (use YYYY-MM-DD)")?;
        let to_date = NaiveDate::parse_from_str(to, "%Y-%m-%d")
            .context("Invalid --to date format (use YYYY-MM-DD)")?;
        if from_date > to_date {
            anyhow::bail!("--from {} is after --to {}", from_date, to_date);
        }
        return Ok((from_date, to_date));
    }

    let period: Period = period.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let range = period.range(chrono::Local::now().date_naive());
    Ok((range.start, range.end))
}

/// Parse a `YYYY-MM` argument, defaulting to the current month
pub fn parse_month(month: Option<&str>) -> Result<(i32, u32)> {
    let Some(month) = month else {
        let today = chrono::Local::now().date_naive();
        return Ok((today.year(), today.month()));
    };

    let date = NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}' (use YYYY-MM)", month))?;
    Ok((date.year(), date.month()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_category_table(title: &str, categories: &[CategoryTotal]) {
    if categories.is_empty() {
        return;
    }

    println!();
    println!("   {}", title);
    println!(
        "   {:25} │ {:>12} │ {:>6} │ {:>5}",
        "Category", "Amount", "%", "Count"
    );
    println!("   ──────────────────────────┼──────────────┼────────┼───────");

    for cat in categories {
        println!(
            "   {:25} │ {:>12} │ {:>6} │ {:>5}",
            truncate(&cat.name, 25),
            format_currency(cat.amount),
            format_percentage(cat.percentage),
            cat.transaction_count
        );
    }
}

pub fn cmd_report_breakdown(
    db: &Database,
    user: &User,
    from: NaiveDate,
    to: NaiveDate,
    json: bool,
) -> Result<()> {
    let breakdown = Aggregator::new(db, user.id).category_breakdown(from, to)?;

    if json {
        return print_json(&breakdown);
    }

    println!();
    println!("📊 Category Breakdown");
    println!("   Period: {} to {}", from, to);
    println!("   ─────────────────────────────────────────────────────────────");

    if breakdown.is_empty() {
        println!("   No transactions found in this period.");
        return Ok(());
    }

    println!("   Income:   {}", format_currency(breakdown.income_total()));
    println!("   Expenses: {}", format_currency(breakdown.expense_total()));

    print_category_table("💵 Income", &breakdown.income);
    print_category_table("💸 Expenses", &breakdown.expenses);

    Ok(())
}

pub fn cmd_report_month(db: &Database, user: &User, month: Option<&str>, json: bool) -> Result<()> {
    let (year, month) = parse_month(month)?;
    let summary = Aggregator::new(db, user.id).monthly_summary(year, month)?;

    if json {
        return print_json(&summary);
    }

    println!();
    println!("📅 Summary for {:04}-{:02}", year, month);
    println!("   ─────────────────────────────");
    println!("   Income:       {:>12}", format_currency(summary.income));
    println!("   Expenses:     {:>12}", format_currency(summary.expenses));
    println!("   Balance:      {:>12}", format_currency(summary.balance));
    println!("   Transactions: {:>12}", summary.transaction_count);

    Ok(())
}

pub fn cmd_report_trends(db: &Database, user: &User, months: u32, json: bool) -> Result<()> {
    let trends = Aggregator::new(db, user.id).monthly_trends(months)?;

    if json {
        return print_json(&trends);
    }

    println!();
    println!("📈 Monthly Trends");
    println!("   ─────────────────────────────────────────────────────────");
    println!(
        "   {:7} │ {:>12} │ {:>12} │ {:>12}",
        "Month", "Income", "Expenses", "Balance"
    );
    println!("   ────────┼──────────────┼──────────────┼──────────────");

    for point in &trends {
        println!(
            "   {:7} │ {:>12} │ {:>12} │ {:>12}",
            point.month,
            format_currency(point.summary.income),
            format_currency(point.summary.expenses),
            format_currency(point.summary.balance)
        );
    }

    Ok(())
}

pub fn cmd_report_forecast(db: &Database, user: &User, json: bool) -> Result<()> {
    let forecast = Aggregator::new(db, user.id).predict_next_month()?;

    if json {
        return print_json(&forecast);
    }

    println!();
    println!("🔮 Next Month Forecast");
    println!("   ─────────────────────────────");

    match forecast {
        Some(forecast) => {
            println!(
                "   Income:   {:>12}",
                format_currency(forecast.predicted_income)
            );
            println!(
                "   Expenses: {:>12}",
                format_currency(forecast.predicted_expenses)
            );
            println!(
                "   Balance:  {:>12}",
                format_currency(forecast.predicted_balance)
            );
            println!();
            println!(
                "   Average of the last {} months.",
                forecast.based_on_months
            );
        }
        None => {
            println!(
                "   Not enough history yet: a forecast needs at least two of {} months.",
                FORECAST_MONTHS
            );
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct StatsReport {
    from: NaiveDate,
    to: NaiveDate,
    income: f64,
    expenses: f64,
    balance: f64,
    top_expenses: Vec<CategoryTotal>,
}

pub fn cmd_report_stats(
    db: &Database,
    user: &User,
    from: NaiveDate,
    to: NaiveDate,
    json: bool,
) -> Result<()> {
    let aggregator = Aggregator::new(db, user.id);
    let totals = aggregator.period_totals(from, to)?;
    let top_expenses = aggregator.top_expense_categories(from, to, 3)?;

    if json {
        return print_json(&StatsReport {
            from,
            to,
            income: totals.income,
            expenses: totals.expenses,
            balance: totals.balance,
            top_expenses,
        });
    }

    println!();
    println!("📊 Statistics");
    println!("   Period: {} to {}", from, to);
    println!("   ─────────────────────────────");
    println!("   Income:   {:>12}", format_currency(totals.income));
    println!("   Expenses: {:>12}", format_currency(totals.expenses));
    println!("   Balance:  {:>12}", format_currency(totals.balance));

    print_category_table("🔝 Top expenses", &top_expenses);

    Ok(())
}
