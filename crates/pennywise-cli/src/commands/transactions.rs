//! Transaction command implementations

use anyhow::{Context, Result};
use pennywise_core::analysis::format_currency;
use pennywise_core::db::Database;
use pennywise_core::models::{Category, Kind, NewTransaction, Period, Transaction, User};

use super::{parse_date, parse_kind, truncate};

/// Find a category by name, listing the alternatives when it does not exist
pub fn resolve_category(db: &Database, user: &User, kind: Kind, name: &str) -> Result<Category> {
    if let Some(category) = db.find_category(user.id, kind, name)? {
        return Ok(category);
    }

    let available: Vec<String> = db
        .list_categories(user.id, Some(kind))?
        .into_iter()
        .map(|c| c.name)
        .collect();
    anyhow::bail!(
        "Unknown {} category '{}'. Available: {}",
        kind,
        name,
        available.join(", ")
    )
}

/// Signed, colored amount for listings
pub(crate) fn format_signed(tx: &Transaction) -> String {
    match tx.kind {
        Kind::Expense => format!("\x1b[31m-{}\x1b[0m", format_currency(tx.amount)), // Red for expenses
        Kind::Income => format!("\x1b[32m+{}\x1b[0m", format_currency(tx.amount)), // Green for income
    }
}

pub fn cmd_tx_add(
    db: &Database,
    user: &User,
    kind: &str,
    amount: f64,
    category: &str,
    date: Option<&str>,
    description: Option<&str>,
) -> Result<()> {
    let kind = parse_kind(kind)?;
    let category = resolve_category(db, user, kind, category)?;
    let date = parse_date(date)?;

    let mut tx = NewTransaction::new(kind, amount, category.id, date);
    if let Some(description) = description {
        tx = tx.with_description(description);
    }

    let id = db
        .add_transaction(user.id, &tx)
        .context("Failed to record transaction")?;

    println!(
        "✅ Recorded {} of {} in {} on {} (id {})",
        kind,
        format_currency(amount),
        category.name,
        date,
        id
    );

    Ok(())
}

pub fn cmd_tx_list(db: &Database, user: &User, limit: i64, period: Option<&str>) -> Result<()> {
    let range = match period {
        Some(period) => {
            let period: Period = period.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            Some(period.range(chrono::Local::now().date_naive()))
        }
        None => None,
    };

    let transactions = db.list_transactions(user.id, range, Some(limit))?;

    if transactions.is_empty() {
        println!("No transactions found. Record one with:");
        println!("  pennywise tx add expense 42.50 Groceries");
        return Ok(());
    }

    println!();
    println!("📝 Recent Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        println!(
            "   [{:>4}] {} │ {:>22} │ {:15} │ {}",
            tx.id,
            tx.date,
            format_signed(&tx),
            truncate(&tx.category_name, 15),
            truncate(tx.description.as_deref().unwrap_or(""), 30)
        );
    }

    Ok(())
}

pub fn cmd_tx_delete(db: &Database, user: &User, id: i64) -> Result<()> {
    db.delete_transaction(user.id, id)
        .with_context(|| format!("Failed to delete transaction {}", id))?;

    println!("✅ Deleted transaction {}", id);

    Ok(())
}
