//! User and category command implementations

use anyhow::{Context, Result};
use pennywise_core::analysis::format_currency;
use pennywise_core::db::Database;
use pennywise_core::models::{Kind, User};

use super::parse_kind;

pub fn cmd_user_add(db: &Database, username: &str, email: Option<&str>) -> Result<()> {
    let user_id = db
        .create_user(username, email)
        .context("Failed to create user")?;

    println!("✅ Created user '{}' (id {})", username.trim(), user_id);
    println!("   Use '--user {}' to act as this user.", username.trim());

    Ok(())
}

pub fn cmd_user_income(db: &Database, user: &User, amount: f64) -> Result<()> {
    db.set_monthly_income(user.id, amount)
        .context("Failed to set monthly income")?;

    println!(
        "✅ Monthly income for '{}' set to {}",
        user.username,
        format_currency(amount)
    );

    Ok(())
}

pub fn cmd_user_show(db: &Database, user: &User) -> Result<()> {
    let transactions = db.list_transactions(user.id, None, None)?;
    let goals = db.list_goals(user.id)?;

    println!();
    println!("👤 {}", user.username);
    println!("   ─────────────────────────────");
    if let Some(email) = &user.email {
        println!("   Email:          {}", email);
    }
    if user.monthly_income > 0.0 {
        println!("   Monthly income: {}", format_currency(user.monthly_income));
    } else {
        println!("   Monthly income: not set");
    }
    println!("   Transactions:   {}", transactions.len());
    println!("   Goals:          {}", goals.len());
    println!("   Member since:   {}", user.created_at.format("%Y-%m-%d"));

    Ok(())
}

pub fn cmd_categories(db: &Database, user: &User, kind: Option<&str>) -> Result<()> {
    let kind: Option<Kind> = kind.map(parse_kind).transpose()?;
    let categories = db.list_categories(user.id, kind)?;

    if categories.is_empty() {
        println!("No categories found.");
        return Ok(());
    }

    println!();
    println!("🏷️  Categories");
    println!("   ─────────────────────────────");

    for category in categories {
        println!(
            "   [{:>3}] {:8} │ {:15} │ {}",
            category.id,
            category.kind.as_str(),
            category.name,
            category.color.as_deref().unwrap_or("")
        );
    }

    Ok(())
}
