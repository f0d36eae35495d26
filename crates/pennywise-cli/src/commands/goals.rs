//! Savings goal command implementations

use anyhow::{Context, Result};
use pennywise_core::analysis::{format_currency, format_percentage};
use pennywise_core::db::Database;
use pennywise_core::models::{NewGoal, User};

use super::truncate;

pub fn cmd_goal_add(
    db: &Database,
    user: &User,
    name: &str,
    target: f64,
    deadline: Option<&str>,
) -> Result<()> {
    let deadline = deadline
        .map(|d| {
            chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d")
                .with_context(|| format!("Invalid deadline '{}' (use YYYY-MM-DD)", d))
        })
        .transpose()?;

    let goal = NewGoal {
        name: name.to_string(),
        target_amount: target,
        deadline,
    };
    let id = db.add_goal(user.id, &goal).context("Failed to create goal")?;

    println!(
        "🎯 Created goal '{}' with target {} (id {})",
        name.trim(),
        format_currency(target),
        id
    );

    Ok(())
}

pub fn cmd_goal_list(db: &Database, user: &User) -> Result<()> {
    let goals = db.list_goals(user.id)?;

    if goals.is_empty() {
        println!("No goals yet. Create one with:");
        println!("  pennywise goal add \"Emergency fund\" 1000 --deadline 2025-12-31");
        return Ok(());
    }

    let today = chrono::Local::now().date_naive();

    println!();
    println!("🎯 Savings Goals");
    println!("   ─────────────────────────────────────────────────────────────");

    for goal in goals {
        let progress = goal.progress(today);
        let status = if progress.completed {
            "✅ reached".to_string()
        } else {
            match progress.days_left {
                Some(days) if days < 0 => format!("⚠️  {} days overdue", -days),
                Some(days) => format!("{} days left", days),
                None => "no deadline".to_string(),
            }
        };

        println!(
            "   [{:>3}] {:20} │ {:>12} / {:>12} │ {:>6} │ {}",
            goal.id,
            truncate(&goal.name, 20),
            format_currency(goal.current_amount),
            format_currency(goal.target_amount),
            format_percentage(progress.percent),
            status
        );
    }

    Ok(())
}

pub fn cmd_goal_fund(db: &Database, user: &User, id: i64, amount: f64) -> Result<()> {
    let goal = db
        .add_goal_funds(user.id, id, amount)
        .with_context(|| format!("Failed to fund goal {}", id))?;
    let progress = goal.progress(chrono::Local::now().date_naive());

    println!(
        "💰 Added {} to '{}': {} of {} ({})",
        format_currency(amount),
        goal.name,
        format_currency(goal.current_amount),
        format_currency(goal.target_amount),
        format_percentage(progress.percent)
    );
    if progress.completed {
        println!("🎉 Goal reached!");
    }

    Ok(())
}

pub fn cmd_goal_delete(db: &Database, user: &User, id: i64) -> Result<()> {
    db.delete_goal(user.id, id)
        .with_context(|| format!("Failed to delete goal {}", id))?;

    println!("✅ Deleted goal {}", id);

    Ok(())
}
