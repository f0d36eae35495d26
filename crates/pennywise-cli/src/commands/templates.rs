//! Template command implementations

use anyhow::{Context, Result};
use pennywise_core::analysis::format_currency;
use pennywise_core::db::Database;
use pennywise_core::models::{NewTemplate, User};

use super::{parse_date, parse_kind, resolve_category};

pub fn cmd_template_add(
    db: &Database,
    user: &User,
    name: &str,
    kind: &str,
    amount: f64,
    category: &str,
) -> Result<()> {
    let kind = parse_kind(kind)?;
    let category = resolve_category(db, user, kind, category)?;

    let template = NewTemplate {
        name: name.to_string(),
        amount,
        category_id: category.id,
        kind,
    };
    let id = db
        .add_template(user.id, &template)
        .context("Failed to save template")?;

    println!("✅ Saved template '{}' (id {})", name.trim(), id);
    println!("   Record it with: pennywise template post {}", id);

    Ok(())
}

pub fn cmd_template_list(db: &Database, user: &User) -> Result<()> {
    let templates = db.list_templates(user.id)?;

    if templates.is_empty() {
        println!("No templates saved. Add one with:");
        println!("  pennywise template add Rent expense 900 Housing");
        return Ok(());
    }

    println!();
    println!("📋 Templates");
    println!("   ─────────────────────────────────────────────");

    for template in templates {
        println!(
            "   [{:>3}] {:20} │ {:7} │ {:>12} │ {}",
            template.id,
            template.name,
            template.kind.as_str(),
            format_currency(template.amount),
            template.category_name
        );
    }

    Ok(())
}

pub fn cmd_template_post(db: &Database, user: &User, id: i64, date: Option<&str>) -> Result<()> {
    let date = parse_date(date)?;
    let tx_id = db
        .post_template(user.id, id, date)
        .with_context(|| format!("Failed to post template {}", id))?;

    println!("✅ Recorded transaction {} from template {} on {}", tx_id, id, date);

    Ok(())
}

pub fn cmd_template_delete(db: &Database, user: &User, id: i64) -> Result<()> {
    db.delete_template(user.id, id)
        .with_context(|| format!("Failed to delete template {}", id))?;

    println!("✅ Deleted template {}", id);

    Ok(())
}
