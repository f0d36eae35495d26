//! Advice command implementation

use anyhow::Result;
use pennywise_core::analysis::Advisor;
use pennywise_core::config::AdvisorConfig;
use pennywise_core::db::Database;
use pennywise_core::models::User;

pub fn cmd_advice(db: &Database, user: &User, config: AdvisorConfig) -> Result<()> {
    let advisor = Advisor::new(db, user.id).with_config(config);

    let spending = advisor.spending_advice();
    let savings = advisor.savings_advice(user.monthly_income);

    println!();
    println!("💡 Advice for {}", user.username);
    println!("   ─────────────────────────────");

    for (title, outcome) in [("Spending", spending), ("Savings", savings)] {
        println!();
        println!("   {}", title);
        for message in outcome.into_messages() {
            println!("   • {}", message);
        }
    }

    Ok(())
}
