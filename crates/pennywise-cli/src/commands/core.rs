//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `resolve_db_path` / `open_db` - Locate and open the database
//! - `current_user` - Resolve the acting user
//! - `load_advisor_config` - Advisor thresholds for `advice`
//! - `cmd_init` - Initialize the database

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pennywise_core::config::{self, AdvisorConfig};
use pennywise_core::db::Database;
use pennywise_core::models::User;

/// Use the given path, or the database in the platform data directory
pub fn resolve_db_path(db_path: Option<&Path>) -> Result<PathBuf> {
    match db_path {
        Some(path) => Ok(path.to_path_buf()),
        None => config::default_db_path()
            .context("Could not determine a data directory; pass --db explicitly"),
    }
}

/// Open the database, creating its parent directory if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    tracing::debug!(path = path_str, "Opening database");
    Database::new(path_str).context("Failed to open database")
}

/// Look up the acting user by name
pub fn current_user(db: &Database, username: &str) -> Result<User> {
    db.find_user_by_name(username)?.with_context(|| {
        format!(
            "User '{}' not found. Create it with 'pennywise init --user {}'",
            username, username
        )
    })
}

/// Advisor thresholds from an explicit file, the override location, or the defaults
pub fn load_advisor_config(path: Option<&Path>) -> Result<AdvisorConfig> {
    let config = match path {
        Some(path) => AdvisorConfig::load_from(path),
        None => AdvisorConfig::load(),
    };
    config.context("Failed to load advisor config")
}

pub fn cmd_init(db: &Database, username: &str) -> Result<()> {
    println!("🔧 Initializing database at {}...", db.path());

    match db.find_user_by_name(username)? {
        Some(user) => {
            println!("   User '{}' already exists (id {})", user.username, user.id);
        }
        None => {
            let user_id = db
                .create_user(username, None)
                .context("Failed to create user")?;
            println!("   Created user '{}' (id {})", username, user_id);
            println!("   Seeded default income and expense categories");
        }
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Set your monthly income: pennywise user income 2500");
    println!("  2. Record a transaction: pennywise tx add expense 42.50 Groceries");
    println!("  3. Get advice: pennywise advice");

    Ok(())
}
