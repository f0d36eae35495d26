//! User operations

use rusqlite::{params, OptionalExtension};
use tracing::info;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::User;

impl Database {
    /// Create a user and seed their default categories
    pub fn create_user(&self, username: &str, email: Option<&str>) -> Result<i64> {
        let username = username.trim();
        if username.is_empty() {
            return Err(Error::InvalidData("Username must not be empty".to_string()));
        }

        let mut conn = self.conn()?;

        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM users WHERE username = ?",
                params![username],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            return Err(Error::InvalidData(format!(
                "Username already taken: {}",
                username
            )));
        }

        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO users (username, email) VALUES (?, ?)",
            params![username, email],
        )?;
        let user_id = tx.last_insert_rowid();
        Self::seed_default_categories(&tx, user_id)?;
        tx.commit()?;

        info!(user_id, username, "Created user");
        Ok(user_id)
    }

    /// Get a user by ID
    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT id, username, email, monthly_income, created_at FROM users WHERE id = ?",
                params![id],
                |row| Self::row_to_user(row),
            )
            .optional()?;

        Ok(user)
    }

    /// Get a user by username
    pub fn find_user_by_name(&self, username: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT id, username, email, monthly_income, created_at FROM users WHERE username = ?",
                params![username.trim()],
                |row| Self::row_to_user(row),
            )
            .optional()?;

        Ok(user)
    }

    /// Set the declared monthly income used for savings advice
    pub fn set_monthly_income(&self, user_id: i64, amount: f64) -> Result<()> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "Monthly income must be zero or positive, got {}",
                amount
            )));
        }

        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE users SET monthly_income = ? WHERE id = ?",
            params![amount, user_id],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("User {}", user_id)));
        }

        Ok(())
    }

    /// Column order: id, username, email, monthly_income, created_at
    fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
        let created_at_str: String = row.get(4)?;
        Ok(User {
            id: row.get(0)?,
            username: row.get(1)?,
            email: row.get(2)?,
            monthly_income: row.get(3)?,
            created_at: parse_datetime(&created_at_str),
        })
    }
}
