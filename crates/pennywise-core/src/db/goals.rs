//! Savings goals

use rusqlite::{params, OptionalExtension};
use tracing::info;

use super::transactions::validate_amount;
use super::{optional_date_column, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Goal, NewGoal};

impl Database {
    pub fn add_goal(&self, user_id: i64, goal: &NewGoal) -> Result<i64> {
        if goal.name.trim().is_empty() {
            return Err(Error::InvalidData("Goal name must not be empty".to_string()));
        }
        validate_amount(goal.target_amount)?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO goals (user_id, name, target_amount, deadline) VALUES (?, ?, ?, ?)",
            params![
                user_id,
                goal.name.trim(),
                goal.target_amount,
                goal.deadline.map(|d| d.to_string()),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    pub fn list_goals(&self, user_id: i64) -> Result<Vec<Goal>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, name, target_amount, current_amount, deadline, created_at
            FROM goals
            WHERE user_id = ?
            ORDER BY deadline IS NULL, deadline, id
            "#,
        )?;

        let goals = stmt
            .query_map(params![user_id], |row| Self::row_to_goal(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(goals)
    }

    pub fn get_goal(&self, id: i64) -> Result<Option<Goal>> {
        let conn = self.conn()?;
        let goal = conn
            .query_row(
                r#"
                SELECT id, user_id, name, target_amount, current_amount, deadline, created_at
                FROM goals WHERE id = ?
                "#,
                params![id],
                |row| Self::row_to_goal(row),
            )
            .optional()?;

        Ok(goal)
    }

    /// Add money to a goal; progress only ever increases
    pub fn add_goal_funds(&self, user_id: i64, goal_id: i64, amount: f64) -> Result<Goal> {
        validate_amount(amount)?;

        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE goals SET current_amount = current_amount + ? WHERE id = ? AND user_id = ?",
            params![amount, goal_id, user_id],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("Goal {}", goal_id)));
        }
        drop(conn);

        let goal = self
            .get_goal(goal_id)?
            .ok_or_else(|| Error::NotFound(format!("Goal {}", goal_id)))?;
        if goal.current_amount >= goal.target_amount {
            info!(goal_id, name = %goal.name, "Goal reached");
        }
        Ok(goal)
    }

    pub fn delete_goal(&self, user_id: i64, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM goals WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Goal {}", id)));
        }
        Ok(())
    }

    /// Column order: id, user_id, name, target_amount, current_amount, deadline, created_at
    fn row_to_goal(row: &rusqlite::Row) -> rusqlite::Result<Goal> {
        let created_at_str: String = row.get(6)?;
        Ok(Goal {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            target_amount: row.get(3)?,
            current_amount: row.get(4)?,
            deadline: optional_date_column(row, 5)?,
            created_at: parse_datetime(&created_at_str),
        })
    }
}
