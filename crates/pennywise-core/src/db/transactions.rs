//! Transaction operations

use rusqlite::params;
use tracing::debug;

use super::{date_column, kind_column, Database};
use crate::error::{Error, Result};
use crate::models::{DateRange, Kind, NewTransaction, Transaction};
use crate::store::FinanceStore;

const TRANSACTION_COLUMNS: &str = r#"
    t.id, t.user_id, t.amount, t.category_id, c.name, c.color,
    t.date, t.description, t.kind, t.is_template
"#;

impl Database {
    /// Record a transaction for a user
    ///
    /// The amount must be positive and the category must be visible to the
    /// user with the same kind as the transaction.
    pub fn add_transaction(&self, user_id: i64, tx: &NewTransaction) -> Result<i64> {
        validate_amount(tx.amount)?;
        self.check_category(user_id, tx.category_id, tx.kind)?;

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO transactions (user_id, amount, category_id, date, description, kind, is_template)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                tx.amount,
                tx.category_id,
                tx.date.to_string(),
                tx.description,
                tx.kind.as_str(),
                tx.is_template,
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!(user_id, id, amount = tx.amount, kind = %tx.kind, "Recorded transaction");
        Ok(id)
    }

    /// List a user's transactions, newest first
    pub fn list_transactions(
        &self,
        user_id: i64,
        range: Option<DateRange>,
        limit: Option<i64>,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;

        let mut sql = format!(
            "SELECT {} FROM transactions t JOIN categories c ON t.category_id = c.id WHERE t.user_id = ?",
            TRANSACTION_COLUMNS
        );
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(user_id)];

        if let Some(range) = range {
            sql.push_str(" AND t.date BETWEEN ? AND ?");
            params.push(Box::new(range.start.to_string()));
            params.push(Box::new(range.end.to_string()));
        }

        sql.push_str(" ORDER BY t.date DESC, t.id DESC");

        if let Some(limit) = limit {
            sql.push_str(" LIMIT ?");
            params.push(Box::new(limit));
        }

        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn.prepare(&sql)?;
        let transactions = stmt
            .query_map(param_refs.as_slice(), |row| Self::row_to_transaction(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Delete one of a user's transactions
    pub fn delete_transaction(&self, user_id: i64, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM transactions WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Transaction {}", id)));
        }
        Ok(())
    }

    /// Ensure a category exists, is visible to the user and has the given kind
    pub(crate) fn check_category(&self, user_id: i64, category_id: i64, kind: Kind) -> Result<()> {
        let category = self
            .get_category(category_id)?
            .ok_or_else(|| Error::NotFound(format!("Category {}", category_id)))?;

        if category.user_id.is_some_and(|owner| owner != user_id) {
            return Err(Error::InvalidData(format!(
                "Category {} belongs to another user",
                category_id
            )));
        }
        if category.kind != kind {
            return Err(Error::InvalidData(format!(
                "Category '{}' is an {} category, not {}",
                category.name, category.kind, kind
            )));
        }
        Ok(())
    }

    /// Column order: id, user_id, amount, category_id, category name, category color,
    ///               date, description, kind, is_template
    pub(crate) fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
        Ok(Transaction {
            id: row.get(0)?,
            user_id: row.get(1)?,
            amount: row.get(2)?,
            category_id: row.get(3)?,
            category_name: row.get(4)?,
            category_color: row.get(5)?,
            date: date_column(row, 6)?,
            description: row.get(7)?,
            kind: kind_column(row, 8)?,
            is_template: row.get(9)?,
        })
    }
}

pub(crate) fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidData(format!(
            "Amount must be positive, got {}",
            amount
        )));
    }
    Ok(())
}

impl FinanceStore for Database {
    fn get_transactions(&self, user_id: i64, range: Option<DateRange>) -> Result<Vec<Transaction>> {
        self.list_transactions(user_id, range, None)
    }
}
