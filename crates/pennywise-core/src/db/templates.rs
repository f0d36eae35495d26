//! Saved templates for recurring transactions

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};

use super::transactions::validate_amount;
use super::{kind_column, Database};
use crate::error::{Error, Result};
use crate::models::{NewTemplate, NewTransaction, Template};

impl Database {
    pub fn add_template(&self, user_id: i64, template: &NewTemplate) -> Result<i64> {
        if template.name.trim().is_empty() {
            return Err(Error::InvalidData("Template name must not be empty".to_string()));
        }
        validate_amount(template.amount)?;
        self.check_category(user_id, template.category_id, template.kind)?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO templates (user_id, name, amount, category_id, kind) VALUES (?, ?, ?, ?, ?)",
            params![
                user_id,
                template.name.trim(),
                template.amount,
                template.category_id,
                template.kind.as_str(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    pub fn list_templates(&self, user_id: i64) -> Result<Vec<Template>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT t.id, t.user_id, t.name, t.amount, t.category_id, c.name, t.kind
            FROM templates t
            JOIN categories c ON t.category_id = c.id
            WHERE t.user_id = ?
            ORDER BY t.name
            "#,
        )?;

        let templates = stmt
            .query_map(params![user_id], |row| Self::row_to_template(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(templates)
    }

    pub fn get_template(&self, user_id: i64, id: i64) -> Result<Option<Template>> {
        let conn = self.conn()?;
        let template = conn
            .query_row(
                r#"
                SELECT t.id, t.user_id, t.name, t.amount, t.category_id, c.name, t.kind
                FROM templates t
                JOIN categories c ON t.category_id = c.id
                WHERE t.id = ? AND t.user_id = ?
                "#,
                params![id, user_id],
                |row| Self::row_to_template(row),
            )
            .optional()?;

        Ok(template)
    }

    pub fn delete_template(&self, user_id: i64, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM templates WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Template {}", id)));
        }
        Ok(())
    }

    /// Record a posted transaction from a template, dated `date`
    pub fn post_template(&self, user_id: i64, template_id: i64, date: NaiveDate) -> Result<i64> {
        let template = self
            .get_template(user_id, template_id)?
            .ok_or_else(|| Error::NotFound(format!("Template {}", template_id)))?;

        let tx = NewTransaction::new(template.kind, template.amount, template.category_id, date)
            .with_description(template.name);
        self.add_transaction(user_id, &tx)
    }

    /// Column order: id, user_id, name, amount, category_id, category name, kind
    fn row_to_template(row: &rusqlite::Row) -> rusqlite::Result<Template> {
        Ok(Template {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            amount: row.get(3)?,
            category_id: row.get(4)?,
            category_name: row.get(5)?,
            kind: kind_column(row, 6)?,
        })
    }
}
