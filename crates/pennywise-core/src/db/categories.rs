//! Category seeding and lookup

use rusqlite::{params, OptionalExtension};

use super::{kind_column, Database};
use crate::error::Result;
use crate::models::{Category, Kind};

/// Income categories every new user starts with: (name, color)
pub const DEFAULT_INCOME_CATEGORIES: [(&str, &str); 4] = [
    ("Salary", "#4CAF50"),
    ("Freelance", "#8BC34A"),
    ("Investments", "#CDDC39"),
    ("Other", "#FFEB3B"),
];

/// Expense categories every new user starts with: (name, color)
pub const DEFAULT_EXPENSE_CATEGORIES: [(&str, &str); 10] = [
    ("Groceries", "#F44336"),
    ("Transport", "#E91E63"),
    ("Housing", "#9C27B0"),
    ("Entertainment", "#673AB7"),
    ("Health", "#3F51B5"),
    ("Education", "#2196F3"),
    ("Clothing", "#03A9F4"),
    ("Utilities", "#00BCD4"),
    ("Communication", "#009688"),
    ("Other", "#795548"),
];

impl Database {
    /// Insert the default category set for a user
    pub(crate) fn seed_default_categories(conn: &rusqlite::Connection, user_id: i64) -> Result<()> {
        let mut stmt = conn.prepare(
            "INSERT INTO categories (name, kind, color, user_id, is_default) VALUES (?, ?, ?, ?, 1)",
        )?;

        let seeds = DEFAULT_INCOME_CATEGORIES
            .iter()
            .map(|c| (Kind::Income, c))
            .chain(DEFAULT_EXPENSE_CATEGORIES.iter().map(|c| (Kind::Expense, c)));

        for (kind, (name, color)) in seeds {
            stmt.execute(params![name, kind.as_str(), color, user_id])?;
        }

        Ok(())
    }

    /// Categories visible to a user (their own plus system defaults)
    pub fn list_categories(&self, user_id: i64, kind: Option<Kind>) -> Result<Vec<Category>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, kind, color, user_id
            FROM categories
            WHERE (user_id = ?1 OR user_id IS NULL)
              AND (?2 IS NULL OR kind = ?2)
            ORDER BY kind DESC, id
            "#,
        )?;

        let categories = stmt
            .query_map(params![user_id, kind.map(|k| k.as_str())], |row| {
                Self::row_to_category(row)
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    /// Get a single category by ID
    pub fn get_category(&self, id: i64) -> Result<Option<Category>> {
        let conn = self.conn()?;
        let category = conn
            .query_row(
                "SELECT id, name, kind, color, user_id FROM categories WHERE id = ?",
                params![id],
                |row| Self::row_to_category(row),
            )
            .optional()?;

        Ok(category)
    }

    /// Find a user's category by kind and name (case-insensitive)
    pub fn find_category(&self, user_id: i64, kind: Kind, name: &str) -> Result<Option<Category>> {
        let conn = self.conn()?;
        let category = conn
            .query_row(
                r#"
                SELECT id, name, kind, color, user_id
                FROM categories
                WHERE (user_id = ?1 OR user_id IS NULL)
                  AND kind = ?2
                  AND name = ?3 COLLATE NOCASE
                ORDER BY user_id IS NULL, id
                LIMIT 1
                "#,
                params![user_id, kind.as_str(), name],
                |row| Self::row_to_category(row),
            )
            .optional()?;

        Ok(category)
    }

    /// Column order: id, name, kind, color, user_id
    fn row_to_category(row: &rusqlite::Row) -> rusqlite::Result<Category> {
        Ok(Category {
            id: row.get(0)?,
            name: row.get(1)?,
            kind: kind_column(row, 2)?,
            color: row.get(3)?,
            user_id: row.get(4)?,
        })
    }
}
