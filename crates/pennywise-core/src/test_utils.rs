//! Test utilities for pennywise-core
//!
//! In-memory [`FinanceStore`] implementations and fixture builders, so
//! aggregator and advisor tests run without SQLite.

use std::cell::Cell;

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::models::{DateRange, Kind, Transaction};
use crate::store::FinanceStore;

/// User id assigned to fixtures built with [`tx`]
pub const TEST_USER: i64 = 1;

/// Build a posted transaction for [`TEST_USER`]. `date` is `YYYY-MM-DD`.
pub fn tx(
    id: i64,
    kind: Kind,
    amount: f64,
    category_id: i64,
    category_name: &str,
    date: &str,
) -> Transaction {
    Transaction {
        id,
        user_id: TEST_USER,
        amount,
        category_id,
        category_name: category_name.to_string(),
        category_color: None,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        description: None,
        kind,
        is_template: false,
    }
}

/// Store backed by a plain vector
#[derive(Debug, Default)]
pub struct MemoryStore {
    transactions: Vec<Transaction>,
    calls: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            calls: Cell::new(0),
        }
    }

    /// Append a transaction dated `date`, assigning the next id
    pub fn push(&mut self, kind: Kind, amount: f64, category_id: i64, name: &str, date: NaiveDate) {
        let id = self.transactions.len() as i64 + 1;
        let mut t = tx(id, kind, amount, category_id, name, "2000-01-01");
        t.date = date;
        self.transactions.push(t);
    }

    /// Number of `get_transactions` calls served so far
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl FinanceStore for MemoryStore {
    fn get_transactions(&self, user_id: i64, range: Option<DateRange>) -> Result<Vec<Transaction>> {
        self.calls.set(self.calls.get() + 1);

        let mut matching: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| t.user_id == user_id)
            .filter(|t| range.map_or(true, |r| r.contains(t.date)))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(matching)
    }
}

/// Store whose every read fails
#[derive(Debug, Default)]
pub struct FailingStore;

impl FinanceStore for FailingStore {
    fn get_transactions(&self, _user_id: i64, _range: Option<DateRange>) -> Result<Vec<Transaction>> {
        Err(Error::NotFound("storage unavailable".to_string()))
    }
}
