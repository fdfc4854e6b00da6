//! Expense operations

use rusqlite::{params, params_from_iter, OptionalExtension};
use tracing::info;

use super::{decimal_column, format_datetime, parse_datetime, Database};
use crate::error::Result;
use crate::models::{Expense, NewExpense};

/// IDs bound per DELETE statement
const DELETE_BATCH_SIZE: usize = 500;

const EXPENSE_COLUMNS: &str = "id, date, category, subcategory, amount, notes";

impl Database {
    /// Append an expense, returning its ID
    pub fn insert_expense(&self, expense: &NewExpense) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO expenses (date, category, subcategory, amount, notes)
             VALUES (?, ?, ?, ?, ?)",
            params![
                format_datetime(&expense.date),
                expense.category,
                expense.subcategory,
                expense.amount.to_string(),
                expense.notes,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Get expense by ID
    pub fn get_expense(&self, id: i64) -> Result<Option<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM expenses WHERE id = ?",
            EXPENSE_COLUMNS
        ))?;

        let expense = stmt
            .query_row(params![id], |row| Self::row_to_expense(row))
            .optional()?;

        Ok(expense)
    }

    /// List expenses, newest first
    pub fn list_expenses(&self, limit: i64, offset: i64) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM expenses ORDER BY date DESC, id DESC LIMIT ? OFFSET ?",
            EXPENSE_COLUMNS
        ))?;

        let expenses = stmt
            .query_map(params![limit, offset], |row| Self::row_to_expense(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(expenses)
    }

    /// The last `limit` expenses saved, ordered by date (newest first)
    pub fn recent_expenses(&self, limit: i64) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {cols} FROM (
                SELECT {cols} FROM expenses ORDER BY id DESC LIMIT ?
             ) ORDER BY date DESC, id DESC",
            cols = EXPENSE_COLUMNS
        ))?;

        let expenses = stmt
            .query_map(params![limit], |row| Self::row_to_expense(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(expenses)
    }

    /// All expenses in insertion order
    pub fn all_expenses(&self) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM expenses ORDER BY id ASC",
            EXPENSE_COLUMNS
        ))?;

        let expenses = stmt
            .query_map([], |row| Self::row_to_expense(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(expenses)
    }

    pub fn count_expenses(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Delete the selected expenses, returning how many rows went away.
    ///
    /// Unknown IDs are ignored.
    pub fn delete_expenses(&self, ids: &[i64]) -> Result<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        // Stay under SQLite's host parameter limit
        let mut deleted = 0;
        for chunk in ids.chunks(DELETE_BATCH_SIZE) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            deleted += tx.execute(
                &format!("DELETE FROM expenses WHERE id IN ({})", placeholders),
                params_from_iter(chunk.iter()),
            )?;
        }
        tx.commit()?;

        info!(requested = ids.len(), deleted, "Deleted expenses");
        Ok(deleted)
    }

    /// Remove every expense
    pub fn clear_expenses(&self) -> Result<usize> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM expenses", [])?;
        info!(deleted, "Cleared expenses");
        Ok(deleted)
    }

    /// Helper to convert a row to Expense
    fn row_to_expense(row: &rusqlite::Row) -> rusqlite::Result<Expense> {
        let date_str: String = row.get(1)?;
        Ok(Expense {
            id: row.get(0)?,
            date: parse_datetime(&date_str),
            category: row.get(2)?,
            subcategory: row.get(3)?,
            amount: decimal_column(row, 4)?,
            notes: row.get(5)?,
        })
    }
}
