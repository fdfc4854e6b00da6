//! Saving expenses
//!
//! A detected total is only a suggestion: the user confirms or edits the
//! amount before anything is written.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::categories::Taxonomy;
use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{DetectionResult, Expense, NewExpense};

/// Upper bound for a single expense (exclusive): one trillion
pub const MAX_EXPENSE_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Expense as entered on the form, before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub category: String,
    pub subcategory: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default)]
    pub notes: String,
}

impl ExpenseDraft {
    /// Pre-fill the amount from detection (0 when nothing was found)
    pub fn from_detection(
        category: impl Into<String>,
        subcategory: impl Into<String>,
        detection: &DetectionResult,
    ) -> Self {
        Self {
            category: category.into(),
            subcategory: subcategory.into(),
            amount: detection.amount_or_zero(),
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Validate a draft and append it to the store
pub fn record_expense(
    db: &Database,
    taxonomy: &Taxonomy,
    draft: &ExpenseDraft,
    now: DateTime<Utc>,
) -> Result<Expense> {
    if draft.amount <= Decimal::ZERO || draft.amount >= MAX_EXPENSE_AMOUNT {
        return Err(Error::InvalidData("Enter a valid amount".to_string()));
    }
    taxonomy.validate(&draft.category, &draft.subcategory)?;

    let new = NewExpense {
        date: now,
        category: draft.category.clone(),
        subcategory: draft.subcategory.clone(),
        amount: draft.amount,
        notes: draft.notes.trim().to_string(),
    };
    let id = db.insert_expense(&new)?;

    info!(
        id,
        category = %new.category,
        subcategory = %new.subcategory,
        amount = %new.amount,
        "Saved expense"
    );

    db.get_expense(id)?
        .ok_or_else(|| Error::NotFound(format!("Expense #{} vanished after insert", id)))
}
