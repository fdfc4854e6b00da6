//! Expense commands (add, list, delete)

use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use till_core::categories::Taxonomy;
use till_core::db::Database;
use till_core::expenses::{record_expense, ExpenseDraft};
use till_core::models::Expense;

use super::{detect_receipt, truncate, ReceiptInput};

/// Save an expense, taking the amount from the receipt when none is given
pub fn cmd_add(
    db: &Database,
    taxonomy: &Taxonomy,
    category: &str,
    subcategory: &str,
    amount: Option<&str>,
    notes: &str,
    input: Option<ReceiptInput<'_>>,
) -> Result<Expense> {
    taxonomy.validate(category, subcategory)?;

    let draft = match amount {
        Some(raw) => {
            let amount = Decimal::from_str(raw.trim())
                .with_context(|| format!("Invalid amount: {}", raw))?;
            ExpenseDraft {
                category: category.to_string(),
                subcategory: subcategory.to_string(),
                amount,
                notes: String::new(),
            }
        }
        None => {
            let input = input
                .ok_or_else(|| anyhow!("Provide --amount or a receipt (--ocr-json / --image)"))?;
            let detection = detect_receipt(taxonomy, category, input)?;
            println!("🔍 {}", detection.reason);
            if !detection.is_found() {
                bail!("No clear total found on the receipt. Enter it with --amount");
            }
            ExpenseDraft::from_detection(category, subcategory, &detection)
        }
    }
    .with_notes(notes);

    let expense = record_expense(db, taxonomy, &draft, Utc::now())?;
    println!(
        "✅ Saved expense #{}: ${:.2} ({} / {})",
        expense.id, expense.amount, expense.category, expense.subcategory
    );

    Ok(expense)
}

/// List the most recently saved expenses
pub fn cmd_list(db: &Database, limit: i64) -> Result<()> {
    let expenses = db.recent_expenses(limit.max(1))?;

    if expenses.is_empty() {
        println!("No expenses yet. Save one with:");
        println!("  till add --category Food --subcategory Groceries --amount 12.50");
        return Ok(());
    }

    println!();
    println!("📋 Recent Expenses ({})", expenses.len());
    println!("   {}", "─".repeat(86));
    println!(
        "   {:>3}  {:>5}  {:<19}  {:<32}  {:>10}  Notes",
        "#", "ID", "Date", "Category", "Amount"
    );

    for (row, expense) in expenses.iter().enumerate() {
        let category = format!("{} / {}", expense.category, expense.subcategory);
        println!(
            "   {:>3}  {:>5}  {:<19}  {:<32}  {:>10}  {}",
            row + 1,
            expense.id,
            expense.date.format("%Y-%m-%d %H:%M:%S"),
            truncate(&category, 32),
            format!("${:.2}", expense.amount),
            truncate(&expense.notes, 30)
        );
    }

    println!();
    Ok(())
}

/// Delete the selected expenses
pub fn cmd_delete(db: &Database, ids: &[i64]) -> Result<usize> {
    if ids.is_empty() {
        bail!("No expense IDs given");
    }

    let deleted = db.delete_expenses(ids)?;
    println!("🗑️  Deleted {} expense(s)", deleted);

    let missing = ids.len().saturating_sub(deleted);
    if missing > 0 {
        println!("   ⚠️  {} ID(s) not found", missing);
    }

    Ok(deleted)
}
