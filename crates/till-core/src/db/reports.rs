//! Dashboard metrics and spending breakdowns

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::Database;
use crate::error::{Error, Result};
use crate::models::{CategorySpend, DashboardStats};

fn out_of_range() -> Error {
    Error::InvalidData("Spending total is out of range".to_string())
}

/// Sum amounts, failing instead of panicking past `Decimal::MAX`
fn checked_total(amounts: impl IntoIterator<Item = Decimal>) -> Result<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
        .ok_or_else(out_of_range)
}

impl Database {
    /// Headline numbers: total, spent on `today` (UTC date), count, average
    pub fn dashboard_stats(&self, today: NaiveDate) -> Result<DashboardStats> {
        let expenses = self.all_expenses()?;

        let total_spent = checked_total(expenses.iter().map(|e| e.amount))?;
        let today_spent = checked_total(
            expenses
                .iter()
                .filter(|e| e.date.date_naive() == today)
                .map(|e| e.amount),
        )?;
        let total_receipts = expenses.len() as i64;
        let average_per_receipt = if total_receipts > 0 {
            (total_spent / Decimal::from(total_receipts)).round_dp(2)
        } else {
            Decimal::ZERO
        };

        Ok(DashboardStats {
            total_spent,
            today_spent,
            total_receipts,
            average_per_receipt,
        })
    }

    /// Total per main category, largest first
    pub fn spending_by_category(&self) -> Result<Vec<CategorySpend>> {
        let mut totals: HashMap<String, Decimal> = HashMap::new();
        for expense in self.all_expenses()? {
            let total = totals.entry(expense.category).or_insert(Decimal::ZERO);
            *total = total.checked_add(expense.amount).ok_or_else(out_of_range)?;
        }

        let mut breakdown: Vec<CategorySpend> = totals
            .into_iter()
            .map(|(category, total)| CategorySpend { category, total })
            .collect();
        breakdown.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));

        Ok(breakdown)
    }
}
