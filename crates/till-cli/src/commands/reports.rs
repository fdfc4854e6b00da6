//! Dashboard command

use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;
use till_core::db::Database;

pub fn cmd_dashboard(db: &Database) -> Result<()> {
    let stats = db.dashboard_stats(Utc::now().date_naive())?;
    let by_category = db.spending_by_category()?;

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│           🧾 Till Dashboard             │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  💰 Total Spent:       ${:.2}", stats.total_spent);
    println!("  📅 Today:             ${:.2}", stats.today_spent);
    println!("  📄 Total Receipts:    {}", stats.total_receipts);
    println!("  🎯 Avg per Receipt:   ${:.2}", stats.average_per_receipt);
    println!();

    if by_category.is_empty() {
        println!("  No expenses yet. Run 'till add' to save one.");
        return Ok(());
    }

    println!("  📊 Spending by Category");
    println!("     ─────────────────────────────────────────");
    for entry in &by_category {
        let share = if stats.total_spent > Decimal::ZERO {
            // Ratio is at most 1, so scaling it cannot overflow
            (entry.total / stats.total_spent * Decimal::ONE_HUNDRED).round_dp(1)
        } else {
            Decimal::ZERO
        };
        println!(
            "     {:<24} {:>12} {:>6}%",
            entry.category,
            format!("${:.2}", entry.total),
            share
        );
    }
    println!();

    Ok(())
}
