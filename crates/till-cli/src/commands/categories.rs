//! Category listing command

use anyhow::Result;
use till_core::categories::{Taxonomy, HOUSING};

pub fn cmd_categories(taxonomy: &Taxonomy) -> Result<()> {
    println!();
    println!("🗂️  Expense Categories");
    println!("   ─────────────────────────────");

    for category in taxonomy.categories() {
        let marker = if category.name == HOUSING {
            "  (rent detection)"
        } else {
            ""
        };
        println!("   {}{}", category.name, marker);
        for sub in &category.subcategories {
            println!("      • {}", sub);
        }
    }

    println!();
    Ok(())
}
