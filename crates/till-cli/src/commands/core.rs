//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `load_taxonomy` - Category taxonomy (override file or built-in)
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use till_core::categories::{default_config_path, Taxonomy};
use till_core::db::Database;

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

/// Load the category taxonomy, preferring the user's override file
pub fn load_taxonomy() -> Result<Taxonomy> {
    Taxonomy::load().context("Failed to load expense categories")
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path, no_encrypt)?;
    let existing = db.count_expenses()?;
    if existing > 0 {
        println!("   Found {} saved expenses", existing);
    }

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    match default_config_path() {
        Some(path) if path.exists() => println!("   🗂️  Categories: {}", path.display()),
        Some(path) => println!(
            "   🗂️  Categories: built-in (override at {})",
            path.display()
        ),
        None => println!("   🗂️  Categories: built-in"),
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Scan a receipt: till scan --category Food --image receipt.jpg");
    println!("  2. Save it: till add --category Food --subcategory Groceries --image receipt.jpg");
    println!("  3. Start web UI: till serve");

    Ok(())
}
