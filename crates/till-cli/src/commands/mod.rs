//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `categories` - Print the expense taxonomy
//! - `core` - Init and shared utilities (open_db, load_taxonomy)
//! - `expenses` - Expense commands (add, list, delete)
//! - `export` - CSV/JSON export
//! - `reports` - Dashboard summary
//! - `scan` - Receipt total detection
//! - `serve` - Web server command

pub mod categories;
pub mod core;
pub mod expenses;
pub mod export;
pub mod reports;
pub mod scan;
pub mod serve;

// Re-export command functions for main.rs
pub use categories::*;
pub use core::*;
pub use expenses::*;
pub use export::*;
pub use reports::*;
pub use scan::*;
pub use serve::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
