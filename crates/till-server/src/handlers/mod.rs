//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod categories;
pub mod dashboard;
pub mod expenses;
pub mod export;
pub mod receipts;

// Re-export all handlers for use in router
pub use categories::*;
pub use dashboard::*;
pub use expenses::*;
pub use export::*;
pub use receipts::*;
