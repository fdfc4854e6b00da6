//! Till Core Library
//!
//! Shared functionality for the Till receipt expense tracker:
//! - Receipt total detection from OCR text (candidate extraction + selection)
//! - OCR engine seam with per-image caching
//! - Expense category taxonomy
//! - Expense store (SQLite) with dashboard reports
//! - CSV/JSON export

pub mod categories;
pub mod db;
pub mod detect;
pub mod error;
pub mod expenses;
pub mod export;
pub mod extract;
pub mod models;
pub mod ocr;
pub mod select;

pub use categories::{Category, Taxonomy, HOUSING};
pub use db::Database;
pub use detect::{detect_total, TotalDetector};
pub use error::{Error, Result};
pub use expenses::{record_expense, ExpenseDraft};
pub use export::ExportFormat;
pub use extract::ExtractionMode;
pub use models::{
    AmountCandidate, CategorySpend, DashboardStats, DetectionResult, DetectionRule, Expense,
    NewExpense, TextFragment,
};
pub use ocr::{CachedOcr, CommandOcr, OcrEngine};
