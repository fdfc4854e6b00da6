//! Export functionality for saved expenses
//!
//! Supports:
//! - CSV with a fixed header (`date,category,subcategory,amount,notes`)
//! - Pretty JSON array of expenses

use serde::Serialize;

use crate::db::{Database, DATETIME_FORMAT};
use crate::error::{Error, Result};
use crate::models::Expense;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Json => "application/json",
        }
    }

    /// Download file name for this format
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Csv => "expenses.csv",
            Self::Json => "expenses.json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown export format: {}", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One CSV row
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    date: String,
    category: &'a str,
    subcategory: &'a str,
    amount: String,
    notes: &'a str,
}

/// Render expenses as CSV. An empty list still yields the header line.
pub fn expenses_to_csv(expenses: &[Expense]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if expenses.is_empty() {
        writer.write_record(["date", "category", "subcategory", "amount", "notes"])?;
    }
    for expense in expenses {
        writer.serialize(CsvRow {
            date: expense.date.format(DATETIME_FORMAT).to_string(),
            category: &expense.category,
            subcategory: &expense.subcategory,
            amount: format!("{:.2}", expense.amount.round_dp(2)),
            notes: &expense.notes,
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| Error::InvalidData(format!("CSV is not UTF-8: {}", e)))
}

impl Database {
    /// Export every expense (insertion order) as CSV
    pub fn export_expenses_csv(&self) -> Result<String> {
        expenses_to_csv(&self.all_expenses()?)
    }

    /// Export every expense (insertion order) as pretty JSON
    pub fn export_expenses_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.all_expenses()?)?)
    }

    pub fn export_expenses(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Csv => self.export_expenses_csv(),
            ExportFormat::Json => self.export_expenses_json(),
        }
    }
}
