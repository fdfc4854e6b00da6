//! Domain models for Till

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One span of text recognized by the OCR engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// Bounding region as reported by the engine (corner points)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<[f64; 2]>>,
    pub text: String,
    #[serde(default)]
    pub confidence: f64,
}

impl TextFragment {
    pub fn new(text: impl Into<String>, confidence: f64) -> Self {
        Self {
            bbox: None,
            text: text.into(),
            confidence,
        }
    }
}

/// A monetary value found in OCR text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountCandidate {
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    /// The substring as it appeared in the OCR text
    pub raw_text: String,
    /// Lowercased fragment text, or a placeholder for the keyword-free pass
    pub context: String,
}

/// Which branch of the selection cascade produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionRule {
    /// Housing receipt mentioning rent; picks within the monthly-rent band
    RentOverride,
    /// Largest candidate amount
    LargestAmount,
    /// Nothing usable in the OCR text
    NoTotal,
}

impl DetectionRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RentOverride => "rent_override",
            Self::LargestAmount => "largest_amount",
            Self::NoTotal => "no_total",
        }
    }
}

impl std::fmt::Display for DetectionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of total detection for one receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    #[serde(with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    /// Human-readable justification, suitable for direct display
    pub reason: String,
    pub rule: DetectionRule,
}

impl DetectionResult {
    pub fn is_found(&self) -> bool {
        self.amount.is_some()
    }

    /// The amount used to pre-fill the expense form (0 when nothing was found)
    pub fn amount_or_zero(&self) -> Decimal {
        self.amount.unwrap_or(Decimal::ZERO)
    }
}

/// A saved expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub category: String,
    pub subcategory: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub notes: String,
}

/// An expense ready to be inserted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub date: DateTime<Utc>,
    pub category: String,
    pub subcategory: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default)]
    pub notes: String,
}

/// Headline numbers for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_spent: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub today_spent: Decimal,
    pub total_receipts: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub average_per_receipt: Decimal,
}

/// Total spending for one main category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpend {
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}
