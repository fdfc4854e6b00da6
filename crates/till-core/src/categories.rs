//! Expense category taxonomy
//!
//! Main categories with their subcategories, used for pickers and for
//! validating saved expenses.
//!
//! ## Configuration Resolution
//!
//! 1. Check for override in data dir (~/.local/share/till/config/categories.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default taxonomy (compiled into binary)
const DEFAULT_TAXONOMY: &str = include_str!("../../../config/categories.toml");

/// Main category that enables rent detection
pub const HOUSING: &str = "Housing";

/// A main category and its subcategories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub subcategories: Vec<String>,
}

/// Ordered set of main categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Taxonomy {
    categories: Vec<Category>,
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawTaxonomy {
    #[serde(default)]
    category: Vec<Category>,
}

impl Taxonomy {
    /// Load the override file if present, else the embedded defaults
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => Self::from_toml(DEFAULT_TAXONOMY),
        }
    }

    /// Load from an explicit file
    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading category taxonomy");
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: RawTaxonomy = toml::from_str(content)?;

        if raw.category.is_empty() {
            return Err(Error::Config("Taxonomy has no categories".to_string()));
        }
        for (i, cat) in raw.category.iter().enumerate() {
            if cat.name.trim().is_empty() {
                return Err(Error::Config(format!("Category #{} has no name", i + 1)));
            }
            if cat.subcategories.is_empty() {
                return Err(Error::Config(format!(
                    "Category '{}' has no subcategories",
                    cat.name
                )));
            }
            if raw.category[..i].iter().any(|c| c.name == cat.name) {
                return Err(Error::Config(format!("Duplicate category '{}'", cat.name)));
            }
        }

        Ok(Self {
            categories: raw.category,
        })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Main category names in declaration order
    pub fn main_categories(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn subcategories(&self, main: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|c| c.name == main)
            .map(|c| c.subcategories.as_slice())
    }

    pub fn contains(&self, main: &str, sub: &str) -> bool {
        self.subcategories(main)
            .map(|subs| subs.iter().any(|s| s == sub))
            .unwrap_or(false)
    }

    /// Check that a category pair exists
    pub fn validate(&self, main: &str, sub: &str) -> Result<()> {
        let subs = self
            .subcategories(main)
            .ok_or_else(|| Error::InvalidData(format!("Unknown category: {}", main)))?;
        if !subs.iter().any(|s| s == sub) {
            return Err(Error::InvalidData(format!(
                "Unknown subcategory '{}' for {}",
                sub, main
            )));
        }
        Ok(())
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::from_toml(DEFAULT_TAXONOMY).expect("embedded taxonomy is valid")
    }
}

/// Get the default taxonomy override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("till").join("config").join("categories.toml"))
}
