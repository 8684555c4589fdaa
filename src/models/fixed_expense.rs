//! Fixed monthly expenses
//!
//! Rent, bills, groceries and travel are logged per month rather than per day
//! and are tracked against their own budget bucket. They never feed the daily
//! carry-over chain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::FixedExpenseId;
use super::money::Money;

/// Category of a fixed expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FixedExpenseCategory {
    #[default]
    Grocery,
    Travel,
    Rent,
    Bills,
    Other,
}

impl FixedExpenseCategory {
    /// All categories, in display order
    pub const ALL: [FixedExpenseCategory; 5] = [
        Self::Grocery,
        Self::Travel,
        Self::Bills,
        Self::Rent,
        Self::Other,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Grocery => "Grocery",
            Self::Travel => "Travel",
            Self::Rent => "Rent",
            Self::Bills => "Bills",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for FixedExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FixedExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                format!(
                    "Unknown fixed expense category '{}' (expected one of: Grocery, Travel, Bills, Rent, Other)",
                    wanted
                )
            })
    }
}

/// A single fixed expense logged against a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedExpenseItem {
    pub id: FixedExpenseId,

    pub category: FixedExpenseCategory,

    pub amount: Money,

    #[serde(default)]
    pub note: String,

    /// When the item was logged (stored under `date` in the document)
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
}

impl FixedExpenseItem {
    /// Create a new item with a fresh id, timestamped now
    pub fn new(category: FixedExpenseCategory, amount: Money, note: impl Into<String>) -> Self {
        Self {
            id: FixedExpenseId::new(),
            category,
            amount,
            note: note.into(),
            created_at: Utc::now(),
        }
    }

    /// Validate the item
    pub fn validate(&self) -> Result<(), FixedExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(FixedExpenseValidationError::NonPositiveAmount);
        }
        Ok(())
    }
}

impl fmt::Display for FixedExpenseItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.category, self.amount)?;
        if !self.note.is_empty() {
            write!(f, " ({})", self.note)?;
        }
        Ok(())
    }
}

/// Validation errors for fixed expense items
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixedExpenseValidationError {
    NonPositiveAmount,
}

impl fmt::Display for FixedExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Fixed expense amount must be positive"),
        }
    }
}

impl std::error::Error for FixedExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str() {
        assert_eq!("rent".parse::<FixedExpenseCategory>().unwrap(), FixedExpenseCategory::Rent);
        assert_eq!(" Bills ".parse::<FixedExpenseCategory>().unwrap(), FixedExpenseCategory::Bills);
        assert!("Coffee".parse::<FixedExpenseCategory>().is_err());
    }

    #[test]
    fn test_validation() {
        let item = FixedExpenseItem::new(FixedExpenseCategory::Rent, Money::from_units(1200), "");
        assert!(item.validate().is_ok());

        let item = FixedExpenseItem::new(FixedExpenseCategory::Rent, Money::zero(), "");
        assert_eq!(
            item.validate(),
            Err(FixedExpenseValidationError::NonPositiveAmount)
        );
    }

    #[test]
    fn test_document_field_names() {
        let item = FixedExpenseItem::new(FixedExpenseCategory::Travel, Money::from_cents(4550), "Train");
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["category"], "Travel");
        assert_eq!(value["amount"], 45.5);
        assert_eq!(value["note"], "Train");
        assert!(value["date"].is_string());
    }

    #[test]
    fn test_display() {
        let item = FixedExpenseItem::new(FixedExpenseCategory::Bills, Money::from_units(60), "Phone");
        assert_eq!(item.to_string(), "Bills 60.00 (Phone)");
    }
}
