//! Receipt scanning
//!
//! A [`ReceiptScanner`] turns a photo of a receipt into an amount, a
//! category and a short note, which the caller then logs as a day's expense.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BudgetError, BudgetResult};
use crate::models::Money;

/// What a receipt scan extracted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptData {
    pub amount: Money,
    pub category: String,
    pub note: String,
}

impl ReceiptData {
    /// Note to store with the expense, e.g. `"Food: Cafe Luna"`
    pub fn expense_note(&self) -> String {
        match (self.category.is_empty(), self.note.is_empty()) {
            (true, _) => self.note.clone(),
            (false, true) => self.category.clone(),
            (false, false) => format!("{}: {}", self.category, self.note),
        }
    }
}

/// Extracts expense details from a receipt image
pub trait ReceiptScanner {
    fn scan(&self, image: &[u8], mime_type: &str) -> BudgetResult<ReceiptData>;
}

/// Image MIME type from a file extension
pub fn mime_type_for(path: &Path) -> BudgetResult<&'static str> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "png" => Ok("image/png"),
        "webp" => Ok("image/webp"),
        "heic" => Ok("image/heic"),
        "gif" => Ok("image/gif"),
        _ => Err(BudgetError::Validation(format!(
            "Unsupported receipt image type: {}",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_for() {
        assert_eq!(mime_type_for(Path::new("r.JPG")).unwrap(), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("scan.png")).unwrap(), "image/png");
        assert!(mime_type_for(Path::new("receipt.pdf")).is_err());
        assert!(mime_type_for(Path::new("receipt")).is_err());
    }

    #[test]
    fn test_expense_note() {
        let mut data = ReceiptData {
            amount: Money::from_units(12),
            category: "Food".into(),
            note: "Cafe Luna".into(),
        };
        assert_eq!(data.expense_note(), "Food: Cafe Luna");

        data.note.clear();
        assert_eq!(data.expense_note(), "Food");

        data.category.clear();
        data.note = "Taxi".into();
        assert_eq!(data.expense_note(), "Taxi");
    }
}
