//! The per-user budget document
//!
//! `BudgetState` is the whole persisted document for one user. It is loaded
//! once per session, replaced wholesale on every edit, and handed to the
//! engine as a read-only snapshot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::fixed_expense::FixedExpenseItem;
use super::money::Money;
use super::month::month_key;

/// Monthly budget a new document starts with
pub const DEFAULT_MONTHLY_BUDGET: Money = Money::from_units(3100);

/// Accent colour preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeColor {
    #[default]
    Violet,
    Blue,
    Emerald,
    Rose,
    Amber,
}

impl ThemeColor {
    pub const ALL: [ThemeColor; 5] = [
        Self::Violet,
        Self::Blue,
        Self::Emerald,
        Self::Rose,
        Self::Amber,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Violet => "violet",
            Self::Blue => "blue",
            Self::Emerald => "emerald",
            Self::Rose => "rose",
            Self::Amber => "amber",
        }
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThemeColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown theme color: {}", wanted))
    }
}

/// Everything the application stores for one user
///
/// Missing fields fall back to their defaults when a document is read, so
/// older or partially written documents still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BudgetState {
    /// Date key -> amount spent that day
    pub expenses: BTreeMap<String, Money>,

    /// Date key -> note for that day
    pub notes: BTreeMap<String, String>,

    /// Month key -> monthly budget override
    pub custom_budgets: BTreeMap<String, Money>,

    /// Month key -> fixed-expense budget override
    pub custom_fixed_budgets: BTreeMap<String, Money>,

    /// Month key -> fixed expenses logged that month, in entry order
    pub monthly_fixed_expenses: BTreeMap<String, Vec<FixedExpenseItem>>,

    pub default_monthly_budget: Money,

    pub default_fixed_budget: Money,

    pub theme_color: ThemeColor,

    pub is_dark_mode: bool,

    pub display_name: String,
}

impl Default for BudgetState {
    fn default() -> Self {
        Self {
            expenses: BTreeMap::new(),
            notes: BTreeMap::new(),
            custom_budgets: BTreeMap::new(),
            custom_fixed_budgets: BTreeMap::new(),
            monthly_fixed_expenses: BTreeMap::new(),
            default_monthly_budget: DEFAULT_MONTHLY_BUDGET,
            default_fixed_budget: Money::zero(),
            theme_color: ThemeColor::default(),
            is_dark_mode: true,
            display_name: String::new(),
        }
    }
}

impl BudgetState {
    /// Effective daily-spending budget for a month
    pub fn monthly_budget(&self, year: i32, month: u32) -> Money {
        self.custom_budgets
            .get(&month_key(year, month))
            .copied()
            .unwrap_or(self.default_monthly_budget)
    }

    /// Effective fixed-expense budget for a month
    pub fn fixed_budget(&self, year: i32, month: u32) -> Money {
        self.custom_fixed_budgets
            .get(&month_key(year, month))
            .copied()
            .unwrap_or(self.default_fixed_budget)
    }

    /// Amount spent on a date (zero when nothing was logged)
    pub fn spent_on(&self, date_key: &str) -> Money {
        self.expenses.get(date_key).copied().unwrap_or_default()
    }

    /// Note for a date (empty when none was written)
    pub fn note_on(&self, date_key: &str) -> &str {
        self.notes.get(date_key).map(String::as_str).unwrap_or("")
    }

    /// Fixed expenses logged for a month key
    pub fn fixed_expenses(&self, month_key: &str) -> &[FixedExpenseItem] {
        self.monthly_fixed_expenses
            .get(month_key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Daily expenses whose date key falls in `year`, in date order
    pub fn expenses_in_year(&self, year: i32) -> impl Iterator<Item = (&String, &Money)> {
        let prefix = format!("{:04}-", year);
        self.expenses
            .iter()
            .filter(move |(date, _)| date.starts_with(&prefix))
    }

    /// Name used when addressing the user
    pub fn greeting_name(&self) -> &str {
        if self.display_name.trim().is_empty() {
            "the user"
        } else {
            self.display_name.trim()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FixedExpenseCategory, FixedExpenseItem};

    #[test]
    fn test_defaults() {
        let state = BudgetState::default();
        assert_eq!(state.default_monthly_budget, Money::from_units(3100));
        assert_eq!(state.default_fixed_budget, Money::zero());
        assert_eq!(state.theme_color, ThemeColor::Violet);
        assert!(state.is_dark_mode);
        assert!(state.expenses.is_empty());
    }

    #[test]
    fn test_budget_resolution() {
        let mut state = BudgetState::default();
        state
            .custom_budgets
            .insert("2025-03".into(), Money::from_units(5000));
        state
            .custom_fixed_budgets
            .insert("2025-03".into(), Money::from_units(900));

        assert_eq!(state.monthly_budget(2025, 3), Money::from_units(5000));
        assert_eq!(state.monthly_budget(2025, 4), Money::from_units(3100));
        assert_eq!(state.fixed_budget(2025, 3), Money::from_units(900));
        assert_eq!(state.fixed_budget(2025, 4), Money::zero());
    }

    #[test]
    fn test_lookups_default_to_empty() {
        let state = BudgetState::default();
        assert_eq!(state.spent_on("2025-01-01"), Money::zero());
        assert_eq!(state.note_on("2025-01-01"), "");
        assert!(state.fixed_expenses("2025-01").is_empty());
        assert_eq!(state.greeting_name(), "the user");
    }

    #[test]
    fn test_expenses_in_year() {
        let mut state = BudgetState::default();
        state.expenses.insert("2024-12-31".into(), Money::from_units(1));
        state.expenses.insert("2025-01-02".into(), Money::from_units(2));
        state.expenses.insert("2025-01-01".into(), Money::from_units(3));

        let dates: Vec<_> = state.expenses_in_year(2025).map(|(d, _)| d.as_str()).collect();
        assert_eq!(dates, vec!["2025-01-01", "2025-01-02"]);
    }

    #[test]
    fn test_document_layout() {
        let mut state = BudgetState::default();
        state.expenses.insert("2025-01-10".into(), Money::from_units(500));
        state.monthly_fixed_expenses.insert(
            "2025-01".into(),
            vec![FixedExpenseItem::new(
                FixedExpenseCategory::Rent,
                Money::from_units(1200),
                "",
            )],
        );

        let value = serde_json::to_value(&state).unwrap();
        for field in [
            "expenses",
            "notes",
            "customBudgets",
            "customFixedBudgets",
            "monthlyFixedExpenses",
            "defaultMonthlyBudget",
            "defaultFixedBudget",
            "themeColor",
            "isDarkMode",
            "displayName",
        ] {
            assert!(value.get(field).is_some(), "missing {}", field);
        }
        assert_eq!(value["expenses"]["2025-01-10"], 500);
        assert_eq!(value["themeColor"], "violet");
    }

    #[test]
    fn test_partial_document_merges_over_defaults() {
        let json = r#"{"expenses": {"2025-02-01": 1250}, "displayName": "Asha"}"#;
        let state: BudgetState = serde_json::from_str(json).unwrap();
        assert_eq!(state.spent_on("2025-02-01"), Money::from_units(1250));
        assert_eq!(state.display_name, "Asha");
        assert_eq!(state.default_monthly_budget, DEFAULT_MONTHLY_BUDGET);
        assert!(state.is_dark_mode);
    }

    #[test]
    fn test_amounts_are_stored_in_currency_units() {
        let json = r#"{"expenses": {"2025-01-01": 12.5}, "defaultMonthlyBudget": 3100}"#;
        let state: BudgetState = serde_json::from_str(json).unwrap();
        assert_eq!(state.spent_on("2025-01-01"), Money::from_cents(1250));
        assert_eq!(state.default_monthly_budget, Money::from_units(3100));

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["expenses"]["2025-01-01"], 12.5);
        assert_eq!(value["defaultMonthlyBudget"], 3100);

        let reloaded: BudgetState = serde_json::from_value(value).unwrap();
        assert_eq!(reloaded, state);
    }
}
