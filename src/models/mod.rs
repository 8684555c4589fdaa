//! Core data models for ZenBudget
//!
//! The per-user budget document, its money and calendar types, and fixed
//! expense items.

pub mod fixed_expense;
pub mod ids;
pub mod money;
pub mod month;
pub mod state;

pub use fixed_expense::{FixedExpenseCategory, FixedExpenseItem, FixedExpenseValidationError};
pub use ids::FixedExpenseId;
pub use money::{Money, MoneyParseError};
pub use month::{
    date_key, days_in_month, is_leap_year, key_for_date, month_key, parse_date_key, Month,
    MonthParseError,
};
pub use state::{BudgetState, ThemeColor, DEFAULT_MONTHLY_BUDGET};
