//! Display formatting for terminal output
//!
//! Table rendering for expense listings and shared helpers for reports.

pub mod expense;
pub mod report;

pub use expense::{format_expense_list, format_fixed_expense_list};
pub use report::{double_separator, format_bar, format_money_colored, format_percentage, separator, truncate};
