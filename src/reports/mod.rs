//! Reports module for ZenBudget
//!
//! Month and year views over the computed carry-over table. Both render to
//! the terminal and to CSV.

pub mod month;
pub mod year;

pub use month::{DayReportRow, MonthReport};
pub use year::YearReport;
