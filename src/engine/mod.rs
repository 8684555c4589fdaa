//! Budget calculation engine
//!
//! Pure functions from a year and a [`BudgetState`](crate::models::BudgetState)
//! snapshot to the day table and month/year summaries. Nothing here performs
//! I/O or mutates its input, and output is recomputed on every state change
//! rather than stored.

pub mod carryover;
pub mod summary;

pub use carryover::{
    calculate_year_data, carried_balance, ending_balance, month_days, DayCalculation, YearData,
};
pub use summary::{get_monthly_summary, get_year_summary, MonthlySummary, YearSummary};
