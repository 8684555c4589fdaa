//! Monthly and yearly aggregation
//!
//! Summaries always read `spent` from the computed day table, so a summary
//! can never disagree with the rows it is shown next to.

use serde::{Deserialize, Serialize};

use super::carryover::{ending_balance, month_days, YearData};
use crate::models::{month_key, BudgetState, Money};

/// Totals for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,

    /// Effective daily-spending budget
    pub budget: Money,

    pub total_daily_spent: Money,

    pub total_fixed_spent: Money,

    /// Daily plus fixed
    pub total_spent: Money,

    /// Budget minus daily spend only; fixed spend has its own bucket
    pub remaining: Money,

    /// Daily spend as a percentage of budget (0 when budget is 0)
    pub percent_used: f64,

    /// Effective fixed-expense budget
    pub fixed_budget: Money,

    pub fixed_remaining: Money,
}

impl MonthlySummary {
    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// Summarise one month from the state and its computed day table
pub fn get_monthly_summary(
    year: i32,
    month: u32,
    state: &BudgetState,
    daily_data: &YearData,
) -> MonthlySummary {
    let budget = state.monthly_budget(year, month);

    let total_daily_spent: Money = month_days(year, month, daily_data)
        .into_iter()
        .map(|day| day.spent)
        .sum();

    let total_fixed_spent: Money = state
        .fixed_expenses(&month_key(year, month))
        .iter()
        .map(|item| item.amount)
        .sum();

    let fixed_budget = state.fixed_budget(year, month);

    MonthlySummary {
        year,
        month,
        budget,
        total_daily_spent,
        total_fixed_spent,
        total_spent: total_daily_spent + total_fixed_spent,
        remaining: budget - total_daily_spent,
        percent_used: total_daily_spent.percent_of(budget),
        fixed_budget,
        fixed_remaining: fixed_budget - total_fixed_spent,
    }
}

/// Totals for a whole year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSummary {
    pub year: i32,
    pub months: Vec<MonthlySummary>,
    pub total_budget: Money,
    pub total_daily_spent: Money,
    pub total_fixed_spent: Money,
    pub total_spent: Money,
    /// Total budget minus total daily spend
    pub yearly_savings: Money,
    /// December's ending carry-over balance
    pub closing_balance: Money,
}

impl YearSummary {
    /// Daily spend across the year as a percentage of the year's budget
    pub fn percent_used(&self) -> f64 {
        self.total_daily_spent.percent_of(self.total_budget)
    }

    /// Month with the highest combined spend, if anything was spent
    pub fn busiest_month(&self) -> Option<&MonthlySummary> {
        self.months
            .iter()
            .filter(|m| m.total_spent.is_positive())
            .max_by_key(|m| m.total_spent)
    }
}

/// Summarise all twelve months of a computed year
pub fn get_year_summary(year: i32, state: &BudgetState, daily_data: &YearData) -> YearSummary {
    let months: Vec<MonthlySummary> = (1..=12)
        .map(|month| get_monthly_summary(year, month, state, daily_data))
        .collect();

    let total_budget: Money = months.iter().map(|m| m.budget).sum();
    let total_daily_spent: Money = months.iter().map(|m| m.total_daily_spent).sum();
    let total_fixed_spent: Money = months.iter().map(|m| m.total_fixed_spent).sum();

    YearSummary {
        year,
        total_budget,
        total_daily_spent,
        total_fixed_spent,
        total_spent: total_daily_spent + total_fixed_spent,
        yearly_savings: total_budget - total_daily_spent,
        closing_balance: ending_balance(year, 12, daily_data),
        months,
    }
}
