//! Year-long daily carry-over calculation
//!
//! Each month's opening balance is the previous month's ending balance
//! (budget plus carried balance minus everything spent). The chain starts at
//! zero every January; December never carries into the next year.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{date_key, days_in_month, BudgetState, Money};

/// Computed figures for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCalculation {
    /// Date key (`YYYY-MM-DD`)
    pub date: String,

    pub day_of_month: u32,

    /// Amount logged for this day
    pub spent: Money,

    /// Running total within the month, inclusive of this day
    pub cumulative_spent: Money,

    /// Budget plus carried balance, minus cumulative spend
    pub remaining_balance: Money,

    /// Balance carried into the month; set on day 1 only
    pub start_balance: Money,

    /// Nominal pacing target: month budget / days in month
    pub daily_limit: Money,

    pub note: String,
}

impl DayCalculation {
    /// Spending on this day went past the daily pacing target
    pub fn is_over_pace(&self) -> bool {
        self.spent.is_positive() && self.spent > self.daily_limit
    }
}

/// Day table for a year, keyed and ordered by date key
pub type YearData = BTreeMap<String, DayCalculation>;

/// Compute every day of `year` from the user's state
///
/// Negative balances are carried forward as-is so overspending in one month
/// reduces what is available in the next.
pub fn calculate_year_data(year: i32, state: &BudgetState) -> YearData {
    let mut result = YearData::new();
    let mut previous_month_balance = Money::zero();

    for month in 1..=12 {
        let monthly_budget = state.monthly_budget(year, month);
        let days = days_in_month(year, month);

        let start_balance = if month == 1 {
            Money::zero()
        } else {
            previous_month_balance
        };

        let total_available = monthly_budget + start_balance;
        let daily_limit = monthly_budget.div_round(i64::from(days));

        let mut cumulative_spent = Money::zero();

        for day in 1..=days {
            let key = date_key(year, month, day);
            let spent = state.spent_on(&key);
            let note = state.note_on(&key).to_string();

            cumulative_spent += spent;

            result.insert(
                key.clone(),
                DayCalculation {
                    date: key,
                    day_of_month: day,
                    spent,
                    cumulative_spent,
                    remaining_balance: total_available - cumulative_spent,
                    start_balance: if day == 1 { start_balance } else { Money::zero() },
                    daily_limit,
                    note,
                },
            );
        }

        previous_month_balance = total_available - cumulative_spent;
    }

    result
}

/// Rows for one month of a computed year, in day order
pub fn month_days(year: i32, month: u32, data: &YearData) -> Vec<&DayCalculation> {
    (1..=days_in_month(year, month))
        .filter_map(|day| data.get(&date_key(year, month, day)))
        .collect()
}

/// Balance a month ends on, read from its last computed row
pub fn ending_balance(year: i32, month: u32, data: &YearData) -> Money {
    data.get(&date_key(year, month, days_in_month(year, month)))
        .map(|day| day.remaining_balance)
        .unwrap_or_default()
}

/// Balance carried into a month, read from its first computed row
pub fn carried_balance(year: i32, month: u32, data: &YearData) -> Money {
    data.get(&date_key(year, month, 1))
        .map(|day| day.start_balance)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{month_key, Month};

    fn state_with(expenses: &[(&str, i64)]) -> BudgetState {
        let mut state = BudgetState::default();
        for (date, units) in expenses {
            state
                .expenses
                .insert(date.to_string(), Money::from_units(*units));
        }
        state
    }

    #[test]
    fn test_empty_state_produces_every_day() {
        for year in [2023, 2024, 2025] {
            let data = calculate_year_data(year, &BudgetState::default());
            let expected: u32 = (1..=12).map(|m| days_in_month(year, m)).sum();
            assert_eq!(data.len(), expected as usize);

            for month in 1..=12 {
                let rows = month_days(year, month, &data);
                assert_eq!(rows.len(), days_in_month(year, month) as usize);
            }
            assert!(data.values().all(|d| d.spent.is_zero()));
            assert!(data.values().all(|d| !d.remaining_balance.is_negative()));
        }
    }

    #[test]
    fn test_unspent_budget_accumulates() {
        let data = calculate_year_data(2025, &BudgetState::default());
        assert_eq!(ending_balance(2025, 1, &data), Money::from_units(3100));
        assert_eq!(carried_balance(2025, 2, &data), Money::from_units(3100));
        assert_eq!(ending_balance(2025, 12, &data), Money::from_units(3100 * 12));
    }

    #[test]
    fn test_overspend_carries_negative_balance() {
        let state = state_with(&[("2025-01-10", 500), ("2025-01-31", 2700)]);
        let data = calculate_year_data(2025, &state);

        let jan_10 = &data["2025-01-10"];
        assert_eq!(jan_10.cumulative_spent, Money::from_units(500));
        assert_eq!(jan_10.remaining_balance, Money::from_units(2600));

        assert_eq!(ending_balance(2025, 1, &data), Money::from_units(-100));

        let feb_1 = &data["2025-02-01"];
        assert_eq!(feb_1.start_balance, Money::from_units(-100));
        assert_eq!(feb_1.remaining_balance, Money::from_units(3000));
        assert_eq!(ending_balance(2025, 2, &data), Money::from_units(3000));
    }

    #[test]
    fn test_start_balance_only_on_first_day() {
        let data = calculate_year_data(2025, &BudgetState::default());
        let march = month_days(2025, 3, &data);
        assert_eq!(march[0].start_balance, Money::from_units(6200));
        assert!(march[1..].iter().all(|d| d.start_balance.is_zero()));
    }

    #[test]
    fn test_each_month_opens_with_previous_ending() {
        let state = state_with(&[
            ("2024-02-29", 4000),
            ("2024-05-05", 120),
            ("2024-07-20", 9999),
            ("2024-11-30", 15),
        ]);
        let data = calculate_year_data(2024, &state);

        for month in 2..=12 {
            assert_eq!(
                carried_balance(2024, month, &data),
                ending_balance(2024, month - 1, &data),
                "month {}",
                month
            );
        }
    }

    #[test]
    fn test_january_never_carries_from_previous_year() {
        let state = state_with(&[("2024-12-01", 10_000)]);
        let previous = calculate_year_data(2024, &state);
        assert!(!ending_balance(2024, 12, &previous).is_zero());

        let data = calculate_year_data(2025, &state);
        let jan_1 = &data["2025-01-01"];
        assert_eq!(jan_1.start_balance, Money::zero());
        assert_eq!(jan_1.remaining_balance, Money::from_units(3100));
    }

    #[test]
    fn test_custom_budget_sets_daily_limit() {
        let mut state = BudgetState::default();
        state
            .custom_budgets
            .insert(month_key(2025, 3), Money::from_units(5000));
        let data = calculate_year_data(2025, &state);

        let march = month_days(2025, 3, &data);
        assert!(march
            .iter()
            .all(|d| d.daily_limit == Money::from_units(5000).div_round(31)));

        let feb_ending = ending_balance(2025, 2, &data);
        assert_eq!(
            march[30].remaining_balance,
            Money::from_units(5000) + feb_ending
        );
    }

    #[test]
    fn test_daily_limit_ignores_carry_over() {
        let quiet = calculate_year_data(2025, &BudgetState::default());
        let heavy = calculate_year_data(2025, &state_with(&[("2025-01-03", 2000)]));

        let month = Month::new(2025, 2).unwrap();
        assert_ne!(
            carried_balance(2025, 2, &quiet),
            carried_balance(2025, 2, &heavy)
        );
        for key in month.date_keys() {
            assert_eq!(quiet[&key].daily_limit, heavy[&key].daily_limit);
        }
        assert_eq!(quiet["2025-02-01"].daily_limit, Money::from_cents(11071));
    }

    #[test]
    fn test_notes_attach_to_days() {
        let mut state = state_with(&[("2025-04-02", 40)]);
        state.notes.insert("2025-04-02".into(), "Movie".into());
        let data = calculate_year_data(2025, &state);
        assert_eq!(data["2025-04-02"].note, "Movie");
        assert_eq!(data["2025-04-03"].note, "");
    }

    #[test]
    fn test_over_pace() {
        let state = state_with(&[("2025-01-05", 150), ("2025-01-06", 50)]);
        let data = calculate_year_data(2025, &state);
        assert!(data["2025-01-05"].is_over_pace());
        assert!(!data["2025-01-06"].is_over_pace());
        assert!(!data["2025-01-07"].is_over_pace());
    }

    #[test]
    fn test_calculation_is_deterministic() {
        let state = state_with(&[("2025-06-01", 77), ("2025-09-09", 12)]);
        let first = calculate_year_data(2025, &state);
        let second = calculate_year_data(2025, &state);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_fractional_amounts_keep_cent_precision() {
        let mut state = BudgetState::default();
        state
            .expenses
            .insert("2025-01-01".into(), Money::from_cents(1999));
        state
            .expenses
            .insert("2025-01-02".into(), Money::from_cents(1));
        let data = calculate_year_data(2025, &state);
        assert_eq!(data["2025-01-02"].cumulative_spent, Money::from_units(20));
        assert_eq!(
            data["2025-01-02"].remaining_balance,
            Money::from_units(3080)
        );
    }
}
