//! Expense listing tables

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::truncate;
use crate::models::{BudgetState, FixedExpenseItem, Money, Month};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Note")]
    note: String,
}

#[derive(Tabled)]
struct FixedRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Note")]
    note: String,
    #[tabled(rename = "Logged")]
    logged: String,
}

/// Days with a spend or a note in `month`
pub fn format_expense_list(state: &BudgetState, month: Month, symbol: &str) -> String {
    let rows: Vec<ExpenseRow> = month
        .date_keys()
        .filter(|key| state.expenses.contains_key(key) || state.notes.contains_key(key))
        .map(|key| ExpenseRow {
            amount: state.spent_on(&key).format_with_symbol(symbol),
            note: truncate(state.note_on(&key), 40),
            date: key,
        })
        .collect();

    if rows.is_empty() {
        return format!("No expenses logged for {}.\n", month.friendly());
    }

    let total: Money = month.date_keys().map(|key| state.spent_on(&key)).sum();
    format!(
        "{}\n{}\nTotal: {}\n",
        month.friendly(),
        Table::new(rows).with(Style::rounded()),
        total.format_with_symbol(symbol)
    )
}

/// Fixed expenses logged for a month
pub fn format_fixed_expense_list(items: &[FixedExpenseItem], month: Month, symbol: &str) -> String {
    if items.is_empty() {
        return format!("No fixed expenses logged for {}.\n", month.friendly());
    }

    let rows: Vec<FixedRow> = items
        .iter()
        .map(|item| FixedRow {
            id: item.id.to_string(),
            category: item.category.to_string(),
            amount: item.amount.format_with_symbol(symbol),
            note: truncate(&item.note, 30),
            logged: item.created_at.format("%Y-%m-%d").to_string(),
        })
        .collect();

    let total: Money = items.iter().map(|item| item.amount).sum();
    format!(
        "Fixed expenses - {}\n{}\nTotal: {}\n",
        month.friendly(),
        Table::new(rows).with(Style::rounded()),
        total.format_with_symbol(symbol)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FixedExpenseCategory;

    #[test]
    fn test_expense_list() {
        let mut state = BudgetState::default();
        state.expenses.insert("2025-03-02".into(), Money::from_units(120));
        state.notes.insert("2025-03-09".into(), "Fasting".into());
        state.expenses.insert("2025-04-01".into(), Money::from_units(7));

        let output = format_expense_list(&state, Month::new(2025, 3).unwrap(), "₹");
        assert!(output.contains("March 2025"));
        assert!(output.contains("2025-03-02"));
        assert!(output.contains("Fasting"));
        assert!(!output.contains("2025-04-01"));
        assert!(output.contains("Total: ₹120.00"));
    }

    #[test]
    fn test_empty_lists() {
        let month = Month::new(2025, 3).unwrap();
        assert!(format_expense_list(&BudgetState::default(), month, "₹").starts_with("No expenses"));
        assert!(format_fixed_expense_list(&[], month, "₹").starts_with("No fixed expenses"));
    }

    #[test]
    fn test_fixed_list() {
        let items = vec![
            FixedExpenseItem::new(FixedExpenseCategory::Rent, Money::from_units(900), "Flat"),
            FixedExpenseItem::new(FixedExpenseCategory::Bills, Money::from_units(60), ""),
        ];
        let output = format_fixed_expense_list(&items, Month::new(2025, 3).unwrap(), "$");
        assert!(output.contains(&items[0].id.to_string()));
        assert!(output.contains("Rent"));
        assert!(output.contains("Total: $960.00"));
    }
}
