//! CSV export of a year's expenses
//!
//! Daily expenses come first in date order, then fixed expenses grouped by
//! month. Fixed rows carry the month key as their date.

use std::io::Write;

use serde::Serialize;

use crate::error::BudgetResult;
use crate::models::BudgetState;

/// Category written for daily expenses
const DAILY_CATEGORY: &str = "General";

/// One exported line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CsvRow {
    pub date: String,
    #[serde(rename = "Type")]
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub note: String,
}

/// Rows for `year`, in export order
pub fn year_rows(state: &BudgetState, year: i32) -> Vec<CsvRow> {
    let daily = state.expenses_in_year(year).map(|(date, amount)| CsvRow {
        date: date.clone(),
        kind: "Daily".into(),
        category: DAILY_CATEGORY.into(),
        amount: amount.to_string(),
        note: state.note_on(date).to_string(),
    });

    let prefix = format!("{:04}-", year);
    let fixed = state
        .monthly_fixed_expenses
        .iter()
        .filter(|(month_key, _)| month_key.starts_with(&prefix))
        .flat_map(|(month_key, items)| {
            items.iter().map(move |item| CsvRow {
                date: month_key.clone(),
                kind: "Fixed".into(),
                category: item.category.to_string(),
                amount: item.amount.to_string(),
                note: item.note.clone(),
            })
        });

    daily.chain(fixed).collect()
}

const CSV_HEADER: [&str; 5] = ["Date", "Type", "Category", "Amount", "Note"];

/// Write a year's expenses as CSV, returning the number of data rows
pub fn export_year_csv<W: Write>(state: &BudgetState, year: i32, writer: W) -> BudgetResult<usize> {
    let rows = year_rows(state, year);

    let mut csv_writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;
    for row in &rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;

    tracing::info!(year, rows = rows.len(), "exported CSV");
    Ok(rows.len())
}

/// `zenbudget_export_<year>.csv`
pub fn default_csv_file_name(year: i32) -> String {
    format!("zenbudget_export_{}.csv", year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FixedExpenseCategory, FixedExpenseItem, Money};

    fn sample_state() -> BudgetState {
        let mut state = BudgetState::default();
        state
            .expenses
            .insert("2025-02-01".into(), Money::from_cents(10050));
        state.expenses.insert("2025-01-15".into(), Money::from_units(40));
        state.expenses.insert("2024-12-31".into(), Money::from_units(99));
        state
            .notes
            .insert("2025-01-15".into(), "Movies, popcorn".into());
        state.monthly_fixed_expenses.insert(
            "2025-01".into(),
            vec![FixedExpenseItem::new(
                FixedExpenseCategory::Rent,
                Money::from_units(900),
                "Flat",
            )],
        );
        state
    }

    #[test]
    fn test_row_order_and_year_filter() {
        let rows = year_rows(&sample_state(), 2025);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].date, "2025-01-15");
        assert_eq!(rows[1].date, "2025-02-01");
        assert_eq!(rows[1].amount, "100.50");
        assert_eq!(rows[2].kind, "Fixed");
        assert_eq!(rows[2].date, "2025-01");
        assert_eq!(rows[2].category, "Rent");
    }

    #[test]
    fn test_csv_output_quotes_notes() {
        let mut buffer = Vec::new();
        let count = export_year_csv(&sample_state(), 2025, &mut buffer).unwrap();
        assert_eq!(count, 3);

        let output = String::from_utf8(buffer).unwrap();
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("Date,Type,Category,Amount,Note"));
        assert_eq!(output.matches("Date,Type").count(), 1);
        assert_eq!(
            lines.next(),
            Some("2025-01-15,Daily,General,40.00,\"Movies, popcorn\"")
        );
    }

    #[test]
    fn test_empty_year_still_has_header() {
        let mut buffer = Vec::new();
        let count = export_year_csv(&BudgetState::default(), 2030, &mut buffer).unwrap();
        assert_eq!(count, 0);
        assert_eq!(String::from_utf8(buffer).unwrap().trim(), "Date,Type,Category,Amount,Note");
    }

    #[test]
    fn test_default_file_name() {
        assert_eq!(default_csv_file_name(2025), "zenbudget_export_2025.csv");
    }
}
