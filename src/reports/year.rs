//! Year Report
//!
//! One row per month with budget, daily and fixed spend, and how much of
//! the budget was used, followed by the year totals.

use std::io::Write;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::display::report::{double_separator, format_bar, format_money_colored, format_percentage};
use crate::engine::{calculate_year_data, get_year_summary, YearSummary};
use crate::error::BudgetResult;
use crate::models::{BudgetState, Month};

#[derive(Tabled)]
struct MonthTableRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Daily")]
    daily: String,
    #[tabled(rename = "Fixed")]
    fixed: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
}

/// Year Report
#[derive(Debug, Clone)]
pub struct YearReport {
    pub summary: YearSummary,
}

impl YearReport {
    pub fn generate(state: &BudgetState, year: i32) -> Self {
        let data = calculate_year_data(year, state);
        Self {
            summary: get_year_summary(year, state, &data),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let money = |m: crate::models::Money| m.format_with_symbol(symbol);
        let summary = &self.summary;
        let mut output = String::new();

        output.push_str(&format!("Year Overview - {}\n", summary.year));
        output.push_str(&double_separator(60));
        output.push('\n');

        let rows: Vec<MonthTableRow> = summary
            .months
            .iter()
            .map(|m| MonthTableRow {
                month: Month { year: m.year, month: m.month }.friendly(),
                budget: money(m.budget),
                daily: money(m.total_daily_spent),
                fixed: money(m.total_fixed_spent),
                total: money(m.total_spent),
                remaining: money(m.remaining),
                used: format!(
                    "{} {}",
                    format_bar(m.percent_used, 100.0, 10),
                    format_percentage(m.percent_used)
                ),
            })
            .collect();
        output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        output.push_str("\n\n");

        output.push_str(&format!("Total budget:     {}\n", money(summary.total_budget)));
        output.push_str(&format!(
            "Daily spend:      {} ({})\n",
            money(summary.total_daily_spent),
            format_percentage(summary.percent_used())
        ));
        output.push_str(&format!("Fixed spend:      {}\n", money(summary.total_fixed_spent)));
        output.push_str(&format!("Total spend:      {}\n", money(summary.total_spent)));
        output.push_str(&format!(
            "Yearly savings:   {}\n",
            format_money_colored(summary.yearly_savings, symbol)
        ));
        output.push_str(&format!(
            "Closing balance:  {}\n",
            format_money_colored(summary.closing_balance, symbol)
        ));
        if let Some(busiest) = summary.busiest_month() {
            output.push_str(&format!(
                "Busiest month:    {} ({})\n",
                Month { year: busiest.year, month: busiest.month }.friendly(),
                money(busiest.total_spent)
            ));
        }

        output
    }

    /// Export the monthly rows to CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> BudgetResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record([
            "Month",
            "Budget",
            "Daily Spent",
            "Fixed Spent",
            "Total Spent",
            "Remaining",
            "Percent Used",
        ])?;

        for m in &self.summary.months {
            csv_writer.write_record([
                Month { year: m.year, month: m.month }.key(),
                m.budget.to_string(),
                m.total_daily_spent.to_string(),
                m.total_fixed_spent.to_string(),
                m.total_spent.to_string(),
                m.remaining.to_string(),
                format!("{:.1}", m.percent_used),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn sample_state() -> BudgetState {
        let mut state = BudgetState::default();
        state.expenses.insert("2025-03-03".into(), Money::from_units(1550));
        state.expenses.insert("2025-07-07".into(), Money::from_units(200));
        state
    }

    #[test]
    fn test_generate() {
        let report = YearReport::generate(&sample_state(), 2025);
        assert_eq!(report.summary.months.len(), 12);
        assert_eq!(report.summary.total_daily_spent, Money::from_units(1750));
        assert_eq!(report.summary.busiest_month().map(|m| m.month), Some(3));
    }

    #[test]
    fn test_format_terminal() {
        let output = YearReport::generate(&sample_state(), 2025).format_terminal("₹");
        assert!(output.contains("Year Overview - 2025"));
        assert!(output.contains("March 2025"));
        assert!(output.contains("50%"));
        assert!(output.contains("Busiest month:    March 2025 (₹1550.00)"));
    }

    #[test]
    fn test_export_csv() {
        let mut buffer = Vec::new();
        YearReport::generate(&sample_state(), 2025)
            .export_csv(&mut buffer)
            .unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[3], "2025-03,3100.00,1550.00,0.00,1550.00,1550.00,50.0");
    }
}
