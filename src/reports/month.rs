//! Month Report
//!
//! Day-by-day view of one month: what was spent, the running total, and the
//! balance left after carry-over, followed by the month's fixed expenses.

use std::io::Write;

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::display::report::{double_separator, format_money_colored, format_percentage, separator, truncate};
use crate::engine::{calculate_year_data, carried_balance, get_monthly_summary, month_days, MonthlySummary};
use crate::error::BudgetResult;
use crate::models::{date_key, BudgetState, FixedExpenseItem, Money, Month};

/// One day of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayReportRow {
    pub date: String,
    pub day: u32,
    pub spent: Money,
    pub cumulative: Money,
    pub remaining: Money,
    pub note: String,
    pub over_pace: bool,
}

#[derive(Tabled)]
struct DayTableRow {
    #[tabled(rename = "Day")]
    day: u32,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Cumulative")]
    cumulative: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "")]
    flag: &'static str,
    #[tabled(rename = "Note")]
    note: String,
}

/// Month Report
#[derive(Debug, Clone)]
pub struct MonthReport {
    pub month: Month,
    pub summary: MonthlySummary,
    /// Balance carried in from the previous month
    pub carried: Money,
    /// Month budget spread over its days
    pub daily_target: Money,
    pub days: Vec<DayReportRow>,
    pub fixed_items: Vec<FixedExpenseItem>,
}

impl MonthReport {
    /// Generate the report from a state snapshot
    pub fn generate(state: &BudgetState, month: Month) -> Self {
        let data = calculate_year_data(month.year, state);
        let summary = get_monthly_summary(month.year, month.month, state, &data);

        let days: Vec<DayReportRow> = month_days(month.year, month.month, &data)
            .into_iter()
            .map(|day| DayReportRow {
                date: day.date.clone(),
                day: day.day_of_month,
                spent: day.spent,
                cumulative: day.cumulative_spent,
                remaining: day.remaining_balance,
                note: day.note.clone(),
                over_pace: day.is_over_pace(),
            })
            .collect();

        let daily_target = data
            .get(&date_key(month.year, month.month, 1))
            .map(|day| day.daily_limit)
            .unwrap_or_default();

        Self {
            month,
            carried: carried_balance(month.year, month.month, &data),
            daily_target,
            days,
            fixed_items: state.fixed_expenses(&month.key()).to_vec(),
            summary,
        }
    }

    /// Balance at the end of the month including carry-over
    pub fn ending_balance(&self) -> Money {
        self.days.last().map(|d| d.remaining).unwrap_or_default()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let money = |m: Money| m.format_with_symbol(symbol);
        let mut output = String::new();

        output.push_str(&format!("Month Report - {}\n", self.month.friendly()));
        output.push_str(&double_separator(60));
        output.push('\n');
        output.push_str(&format!("Budget:          {}\n", money(self.summary.budget)));
        output.push_str(&format!("Carried in:      {}\n", format_money_colored(self.carried, symbol)));
        output.push_str(&format!("Daily target:    {}\n", money(self.daily_target)));
        output.push_str(&format!(
            "Spent:           {} ({} of budget)\n",
            money(self.summary.total_daily_spent),
            format_percentage(self.summary.percent_used)
        ));
        output.push_str(&format!(
            "Ending balance:  {}\n\n",
            format_money_colored(self.ending_balance(), symbol)
        ));

        let rows: Vec<DayTableRow> = self
            .days
            .iter()
            .map(|day| DayTableRow {
                day: day.day,
                spent: if day.spent.is_zero() { String::new() } else { money(day.spent) },
                cumulative: money(day.cumulative),
                remaining: money(day.remaining),
                flag: if day.over_pace { "!" } else { "" },
                note: truncate(&day.note, 30),
            })
            .collect();
        output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        output.push('\n');

        output.push_str(&format!("\nFixed expenses\n{}\n", separator(60)));
        if self.fixed_items.is_empty() {
            output.push_str("  (none)\n");
        }
        for item in &self.fixed_items {
            output.push_str(&format!(
                "  {:<10} {:>12}  {}\n",
                item.category.to_string(),
                money(item.amount),
                truncate(&item.note, 30)
            ));
        }
        output.push_str(&format!(
            "  Fixed budget {} | spent {} | remaining {}\n",
            money(self.summary.fixed_budget),
            money(self.summary.total_fixed_spent),
            format_money_colored(self.summary.fixed_remaining, symbol)
        ));

        output
    }

    /// Export the day rows to CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> BudgetResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["Date", "Spent", "Cumulative", "Remaining", "Over Pace", "Note"])?;

        for day in &self.days {
            csv_writer.write_record([
                day.date.clone(),
                day.spent.to_string(),
                day.cumulative.to_string(),
                day.remaining.to_string(),
                day.over_pace.to_string(),
                day.note.clone(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
