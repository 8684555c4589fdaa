//! Expense CLI commands
//!
//! Log, clear and list daily spending.

use clap::Subcommand;

use super::session::{parse_date_arg, parse_month_arg, Session};
use crate::display::format_expense_list;
use crate::error::BudgetResult;
use crate::models::Money;
use crate::services::ExpenseService;

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Set the amount spent on a day (replaces any previous amount)
    Set {
        /// Date (YYYY-MM-DD, "today" or "yesterday")
        date: String,
        /// Amount (e.g., "120" or "120.50")
        amount: String,
        /// Note for the day (keeps the existing note when omitted)
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Add to the amount spent on a day
    Add {
        /// Amount to add
        amount: String,
        /// Date (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Note to append
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Remove a day's amount and note
    Clear {
        /// Date (YYYY-MM-DD)
        date: String,
    },

    /// List the days with spending in a month
    #[command(alias = "ls")]
    List {
        /// Month (e.g., "2025-01", "current", "last")
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(session: &mut Session, cmd: ExpenseCommands) -> BudgetResult<()> {
    match cmd {
        ExpenseCommands::Set { date, amount, note } => {
            let date = parse_date_arg(Some(&date))?;
            let amount = Money::parse(&amount)?;
            let note = note.unwrap_or_else(|| session.state().note_on(&date).to_string());

            let patch = ExpenseService::new(session.state()).set_expense(&date, amount, &note)?;
            session.commit(patch);

            println!(
                "{}: spent {}",
                date,
                session.state().spent_on(&date).format_with_symbol(session.currency())
            );
        }
        ExpenseCommands::Add { amount, date, note } => {
            let date = parse_date_arg(date.as_deref())?;
            let amount = Money::parse(&amount)?;

            let patch = ExpenseService::new(session.state()).add_to_expense(
                &date,
                amount,
                note.as_deref().unwrap_or(""),
            )?;
            session.commit(patch);

            println!(
                "{}: spent {} (added {})",
                date,
                session.state().spent_on(&date).format_with_symbol(session.currency()),
                amount.format_with_symbol(session.currency())
            );
        }
        ExpenseCommands::Clear { date } => {
            let date = parse_date_arg(Some(&date))?;
            let patch = ExpenseService::new(session.state()).clear_expense(&date)?;
            session.commit(patch);
            println!("Cleared {}", date);
        }
        ExpenseCommands::List { month } => {
            let month = parse_month_arg(month.as_deref())?;
            print!(
                "{}",
                format_expense_list(session.state(), month, session.currency())
            );
        }
    }

    Ok(())
}
