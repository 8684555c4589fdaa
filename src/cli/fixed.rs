//! Fixed expense CLI commands

use clap::Subcommand;

use super::session::{parse_month_arg, Session};
use crate::display::format_fixed_expense_list;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{FixedExpenseCategory, Money};
use crate::services::ExpenseService;

/// Fixed expense subcommands
#[derive(Subcommand, Debug)]
pub enum FixedCommands {
    /// Log a fixed expense for a month
    Add {
        /// Month (e.g., "2025-01", "current")
        month: String,
        /// Category (Grocery, Travel, Bills, Rent, Other)
        category: String,
        /// Amount
        amount: String,
        /// Note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Delete a fixed expense
    #[command(alias = "rm")]
    Delete {
        /// Month the expense was logged in
        month: String,
        /// Expense ID (e.g., "fx-1a2b3c4d")
        id: String,
    },

    /// List a month's fixed expenses
    #[command(alias = "ls")]
    List {
        /// Month (defaults to current)
        month: Option<String>,
    },
}

/// Handle a fixed expense command
pub fn handle_fixed_command(session: &mut Session, cmd: FixedCommands) -> BudgetResult<()> {
    match cmd {
        FixedCommands::Add {
            month,
            category,
            amount,
            note,
        } => {
            let month = parse_month_arg(Some(&month))?;
            let category: FixedExpenseCategory =
                category.parse().map_err(BudgetError::Validation)?;
            let amount = Money::parse(&amount)?;

            let patch = ExpenseService::new(session.state()).add_fixed_expense(
                month,
                category,
                amount,
                note.as_deref().unwrap_or(""),
            )?;
            let id = patch
                .audit
                .first()
                .map(|entry| entry.entity_id.clone())
                .unwrap_or_default();
            session.commit(patch);

            println!(
                "Logged {} {} for {} [{}]",
                category,
                amount.format_with_symbol(session.currency()),
                month.friendly(),
                id
            );
        }
        FixedCommands::Delete { month, id } => {
            let month = parse_month_arg(Some(&month))?;
            let patch = ExpenseService::new(session.state()).delete_fixed_expense(month, &id)?;
            session.commit(patch);
            println!("Deleted fixed expense {}", id);
        }
        FixedCommands::List { month } => {
            let month = parse_month_arg(month.as_deref())?;
            let items = session.state().fixed_expenses(&month.key());
            print!(
                "{}",
                format_fixed_expense_list(items, month, session.currency())
            );
        }
    }

    Ok(())
}
