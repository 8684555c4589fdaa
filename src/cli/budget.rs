//! Budget CLI commands
//!
//! Default and per-month budgets for daily spending and for fixed expenses.

use clap::Subcommand;

use super::session::{parse_month_arg, Session};
use crate::error::BudgetResult;
use crate::models::Money;
use crate::services::ExpenseService;

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Show the effective budgets for a month
    Show {
        /// Month (e.g., "2025-01", "current", "last")
        month: Option<String>,
    },

    /// Set the default monthly budget
    Default {
        /// Amount (e.g., "3100")
        amount: String,
    },

    /// Set the default fixed-expense budget
    FixedDefault {
        /// Amount
        amount: String,
    },

    /// Override the budget for one month
    Set {
        /// Month (e.g., "2025-01")
        month: String,
        /// Amount
        amount: String,
    },

    /// Override the fixed-expense budget for one month
    Fixed {
        /// Month (e.g., "2025-01")
        month: String,
        /// Amount
        amount: String,
    },

    /// Remove a month's overrides
    Clear {
        /// Month (e.g., "2025-01")
        month: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command(session: &mut Session, cmd: BudgetCommands) -> BudgetResult<()> {
    let symbol = session.currency().to_string();

    match cmd {
        BudgetCommands::Show { month } => {
            let month = parse_month_arg(month.as_deref())?;
            let state = session.state();
            let key = month.key();

            println!("Budgets for {}", month.friendly());
            println!(
                "  Monthly: {}{}",
                state.monthly_budget(month.year, month.month).format_with_symbol(&symbol),
                if state.custom_budgets.contains_key(&key) { " (custom)" } else { "" }
            );
            println!(
                "  Fixed:   {}{}",
                state.fixed_budget(month.year, month.month).format_with_symbol(&symbol),
                if state.custom_fixed_budgets.contains_key(&key) { " (custom)" } else { "" }
            );
        }
        BudgetCommands::Default { amount } => {
            let amount = Money::parse(&amount)?;
            let patch = ExpenseService::new(session.state()).set_default_budget(amount)?;
            session.commit(patch);
            println!("Default monthly budget set to {}", amount.format_with_symbol(&symbol));
        }
        BudgetCommands::FixedDefault { amount } => {
            let amount = Money::parse(&amount)?;
            let patch = ExpenseService::new(session.state()).set_default_fixed_budget(amount)?;
            session.commit(patch);
            println!("Default fixed budget set to {}", amount.format_with_symbol(&symbol));
        }
        BudgetCommands::Set { month, amount } => {
            let month = parse_month_arg(Some(&month))?;
            let amount = Money::parse(&amount)?;
            let patch = ExpenseService::new(session.state()).set_month_budget(month, amount)?;
            session.commit(patch);
            println!(
                "Budget for {} set to {}",
                month.friendly(),
                amount.format_with_symbol(&symbol)
            );
        }
        BudgetCommands::Fixed { month, amount } => {
            let month = parse_month_arg(Some(&month))?;
            let amount = Money::parse(&amount)?;
            let patch = ExpenseService::new(session.state()).set_month_fixed_budget(month, amount)?;
            session.commit(patch);
            println!(
                "Fixed budget for {} set to {}",
                month.friendly(),
                amount.format_with_symbol(&symbol)
            );
        }
        BudgetCommands::Clear { month } => {
            let month = parse_month_arg(Some(&month))?;
            let patch = ExpenseService::new(session.state()).clear_month_budget(month)?;
            if patch.is_empty() {
                println!("{} has no budget overrides", month.friendly());
            } else {
                session.commit(patch);
                println!("Budget overrides for {} removed", month.friendly());
            }
        }
    }

    Ok(())
}
