//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod ai;
pub mod budget;
pub mod expense;
pub mod export;
pub mod fixed;
pub mod history;
pub mod prefs;
pub mod report;
pub mod session;

pub use ai::{handle_insight, handle_scan};
pub use budget::{handle_budget_command, BudgetCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use fixed::{handle_fixed_command, FixedCommands};
pub use history::handle_history;
pub use prefs::{handle_prefs, PrefsArgs};
pub use report::{handle_report_command, ReportCommands};
pub use session::Session;
