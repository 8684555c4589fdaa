//! CLI commands for reports

use clap::Subcommand;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use super::session::{parse_month_arg, year_or_current, Session};
use crate::error::{BudgetError, BudgetResult};
use crate::reports::{MonthReport, YearReport};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Day-by-day report for a month
    Month {
        /// Month (e.g., "2025-01", "current", "last")
        month: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Month-by-month overview of a year
    Year {
        /// Year (defaults to current)
        year: Option<i32>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a report command
pub fn handle_report_command(session: &Session, cmd: ReportCommands) -> BudgetResult<()> {
    match cmd {
        ReportCommands::Month { month, output } => {
            let month = parse_month_arg(month.as_deref())?;
            let report = MonthReport::generate(session.state(), month);

            match output {
                Some(path) => {
                    report.export_csv(create_output(&path)?)?;
                    println!("Month report exported to: {}", path.display());
                }
                None => print!("{}", report.format_terminal(session.currency())),
            }
        }
        ReportCommands::Year { year, output } => {
            let report = YearReport::generate(session.state(), year_or_current(year));

            match output {
                Some(path) => {
                    report.export_csv(create_output(&path)?)?;
                    println!("Year report exported to: {}", path.display());
                }
                None => print!("{}", report.format_terminal(session.currency())),
            }
        }
    }

    Ok(())
}

pub(super) fn create_output(path: &Path) -> BudgetResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        BudgetError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
