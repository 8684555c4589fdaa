//! CLI commands for data export

use clap::Subcommand;
use std::path::PathBuf;

use super::report::create_output;
use super::session::{year_or_current, Session};
use crate::error::BudgetResult;
use crate::export::{default_csv_file_name, export_full_json, export_year_csv};

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export a year's daily and fixed expenses to CSV
    Csv {
        /// Year (defaults to current)
        #[arg(short, long)]
        year: Option<i32>,

        /// Output file (defaults to zenbudget_export_<year>.csv in the exports directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the whole budget document to JSON
    Json {
        /// Output file path
        output: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

/// Handle export commands
pub fn handle_export_command(session: &Session, cmd: ExportCommands) -> BudgetResult<()> {
    match cmd {
        ExportCommands::Csv { year, output } => {
            let year = year_or_current(year);
            let output = match output {
                Some(path) => path,
                None => {
                    let dir = session.storage.paths().exports_dir();
                    std::fs::create_dir_all(&dir)?;
                    dir.join(default_csv_file_name(year))
                }
            };

            let rows = export_year_csv(session.state(), year, create_output(&output)?)?;
            println!("Exported {} rows for {} to: {}", rows, year, output.display());
        }
        ExportCommands::Json { output, pretty } => {
            let mut writer = create_output(&output)?;
            export_full_json(session.user(), session.state(), &mut writer, pretty)?;
            println!("Budget document exported to: {}", output.display());
        }
    }

    Ok(())
}
