use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use zenbudget::cli::{
    handle_budget_command, handle_expense_command, handle_export_command, handle_fixed_command,
    handle_history, handle_insight, handle_prefs, handle_report_command, handle_scan, Session,
};
use zenbudget::config::{paths::BudgetPaths, settings::Settings};
use zenbudget::storage::{initialize_user, validate_user_id, Storage};

#[derive(Parser)]
#[command(
    name = "zenbudget",
    author = "Kaylee Beyene",
    version,
    about = "Daily expense tracker with monthly budget carry-over",
    long_about = "ZenBudget tracks what you spend each day against a monthly budget. \
                  Whatever is left over (or overspent) carries into the next month, \
                  while rent, bills and other fixed costs are tracked separately."
)]
struct Cli {
    /// Profile to work on
    #[arg(short, long, global = true, env = "ZENBUDGET_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the settings file and the user's budget document
    Init {
        /// Display name for the profile
        #[arg(long)]
        name: Option<String>,
    },

    /// Daily expense commands
    #[command(subcommand, alias = "exp")]
    Expense(zenbudget::cli::ExpenseCommands),

    /// Budget commands
    #[command(subcommand)]
    Budget(zenbudget::cli::BudgetCommands),

    /// Fixed monthly expense commands
    #[command(subcommand)]
    Fixed(zenbudget::cli::FixedCommands),

    /// Month and year reports
    #[command(subcommand)]
    Report(zenbudget::cli::ReportCommands),

    /// Export data to CSV or JSON
    #[command(subcommand)]
    Export(zenbudget::cli::ExportCommands),

    /// Ask the AI advisor about this year's spending
    Insight {
        /// Year (defaults to current)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Scan a receipt image and add it to a day's spending
    Scan {
        /// Receipt image (jpg, png, webp, heic)
        image: PathBuf,
        /// Date (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Show or change display preferences
    Prefs(zenbudget::cli::PrefsArgs),

    /// Show recent changes
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        count: usize,
        /// Include every profile
        #[arg(long)]
        all: bool,
    },

    /// List profiles with a budget document
    Users,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    zenbudget::init_tracing();
    let cli = Cli::parse();

    let paths = BudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(paths.clone())?;

    let user = cli
        .user
        .clone()
        .unwrap_or_else(|| settings.default_user.clone());

    match cli.command {
        Some(Commands::Init { name }) => {
            validate_user_id(&user)?;
            println!("Initializing ZenBudget at: {}", paths.base_dir().display());
            settings.save(&paths)?;

            if initialize_user(storage.documents(), &user, name.as_deref()) {
                println!("Budget document ready for '{}'", user);
            } else {
                println!("Could not create the budget document for '{}'; see the log for details", user);
            }
            println!();
            println!("Run 'zenbudget expense add <amount>' to log today's spending.");
        }
        Some(Commands::Config) => {
            println!("ZenBudget Configuration");
            println!("=======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Users directory:  {}", paths.users_dir().display());
            println!("Exports directory: {}", paths.exports_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Default user:    {}", settings.default_user);
            println!("  Write debounce:  {} ms", settings.sync.debounce_ms);
            println!(
                "  AI endpoint:     {}",
                settings.ai.endpoint.as_deref().unwrap_or("(not set)")
            );
            println!("  AI model:        {}", settings.ai.model);
            println!(
                "  AI key:          {}",
                if settings.ai.api_key().is_some() { "set" } else { "not set" }
            );
        }
        Some(Commands::Users) => {
            let users = storage.documents().list_users()?;
            if users.is_empty() {
                println!("No profiles yet. Run 'zenbudget init' to create one.");
            }
            for name in users {
                let marker = if name == user { "*" } else { " " };
                println!("{} {}", marker, name);
            }
        }
        Some(command) => {
            let mut session = Session::open(storage, settings, &user)?;

            match command {
                Commands::Expense(cmd) => handle_expense_command(&mut session, cmd)?,
                Commands::Budget(cmd) => handle_budget_command(&mut session, cmd)?,
                Commands::Fixed(cmd) => handle_fixed_command(&mut session, cmd)?,
                Commands::Report(cmd) => handle_report_command(&session, cmd)?,
                Commands::Export(cmd) => handle_export_command(&session, cmd)?,
                Commands::Insight { year } => handle_insight(&session, year)?,
                Commands::Scan { image, date } => handle_scan(&mut session, &image, date.as_deref())?,
                Commands::Prefs(args) => handle_prefs(&mut session, args)?,
                Commands::History { count, all } => handle_history(&session, count, all)?,
                Commands::Init { .. } | Commands::Config | Commands::Users => {}
            }

            session.finish()?;
        }
        None => {
            println!("ZenBudget - daily expenses with monthly carry-over");
            println!();
            println!("Run 'zenbudget --help' for usage information.");
        }
    }

    Ok(())
}
