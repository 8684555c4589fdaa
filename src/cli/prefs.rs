//! Preference commands

use clap::Args;

use super::session::Session;
use crate::error::{BudgetError, BudgetResult};
use crate::models::ThemeColor;
use crate::services::ExpenseService;

/// Preference options; with none given the current values are shown
#[derive(Args, Debug)]
pub struct PrefsArgs {
    /// Name used when addressing you
    #[arg(long)]
    pub name: Option<String>,

    /// Accent color (violet, blue, emerald, rose, amber)
    #[arg(long)]
    pub theme: Option<String>,

    /// Dark mode on or off
    #[arg(long)]
    pub dark_mode: Option<bool>,
}

pub fn handle_prefs(session: &mut Session, args: PrefsArgs) -> BudgetResult<()> {
    let mut changed = false;

    if let Some(name) = args.name {
        let patch = ExpenseService::new(session.state()).set_display_name(&name)?;
        session.commit(patch);
        changed = true;
    }

    if let Some(theme) = args.theme {
        let theme: ThemeColor = theme.parse().map_err(BudgetError::Validation)?;
        let patch = ExpenseService::new(session.state()).set_theme(theme)?;
        session.commit(patch);
        changed = true;
    }

    if let Some(enabled) = args.dark_mode {
        let patch = ExpenseService::new(session.state()).set_dark_mode(enabled)?;
        session.commit(patch);
        changed = true;
    }

    let state = session.state();
    if changed {
        println!("Preferences updated");
    }
    println!("Name:      {}", state.greeting_name());
    println!("Theme:     {}", state.theme_color);
    println!("Dark mode: {}", if state.is_dark_mode { "on" } else { "off" });
    Ok(())
}
