//! Audit history command

use super::session::Session;
use crate::error::BudgetResult;

/// Show the most recent changes to the current user's document
pub fn handle_history(session: &Session, count: usize, all_users: bool) -> BudgetResult<()> {
    let user = (!all_users).then(|| session.user());
    let entries = session.storage.audit().read_recent(count, user)?;

    if entries.is_empty() {
        println!("No changes recorded yet.");
        return Ok(());
    }

    for entry in entries.iter().rev() {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
