//! Command session
//!
//! Opens one user's document for the duration of a command, applies patches
//! through the sync service, and on `finish` writes the document and the
//! audit entries for every accepted patch.

use chrono::{Duration as ChronoDuration, Local, NaiveDate};

use crate::audit::AuditEntry;
use crate::config::settings::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{key_for_date, parse_date_key, BudgetState, Month};
use crate::services::Patch;
use crate::storage::{JsonDocumentStore, StateObserver, Storage, SyncService, SyncStatus};

/// Logs document updates and sync failures
struct TracingObserver;

impl StateObserver for TracingObserver {
    fn on_update(&self, state: &BudgetState) {
        tracing::debug!(days = state.expenses.len(), "document updated");
    }

    fn on_error(&self, error: &BudgetError) {
        tracing::warn!(error = %error, "document sync failed");
    }
}

pub struct Session {
    pub storage: Storage,
    pub settings: Settings,
    sync: SyncService<JsonDocumentStore>,
    pending_audit: Vec<AuditEntry>,
}

impl Session {
    pub fn open(storage: Storage, settings: Settings, user: &str) -> BudgetResult<Self> {
        let mut sync = storage.open(user, settings.sync.debounce())?;
        sync.subscribe(Box::new(TracingObserver));

        if sync.status() == SyncStatus::Offline {
            eprintln!("Warning: could not read the budget document; changes will not be saved.");
        }

        Ok(Self {
            storage,
            settings,
            sync,
            pending_audit: Vec::new(),
        })
    }

    pub fn user(&self) -> &str {
        self.sync.user()
    }

    pub fn state(&self) -> &BudgetState {
        self.sync.state()
    }

    pub fn currency(&self) -> &str {
        &self.settings.currency_symbol
    }

    /// Apply an accepted patch to the in-memory document
    pub fn commit(&mut self, patch: Patch) {
        if patch.is_empty() {
            return;
        }
        self.pending_audit.extend(patch.audit);
        self.sync.apply(patch.state);
    }

    /// Write the document, then the audit entries it covers
    pub fn finish(mut self) -> BudgetResult<()> {
        self.sync.flush()?;
        let entries = std::mem::take(&mut self.pending_audit);
        self.storage.record(self.sync.user(), entries);
        Ok(())
    }
}

/// Parse a date argument: `YYYY-MM-DD`, `today` or `yesterday`
pub fn parse_date_arg(arg: Option<&str>) -> BudgetResult<String> {
    let today = Local::now().date_naive();
    let date = match arg.map(str::trim) {
        None | Some("today") => today,
        Some("yesterday") => today - ChronoDuration::days(1),
        Some(s) => parse_date_key(s)?,
    };
    Ok(key_for_date(date))
}

/// Parse a month argument: `YYYY-MM`, `current`, `last` or `next`
pub fn parse_month_arg(arg: Option<&str>) -> BudgetResult<Month> {
    let current = Month::current();
    match arg.map(str::trim) {
        None | Some("current") => Ok(current),
        Some("last") | Some("prev") => Ok(current.prev()),
        Some("next") => Ok(current.next()),
        Some(s) => Ok(Month::parse(s)?),
    }
}

/// Year argument, defaulting to this year
pub fn year_or_current(year: Option<i32>) -> i32 {
    year.unwrap_or_else(|| Month::current().year)
}

/// Month a date key falls in
pub fn month_of(date: &str) -> BudgetResult<Month> {
    let date: NaiveDate = parse_date_key(date)?;
    Ok(Month::of(date))
}
