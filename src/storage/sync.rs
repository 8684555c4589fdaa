//! Document synchronisation
//!
//! [`SyncService`] owns the in-memory document for one user. Edits replace
//! the whole state, fan out to observers immediately, and reach the store
//! through a [`Debouncer`]. A store failure never rolls back the in-memory
//! state; it is reported through the status and the observers' `on_error`.

use std::fmt;
use std::time::{Duration, Instant};

use crate::error::{BudgetError, BudgetResult};
use crate::models::BudgetState;

use super::debounce::Debouncer;
use super::document::DocumentStore;

/// Receives pushed document updates
pub trait StateObserver {
    fn on_update(&self, state: &BudgetState);

    fn on_error(&self, _error: &BudgetError) {}
}

/// Handle returned by [`SyncService::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Where the in-memory document stands relative to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Store holds the in-memory state
    Synced,
    /// A write is scheduled
    Pending,
    /// The last write failed; it stays scheduled
    Error,
    /// The store could not be read; edits stay local
    Offline,
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Synced => "synced",
            Self::Pending => "pending",
            Self::Error => "error",
            Self::Offline => "offline",
        };
        f.write_str(label)
    }
}

pub struct SyncService<S: DocumentStore> {
    store: S,
    user: String,
    state: BudgetState,
    status: SyncStatus,
    debouncer: Debouncer<BudgetState>,
    observers: Vec<(SubscriptionId, Box<dyn StateObserver>)>,
    next_subscription: u64,
}

impl<S: DocumentStore> SyncService<S> {
    /// Load the user's document and start tracking it
    ///
    /// A missing document starts from defaults. An unreadable store also
    /// starts from defaults, in [`SyncStatus::Offline`].
    pub fn connect(store: S, user: impl Into<String>, debounce: Duration) -> Self {
        let user = user.into();

        let (state, status) = match store.load(&user) {
            Ok(Some(state)) => (state, SyncStatus::Synced),
            Ok(None) => (BudgetState::default(), SyncStatus::Synced),
            Err(e) => {
                tracing::warn!(user = %user, error = %e, "document store unavailable; working offline");
                (BudgetState::default(), SyncStatus::Offline)
            }
        };

        Self {
            store,
            user,
            state,
            status,
            debouncer: Debouncer::new(debounce),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn state(&self) -> &BudgetState {
        &self.state
    }

    pub fn status(&self) -> SyncStatus {
        self.status
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn has_pending_write(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Register an observer; it is called on every state change
    pub fn subscribe(&mut self, observer: Box<dyn StateObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, observer));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    /// Replace the document and schedule a write
    pub fn apply(&mut self, state: BudgetState) {
        self.apply_at(state, Instant::now());
    }

    pub fn apply_at(&mut self, state: BudgetState, now: Instant) {
        self.state = state;
        self.debouncer.schedule(self.state.clone(), now);
        if self.status != SyncStatus::Offline {
            self.status = SyncStatus::Pending;
        }
        self.notify_update();
    }

    /// Write the pending document if its quiet period is over
    ///
    /// Returns whether a write happened.
    pub fn poll(&mut self, now: Instant) -> BudgetResult<bool> {
        if self.status == SyncStatus::Offline {
            return Ok(false);
        }

        match self.debouncer.take_due(now) {
            Some(state) => self.write(state, now).map(|()| true),
            None => Ok(false),
        }
    }

    /// Write the pending document now
    pub fn flush(&mut self) -> BudgetResult<()> {
        if self.status == SyncStatus::Offline {
            if self.debouncer.is_pending() {
                return Err(BudgetError::Sync(format!(
                    "Document store for '{}' is offline; changes kept locally",
                    self.user
                )));
            }
            return Ok(());
        }

        match self.debouncer.take_pending() {
            Some(state) => self.write(state, Instant::now()),
            None => Ok(()),
        }
    }

    /// Re-read the document from the store and push it to observers
    ///
    /// The stored document wins over any unwritten local edit.
    pub fn reload(&mut self) -> BudgetResult<()> {
        match self.store.load(&self.user) {
            Ok(loaded) => {
                self.debouncer.take_pending();
                self.state = loaded.unwrap_or_default();
                self.status = SyncStatus::Synced;
                self.notify_update();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(user = %self.user, error = %e, "reload failed");
                self.notify_error(&e);
                Err(e)
            }
        }
    }

    fn write(&mut self, state: BudgetState, now: Instant) -> BudgetResult<()> {
        match self.store.save(&self.user, &state) {
            Ok(()) => {
                tracing::debug!(user = %self.user, "document saved");
                if !self.debouncer.is_pending() {
                    self.status = SyncStatus::Synced;
                }
                Ok(())
            }
            Err(e) => {
                tracing::error!(user = %self.user, error = %e, "document save failed");
                self.status = SyncStatus::Error;
                if !self.debouncer.is_pending() {
                    self.debouncer.schedule(state, now);
                }
                let err = BudgetError::Sync(e.to_string());
                self.notify_error(&err);
                Err(err)
            }
        }
    }

    fn notify_update(&self) {
        for (_, observer) in &self.observers {
            observer.on_update(&self.state);
        }
    }

    fn notify_error(&self, error: &BudgetError) {
        for (_, observer) in &self.observers {
            observer.on_error(error);
        }
    }
}
