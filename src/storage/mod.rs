//! Storage layer for ZenBudget
//!
//! One JSON document per user, written atomically, with debounced writes
//! coordinated by [`SyncService`].

pub mod debounce;
pub mod document;
pub mod file_io;
pub mod sync;

pub use debounce::Debouncer;
pub use document::{
    initialize_user, validate_user_id, DocumentStore, JsonDocumentStore, MemoryDocumentStore,
};
pub use file_io::{read_json_optional, write_json_atomic};
pub use sync::{StateObserver, SubscriptionId, SyncService, SyncStatus};

use std::time::Duration;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::BudgetPaths;
use crate::error::BudgetError;

/// Main storage coordinator: user documents plus the audit log
pub struct Storage {
    paths: BudgetPaths,
    documents: JsonDocumentStore,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: BudgetPaths) -> Result<Self, BudgetError> {
        paths.ensure_directories()?;

        Ok(Self {
            documents: JsonDocumentStore::new(paths.users_dir()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &BudgetPaths {
        &self.paths
    }

    pub fn documents(&self) -> &JsonDocumentStore {
        &self.documents
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Open a synced session on a user's document
    pub fn open(&self, user: &str, debounce: Duration) -> Result<SyncService<JsonDocumentStore>, BudgetError> {
        validate_user_id(user)?;
        Ok(SyncService::connect(self.documents.clone(), user, debounce))
    }

    /// Append patch audit entries tagged with `user`
    ///
    /// Audit failures are logged rather than failing the edit.
    pub fn record(&self, user: &str, entries: Vec<AuditEntry>) {
        let entries: Vec<AuditEntry> = entries.into_iter().map(|e| e.for_user(user)).collect();
        if let Err(e) = self.audit.log_batch(&entries) {
            tracing::warn!(user, error = %e, "failed to write audit log");
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
