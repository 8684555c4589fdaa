//! Audit trail for ZenBudget
//!
//! Every state patch produces one or more [`AuditEntry`] records with the
//! value before and after the change. Entries are appended to a JSONL file
//! by [`AuditLogger`] once the patched document has been accepted.
//!
//! ```rust,ignore
//! use zenbudget::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = AuditEntry::create(EntityType::Expense, "2025-03-14", None, &amount)
//!     .for_user("alice");
//! logger.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
