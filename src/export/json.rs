//! JSON export of the full budget document
//!
//! Wraps the document with a schema version and some metadata so an export
//! can be checked before it is loaded back.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BudgetError, BudgetResult};
use crate::models::BudgetState;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full document export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub user: String,

    pub state: BudgetState,

    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub expense_count: usize,

    pub fixed_expense_count: usize,

    pub earliest_expense: Option<String>,

    pub latest_expense: Option<String>,
}

impl FullExport {
    pub fn from_state(user: &str, state: &BudgetState) -> Self {
        let metadata = ExportMetadata {
            expense_count: state.expenses.len(),
            fixed_expense_count: state.monthly_fixed_expenses.values().map(Vec::len).sum(),
            earliest_expense: state.expenses.keys().next().cloned(),
            latest_expense: state.expenses.keys().next_back().cloned(),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            user: user.to_string(),
            state: state.clone(),
            metadata,
        }
    }

    /// Check the schema version and that the metadata matches the document
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        if self.metadata.expense_count != self.state.expenses.len() {
            return Err(format!(
                "Expense count mismatch: metadata says {}, document has {}",
                self.metadata.expense_count,
                self.state.expenses.len()
            ));
        }

        for items in self.state.monthly_fixed_expenses.values() {
            for item in items {
                item.validate()
                    .map_err(|e| format!("Fixed expense {}: {}", item.id, e))?;
            }
        }

        Ok(())
    }
}

/// Write the full export as JSON
pub fn export_full_json<W: Write>(
    user: &str,
    state: &BudgetState,
    writer: &mut W,
    pretty: bool,
) -> BudgetResult<()> {
    let export = FullExport::from_state(user, state);

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    }
    .map_err(|e| BudgetError::Export(format!("Failed to write JSON: {}", e)))?;

    writeln!(writer).map_err(|e| BudgetError::Export(e.to_string()))?;
    Ok(())
}
