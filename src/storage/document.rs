//! Per-user document stores
//!
//! A user's whole [`BudgetState`] is one document, saved last-write-wins.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{BudgetError, BudgetResult};
use crate::models::BudgetState;

use super::file_io::{read_json_optional, write_json_atomic};

/// Display names that count as "not set" when a real name becomes available
const PLACEHOLDER_NAMES: [&str; 2] = ["", "Friend"];

/// Loads and saves the budget document for a user
pub trait DocumentStore {
    /// Load a user's document; `None` if the user has none yet
    fn load(&self, user: &str) -> BudgetResult<Option<BudgetState>>;

    /// Replace a user's document
    fn save(&self, user: &str, state: &BudgetState) -> BudgetResult<()>;
}

/// Reject user ids that could escape the users directory
pub fn validate_user_id(user: &str) -> BudgetResult<()> {
    let valid = !user.is_empty()
        && user.len() <= 64
        && user
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        && !user.starts_with('.');

    if valid {
        Ok(())
    } else {
        Err(BudgetError::Validation(format!(
            "Invalid user id '{}': use letters, digits, '-', '_' or '.'",
            user
        )))
    }
}

/// One pretty-printed JSON file per user
#[derive(Debug, Clone)]
pub struct JsonDocumentStore {
    dir: PathBuf,
}

impl JsonDocumentStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path of a user's document
    pub fn document_path(&self, user: &str) -> BudgetResult<PathBuf> {
        validate_user_id(user)?;
        Ok(self.dir.join(format!("{}.json", user)))
    }

    /// Users that have a document, sorted
    pub fn list_users(&self) -> BudgetResult<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut users = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    users.push(stem.to_string());
                }
            }
        }
        users.sort();
        Ok(users)
    }
}

impl DocumentStore for JsonDocumentStore {
    fn load(&self, user: &str) -> BudgetResult<Option<BudgetState>> {
        read_json_optional(self.document_path(user)?)
    }

    fn save(&self, user: &str, state: &BudgetState) -> BudgetResult<()> {
        write_json_atomic(self.document_path(user)?, state)
    }
}

/// In-memory store, used when working without a data directory
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<HashMap<String, BudgetState>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn load(&self, user: &str) -> BudgetResult<Option<BudgetState>> {
        let documents = self
            .documents
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(documents.get(user).cloned())
    }

    fn save(&self, user: &str, state: &BudgetState) -> BudgetResult<()> {
        let mut documents = self
            .documents
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        documents.insert(user.to_string(), state.clone());
        Ok(())
    }
}

/// Make sure a user's document exists
///
/// A new user gets the default document with `display_name` (or "Friend").
/// An existing document whose name is still a placeholder picks up
/// `display_name` when one is given. Store failures are logged and swallowed
/// so the caller can carry on with local-only editing; the return value says
/// whether the document is known to exist.
pub fn initialize_user<S: DocumentStore + ?Sized>(
    store: &S,
    user: &str,
    display_name: Option<&str>,
) -> bool {
    let display_name = display_name.map(str::trim).filter(|n| !n.is_empty());

    let result = store.load(user).and_then(|existing| match existing {
        None => {
            let state = BudgetState {
                display_name: display_name.unwrap_or("Friend").to_string(),
                ..BudgetState::default()
            };
            tracing::info!(user, "creating budget document");
            store.save(user, &state)
        }
        Some(mut state) => match display_name {
            Some(name) if PLACEHOLDER_NAMES.contains(&state.display_name.as_str()) => {
                state.display_name = name.to_string();
                tracing::info!(user, "filling in display name");
                store.save(user, &state)
            }
            _ => Ok(()),
        },
    });

    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(user, error = %e, "could not initialize document; continuing offline");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, JsonDocumentStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonDocumentStore::new(temp_dir.path().join("users"));
        (temp_dir, store)
    }

    #[test]
    fn test_load_missing_user() {
        let (_temp_dir, store) = create_test_store();
        assert!(store.load("alice").unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let (_temp_dir, store) = create_test_store();

        let mut state = BudgetState::default();
        state
            .expenses
            .insert("2025-01-10".into(), Money::from_units(500));
        store.save("alice", &state).unwrap();

        let loaded = store.load("alice").unwrap().unwrap();
        assert_eq!(loaded, state);
        assert_eq!(store.list_users().unwrap(), vec!["alice".to_string()]);
    }

    #[test]
    fn test_rejects_path_like_user_ids() {
        let (_temp_dir, store) = create_test_store();
        for bad in ["", "../etc", "a/b", ".hidden", "with space"] {
            let err = store.load(bad).unwrap_err();
            assert!(err.is_validation(), "{}", bad);
        }
    }

    #[test]
    fn test_initialize_new_user() {
        let store = MemoryDocumentStore::new();
        assert!(initialize_user(&store, "bob", None));

        let state = store.load("bob").unwrap().unwrap();
        assert_eq!(state.display_name, "Friend");
        assert_eq!(state.default_monthly_budget, Money::from_units(3100));
    }

    #[test]
    fn test_initialize_fills_placeholder_name_only() {
        let store = MemoryDocumentStore::new();
        initialize_user(&store, "bob", None);
        initialize_user(&store, "bob", Some("Bob"));
        assert_eq!(store.load("bob").unwrap().unwrap().display_name, "Bob");

        initialize_user(&store, "bob", Some("Robert"));
        assert_eq!(store.load("bob").unwrap().unwrap().display_name, "Bob");
    }

    #[test]
    fn test_initialize_swallows_store_errors() {
        let (temp_dir, store) = create_test_store();
        std::fs::create_dir_all(temp_dir.path().join("users")).unwrap();
        std::fs::write(temp_dir.path().join("users").join("carol.json"), "{broken").unwrap();

        assert!(!initialize_user(&store, "carol", Some("Carol")));
    }
}
